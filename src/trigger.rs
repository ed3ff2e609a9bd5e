// SPDX-License-Identifier: MPL-2.0
//! `HX-Trigger` response header handling.
//!
//! Inbound, a completed exchange may carry a JSON object whose `showToast`
//! entry requests a notification. Outbound, [`add_toast`] lets a handler
//! merge such an entry into its response headers.

use crate::error::{Error, Result};
use crate::toast::NotificationRequest;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const HX_TRIGGER: &str = "hx-trigger";
pub const HX_REQUEST: &str = "hx-request";

/// Key of the toast entry inside the trigger object.
pub const SHOW_TOAST: &str = "showToast";

/// The parts of a trigger payload the toast manager understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriggerPayload {
    #[serde(rename = "showToast", default)]
    pub show_toast: Option<NotificationRequest>,
}

/// Decodes an `HX-Trigger` header value.
///
/// Plain event names (`"refresh, close"`) carry no data and decode to an
/// empty payload. A JSON object that does not parse is an error.
pub fn decode(header: &str) -> Result<TriggerPayload> {
    let trimmed = header.trim();
    if !trimmed.starts_with('{') {
        return Ok(TriggerPayload::default());
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// A completed hypermedia exchange as seen by page listeners.
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    pub path: String,
    pub successful: bool,
    pub headers: HeaderMap,
}

impl Exchange {
    pub fn new(path: impl Into<String>, successful: bool) -> Self {
        Self {
            path: path.into(),
            successful,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a response header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Http(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Http(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Raw `HX-Trigger` value, if present.
    pub fn trigger_header(&self) -> Result<Option<&str>> {
        self.headers
            .get(HX_TRIGGER)
            .map(|value| {
                std::str::from_utf8(value.as_bytes())
                    .map_err(|e| Error::Trigger(format!("header is not UTF-8: {e}")))
            })
            .transpose()
    }
}

/// Adds a `showToast` entry to the response's `HX-Trigger` header.
///
/// Only hypermedia requests (`HX-Request: true`) get the header; returns
/// whether it was written. Other trigger entries already present are kept; an
/// existing value that is not a JSON object is replaced.
pub fn add_toast(
    request_headers: &HeaderMap,
    response_headers: &mut HeaderMap,
    toast: &NotificationRequest,
) -> Result<bool> {
    let is_hx = request_headers
        .get(HX_REQUEST)
        .is_some_and(|value| value.as_bytes() == b"true");
    if !is_hx {
        return Ok(false);
    }

    let mut triggers = response_headers
        .get(HX_TRIGGER)
        .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
        .and_then(|raw| serde_json::from_str::<Map<String, Value>>(raw).ok())
        .unwrap_or_default();
    triggers.insert(SHOW_TOAST.to_string(), serde_json::to_value(toast)?);

    let encoded = ascii_json(&Value::Object(triggers).to_string());
    let value = HeaderValue::from_str(&encoded)
        .map_err(|e| Error::Http(format!("invalid trigger header: {e}")))?;
    response_headers.insert(HX_TRIGGER, value);
    Ok(true)
}

/// Escapes non-ASCII characters of serialized JSON as `\uXXXX`, since header
/// values must be visible ASCII.
fn ascii_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastKind;

    fn hx_request() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HX_REQUEST, HeaderValue::from_static("true"));
        headers
    }

    #[test]
    fn decodes_show_toast_entry() {
        let payload = decode(
            r#"{"showToast":{"kind":"error","message":"Save failed","durationMs":3000},"other":1}"#,
        )
        .unwrap();
        let toast = payload.show_toast.unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Save failed");
        assert_eq!(toast.duration_ms, Some(3000));
    }

    #[test]
    fn object_without_toast_is_empty() {
        assert_eq!(decode(r#"{"refreshList":true}"#).unwrap(), TriggerPayload::default());
    }

    #[test]
    fn plain_event_names_are_empty() {
        assert_eq!(decode("refreshList, closeModal").unwrap(), TriggerPayload::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(decode("{\"showToast\":"), Err(Error::Trigger(_))));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(decode(r#"{"showToast":{"kind":"../../admin","message":"x"}}"#).is_err());
    }

    #[test]
    fn add_toast_skips_non_hypermedia_requests() {
        let mut response = HeaderMap::new();
        let written = add_toast(
            &HeaderMap::new(),
            &mut response,
            &NotificationRequest::new(ToastKind::Success, "ok"),
        )
        .unwrap();
        assert!(!written);
        assert!(response.get(HX_TRIGGER).is_none());
    }

    #[test]
    fn add_toast_merges_with_existing_triggers() {
        let mut response = HeaderMap::new();
        response.insert(HX_TRIGGER, HeaderValue::from_static(r#"{"refreshList":true}"#));

        let toast = NotificationRequest::new(ToastKind::Success, "Item created");
        assert!(add_toast(&hx_request(), &mut response, &toast).unwrap());

        let raw = response.get(HX_TRIGGER).unwrap().to_str().unwrap();
        let value: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(value["refreshList"], Value::Bool(true));
        assert_eq!(decode(raw).unwrap().show_toast, Some(toast));
    }

    #[test]
    fn add_toast_replaces_invalid_existing_header() {
        let mut response = HeaderMap::new();
        response.insert(HX_TRIGGER, HeaderValue::from_static("not json"));
        add_toast(
            &hx_request(),
            &mut response,
            &NotificationRequest::new(ToastKind::Info, "hi"),
        )
        .unwrap();
        let raw = response.get(HX_TRIGGER).unwrap().to_str().unwrap();
        assert!(decode(raw).unwrap().show_toast.is_some());
    }

    #[test]
    fn non_ascii_messages_survive_the_header() {
        let mut response = HeaderMap::new();
        let toast = NotificationRequest::new(ToastKind::Success, "تم الحفظ 🎉");
        add_toast(&hx_request(), &mut response, &toast).unwrap();

        let exchange = Exchange {
            headers: response,
            ..Exchange::new("/items", true)
        };
        let raw = exchange.trigger_header().unwrap().unwrap();
        assert!(raw.is_ascii());
        assert_eq!(decode(raw).unwrap().show_toast.unwrap().message, "تم الحفظ 🎉");
    }

    #[test]
    fn exchange_without_trigger_header() {
        let exchange = Exchange::new("/items", true);
        assert_eq!(exchange.trigger_header().unwrap(), None);
    }
}
