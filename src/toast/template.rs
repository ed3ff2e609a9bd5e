// SPDX-License-Identifier: MPL-2.0
//! Template retrieval and the per-kind template cache.
//!
//! Templates are fetched from `GET /toast/{kind}` and kept for the lifetime of
//! the cache. Concurrent first requests for one kind share a single fetch; a
//! failed fetch is not cached, so the next request tries again.

use super::kind::ToastKind;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Somewhere toast templates come from.
pub trait TemplateSource: Send + Sync + 'static {
    /// Returns the markup fragment for `kind`.
    fn fetch(&self, kind: ToastKind) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches templates over HTTP from `{base_url}/toast/{kind}`.
#[derive(Debug, Clone)]
pub struct HttpTemplateSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTemplateSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn url_for(&self, kind: ToastKind) -> String {
        format!("{}{}", self.base_url, kind.template_path())
    }

    async fn get(&self, kind: ToastKind) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(self.url_for(kind))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, kind: ToastKind) -> Result<String> {
        self.get(kind).await.map_err(|err| Error::TemplateFetch {
            kind,
            reason: err.to_string(),
        })
    }
}

/// Templates held in memory, with a per-kind fetch counter.
///
/// Useful for pages that inline their templates and for tests.
#[derive(Debug, Default)]
pub struct InMemoryTemplates {
    templates: HashMap<ToastKind, String>,
    fetches: [AtomicUsize; 4],
    latency: Option<Duration>,
}

impl InMemoryTemplates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, kind: ToastKind, markup: impl Into<String>) -> Self {
        self.templates.insert(kind, markup.into());
        self
    }

    /// Delays every fetch, simulating a slow server.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of fetches performed for `kind`, successful or not.
    #[must_use]
    pub fn fetch_count(&self, kind: ToastKind) -> usize {
        self.fetches[kind as usize].load(Ordering::SeqCst)
    }
}

impl TemplateSource for InMemoryTemplates {
    async fn fetch(&self, kind: ToastKind) -> Result<String> {
        self.fetches[kind as usize].fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.templates
            .get(&kind)
            .cloned()
            .ok_or_else(|| Error::TemplateFetch {
                kind,
                reason: "no template registered".into(),
            })
    }
}

impl<S: TemplateSource> TemplateSource for Arc<S> {
    fn fetch(&self, kind: ToastKind) -> impl Future<Output = Result<String>> + Send {
        (**self).fetch(kind)
    }
}

/// Lazily populated, never invalidated cache of templates by kind.
#[derive(Debug)]
pub struct TemplateCache<S> {
    source: S,
    slots: Mutex<HashMap<ToastKind, Arc<OnceCell<String>>>>,
}

impl<S: TemplateSource> TemplateCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the template for `kind`, fetching it on first use.
    pub async fn get(&self, kind: ToastKind) -> Result<String> {
        let slot = Arc::clone(self.slots.lock().entry(kind).or_default());
        slot.get_or_try_init(|| async {
            log::debug!("Fetching toast template {}", kind.template_path());
            self.source.fetch(kind).await
        })
        .await
        .cloned()
    }

    #[must_use]
    pub fn is_cached(&self, kind: ToastKind) -> bool {
        self.slots
            .lock()
            .get(&kind)
            .is_some_and(|slot| slot.initialized())
    }
}
