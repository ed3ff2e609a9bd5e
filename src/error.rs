// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Every variant carries owned strings so errors stay `Clone` and can be
//! handed to log records and to several awaiting callers at once (a shared
//! template fetch reports the same failure to everyone waiting on it).

use crate::toast::ToastKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A notification category outside the closed set of toast kinds.
    #[error("unknown toast kind: {0:?}")]
    UnknownKind(String),

    /// The template for a kind could not be retrieved.
    #[error("failed to fetch template for {kind}: {reason}")]
    TemplateFetch { kind: ToastKind, reason: String },

    /// A fetched template is not usable markup.
    #[error("template error: {0}")]
    Template(String),

    /// A trigger header did not contain a well-formed payload.
    #[error("malformed trigger payload: {0}")]
    Trigger(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Trigger(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
