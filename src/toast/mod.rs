// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for server-rendered pages.
//!
//! Toasts are transient notifications rendered into one fixed-position
//! container. Requests come from page code or from the `HX-Trigger` header of
//! completed hypermedia exchanges; templates for each kind are fetched from
//! `GET /toast/{kind}` once and reused.
//!
//! # Components
//!
//! - [`kind`] - `ToastKind`, the closed set of categories
//! - [`request`] - `NotificationRequest` as decoded from triggers
//! - [`instance`] - live toasts and their `ToastPhase` lifecycle
//! - [`container`] - the container element and its active set
//! - [`template`] - template sources and the shared-fetch cache
//! - [`manager`] - `ToastManager`, deduplication and timing
//! - [`events`] - the event bus, listener and page bootstrap
//!
//! # Usage
//!
//! ```ignore
//! use hx_toast::toast::{bootstrap, HttpTemplateSource, NotificationRequest, ToastKind};
//!
//! let system = bootstrap(&config, HttpTemplateSource::new(&config.base_url), locale, None);
//! system.bus.show_toast(NotificationRequest::new(ToastKind::Success, "Saved"));
//! ```
//!
//! # Design Considerations
//!
//! - Deduplication is by rendered message text across all live toasts
//! - Default auto-dismiss: 10s; a duration of zero means manual dismiss only
//! - Exit animation: 300ms between the exit state and detaching
//! - Position: top-right, top-left for right-to-left documents

pub mod container;
pub mod events;
pub mod instance;
pub mod kind;
pub mod manager;
pub mod request;
pub mod template;

pub use container::Container;
pub use events::{bootstrap, EventBus, EventReceiver, ToastEvent, ToastSystem};
pub use instance::{ToastId, ToastInstance, ToastPhase};
pub use kind::ToastKind;
pub use manager::ToastManager;
pub use request::NotificationRequest;
pub use template::{HttpTemplateSource, InMemoryTemplates, TemplateCache, TemplateSource};
