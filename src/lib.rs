// SPDX-License-Identifier: MPL-2.0
//! `hx_toast` manages toast notifications for server-rendered pages driven by
//! hypermedia exchanges.
//!
//! It decodes the `HX-Trigger` header of completed exchanges, fetches and
//! caches one markup template per toast kind, and runs each toast through its
//! enter, auto-dismiss and exit lifecycle inside a single container.

#![doc(html_root_url = "https://docs.rs/hx_toast/0.1.0")]

pub mod config;
pub mod error;
pub mod locale;
pub mod markup;
pub mod toast;
pub mod trigger;
