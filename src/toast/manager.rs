// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `ToastManager` turns notification requests into live toasts: it drops
//! duplicates of a message already on screen, resolves the kind's template,
//! instantiates and presents it, and schedules its removal. Manual and
//! automatic dismissal converge on the same idempotent removal path.

use super::container::Container;
use super::instance::{ToastId, ToastInstance, ToastPhase, TRANSITION_CLASSES};
use super::kind::ToastKind;
use super::request::NotificationRequest;
use super::template::{TemplateCache, TemplateSource};
use crate::config::Config;
use crate::error::Result;
use crate::locale::{DocumentLocale, TextDirection};
use crate::markup::{self, parse_fragment, Element};
use crate::trigger::{self, Exchange};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Alignment class added to the message slot in right-to-left documents.
const RTL_TEXT_CLASS: &str = "text-right";

struct Inner<S> {
    container: Mutex<Container>,
    templates: TemplateCache<S>,
    locale: watch::Receiver<DocumentLocale>,
    default_duration: Duration,
    exit_animation: Duration,
}

/// Handle to the page's toast container. Cloning shares the same container.
pub struct ToastManager<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for ToastManager<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TemplateSource> ToastManager<S> {
    /// Creates the manager, reusing `existing_container` when the page
    /// already renders one.
    pub fn new(
        config: &Config,
        source: S,
        locale: watch::Receiver<DocumentLocale>,
        existing_container: Option<Element>,
    ) -> Self {
        let direction = locale.borrow().direction();
        let container =
            Container::locate_or_create(existing_container, &config.container_id, direction);
        Self {
            inner: Arc::new(Inner {
                container: Mutex::new(container),
                templates: TemplateCache::new(source),
                locale,
                default_duration: config.default_duration(),
                exit_animation: config.exit_animation(),
            }),
        }
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateCache<S> {
        &self.inner.templates
    }

    /// Shows a toast of `kind` with `message`, auto-dismissed after `duration`
    /// (zero keeps it until dismissed).
    ///
    /// Returns `Ok(None)` when a live toast already shows `message`.
    pub async fn request(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> Result<Option<ToastId>> {
        self.request_notification(NotificationRequest::new(kind, message).with_duration(duration))
            .await
    }

    /// Shows the toast described by `request`.
    ///
    /// Either exactly one toast is attached when this returns `Ok(Some(_))`,
    /// or nothing was attached. Auto-dismiss needs a Tokio runtime; polled
    /// elsewhere the toast stays until dismissed.
    pub async fn request_notification(
        &self,
        request: NotificationRequest,
    ) -> Result<Option<ToastId>> {
        let NotificationRequest { kind, message, .. } = &request;

        if self.inner.container.lock().contains_message(message) {
            log::debug!("Toast {message:?} is already shown");
            return Ok(None);
        }

        let markup = self.inner.templates.get(*kind).await.inspect_err(|err| {
            log::error!("Could not show {kind} toast: {err}");
        })?;
        let element = parse_fragment(&markup).inspect_err(|err| {
            log::error!("Template for {kind} toast is unusable: {err}");
        })?;

        let mut instance =
            ToastInstance::from_template(*kind, message, element).inspect_err(|err| {
                log::error!("Template for {kind} toast is unusable: {err}");
            })?;
        let direction = self.inner.locale.borrow().direction();
        if direction.is_rtl() {
            mirror_for_rtl(instance.element_mut());
        }
        instance.element_mut().add_classes(TRANSITION_CLASSES);
        instance.apply_hidden_state();
        let id = instance.id().clone();

        let mut container = self.inner.container.lock();
        // Another request for the same message may have landed during the fetch.
        if container.contains_message(message) {
            log::debug!("Toast {message:?} was shown while its template loaded");
            return Ok(None);
        }
        container.attach(instance);
        container.flush_layout();

        if let Some(toast) = container.get_mut(&id) {
            toast.apply_visible_state();
            toast.advance(ToastPhase::Visible);
            if let Some(timer) = request
                .auto_dismiss(self.inner.default_duration)
                .and_then(|delay| self.schedule_dismiss(id.clone(), delay))
            {
                toast.set_dismiss_timer(timer);
            }
        }
        log::info!("Showing {kind} toast {id}");
        Ok(Some(id))
    }

    /// Starts removing a toast. Returns `false` if it is already gone or
    /// already leaving.
    pub fn dismiss(&self, id: &ToastId) -> bool {
        dismiss(&self.inner, id)
    }

    /// Dismissal through the toast's own dismiss control.
    ///
    /// Returns `false` when the toast is gone or its template has no control.
    pub fn click_dismiss(&self, id: &ToastId) -> bool {
        let has_control = self
            .inner
            .container
            .lock()
            .get(id)
            .is_some_and(ToastInstance::has_dismiss_control);
        has_control && self.dismiss(id)
    }

    /// Starts removing every live toast; returns how many were affected.
    pub fn dismiss_all(&self) -> usize {
        self.active_ids()
            .iter()
            .filter(|id| self.dismiss(id))
            .count()
    }

    /// Handles a raw `HX-Trigger` header value.
    pub async fn handle_trigger_header(&self, header: &str) -> Result<Option<ToastId>> {
        let payload = trigger::decode(header).inspect_err(|err| {
            log::error!("Error parsing HX-Trigger header: {err}");
        })?;
        match payload.show_toast {
            Some(request) => self.request_notification(request).await,
            None => Ok(None),
        }
    }

    /// Reacts to a completed hypermedia exchange.
    ///
    /// Failed exchanges are handled too: error responses carry error toasts.
    pub async fn on_exchange_complete(&self, exchange: &Exchange) -> Result<Option<ToastId>> {
        match exchange.trigger_header()? {
            Some(header) => self.handle_trigger_header(header).await,
            None => Ok(None),
        }
    }

    fn schedule_dismiss(&self, id: ToastId, delay: Duration) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("No runtime to auto-dismiss toast {id}; it stays until dismissed");
            return None;
        };
        let inner = Arc::downgrade(&self.inner);
        Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = inner.upgrade() {
                dismiss(&inner, &id);
            }
        }))
    }
}

impl<S> ToastManager<S> {
    /// Identifiers of live toasts, oldest first.
    #[must_use]
    pub fn active_ids(&self) -> Vec<ToastId> {
        self.inner
            .container
            .lock()
            .toasts()
            .map(|toast| toast.id().clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.container.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.container.lock().is_empty()
    }

    #[must_use]
    pub fn phase(&self, id: &ToastId) -> Option<ToastPhase> {
        self.inner.container.lock().get(id).map(ToastInstance::phase)
    }

    /// Copy of a live toast's element.
    #[must_use]
    pub fn element(&self, id: &ToastId) -> Option<Element> {
        self.inner
            .container
            .lock()
            .get(id)
            .map(|toast| toast.element().clone())
    }

    #[must_use]
    pub fn has_dismiss_timer(&self, id: &ToastId) -> bool {
        self.inner
            .container
            .lock()
            .get(id)
            .is_some_and(ToastInstance::has_dismiss_timer)
    }

    #[must_use]
    pub fn layout_flushes(&self) -> u64 {
        self.inner.container.lock().layout_flushes()
    }

    /// Container markup with all live toasts.
    #[must_use]
    pub fn render(&self) -> String {
        self.inner.container.lock().render()
    }

    #[must_use]
    pub fn direction(&self) -> TextDirection {
        self.inner.locale.borrow().direction()
    }
}

fn dismiss<S: TemplateSource>(inner: &Arc<Inner<S>>, id: &ToastId) -> bool {
    {
        let mut container = inner.container.lock();
        let Some(toast) = container.get_mut(id) else {
            log::debug!("Toast {id} already removed");
            return false;
        };
        if !toast.advance(ToastPhase::Dismissing) {
            log::debug!("Toast {id} is already leaving");
            return false;
        }
        toast.apply_hidden_state();
    }

    let delay = inner.exit_animation;
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) if !delay.is_zero() => {
            let inner: Weak<Inner<S>> = Arc::downgrade(inner);
            let id = id.clone();
            runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some(inner) = inner.upgrade() {
                    detach(&inner, &id);
                }
            });
        }
        _ => detach(inner, id),
    }
    true
}

/// Final removal; a toast that is no longer attached is left alone.
fn detach<S>(inner: &Inner<S>, id: &ToastId) {
    if let Some(mut toast) = inner.container.lock().detach(id) {
        toast.advance(ToastPhase::Removed);
        log::debug!("Removed toast {id}");
    }
}

/// Flips a toast to its right-to-left variant: the message is right-aligned
/// and start margins (`ms-*`) become end margins (`me-*`).
fn mirror_for_rtl(element: &mut Element) {
    if let Some(slot) = element.find_mut(&markup::is_message_slot) {
        slot.add_class(RTL_TEXT_CLASS);
    }
    element.for_each_mut(&mut |el: &mut Element| {
        el.map_classes(|class| class.strip_prefix("ms-").map(|value| format!("me-{value}")));
    });
}
