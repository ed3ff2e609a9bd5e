// SPDX-License-Identifier: MPL-2.0
//! Inbound notification events and the listener that serves them.
//!
//! Page code posts [`ToastEvent`]s on an [`EventBus`]; one listener task per
//! [`EventReceiver`] feeds them to the manager. Registering the listener
//! consumes the receiver, so a page cannot subscribe twice to the same bus.

use super::manager::ToastManager;
use super::request::NotificationRequest;
use super::template::TemplateSource;
use crate::config::Config;
use crate::locale::DocumentLocale;
use crate::markup::Element;
use crate::trigger::Exchange;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub enum ToastEvent {
    /// Direct request from page code.
    Show(NotificationRequest),
    /// A hypermedia exchange finished; its trigger header may request a toast.
    ExchangeCompleted(Exchange),
}

/// Sending half; cheap to clone and hand to page code.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<ToastEvent>,
}

/// Receiving half, consumed by [`ToastManager::listen`].
#[derive(Debug)]
pub struct EventReceiver {
    receiver: mpsc::UnboundedReceiver<ToastEvent>,
}

impl EventBus {
    #[must_use]
    pub fn channel() -> (EventBus, EventReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (EventBus { sender }, EventReceiver { receiver })
    }

    /// Posts an event. Returns `false` once the listener is gone.
    pub fn post(&self, event: ToastEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    pub fn show_toast(&self, request: NotificationRequest) -> bool {
        self.post(ToastEvent::Show(request))
    }

    pub fn exchange_completed(&self, exchange: Exchange) -> bool {
        self.post(ToastEvent::ExchangeCompleted(exchange))
    }
}

impl<S: TemplateSource> ToastManager<S> {
    /// Serves events until every [`EventBus`] clone is dropped.
    ///
    /// Each event is handled on its own task so a slow template fetch does
    /// not hold up the events behind it. Failures are logged and dropped.
    pub fn listen(&self, events: EventReceiver) -> JoinHandle<()> {
        let manager = self.clone();
        let mut receiver = events.receiver;
        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                let manager = manager.clone();
                tokio::spawn(async move {
                    let outcome = match event {
                        ToastEvent::Show(request) => manager.request_notification(request).await,
                        ToastEvent::ExchangeCompleted(exchange) => {
                            manager.on_exchange_complete(&exchange).await
                        }
                    };
                    if let Err(err) = outcome {
                        log::warn!("Toast event dropped: {err}");
                    }
                });
            }
            log::debug!("Toast event bus closed");
        })
    }
}

/// A running toast system: the manager, its event bus and listener task.
pub struct ToastSystem<S> {
    pub manager: ToastManager<S>,
    pub bus: EventBus,
    listener: JoinHandle<()>,
}

impl<S: TemplateSource> ToastSystem<S> {
    /// Stops the listener. Toasts already on screen keep their timers.
    pub async fn shutdown(self) {
        self.listener.abort();
        let _ = self.listener.await;
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        !self.listener.is_finished()
    }
}

/// Page bootstrap: builds the manager and registers its one listener.
///
/// Must be called from within a Tokio runtime.
pub fn bootstrap<S: TemplateSource>(
    config: &Config,
    source: S,
    locale: watch::Receiver<DocumentLocale>,
    existing_container: Option<Element>,
) -> ToastSystem<S> {
    let manager = ToastManager::new(config, source, locale, existing_container);
    let (bus, receiver) = EventBus::channel();
    let listener = manager.listen(receiver);
    log::debug!("Toast system initialized");
    ToastSystem {
        manager,
        bus,
        listener,
    }
}
