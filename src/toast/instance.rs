// SPDX-License-Identifier: MPL-2.0
//! Live toast instances and their lifecycle states.

use super::kind::ToastKind;
use crate::error::{Error, Result};
use crate::markup::{self, Element};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

/// Classes present while a toast is off-screen (entering or leaving).
pub const HIDDEN_CLASSES: &str = "opacity-0 translate-y-4";

/// Classes driving the enter/exit transition.
pub const TRANSITION_CLASSES: &str = "transition-all duration-300";

/// Unique identifier of a toast, also used as its element `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastId(String);

impl ToastId {
    /// Creates an identifier from the wall clock and a process-wide sequence.
    pub fn generate() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let now = chrono::Utc::now();
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let jitter = u64::from(now.timestamp_subsec_nanos()) % 1000;
        Self(format!("toast-{}-{jitter:03}{seq}", now.timestamp_millis()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of one toast.
///
/// `Entering → Visible → Dismissing → Removed`. Dismissal may also start
/// while still entering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Attached in the hidden state, waiting for the layout flush.
    Entering,
    /// Shown; auto-dismiss may be pending.
    Visible,
    /// Exit state applied, detach scheduled after the exit animation.
    Dismissing,
    /// Detached from the container.
    Removed,
}

impl ToastPhase {
    #[must_use]
    pub fn can_transition_to(self, next: ToastPhase) -> bool {
        matches!(
            (self, next),
            (ToastPhase::Entering, ToastPhase::Visible)
                | (ToastPhase::Entering | ToastPhase::Visible, ToastPhase::Dismissing)
                | (ToastPhase::Dismissing, ToastPhase::Removed)
        )
    }

}

/// A toast owned by the container's active set.
#[derive(Debug)]
pub struct ToastInstance {
    id: ToastId,
    kind: ToastKind,
    message: String,
    element: Element,
    phase: ToastPhase,
    has_dismiss_control: bool,
    dismiss_timer: Option<JoinHandle<()>>,
}

impl ToastInstance {
    /// Builds an instance from a parsed template.
    ///
    /// Writes `message` into the message slot, stamps the id and wires the
    /// dismiss control (if any) to the new id. A template without a message
    /// slot is rejected.
    pub fn from_template(kind: ToastKind, message: &str, mut element: Element) -> Result<Self> {
        let slot = element
            .find_mut(&markup::is_message_slot)
            .ok_or_else(|| Error::Template(format!("{kind} template has no message slot")))?;
        slot.set_text_content(message);

        let id = ToastId::generate();
        element.set_id(id.as_str());

        let has_dismiss_control = match element.find_mut(&markup::is_dismiss_control) {
            Some(button) => {
                button.set_attribute("data-dismiss-target", format!("#{id}"));
                true
            }
            None => false,
        };

        Ok(Self {
            id,
            kind,
            message: message.to_string(),
            element,
            phase: ToastPhase::Entering,
            has_dismiss_control,
            dismiss_timer: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text currently rendered in the message slot.
    #[must_use]
    pub fn rendered_message(&self) -> Option<String> {
        self.element
            .find(&markup::is_message_slot)
            .map(Element::text_content)
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub(crate) fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    #[must_use]
    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    #[must_use]
    pub fn has_dismiss_control(&self) -> bool {
        self.has_dismiss_control
    }

    #[must_use]
    pub fn has_dismiss_timer(&self) -> bool {
        self.dismiss_timer.is_some()
    }

    pub(crate) fn set_dismiss_timer(&mut self, handle: JoinHandle<()>) {
        self.dismiss_timer = Some(handle);
    }

    /// Moves to `next` if the transition is legal.
    pub(crate) fn advance(&mut self, next: ToastPhase) -> bool {
        if !self.phase.can_transition_to(next) {
            return false;
        }
        self.phase = next;
        true
    }

    /// Applies the off-screen classes used before entering and while leaving.
    pub(crate) fn apply_hidden_state(&mut self) {
        self.element.add_classes(HIDDEN_CLASSES);
    }

    pub(crate) fn apply_visible_state(&mut self) {
        self.element.remove_classes(HIDDEN_CLASSES);
    }
}
