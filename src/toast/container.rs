// SPDX-License-Identifier: MPL-2.0
//! The fixed-position element holding every live toast.

use super::instance::{ToastId, ToastInstance};
use crate::locale::TextDirection;
use crate::markup::Element;

const BASE_CLASSES: &str = "fixed top-4 flex flex-col gap-2 z-50";

/// Container element plus the active set of toasts attached to it.
///
/// Attachment order is display order (oldest first).
#[derive(Debug)]
pub struct Container {
    element: Element,
    active: Vec<ToastInstance>,
    layout_flushes: u64,
}

impl Container {
    /// Reuses the page's container if it has one, otherwise creates one
    /// anchored top-right (top-left for right-to-left documents).
    pub fn locate_or_create(
        existing: Option<Element>,
        id: &str,
        direction: TextDirection,
    ) -> Self {
        let element = existing.unwrap_or_else(|| {
            let mut element = Element::new("div");
            element.set_id(id);
            element.add_classes(BASE_CLASSES);
            element.add_class(match direction {
                TextDirection::Ltr => "right-4",
                TextDirection::Rtl => "left-4",
            });
            log::debug!("Created toast container #{id} ({})", direction.as_str());
            element
        });
        Self {
            element,
            active: Vec::new(),
            layout_flushes: 0,
        }
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Whether a live toast already renders `message`.
    #[must_use]
    pub fn contains_message(&self, message: &str) -> bool {
        self.active
            .iter()
            .any(|toast| toast.rendered_message().as_deref() == Some(message))
    }

    pub fn attach(&mut self, instance: ToastInstance) {
        self.active.push(instance);
    }

    /// Commits pending style changes so the next change animates.
    pub fn flush_layout(&mut self) {
        self.layout_flushes += 1;
    }

    #[must_use]
    pub fn layout_flushes(&self) -> u64 {
        self.layout_flushes
    }

    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&ToastInstance> {
        self.active.iter().find(|toast| toast.id() == id)
    }

    pub fn get_mut(&mut self, id: &ToastId) -> Option<&mut ToastInstance> {
        self.active.iter_mut().find(|toast| toast.id() == id)
    }

    /// Detaches a toast. Detaching an absent toast returns `None`.
    pub fn detach(&mut self, id: &ToastId) -> Option<ToastInstance> {
        let pos = self.active.iter().position(|toast| toast.id() == id)?;
        Some(self.active.remove(pos))
    }

    pub fn toasts(&self) -> impl Iterator<Item = &ToastInstance> {
        self.active.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Serializes the container with its live toasts.
    #[must_use]
    pub fn render(&self) -> String {
        let mut element = self.element.clone();
        for toast in &self.active {
            element.push_child(toast.element().clone());
        }
        element.to_markup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_fragment;
    use crate::toast::ToastKind;

    fn toast(message: &str) -> ToastInstance {
        let element =
            parse_fragment(r#"<div><div class="text-sm font-normal"></div></div>"#).unwrap();
        ToastInstance::from_template(ToastKind::Success, message, element).unwrap()
    }

    #[test]
    fn created_container_is_positioned_by_direction() {
        let ltr = Container::locate_or_create(None, "toast-container", TextDirection::Ltr);
        assert!(ltr.element().has_class("right-4"));
        assert!(!ltr.element().has_class("left-4"));
        assert_eq!(ltr.element().id(), Some("toast-container"));

        let rtl = Container::locate_or_create(None, "toast-container", TextDirection::Rtl);
        assert!(rtl.element().has_class("left-4"));
    }

    #[test]
    fn existing_container_is_reused_untouched() {
        let existing = parse_fragment(r#"<div id="toast-container" class="custom"></div>"#).unwrap();
        let container =
            Container::locate_or_create(Some(existing.clone()), "toast-container", TextDirection::Rtl);
        assert_eq!(container.element(), &existing);
    }

    #[test]
    fn detach_is_idempotent() {
        let mut container = Container::locate_or_create(None, "c", TextDirection::Ltr);
        let instance = toast("hello");
        let id = instance.id().clone();
        container.attach(instance);

        assert!(container.contains_message("hello"));
        assert!(container.detach(&id).is_some());
        assert!(container.detach(&id).is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn render_includes_live_toasts() {
        let mut container = Container::locate_or_create(None, "c", TextDirection::Ltr);
        container.attach(toast("first"));
        container.attach(toast("second"));
        let markup = container.render();
        assert!(markup.find("first").unwrap() < markup.find("second").unwrap());
    }
}
