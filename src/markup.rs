// SPDX-License-Identifier: MPL-2.0
//! Minimal element tree for server-rendered toast fragments.
//!
//! Templates arrive as markup strings. They are parsed once per instantiation
//! into an owned [`Element`] tree that the toast manager mutates (message
//! text, identifiers, transition classes) and can serialize back to markup.
//!
//! Fragments must be well-formed: void elements such as `<path>` have to be
//! self-closing and named entities beyond the XML set are rejected.

use crate::error::{Error, Result};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Write as _;

/// Elements serialized in self-closing form when they have no children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
    "path", "circle", "rect", "line", "polyline", "polygon", "use",
];

/// Attribute marking the element that receives the message text.
pub const MESSAGE_SLOT_ATTR: &str = "data-toast-message";

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.set_attribute("id", id);
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "class" {
            self.classes.clear();
            self.add_classes(&value);
            return;
        }
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds a class token; duplicates are ignored.
    pub fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Adds every whitespace-separated token of `classes`.
    pub fn add_classes(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Removes every whitespace-separated token of `classes`.
    pub fn remove_classes(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            self.remove_class(class);
        }
    }

    /// Rewrites class tokens in place, preserving their order.
    pub fn map_classes(&mut self, mut f: impl FnMut(&str) -> Option<String>) {
        let mut mapped: Vec<String> = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let next = f(class).unwrap_or_else(|| class.clone());
            if !mapped.contains(&next) {
                mapped.push(next);
            }
        }
        self.classes = mapped;
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Replaces all children with a single text node.
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Depth-first, pre-order search including `self`.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(pred))
    }

    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(element) = child {
                if let Some(found) = element.find_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Visits `self` and every descendant element.
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.for_each_mut(f);
            }
        }
    }

    /// Serializes the element and its subtree.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape(value.as_str()));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(self.classes.join(" ").as_str()));
        }
        if self.children.is_empty() && VOID_ELEMENTS.contains(&self.tag.as_str()) {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text.as_str())),
                Node::Element(element) => element.write_markup(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Message slot: explicitly marked element, else the first `text-sm font-normal` one.
#[must_use]
pub fn is_message_slot(element: &Element) -> bool {
    element.attribute(MESSAGE_SLOT_ATTR).is_some()
        || (element.has_class("text-sm") && element.has_class("font-normal"))
}

#[must_use]
pub fn is_dismiss_control(element: &Element) -> bool {
    element.tag() == "button"
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Template(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.to_string();
        element.set_attribute(&key, value);
    }
    Ok(element)
}

/// Parses a markup fragment and returns its first top-level element.
pub fn parse_fragment(markup: &str) -> Result<Element> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut roots: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(element_from_start(e)?),
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(element),
                    None => roots.push(element),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Template("unbalanced closing tag".into()))?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(element),
                    None => roots.push(element),
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e).to_string();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Template(format!("unclosed <{}>", open.tag())));
    }
    roots
        .into_iter()
        .next()
        .ok_or_else(|| Error::Template("fragment contains no element".into()))
}
