//! Minimal view of a document tree.
//!
//! The controller only needs to find elements by attribute or tag, read and
//! write attributes, classes and content, and set the document language.
//! `MemoryDocument` backs tests and the command-line tools; the `web` feature
//! adds a `web-sys` implementation for the browser.

mod memory;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use memory::{ElementId, MemoryDocument, MemoryElement};

/// Content written into, or read from, an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text; never interpreted as markup.
    Text(String),
    /// Structured markup (inner HTML).
    Markup(String),
}

impl Content {
    pub fn into_string(self) -> String {
        match self {
            Content::Text(text) | Content::Markup(text) => text,
        }
    }
}

/// Capabilities the controller needs from a document.
///
/// Lookups that find nothing return empty results; writes against elements
/// that no longer exist are silently ignored.
pub trait DocumentTree {
    /// Handle to an element. Cheap to clone.
    type Element: Clone;

    /// Every element carrying `attribute`, in document order.
    fn elements_with_attribute(&self, attribute: &str) -> Vec<Self::Element>;

    /// First element with the given tag name.
    fn first_by_tag(&self, tag: &str) -> Option<Self::Element>;

    /// First element carrying `attribute`.
    fn first_with_attribute(&self, attribute: &str) -> Option<Self::Element> {
        self.elements_with_attribute(attribute).into_iter().next()
    }

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    /// Text content with markup stripped.
    fn text(&self, element: &Self::Element) -> String;

    fn set_text(&mut self, element: &Self::Element, text: &str);

    /// Inner markup, verbatim.
    fn markup(&self, element: &Self::Element) -> String;

    fn set_markup(&mut self, element: &Self::Element, markup: &str);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Add (`enabled`) or remove a class.
    fn set_class(&mut self, element: &Self::Element, class: &str, enabled: bool);

    /// Language attribute of the document root.
    fn language(&self) -> Option<String>;

    fn set_language(&mut self, code: &str);

    /// Read an element as text or as markup.
    fn read(&self, element: &Self::Element, as_markup: bool) -> Content {
        if as_markup {
            Content::Markup(self.markup(element))
        } else {
            Content::Text(self.text(element))
        }
    }

    fn write(&mut self, element: &Self::Element, content: &Content) {
        match content {
            Content::Text(text) => self.set_text(element, text),
            Content::Markup(markup) => self.set_markup(element, markup),
        }
    }
}
