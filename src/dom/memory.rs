//! In-memory document: a flat, ordered list of elements.
//!
//! Each element keeps its inner content as a markup string. Text reads strip
//! tags and decode every character reference; text writes escape `&`, `<` and
//! `>`. Writing the text an element already shows leaves its markup alone,
//! and writing back the text it held before its first text write restores
//! that markup verbatim, entity spelling included.

use super::DocumentTree;
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// Index of an element inside a `MemoryDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryElement {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default)]
    pub html: String,
    /// Markup replaced by the first text write, until that text is written back.
    #[serde(skip)]
    text_origin: Option<String>,
}

impl MemoryElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set content from plain text (escaped).
    pub fn with_text(mut self, text: &str) -> Self {
        self.html = escape_text(text);
        self
    }

    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.html = markup.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(default)]
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append an element and return its handle.
    pub fn push(&mut self, element: MemoryElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&MemoryElement> {
        self.elements.get(id.0)
    }

    pub fn elements(&self) -> &[MemoryElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// First element whose `name` attribute equals `value`.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.attributes.get(name).map(String::as_str) == Some(value))
            .map(ElementId)
    }

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut MemoryElement> {
        self.elements.get_mut(id.0)
    }
}

impl DocumentTree for MemoryDocument {
    type Element = ElementId;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.attributes.contains_key(attribute))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn first_by_tag(&self, tag: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.tag.eq_ignore_ascii_case(tag))
            .map(ElementId)
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.element(*element)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(element) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, element: &ElementId, name: &str) {
        if let Some(el) = self.get_mut(element) {
            el.attributes.remove(name);
        }
    }

    fn text(&self, element: &ElementId) -> String {
        self.element(*element)
            .map(|el| markup_to_text(&el.html))
            .unwrap_or_default()
    }

    fn set_text(&mut self, element: &ElementId, text: &str) {
        let Some(el) = self.get_mut(element) else {
            return;
        };
        if markup_to_text(&el.html) == text {
            return;
        }
        match el.text_origin.take() {
            Some(origin) if markup_to_text(&origin) == text => el.html = origin,
            Some(origin) => {
                el.text_origin = Some(origin);
                el.html = escape_text(text);
            }
            None => {
                el.text_origin = Some(std::mem::replace(&mut el.html, escape_text(text)));
            }
        }
    }

    fn markup(&self, element: &ElementId) -> String {
        self.element(*element)
            .map(|el| el.html.clone())
            .unwrap_or_default()
    }

    fn set_markup(&mut self, element: &ElementId, markup: &str) {
        if let Some(el) = self.get_mut(element) {
            el.html = markup.to_string();
            el.text_origin = None;
        }
    }

    fn has_class(&self, element: &ElementId, class: &str) -> bool {
        self.element(*element)
            .map(|el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_class(&mut self, element: &ElementId, class: &str, enabled: bool) {
        let Some(el) = self.get_mut(element) else {
            return;
        };
        let present = el.classes.iter().any(|c| c == class);
        if enabled && !present {
            el.classes.push(class.to_string());
        } else if !enabled {
            el.classes.retain(|c| c != class);
        }
    }

    fn language(&self) -> Option<String> {
        self.lang.clone()
    }

    fn set_language(&mut self, code: &str) {
        self.lang = Some(code.to_string());
    }
}

/// Escape the characters that would otherwise be read back as markup.
pub(crate) fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Strip tags and decode named and numeric character references.
pub(crate) fn markup_to_text(markup: &str) -> String {
    let regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    let stripped = regex.replace_all(markup, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}
