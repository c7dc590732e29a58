//! Browser bindings: the live DOM and `window.localStorage`.

use super::DocumentTree;
use crate::controller::LocalizationController;
use crate::error::{LocalizationError, Result};
use crate::i18n::TranslationBundle;
use crate::storage::PreferenceStore;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Storage};

pub type BrowserController = LocalizationController<BrowserDocument, LocalStorageSlot>;

/// The page's live document.
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    /// Document of the current window, if there is one.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl DocumentTree for BrowserDocument {
    type Element = Element;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<Element> {
        self.query_all(&format!("[{}]", attribute))
    }

    fn first_by_tag(&self, tag: &str) -> Option<Element> {
        self.document.query_selector(tag).ok().flatten()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) {
        let _ = element.remove_attribute(name);
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn markup(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_markup(&mut self, element: &Element, markup: &str) {
        element.set_inner_html(markup);
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_class(&mut self, element: &Element, class: &str, enabled: bool) {
        let classes = element.class_list();
        let _ = if enabled {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }

    fn language(&self) -> Option<String> {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute("lang"))
    }

    fn set_language(&mut self, code: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute("lang", code);
        }
    }
}

/// `window.localStorage`, when the browser grants it.
pub struct LocalStorageSlot {
    storage: Option<Storage>,
}

impl LocalStorageSlot {
    pub fn current() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }
}

impl PreferenceStore for LocalStorageSlot {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| LocalizationError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| LocalizationError::Storage(format!("{:?}", e)))
    }
}

/// Build a controller over the live page, initialize it and wire a click
/// listener onto every language option.
pub fn mount(bundle: TranslationBundle) -> Option<Rc<RefCell<BrowserController>>> {
    let document = BrowserDocument::current()?;
    let controller = Rc::new(RefCell::new(LocalizationController::new(
        document,
        LocalStorageSlot::current(),
        Some(bundle),
    )));

    controller.borrow_mut().initialize();

    let options = controller.borrow().options().to_vec();
    for option in options {
        let handle = Rc::clone(&controller);
        let clicked = option.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            handle.borrow_mut().on_option_activated(&clicked);
        });
        let _ = option.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        // Listeners live as long as the page.
        listener.forget();
    }

    Some(controller)
}

/// Entry point for the page script: mounts the embedded Spanish bundle.
#[wasm_bindgen(js_name = startLocalizer)]
pub fn start_localizer() {
    match TranslationBundle::embedded_spanish() {
        Ok(bundle) => {
            if mount(bundle).is_none() {
                tracing::debug!("No document available, localizer not mounted");
            }
        }
        Err(e) => tracing::warn!("Embedded bundle failed to parse: {}", e),
    }
}
