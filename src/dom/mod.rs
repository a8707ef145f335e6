//! Browser glue. Everything below this module talks to `web_sys`; the
//! controllers it drives do not.
//!
//! Each component keeps its runtime (controller + the elements, listeners and
//! timers it owns) in a `thread_local!` cell. Listeners dispatch events into
//! that cell and the returned effects are applied before the borrow ends, so
//! an effect must never synchronously dispatch into its own component. None
//! does: removal, class and style writes fire no listeners, and follow-ups
//! arrive through timers or animation frames.

pub(crate) mod cat;
pub(crate) mod links;
pub(crate) mod modal;
pub(crate) mod theme;

use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, HtmlElement, Storage, Window};

use crate::SiteError;
use crate::geometry::{Point, Size};
use crate::theme::{PreferenceStore, ThemeSurface};

pub(crate) fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub(crate) fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or(SiteError::NoDocument)
}

pub(crate) fn body(doc: &Document) -> Result<HtmlElement, SiteError> {
    doc.body().ok_or(SiteError::NoBody)
}

/// Optional element lookup; absent elements just switch a feature off.
pub(crate) fn html_by_id(doc: &Document, id: &str) -> Option<HtmlElement> {
    let el = doc.get_element_by_id(id)?;
    match el.dyn_into::<HtmlElement>() {
        Ok(html) => Some(html),
        Err(_) => {
            gloo::console::warn!(SiteError::NotHtml(id.to_string()).to_string());
            None
        }
    }
}

pub(crate) fn rect_origin(rect: &DomRect) -> Point {
    Point::new(rect.left(), rect.top())
}

pub(crate) fn rect_size(rect: &DomRect) -> Size {
    Size::new(rect.width(), rect.height())
}

pub(crate) fn rect_center(rect: &DomRect) -> Point {
    Point::new(rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0)
}

pub(crate) fn viewport(win: &Window) -> Size {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size::new(dim(win.inner_width()), dim(win.inner_height()))
}

/// Whether the event target is (inside) an element carrying `class`.
pub(crate) fn target_has_class(target: Option<web_sys::EventTarget>, class: &str) -> bool {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| el.class_list().contains(class))
}

/// `localStorage`, or nothing when the browser refuses access.
pub(crate) struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub(crate) fn open(win: &Window) -> Self {
        let storage = win.local_storage().ok().flatten();
        if storage.is_none() {
            gloo::console::warn!("theme: localStorage unavailable, preference will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).is_ok(),
            None => false,
        }
    }
}

/// The body's `classList`.
pub(crate) struct BodyClasses {
    body: HtmlElement,
}

impl BodyClasses {
    pub(crate) fn new(body: HtmlElement) -> Self {
        Self { body }
    }
}

impl ThemeSurface for BodyClasses {
    fn add_class(&mut self, class: &str) {
        let _ = self.body.class_list().add_1(class);
    }

    fn remove_class(&mut self, class: &str) {
        let _ = self.body.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.body.class_list().contains(class)
    }
}
