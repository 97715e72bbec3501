use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::Config;
use crate::dom::{query_all, set_attr, set_style};
use crate::error::PageError;

/// Set on an element once it has been revealed.
pub const REVEALED_ATTR: &str = "data-revealed";

/// Inline style values for the two ends of the reveal transition.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealStyle {
    pub hidden_transform: String,
    pub transition: String,
}

impl RevealStyle {
    pub const HIDDEN_OPACITY: &'static str = "0";
    pub const SHOWN_OPACITY: &'static str = "1";
    pub const SHOWN_TRANSFORM: &'static str = "translateY(0)";

    pub fn from_config(config: &Config) -> Self {
        RevealStyle {
            hidden_transform: format!("translateY({}px)", config.reveal_offset),
            transition: config.reveal_transition.clone(),
        }
    }
}

/// An element is revealed the first time it is seen intersecting, never again.
pub fn should_reveal(intersecting: bool, already_revealed: bool) -> bool {
    intersecting && !already_revealed
}

pub struct Revealer {
    elements: Vec<HtmlElement>,
    style: RevealStyle,
}

impl Revealer {
    pub fn new(elements: Vec<HtmlElement>, style: RevealStyle) -> Self {
        Revealer { elements, style }
    }

    pub fn from_document(document: &Document, config: &Config) -> Self {
        let elements = query_all(document, &config.reveal_selector())
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        Revealer::new(elements, RevealStyle::from_config(config))
    }

    pub fn elements(&self) -> &[HtmlElement] {
        &self.elements
    }

    /// Puts every element in its hidden starting position.
    pub fn prepare(&self) {
        for el in &self.elements {
            set_style(el, "opacity", RevealStyle::HIDDEN_OPACITY);
            set_style(el, "transform", &self.style.hidden_transform);
            set_style(el, "transition", &self.style.transition);
        }
    }

    pub fn is_revealed(el: &HtmlElement) -> bool {
        el.has_attribute(REVEALED_ATTR)
    }

    /// Returns whether this call revealed the element.
    pub fn reveal(&self, el: &HtmlElement) -> bool {
        if Self::is_revealed(el) {
            return false;
        }
        set_style(el, "opacity", RevealStyle::SHOWN_OPACITY);
        set_style(el, "transform", RevealStyle::SHOWN_TRANSFORM);
        set_attr(el, REVEALED_ATTR, "true");
        true
    }

    pub fn handle_entry(&self, entry: &IntersectionObserverEntry, observer: &IntersectionObserver) {
        let target = entry.target();
        let Ok(el) = target.dyn_into::<HtmlElement>() else {
            return;
        };
        if !should_reveal(entry.is_intersecting(), Self::is_revealed(&el)) {
            return;
        }
        if self.reveal(&el) {
            log::debug!("Revealed <{}> {}", el.tag_name().to_lowercase(), el.class_name());
        }
        observer.unobserve(&el);
    }
}

/// One IntersectionObserver watching every reveal element. Dropping it
/// disconnects the observer.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    /// Creates the observer, then hides and observes every element. Elements
    /// are left untouched if the observer cannot be created.
    pub fn observe_all(revealer: Rc<Revealer>, config: &Config) -> Result<Self, PageError> {
        let handler = Rc::clone(&revealer);
        let callback = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        handler.handle_entry(&entry, &observer);
                    }
                }
            },
        ) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.reveal_threshold));
        init.set_root_margin(&config.reveal_root_margin());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        revealer.prepare();
        for el in revealer.elements() {
            observer.observe(el);
        }
        Ok(RevealObserver {
            observer,
            _callback: callback,
        })
    }

    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
