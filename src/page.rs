use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Node, Window};

use crate::anchors::{AnchorScroller, ANCHOR_SELECTOR};
use crate::catalog::{Catalog, CATEGORY_ATTR};
use crate::config::Config;
use crate::dom::{html_element_by_id, query_all, Listener};
use crate::error::PageError;
use crate::faq::{is_activation_key, Accordion};
use crate::nav::MobileNav;
use crate::reveal::{RevealObserver, Revealer};
use crate::scroll::{smooth_scroll_to, ScrollMarkers, ScrollToggler};

pub const NAVBAR_ID: &str = "navbar";
pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const NAV_MENU_ID: &str = "navMenu";
pub const BACK_TO_TOP_ID: &str = "backToTop";
pub const TAB_SELECTOR: &str = ".tab-btn";
pub const GRID_SELECTOR: &str = ".product-category";

/// The fixed elements the page is built around. Anything but the body may be
/// missing; the behavior that needs it is then skipped.
pub struct PageElements {
    pub navbar: Option<HtmlElement>,
    pub nav_toggle: Option<Element>,
    pub nav_menu: Option<Element>,
    pub back_to_top: Option<Element>,
    pub body: HtmlElement,
}

impl PageElements {
    pub fn locate(document: &Document) -> Result<Self, PageError> {
        let body = document.body().ok_or(PageError::NoBody)?;
        let elements = PageElements {
            navbar: html_element_by_id(document, NAVBAR_ID),
            nav_toggle: document.get_element_by_id(NAV_TOGGLE_ID),
            nav_menu: document.get_element_by_id(NAV_MENU_ID),
            back_to_top: document.get_element_by_id(BACK_TO_TOP_ID),
            body,
        };
        for (id, found) in [
            (NAVBAR_ID, elements.navbar.is_some()),
            (NAV_TOGGLE_ID, elements.nav_toggle.is_some()),
            (NAV_MENU_ID, elements.nav_menu.is_some()),
            (BACK_TO_TOP_ID, elements.back_to_top.is_some()),
        ] {
            if !found {
                log::warn!("No #{} on this page", id);
            }
        }
        Ok(elements)
    }
}

/// Everything registered by [`PageController::init`]. Dropping it unwires the
/// page again.
pub struct Wiring {
    /// Markers applied by the startup scroll check.
    pub initial: ScrollMarkers,
    listeners: Vec<Listener>,
    reveal: Option<RevealObserver>,
}

impl Wiring {
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_observing(&self) -> bool {
        self.reveal.is_some()
    }

    /// Keeps everything registered for the lifetime of the page.
    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
        if let Some(reveal) = self.reveal {
            reveal.forget();
        }
    }
}

pub struct PageController {
    window: Window,
    document: Document,
    config: Config,
    elements: PageElements,
    scroll: Rc<ScrollToggler>,
    nav: Option<Rc<MobileNav>>,
    catalog: Rc<Catalog>,
    accordion: Rc<Accordion>,
    anchors: Rc<AnchorScroller>,
    revealer: Rc<Revealer>,
}

impl PageController {
    pub fn new(window: Window, document: Document, config: Config) -> Result<Self, PageError> {
        let elements = PageElements::locate(&document)?;

        let scroll = ScrollToggler::new(
            window.clone(),
            elements.navbar.clone().map(Element::from),
            elements.back_to_top.clone(),
            &config,
        );
        let nav = elements.nav_menu.clone().map(|menu| {
            Rc::new(MobileNav::new(
                elements.nav_toggle.clone(),
                menu,
                elements.body.clone(),
            ))
        });
        let catalog = Catalog::new(
            query_all(&document, TAB_SELECTOR),
            query_all(&document, GRID_SELECTOR),
        );
        let accordion = Accordion::from_document(&document);
        let anchors = AnchorScroller::new(
            window.clone(),
            document.clone(),
            elements.navbar.clone(),
            config.anchor_margin,
        );
        let revealer = Revealer::from_document(&document, &config);

        Ok(PageController {
            window,
            document,
            config,
            elements,
            scroll: Rc::new(scroll),
            nav,
            catalog: Rc::new(catalog),
            accordion: Rc::new(accordion),
            anchors: Rc::new(anchors),
            revealer: Rc::new(revealer),
        })
    }

    /// Controller for the current browser page, with any config overrides the
    /// page declares.
    pub fn from_window() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        let config = Config::load(&document);
        Self::new(window, document, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn nav(&self) -> Option<&MobileNav> {
        self.nav.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    pub fn revealer(&self) -> &Revealer {
        &self.revealer
    }

    /// Runs the startup scroll check, then wires every handler.
    pub fn init(&self) -> Result<Wiring, PageError> {
        let initial = self.scroll.sync();

        let mut listeners = Vec::new();
        self.wire_scroll(&mut listeners)?;
        self.wire_nav(&mut listeners)?;
        self.wire_back_to_top(&mut listeners)?;
        self.wire_tabs(&mut listeners)?;
        self.wire_faq(&mut listeners)?;
        let anchor_count = self.wire_anchors(&mut listeners)?;

        let reveal = match RevealObserver::observe_all(Rc::clone(&self.revealer), &self.config) {
            Ok(observer) => Some(observer),
            Err(e) => {
                log::warn!("Reveal animations disabled: {}", e);
                None
            }
        };

        log::info!(
            "Page initialized: {} tabs, {} FAQ items, {} anchors, {} reveal elements",
            self.catalog.tabs().len(),
            self.accordion.len(),
            anchor_count,
            self.revealer.elements().len(),
        );

        Ok(Wiring {
            initial,
            listeners,
            reveal,
        })
    }

    fn wire_scroll(&self, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
        let scroll = Rc::clone(&self.scroll);
        listeners.push(Listener::passive(&self.window, "scroll", move |_| {
            scroll.sync();
        })?);
        Ok(())
    }

    fn wire_nav(&self, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
        let Some(nav) = &self.nav else {
            return Ok(());
        };

        if let Some(toggle) = &self.elements.nav_toggle {
            let nav = Rc::clone(nav);
            listeners.push(Listener::new(toggle, "click", move |_| {
                let state = nav.toggle();
                log::debug!("Mobile nav {:?}", state);
            })?);
        }

        let nav = Rc::clone(nav);
        listeners.push(Listener::new(&self.document, "click", move |event: Event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            nav.handle_document_click(target.as_ref());
        })?);
        Ok(())
    }

    fn wire_back_to_top(&self, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
        let Some(back_to_top) = &self.elements.back_to_top else {
            return Ok(());
        };
        let window = self.window.clone();
        listeners.push(Listener::new(back_to_top, "click", move |_| {
            smooth_scroll_to(&window, 0.0);
        })?);
        Ok(())
    }

    fn wire_tabs(&self, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
        for tab in self.catalog.tabs() {
            let catalog = Rc::clone(&self.catalog);
            let category = tab.get_attribute(CATEGORY_ATTR).unwrap_or_default();
            listeners.push(Listener::new(tab, "click", move |_| {
                catalog.switch_to(&category);
            })?);
        }
        Ok(())
    }

    fn wire_faq(&self, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
        for (index, entry) in self.accordion.entries().iter().enumerate() {
            let Some(question) = &entry.question else {
                log::warn!("FAQ item {} has no question control", index);
                continue;
            };

            let accordion = Rc::clone(&self.accordion);
            listeners.push(Listener::new(question, "click", move |_| {
                accordion.activate(index);
            })?);

            let accordion = Rc::clone(&self.accordion);
            listeners.push(Listener::new(question, "keydown", move |event: Event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if is_activation_key(&key_event.key()) {
                    event.prevent_default();
                    accordion.activate(index);
                }
            })?);
        }
        Ok(())
    }

    fn wire_anchors(&self, listeners: &mut Vec<Listener>) -> Result<usize, PageError> {
        let anchors = query_all(&self.document, ANCHOR_SELECTOR);
        for anchor in &anchors {
            let scroller = Rc::clone(&self.anchors);
            let nav = self.nav.clone();
            let link = anchor.clone();
            listeners.push(Listener::new(anchor, "click", move |event: Event| {
                let href = link.get_attribute("href").unwrap_or_default();
                if scroller.follow(&href) {
                    event.prevent_default();
                    if let Some(nav) = &nav {
                        nav.close();
                    }
                }
            })?);
        }
        Ok(anchors.len())
    }
}
