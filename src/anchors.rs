use web_sys::{Document, HtmlElement, Window};

use crate::scroll::{current_offset, smooth_scroll_to};

pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// The element id an in-page link points at. `None` for anything that is not
/// a fragment link, including a bare `#`.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll offset that puts the target's top just below the fixed navbar.
pub fn scroll_destination(target_top: f64, scroll_y: f64, navbar_height: f64, margin: f64) -> f64 {
    target_top + scroll_y - navbar_height - margin
}

pub struct AnchorScroller {
    window: Window,
    document: Document,
    navbar: Option<HtmlElement>,
    margin: f64,
}

impl AnchorScroller {
    pub fn new(
        window: Window,
        document: Document,
        navbar: Option<HtmlElement>,
        margin: f64,
    ) -> Self {
        AnchorScroller {
            window,
            document,
            navbar,
            margin,
        }
    }

    /// Where a click on `href` would scroll to, if it names an element on
    /// this page.
    pub fn destination(&self, href: &str) -> Option<f64> {
        let id = fragment_target(href)?;
        let target = self.document.get_element_by_id(id)?;
        let navbar_height = self
            .navbar
            .as_ref()
            .map(|navbar| f64::from(navbar.offset_height()))
            .unwrap_or(0.0);
        Some(scroll_destination(
            target.get_bounding_client_rect().top(),
            current_offset(&self.window),
            navbar_height,
            self.margin,
        ))
    }

    /// Handles a click on an in-page link. Returns `false` when `href` is not
    /// a fragment link and the browser should navigate normally. A fragment
    /// with no matching element is still handled, it just does not scroll.
    pub fn follow(&self, href: &str) -> bool {
        if fragment_target(href).is_none() {
            return false;
        }
        match self.destination(href) {
            Some(top) => {
                log::debug!("Scrolling to {} at {}", href, top);
                smooth_scroll_to(&self.window, top);
            }
            None => log::debug!("No element for {}", href),
        }
        true
    }
}
