use web_sys::{Element, ScrollBehavior, ScrollToOptions, Window};

use crate::config::Config;
use crate::dom::set_class;

pub const SCROLLED: &str = "scrolled";
pub const VISIBLE: &str = "visible";

/// Which scroll-driven markers should be present at a given offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMarkers {
    pub navbar_scrolled: bool,
    pub back_to_top_visible: bool,
}

impl ScrollMarkers {
    pub fn at(offset: f64, config: &Config) -> Self {
        ScrollMarkers {
            navbar_scrolled: offset > config.navbar_scroll_threshold,
            back_to_top_visible: offset > config.back_to_top_threshold,
        }
    }
}

/// Applies [`ScrollMarkers`] to the navbar and back-to-top control.
pub struct ScrollToggler {
    window: Window,
    navbar: Option<Element>,
    back_to_top: Option<Element>,
    config: Config,
}

impl ScrollToggler {
    pub fn new(
        window: Window,
        navbar: Option<Element>,
        back_to_top: Option<Element>,
        config: &Config,
    ) -> Self {
        ScrollToggler {
            window,
            navbar,
            back_to_top,
            config: config.clone(),
        }
    }

    pub fn apply(&self, offset: f64) -> ScrollMarkers {
        let markers = ScrollMarkers::at(offset, &self.config);
        if let Some(navbar) = &self.navbar {
            set_class(navbar, SCROLLED, markers.navbar_scrolled);
        }
        if let Some(back_to_top) = &self.back_to_top {
            set_class(back_to_top, VISIBLE, markers.back_to_top_visible);
        }
        markers
    }

    /// Reads the current offset and applies it.
    pub fn sync(&self) -> ScrollMarkers {
        self.apply(current_offset(&self.window))
    }
}

pub fn current_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
