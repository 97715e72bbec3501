use web_sys::{Element, HtmlElement, Node};

use crate::dom::{has_class, set_class, set_style, ACTIVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Closed,
    Open,
}

impl NavState {
    pub fn is_open(self) -> bool {
        self == NavState::Open
    }

    pub fn toggled(self) -> Self {
        match self {
            NavState::Closed => NavState::Open,
            NavState::Open => NavState::Closed,
        }
    }

    /// `inside` is whether the click landed in the menu panel or the toggle.
    pub fn after_outside_click(self, inside: bool) -> Self {
        if inside {
            self
        } else {
            NavState::Closed
        }
    }

    pub fn after_anchor_navigation(self) -> Self {
        NavState::Closed
    }

    /// Body `overflow` value while in this state.
    pub fn body_overflow(self) -> &'static str {
        match self {
            NavState::Open => "hidden",
            NavState::Closed => "",
        }
    }
}

/// The mobile menu panel, its toggle control and the body whose scrolling is
/// locked while the menu is open.
pub struct MobileNav {
    toggle: Option<Element>,
    menu: Element,
    body: HtmlElement,
}

impl MobileNav {
    pub fn new(toggle: Option<Element>, menu: Element, body: HtmlElement) -> Self {
        MobileNav { toggle, menu, body }
    }

    pub fn state(&self) -> NavState {
        if has_class(&self.menu, ACTIVE) {
            NavState::Open
        } else {
            NavState::Closed
        }
    }

    pub fn toggle(&self) -> NavState {
        let next = self.state().toggled();
        self.apply(next);
        next
    }

    pub fn close(&self) {
        if self.state().is_open() {
            log::debug!("Closing mobile nav");
        }
        self.apply(NavState::Closed);
    }

    /// Whether `target` sits inside the menu panel or the toggle control.
    pub fn contains(&self, target: Option<&Node>) -> bool {
        let in_menu = self.menu.contains(target);
        let in_toggle = self
            .toggle
            .as_ref()
            .map(|toggle| toggle.contains(target))
            .unwrap_or(false);
        in_menu || in_toggle
    }

    pub fn handle_document_click(&self, target: Option<&Node>) -> NavState {
        let current = self.state();
        if !current.is_open() {
            return current;
        }
        let next = current.after_outside_click(self.contains(target));
        if next != current {
            log::debug!("Click outside mobile nav, closing");
            self.apply(next);
        }
        next
    }

    fn apply(&self, state: NavState) {
        if let Some(toggle) = &self.toggle {
            set_class(toggle, ACTIVE, state.is_open());
        }
        set_class(&self.menu, ACTIVE, state.is_open());
        set_style(&self.body, "overflow", state.body_overflow());
    }
}
