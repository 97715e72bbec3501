//! DOM-level tests, run in a headless browser with
//! `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Element, Event, EventInit, HtmlElement, KeyboardEvent, KeyboardEventInit, Window,
};

use storefront::anchors::AnchorScroller;
use storefront::dom::ACTIVE;
use storefront::faq::FaqState;
use storefront::nav::NavState;
use storefront::reveal::{Revealer, REVEALED_ATTR};
use storefront::scroll::{ScrollMarkers, ScrollToggler, SCROLLED, VISIBLE};
use storefront::{defer_until_loaded, when_ready, Config, PageController};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<nav id="navbar" style="height: 64px">
    <button id="navToggle"><span class="bar"></span></button>
    <ul id="navMenu">
        <li><a id="link-products" href="#products">Products</a></li>
        <li><a id="link-dead" href="#nowhere">Gone</a></li>
        <li><a id="link-bare" href="#">Top</a></li>
    </ul>
</nav>
<div class="spacer" style="height: 3000px"></div>
<section id="products">
    <button class="tab-btn active" data-category="classic">Classic</button>
    <button class="tab-btn" data-category="infused">Infused</button>
    <div class="product-category active" id="classic"><div class="product-card">A</div></div>
    <div class="product-category" id="infused"><div class="product-card">B</div></div>
</section>
<section id="faq">
    <div class="faq-item"><button class="faq-question" aria-expanded="false">One</button></div>
    <div class="faq-item"><button class="faq-question" aria-expanded="false">Two</button></div>
    <div class="faq-item"><button class="faq-question" aria-expanded="false">Three</button></div>
    <div class="faq-item"><p>No question here</p></div>
</section>
<div id="outside">Elsewhere</div>
<div class="spacer" style="height: 3000px"></div>
<button id="backToTop">Up</button>
"##;

/// Mounts the test page into the document and removes it again on drop.
struct Fixture {
    window: Window,
    document: Document,
    root: Element,
}

impl Fixture {
    fn mount() -> Self {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(PAGE);
        document.body().unwrap().append_child(&root).unwrap();
        Fixture {
            window,
            document,
            root,
        }
    }

    fn controller(&self) -> PageController {
        PageController::new(self.window.clone(), self.document.clone(), Config::default()).unwrap()
    }

    fn by_id(&self, id: &str) -> HtmlElement {
        self.document
            .get_element_by_id(id)
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
    }

    fn all(&self, selector: &str) -> Vec<HtmlElement> {
        storefront::dom::query_all(&self.document, selector)
            .into_iter()
            .map(|el| el.dyn_into::<HtmlElement>().unwrap())
            .collect()
    }

    fn active_count(&self, selector: &str) -> usize {
        self.all(selector)
            .iter()
            .filter(|el| el.class_list().contains(ACTIVE))
            .count()
    }

    fn body_overflow(&self) -> String {
        self.document
            .body()
            .unwrap()
            .style()
            .get_property_value("overflow")
            .unwrap()
    }
}

/// Polls until the page has scrolled to `expected` or a few seconds passed.
async fn settle_scroll(window: &Window, expected: f64) -> f64 {
    for _ in 0..80 {
        let offset = window.scroll_y().unwrap();
        if (offset - expected).abs() < 1.5 {
            return offset;
        }
        TimeoutFuture::new(50).await;
    }
    window.scroll_y().unwrap()
}

fn cancelable_click() -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict("click", &init).unwrap()
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
        self.root.remove();
        if let Some(body) = self.document.body() {
            let _ = body.style().remove_property("overflow");
        }
    }
}

#[wasm_bindgen_test]
fn init_runs_one_check_at_top_of_page() {
    let fixture = Fixture::mount();
    let wiring = fixture.controller().init().unwrap();

    assert_eq!(wiring.initial, ScrollMarkers::default());
    assert!(!fixture.by_id("navbar").class_list().contains(SCROLLED));
    assert!(!fixture.by_id("backToTop").class_list().contains(VISIBLE));
    assert!(wiring.is_observing());
}

#[wasm_bindgen_test]
fn scroll_markers_follow_offset() {
    let fixture = Fixture::mount();
    let toggler = ScrollToggler::new(
        fixture.window.clone(),
        Some(fixture.by_id("navbar").into()),
        Some(fixture.by_id("backToTop").into()),
        &Config::default(),
    );
    let navbar = fixture.by_id("navbar");
    let back_to_top = fixture.by_id("backToTop");

    toggler.apply(120.0);
    assert!(navbar.class_list().contains(SCROLLED));
    assert!(!back_to_top.class_list().contains(VISIBLE));

    toggler.apply(900.0);
    assert!(back_to_top.class_list().contains(VISIBLE));

    toggler.apply(50.0);
    assert!(!navbar.class_list().contains(SCROLLED));
    assert!(!back_to_top.class_list().contains(VISIBLE));
}

#[wasm_bindgen_test]
fn toggle_opens_and_locks_scroll() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();

    fixture.by_id("navToggle").click();
    assert_eq!(controller.nav().unwrap().state(), NavState::Open);
    assert!(fixture.by_id("navToggle").class_list().contains(ACTIVE));
    assert_eq!(fixture.body_overflow(), "hidden");

    fixture.by_id("navToggle").click();
    assert_eq!(controller.nav().unwrap().state(), NavState::Closed);
    assert_eq!(fixture.body_overflow(), "");
}

#[wasm_bindgen_test]
fn outside_click_closes_but_inside_click_does_not() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();
    let nav = controller.nav().unwrap();

    fixture.by_id("navToggle").click();
    fixture.by_id("navMenu").click();
    assert_eq!(nav.state(), NavState::Open);

    fixture.by_id("outside").click();
    assert_eq!(nav.state(), NavState::Closed);
    assert_eq!(fixture.body_overflow(), "");
}

#[wasm_bindgen_test]
fn click_on_toggle_child_does_not_count_as_outside() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();

    let bar = fixture.all("#navToggle .bar").remove(0);
    bar.click();
    assert_eq!(controller.nav().unwrap().state(), NavState::Open);
}

#[wasm_bindgen_test]
fn tabs_switch_exactly_one_grid() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();

    fixture.all(".tab-btn")[1].click();
    assert_eq!(fixture.active_count(".tab-btn"), 1);
    assert_eq!(fixture.active_count(".product-category"), 1);
    assert!(fixture.by_id("infused").class_list().contains(ACTIVE));
    assert!(!fixture.by_id("classic").class_list().contains(ACTIVE));
}

#[wasm_bindgen_test]
fn unknown_category_clears_every_grid() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();

    let state = controller.catalog().switch_to("seasonal");
    assert_eq!(state.active, None);
    assert_eq!(fixture.active_count(".product-category"), 0);
    assert_eq!(fixture.active_count(".tab-btn"), 0);
}

#[wasm_bindgen_test]
fn faq_click_expands_one_and_mirrors_aria() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();
    let questions = fixture.all(".faq-question");

    questions[0].click();
    questions[2].click();
    assert_eq!(controller.accordion().state(), FaqState { expanded: Some(2) });
    assert_eq!(fixture.active_count(".faq-item"), 1);
    assert_eq!(questions[2].get_attribute("aria-expanded").as_deref(), Some("true"));
    assert_eq!(questions[0].get_attribute("aria-expanded").as_deref(), Some("false"));

    questions[2].click();
    assert_eq!(fixture.active_count(".faq-item"), 0);
    assert_eq!(questions[2].get_attribute("aria-expanded").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
fn faq_keyboard_activation_prevents_default() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();
    let question = fixture.all(".faq-question").remove(1);

    let init = KeyboardEventInit::new();
    init.set_key(" ");
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    question.dispatch_event(&event).unwrap();

    assert!(event.default_prevented());
    assert_eq!(controller.accordion().state().expanded, Some(1));

    let init = KeyboardEventInit::new();
    init.set_key("Tab");
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    question.dispatch_event(&event).unwrap();

    assert!(!event.default_prevented());
    assert_eq!(controller.accordion().state().expanded, Some(1));
}

#[wasm_bindgen_test]
fn dead_anchor_closes_nav_without_scrolling() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();

    let hash_before = fixture.window.location().hash().unwrap();

    fixture.by_id("navToggle").click();
    fixture.by_id("link-dead").click();

    assert_eq!(controller.nav().unwrap().state(), NavState::Closed);
    assert_eq!(fixture.window.location().hash().unwrap(), hash_before);
}

#[wasm_bindgen_test]
fn anchor_destination_accounts_for_navbar() {
    let fixture = Fixture::mount();
    let navbar = fixture.by_id("navbar");
    let scroller = AnchorScroller::new(
        fixture.window.clone(),
        fixture.document.clone(),
        Some(navbar.clone()),
        20.0,
    );
    let target_top = fixture.by_id("products").get_bounding_client_rect().top();
    let expected = target_top + fixture.window.scroll_y().unwrap()
        - f64::from(navbar.offset_height())
        - 20.0;

    assert_eq!(scroller.destination("#products"), Some(expected));
    assert_eq!(scroller.destination("#nowhere"), None);
    assert!(scroller.follow("#nowhere"));
    assert!(!scroller.follow("#"));
}

#[wasm_bindgen_test]
fn reveal_happens_once_per_element() {
    let fixture = Fixture::mount();
    let revealer = Revealer::from_document(&fixture.document, &Config::default());
    assert_eq!(revealer.elements().len(), 2);

    revealer.prepare();
    let card = revealer.elements()[0].clone();
    assert_eq!(card.style().get_property_value("opacity").unwrap(), "0");
    assert_eq!(card.style().get_property_value("transform").unwrap(), "translateY(30px)");

    assert!(revealer.reveal(&card));
    assert_eq!(card.style().get_property_value("opacity").unwrap(), "1");
    assert!(card.has_attribute(REVEALED_ATTR));

    assert!(!revealer.reveal(&card));
    assert_eq!(card.style().get_property_value("opacity").unwrap(), "1");
}

#[wasm_bindgen_test]
fn scroll_event_updates_both_markers() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();
    let navbar = fixture.by_id("navbar");
    let back_to_top = fixture.by_id("backToTop");

    fixture.window.scroll_to_with_x_and_y(0.0, 600.0);
    fixture
        .window
        .dispatch_event(&Event::new("scroll").unwrap())
        .unwrap();
    assert!(navbar.class_list().contains(SCROLLED));
    assert!(back_to_top.class_list().contains(VISIBLE));

    fixture.window.scroll_to_with_x_and_y(0.0, 200.0);
    fixture
        .window
        .dispatch_event(&Event::new("scroll").unwrap())
        .unwrap();
    assert!(navbar.class_list().contains(SCROLLED));
    assert!(!back_to_top.class_list().contains(VISIBLE));

    fixture.window.scroll_to_with_x_and_y(0.0, 0.0);
    fixture
        .window
        .dispatch_event(&Event::new("scroll").unwrap())
        .unwrap();
    assert!(!navbar.class_list().contains(SCROLLED));
    assert!(!back_to_top.class_list().contains(VISIBLE));
}

#[wasm_bindgen_test]
async fn back_to_top_click_scrolls_home() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();

    fixture.window.scroll_to_with_x_and_y(0.0, 900.0);
    assert!(fixture.window.scroll_y().unwrap() > 0.0);

    fixture.by_id("backToTop").click();
    assert_eq!(settle_scroll(&fixture.window, 0.0).await, 0.0);
}

#[wasm_bindgen_test]
async fn live_anchor_scrolls_below_navbar_and_closes_nav() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();
    let navbar = fixture.by_id("navbar");
    let expected = fixture.by_id("products").get_bounding_client_rect().top()
        + fixture.window.scroll_y().unwrap()
        - f64::from(navbar.offset_height())
        - 20.0;
    assert!(expected > 0.0);

    fixture.by_id("navToggle").click();
    assert_eq!(controller.nav().unwrap().state(), NavState::Open);

    let click = cancelable_click();
    fixture.by_id("link-products").dispatch_event(&click).unwrap();

    assert!(click.default_prevented());
    assert_eq!(controller.nav().unwrap().state(), NavState::Closed);
    assert_eq!(fixture.body_overflow(), "");

    let offset = settle_scroll(&fixture.window, expected).await;
    assert!((offset - expected).abs() < 1.5, "scrolled to {} not {}", offset, expected);
}

#[wasm_bindgen_test]
fn bare_hash_link_is_left_to_the_browser() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();

    let click = cancelable_click();
    fixture.by_id("link-bare").dispatch_event(&click).unwrap();

    assert!(!click.default_prevented());
}

#[wasm_bindgen_test]
fn activating_one_of_several_open_items_closes_all() {
    let fixture = Fixture::mount();
    let controller = fixture.controller();
    let _wiring = controller.init().unwrap();
    let items = fixture.all(".faq-item");
    items[0].class_list().add_1(ACTIVE).unwrap();
    items[1].class_list().add_1(ACTIVE).unwrap();

    fixture.all(".faq-question")[1].click();

    assert_eq!(fixture.active_count(".faq-item"), 0);
    assert_eq!(controller.accordion().state(), FaqState::default());
}

#[wasm_bindgen_test]
fn ready_document_runs_setup_immediately() {
    let fixture = Fixture::mount();
    let calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&calls);
    let pending = when_ready(&fixture.document, move || counter.set(counter.get() + 1)).unwrap();

    assert!(pending.is_none());
    assert_eq!(calls.get(), 1);
}

#[wasm_bindgen_test]
fn deferred_setup_runs_once_on_content_loaded() {
    let fixture = Fixture::mount();
    let calls = Rc::new(Cell::new(0));

    let counter = Rc::clone(&calls);
    let _listener =
        defer_until_loaded(&fixture.document, move || counter.set(counter.get() + 1)).unwrap();
    assert_eq!(calls.get(), 0);

    let loaded = Event::new("DOMContentLoaded").unwrap();
    fixture.document.dispatch_event(&loaded).unwrap();
    let loaded = Event::new("DOMContentLoaded").unwrap();
    fixture.document.dispatch_event(&loaded).unwrap();

    assert_eq!(calls.get(), 1);
}
