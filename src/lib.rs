//! Interactive behavior for the storefront landing page: navbar and
//! back-to-top scroll markers, the mobile menu, product category tabs, the FAQ
//! accordion, smooth in-page scrolling and reveal-on-scroll animations.
//!
//! The page markup is rendered ahead of time; this crate only attaches to it.

pub mod anchors;
pub mod catalog;
pub mod config;
pub mod dom;
pub mod error;
pub mod faq;
pub mod nav;
pub mod page;
pub mod reveal;
pub mod scroll;

use web_sys::Document;

pub use config::Config;
pub use error::PageError;
pub use page::{PageController, PageElements, Wiring};

pub use dom::Listener;

/// Wires the current page, waiting for `DOMContentLoaded` if the document is
/// still loading.
pub fn start() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;

    let pending = when_ready(&document, || {
        if let Err(e) = run() {
            log::error!("Failed to initialize page: {}", e);
        }
    })?;
    if let Some(listener) = pending {
        listener.forget();
    }
    Ok(())
}

/// Calls `f` now if the document has finished parsing, otherwise once on
/// `DOMContentLoaded`. The returned listener must be kept alive until then.
pub fn when_ready<F>(document: &Document, f: F) -> Result<Option<Listener>, PageError>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() == "loading" {
        defer_until_loaded(document, f).map(Some)
    } else {
        f();
        Ok(None)
    }
}

/// Calls `f` on the first `DOMContentLoaded` event only.
pub fn defer_until_loaded<F>(document: &Document, f: F) -> Result<Listener, PageError>
where
    F: FnOnce() + 'static,
{
    let mut pending = Some(f);
    Listener::new(document, "DOMContentLoaded", move |_| {
        if let Some(f) = pending.take() {
            f();
        }
    })
}

fn run() -> Result<(), PageError> {
    let controller = PageController::from_window()?;
    controller.init()?.forget();
    log::info!("Storefront page initialized");
    Ok(())
}
