use serde::Deserialize;
use web_sys::Document;

use crate::error::PageError;

/// Id of the optional `<script type="application/json">` block that overrides
/// the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

/// Tuning values for the page. Every field can be overridden independently;
/// missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Navbar gets `scrolled` once scrollY is strictly above this.
    pub navbar_scroll_threshold: f64,
    /// Back-to-top gets `visible` once scrollY is strictly above this.
    pub back_to_top_threshold: f64,
    /// Gap left between the bottom of the navbar and an anchor target.
    pub anchor_margin: f64,
    pub reveal_threshold: f64,
    /// Shrinks the observer root from the bottom, in px.
    pub reveal_bottom_margin: f64,
    /// Initial downward offset of unrevealed elements, in px.
    pub reveal_offset: f64,
    pub reveal_transition: String,
    pub reveal_selectors: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            navbar_scroll_threshold: 50.0,
            back_to_top_threshold: 500.0,
            anchor_margin: 20.0,
            reveal_threshold: 0.1,
            reveal_bottom_margin: 50.0,
            reveal_offset: 30.0,
            reveal_transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
            reveal_selectors: [
                ".about-card",
                ".process-step",
                ".benefit-card",
                ".use-card",
                ".product-card",
                ".why-card",
                ".testimonial-card",
                ".about-highlight",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads overrides from the page. `Ok(None)` when the page carries no
    /// config block or an empty one.
    pub fn from_document(document: &Document) -> Result<Option<Self>, PageError> {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Ok(None);
        };
        let text = element.text_content().unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(None);
        }
        Self::from_json(&text).map(Some)
    }

    /// Page overrides when present and valid, defaults otherwise.
    pub fn load(document: &Document) -> Self {
        match Self::from_document(document) {
            Ok(Some(config)) if config != Config::default() => {
                log::info!("Using page config overrides");
                config
            }
            Ok(_) => Config::default(),
            Err(e) => {
                log::warn!("Ignoring page config: {}", e);
                Config::default()
            }
        }
    }

    /// Selector list joined for a single `querySelectorAll` call.
    pub fn reveal_selector(&self) -> String {
        self.reveal_selectors.join(", ")
    }

    /// Root margin string handed to the IntersectionObserver.
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.reveal_bottom_margin)
    }
}
