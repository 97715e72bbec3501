use web_sys::Element;

use crate::dom::{has_class, set_class, ACTIVE};

/// Attribute on each tab naming the grid it selects.
pub const CATEGORY_ATTR: &str = "data-category";

/// The selected product category, if any grid matches it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryState {
    pub active: Option<String>,
}

impl CategoryState {
    /// Selecting a category the page does not know leaves nothing active.
    pub fn select<'a, I>(category: &str, known: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        if category.is_empty() {
            return CategoryState::default();
        }
        let active = known
            .into_iter()
            .find(|id| *id == category)
            .map(str::to_string);
        CategoryState { active }
    }

    pub fn is_active(&self, category: &str) -> bool {
        self.active.as_deref() == Some(category)
    }
}

/// Tab buttons and the product grids they switch between.
pub struct Catalog {
    tabs: Vec<Element>,
    grids: Vec<Element>,
}

impl Catalog {
    pub fn new(tabs: Vec<Element>, grids: Vec<Element>) -> Self {
        Catalog { tabs, grids }
    }

    pub fn tabs(&self) -> &[Element] {
        &self.tabs
    }

    pub fn state(&self) -> CategoryState {
        let active = self
            .grids
            .iter()
            .find(|grid| has_class(grid, ACTIVE))
            .map(|grid| grid.id());
        CategoryState { active }
    }

    pub fn switch_to(&self, category: &str) -> CategoryState {
        let grid_ids: Vec<String> = self.grids.iter().map(|grid| grid.id()).collect();
        let next = CategoryState::select(category, grid_ids.iter().map(String::as_str));

        for tab in &self.tabs {
            let matches = tab.get_attribute(CATEGORY_ATTR).as_deref() == Some(category);
            set_class(tab, ACTIVE, matches);
        }
        for grid in &self.grids {
            set_class(grid, ACTIVE, next.is_active(&grid.id()));
        }

        match &next.active {
            Some(active) => log::debug!("Switched product category to {}", active),
            None => log::debug!("No product grid for category {}", category),
        }
        next
    }
}
