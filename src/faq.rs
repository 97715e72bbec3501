use web_sys::{Document, Element};

use crate::dom::{has_class, query_all, set_attr, set_class, ACTIVE};

pub const ITEM_SELECTOR: &str = ".faq-item";
pub const QUESTION_SELECTOR: &str = ".faq-question";

/// Which FAQ entry is open. At most one ever is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaqState {
    pub expanded: Option<usize>,
}

impl FaqState {
    /// Activating the open entry closes it; activating any other entry opens
    /// it and closes the rest.
    pub fn activate(self, index: usize) -> Self {
        Self::after_activating(index, self.expanded == Some(index))
    }

    /// Outcome of activating `index`, decided only by whether that entry was
    /// itself open. Whatever else was open gets closed either way.
    pub fn after_activating(index: usize, target_was_expanded: bool) -> Self {
        if target_was_expanded {
            FaqState { expanded: None }
        } else {
            FaqState {
                expanded: Some(index),
            }
        }
    }

    pub fn is_expanded(self, index: usize) -> bool {
        self.expanded == Some(index)
    }
}

/// Keys that open or close a focused question, like a click.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

pub struct FaqEntry {
    pub item: Element,
    pub question: Option<Element>,
}

pub struct Accordion {
    entries: Vec<FaqEntry>,
}

impl Accordion {
    pub fn from_document(document: &Document) -> Self {
        let entries = query_all(document, ITEM_SELECTOR)
            .into_iter()
            .map(|item| {
                let question = item.query_selector(QUESTION_SELECTOR).ok().flatten();
                FaqEntry { item, question }
            })
            .collect();
        Accordion { entries }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> FaqState {
        FaqState {
            expanded: self.entries.iter().position(|e| has_class(&e.item, ACTIVE)),
        }
    }

    pub fn activate(&self, index: usize) -> FaqState {
        let Some(target) = self.entries.get(index) else {
            return self.state();
        };
        let next = FaqState::after_activating(index, has_class(&target.item, ACTIVE));
        for (i, entry) in self.entries.iter().enumerate() {
            let open = next.is_expanded(i);
            set_class(&entry.item, ACTIVE, open);
            if let Some(question) = &entry.question {
                set_attr(question, "aria-expanded", if open { "true" } else { "false" });
            }
        }
        log::debug!("FAQ expanded: {:?}", next.expanded);
        next
    }
}
