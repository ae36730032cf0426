//! FAQ browsing: category tabs, text search and accordion state
//!
//! Debouncing keystrokes belongs to whoever feeds `search`; this module only
//! computes what is visible for a given tab and query.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Category shared by every tab
pub const ALL_CATEGORY: &str = "all";

/// One question and its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    fn matches(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle) || self.answer.to_lowercase().contains(needle)
    }
}

/// A group of FAQ items under one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSection {
    /// Section identifier
    pub id: String,
    /// Category the section belongs to (`all` shows under every tab)
    pub category: String,
    /// Pinned sections stay visible while searching even with no matches
    #[serde(default)]
    pub pinned: bool,
    /// Items in display order
    pub items: Vec<FaqItem>,
}

/// Selected category tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FaqTab {
    #[default]
    All,
    Category(String),
}

impl From<&str> for FaqTab {
    fn from(name: &str) -> Self {
        if name.eq_ignore_ascii_case(ALL_CATEGORY) {
            FaqTab::All
        } else {
            FaqTab::Category(name.to_string())
        }
    }
}

/// A visible section and the indexes of its visible items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView<'a> {
    pub section: &'a FaqSection,
    pub items: Vec<usize>,
}

/// FAQ page state
#[derive(Debug, Clone, Default)]
pub struct FaqBrowser {
    sections: Vec<FaqSection>,
    tab: FaqTab,
    /// Normalized (trimmed, lowercased) search text
    query: String,
    /// Open item per section index
    open: HashMap<usize, usize>,
}

impl FaqBrowser {
    /// Browse `sections` with every tab shown and no search
    pub fn new(sections: Vec<FaqSection>) -> Self {
        Self { sections, ..Default::default() }
    }

    /// All sections
    pub fn sections(&self) -> &[FaqSection] {
        &self.sections
    }

    /// Active tab
    pub fn tab(&self) -> &FaqTab {
        &self.tab
    }

    /// Active search text, normalized
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Switch tabs; clears the search
    pub fn select_tab(&mut self, tab: impl Into<FaqTab>) {
        self.tab = tab.into();
        self.query.clear();
    }

    /// Filter items by `query`; an empty query restores the tab view
    pub fn search(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();
    }

    /// Toggle an item open or closed; opening closes the section's other item
    ///
    /// Returns the item's new open state, or `None` if it does not exist.
    pub fn toggle(&mut self, section: usize, item: usize) -> Option<bool> {
        self.sections.get(section)?.items.get(item)?;

        if self.open.get(&section) == Some(&item) {
            self.open.remove(&section);
            Some(false)
        } else {
            self.open.insert(section, item);
            Some(true)
        }
    }

    /// Whether an item is expanded
    pub fn is_open(&self, section: usize, item: usize) -> bool {
        self.open.get(&section) == Some(&item)
    }

    fn in_tab(&self, section: &FaqSection) -> bool {
        match &self.tab {
            FaqTab::All => true,
            FaqTab::Category(c) => section.category == *c || section.category == ALL_CATEGORY,
        }
    }

    /// Sections and items currently visible
    ///
    /// Without a query the tab decides. With a query every section is
    /// searched, regardless of tab, and sections without matches are hidden
    /// unless pinned. Clearing the query falls back to the active tab's
    /// sections, not to every section.
    pub fn view(&self) -> Vec<SectionView<'_>> {
        if self.query.is_empty() {
            return self
                .sections
                .iter()
                .filter(|s| self.in_tab(s))
                .map(|s| SectionView { section: s, items: (0..s.items.len()).collect() })
                .collect();
        }

        self.sections
            .iter()
            .filter_map(|s| {
                let items: Vec<usize> = s
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.matches(&self.query))
                    .map(|(i, _)| i)
                    .collect();
                (!items.is_empty() || s.pinned).then_some(SectionView { section: s, items })
            })
            .collect()
    }
}
