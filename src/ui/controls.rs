use crate::core::constants::{HIDE_ALL_LABEL, SHOW_ALL_LABEL};
use crate::data::feature::{Category, Theme};
use std::collections::BTreeSet;

/// Snapshot of the filter checkboxes. Handlers replace it wholesale; the
/// predicate builder only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub categories: BTreeSet<Category>,
    pub themes: BTreeSet<Theme>,
    /// The "no theme" checkbox
    pub none_theme: bool,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every category checked, no theme restriction
    pub fn all_categories(categories: &[Category]) -> Self {
        Self {
            categories: categories.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category, checked: bool) -> Self {
        if checked {
            self.categories.insert(category);
        } else {
            self.categories.remove(&category);
        }
        self
    }

    pub fn with_theme(mut self, theme: Theme, checked: bool) -> Self {
        if checked {
            self.themes.insert(theme);
        } else {
            self.themes.remove(&theme);
        }
        self
    }

    pub fn with_none_theme(mut self, checked: bool) -> Self {
        self.none_theme = checked;
        self
    }

    /// Nothing checked at all
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.themes.is_empty() && !self.none_theme
    }

    pub fn has_theme_restriction(&self) -> bool {
        self.none_theme || !self.themes.is_empty()
    }
}

/// Wording of the show/hide toggle button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    HideAll,
    ShowAll,
}

impl ToggleLabel {
    pub fn text(&self) -> &'static str {
        match self {
            ToggleLabel::HideAll => HIDE_ALL_LABEL,
            ToggleLabel::ShowAll => SHOW_ALL_LABEL,
        }
    }
}

impl std::fmt::Display for ToggleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
