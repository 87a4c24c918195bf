//! Composes the checkbox selection and the category assignment into one
//! [`Filter`] per category layer.
//!
//! Membership in a category layer is gated by the assignment, never by the
//! raw topic flags, so a location appears in at most one layer. Theme
//! restrictions narrow that further: any checked theme qualifies, and the
//! "no theme" checkbox, when set, replaces them with "every theme unset".

use crate::core::config::NoneGate;
use crate::data::feature::{Category, Theme};
use crate::layers::{assignment::CategoryAssignment, filter::Filter};
use crate::ui::controls::FilterSelection;

#[derive(Debug, Clone)]
pub struct PredicateBuilder {
    categories: Vec<Category>,
    themes: Vec<Theme>,
    none_gate: NoneGate,
}

impl PredicateBuilder {
    pub fn new(categories: Vec<Category>, themes: Vec<Theme>, none_gate: NoneGate) -> Self {
        Self {
            categories,
            themes,
            none_gate,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every assigned location of `category`, themes ignored
    pub fn unfiltered(&self, assignment: &CategoryAssignment, category: Category) -> Filter {
        Filter::All(vec![
            Filter::HasTopics,
            Filter::location_in(assignment.locations_for(category)),
        ])
    }

    /// Predicate for the layer of `category` under `selection`. Checked
    /// categories and themes outside the configured lists are ignored.
    pub fn build(
        &self,
        selection: &FilterSelection,
        assignment: &CategoryAssignment,
        category: Category,
    ) -> Filter {
        let selection = self.restrict(selection);
        if selection.is_empty() {
            return Filter::Never;
        }
        if !selection.categories.is_empty() && !selection.categories.contains(&category) {
            return Filter::Never;
        }

        let mut parts = vec![Filter::HasTopics, self.category_gate(assignment, category)];
        if let Some(theme_gate) = self.theme_gate(&selection) {
            parts.push(theme_gate);
        }
        Filter::All(parts)
    }

    /// Predicates for every configured category layer, in layer order
    pub fn build_all(
        &self,
        selection: &FilterSelection,
        assignment: &CategoryAssignment,
    ) -> Vec<(Category, Filter)> {
        self.categories
            .iter()
            .map(|&category| (category, self.build(selection, assignment, category)))
            .collect()
    }

    fn category_gate(&self, assignment: &CategoryAssignment, category: Category) -> Filter {
        match (category.is_fallback(), self.none_gate) {
            (true, NoneGate::NoTopics) => Filter::All(
                self.categories
                    .iter()
                    .filter(|c| !c.is_fallback())
                    .map(|&c| Filter::topic(c, false))
                    .collect(),
            ),
            _ => Filter::location_in(assignment.locations_for(category)),
        }
    }

    /// The part of `selection` this builder's lists know about
    fn restrict(&self, selection: &FilterSelection) -> FilterSelection {
        FilterSelection {
            categories: selection
                .categories
                .iter()
                .filter(|c| self.categories.contains(c))
                .copied()
                .collect(),
            themes: selection
                .themes
                .iter()
                .filter(|t| self.themes.contains(t))
                .copied()
                .collect(),
            none_theme: selection.none_theme && !self.themes.is_empty(),
        }
    }

    fn theme_gate(&self, selection: &FilterSelection) -> Option<Filter> {
        if !selection.has_theme_restriction() {
            return None;
        }
        if selection.none_theme {
            return Some(Filter::All(
                self.themes.iter().map(|&t| Filter::theme(t, false)).collect(),
            ));
        }
        Some(Filter::Any(
            selection
                .themes
                .iter()
                .map(|&t| Filter::theme(t, true))
                .collect(),
        ))
    }
}
