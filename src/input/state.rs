//! Show/hide/filter state of the category layers
//!
//! Each triggering event has one transition function. Transitions are pure:
//! they return the next state together with the layer updates to perform,
//! and never touch a map themselves.

use crate::{
    core::config::ReloadPolicy,
    layers::{
        assignment::CategoryAssignment, base::LayerUpdate, builder::PredicateBuilder,
        filter::Filter,
    },
    ui::controls::{FilterSelection, ToggleLabel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Every assigned location drawn, themes ignored
    #[default]
    AllShown,
    /// Nothing drawn
    Hidden,
    /// Drawn subject to the checkbox selection
    ThemeFiltered,
}

/// What a transition reads. The assignment must already be the one the
/// resulting filters should use.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub builder: &'a PredicateBuilder,
    pub assignment: &'a CategoryAssignment,
    pub selection: &'a FilterSelection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: VisibilityState,
    /// One update per category layer, in layer order
    pub updates: Vec<LayerUpdate>,
}

impl VisibilityState {
    pub fn label(&self) -> ToggleLabel {
        match self {
            VisibilityState::AllShown => ToggleLabel::HideAll,
            VisibilityState::Hidden | VisibilityState::ThemeFiltered => ToggleLabel::ShowAll,
        }
    }

    /// Whether leaving this state through the toggle shows everything again,
    /// which needs a fresh assignment first
    pub fn toggle_shows_all(&self) -> bool {
        !matches!(self, VisibilityState::AllShown)
    }

    /// The initial state after layers are created
    pub fn initial(ctx: &FilterContext<'_>) -> Transition {
        Transition {
            next: VisibilityState::AllShown,
            updates: shown(ctx),
        }
    }

    /// Show/hide button. Independent of the selection.
    pub fn on_toggle(self, ctx: &FilterContext<'_>) -> Transition {
        match self {
            VisibilityState::AllShown => Transition {
                next: VisibilityState::Hidden,
                updates: hidden(ctx),
            },
            VisibilityState::Hidden | VisibilityState::ThemeFiltered => Transition {
                next: VisibilityState::AllShown,
                updates: shown(ctx),
            },
        }
    }

    /// Any filter checkbox changed, from any state
    pub fn on_filter_changed(self, ctx: &FilterContext<'_>) -> Transition {
        Transition {
            next: VisibilityState::ThemeFiltered,
            updates: filtered(ctx),
        }
    }

    /// The source finished (re)loading
    pub fn on_reload(self, ctx: &FilterContext<'_>, policy: ReloadPolicy) -> Transition {
        match (self, policy) {
            (VisibilityState::AllShown, _) => Transition {
                next: VisibilityState::AllShown,
                updates: shown(ctx),
            },
            (VisibilityState::ThemeFiltered, ReloadPolicy::Reapply) => Transition {
                next: VisibilityState::ThemeFiltered,
                updates: filtered(ctx),
            },
            _ => Transition {
                next: VisibilityState::Hidden,
                updates: hidden(ctx),
            },
        }
    }
}

fn shown(ctx: &FilterContext<'_>) -> Vec<LayerUpdate> {
    ctx.builder
        .categories()
        .iter()
        .map(|&category| {
            LayerUpdate::show(
                category.layer_id(),
                ctx.builder.unfiltered(ctx.assignment, category),
            )
        })
        .collect()
}

fn hidden(ctx: &FilterContext<'_>) -> Vec<LayerUpdate> {
    ctx.builder
        .categories()
        .iter()
        .map(|category| LayerUpdate::hide(category.layer_id()))
        .collect()
}

fn filtered(ctx: &FilterContext<'_>) -> Vec<LayerUpdate> {
    ctx.builder
        .build_all(ctx.selection, ctx.assignment)
        .into_iter()
        .map(|(category, filter)| match filter {
            Filter::Never => LayerUpdate::hide(category.layer_id()),
            filter => LayerUpdate::show(category.layer_id(), filter),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::NoneGate, seed::SessionSeed};
    use crate::data::feature::{Category, LiteraryFeature, Theme};
    use crate::layers::{assignment::AssignmentPass, base::Visibility};

    struct Fixture {
        builder: PredicateBuilder,
        assignment: CategoryAssignment,
    }

    impl Fixture {
        fn new() -> Self {
            let categories = vec![Category::River, Category::Lake, Category::None];
            let features = vec![
                LiteraryFeature::new("A").with_topic(Category::River, true),
                LiteraryFeature::new("B"),
                LiteraryFeature::new("C").with_topic(Category::Lake, true),
            ];
            let assignment = AssignmentPass::new(SessionSeed::fixed(7), categories.clone())
                .run(&features);
            Self {
                builder: PredicateBuilder::new(categories, Theme::ALL.to_vec(), NoneGate::Assigned),
                assignment,
            }
        }

        fn ctx<'a>(&'a self, selection: &'a FilterSelection) -> FilterContext<'a> {
            FilterContext {
                builder: &self.builder,
                assignment: &self.assignment,
                selection,
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(VisibilityState::AllShown.label(), ToggleLabel::HideAll);
        assert_eq!(VisibilityState::Hidden.label(), ToggleLabel::ShowAll);
        assert_eq!(VisibilityState::ThemeFiltered.label(), ToggleLabel::ShowAll);
    }

    #[test]
    fn test_toggle_twice_restores_filters() {
        let fixture = Fixture::new();
        let selection = FilterSelection::new();
        let ctx = fixture.ctx(&selection);

        let initial = VisibilityState::initial(&ctx);
        let hidden = initial.next.on_toggle(&ctx);
        assert_eq!(hidden.next, VisibilityState::Hidden);
        assert!(hidden
            .updates
            .iter()
            .all(|u| u.visibility == Visibility::None && u.filter == Filter::Never));

        let back = hidden.next.on_toggle(&ctx);
        assert_eq!(back, initial);
    }

    #[test]
    fn test_filter_change_from_any_state() {
        let fixture = Fixture::new();
        let selection = FilterSelection::new().with_theme(Theme::Identity, true);
        let ctx = fixture.ctx(&selection);

        for state in [
            VisibilityState::AllShown,
            VisibilityState::Hidden,
            VisibilityState::ThemeFiltered,
        ] {
            let t = state.on_filter_changed(&ctx);
            assert_eq!(t.next, VisibilityState::ThemeFiltered);
            assert_eq!(t.updates.len(), 3);
            assert!(t.updates.iter().all(|u| u.visibility == Visibility::Visible));
        }
    }

    #[test]
    fn test_never_predicate_hides_layer() {
        let fixture = Fixture::new();
        let selection = FilterSelection::new().with_category(Category::River, true);
        let t = VisibilityState::AllShown.on_filter_changed(&fixture.ctx(&selection));

        assert_eq!(t.updates[0].layer_id, "river-layer");
        assert!(t.updates[0].visibility.is_visible());
        assert_eq!(t.updates[1], LayerUpdate::hide("lake-layer"));
        assert_eq!(t.updates[2], LayerUpdate::hide("none-layer"));
    }

    #[test]
    fn test_reload_collapses_unless_all_shown() {
        let fixture = Fixture::new();
        let selection = FilterSelection::new().with_theme(Theme::Risk, true);
        let ctx = fixture.ctx(&selection);

        let shown = VisibilityState::AllShown.on_reload(&ctx, ReloadPolicy::Collapse);
        assert_eq!(shown, VisibilityState::initial(&ctx));

        let collapsed = VisibilityState::ThemeFiltered.on_reload(&ctx, ReloadPolicy::Collapse);
        assert_eq!(collapsed.next, VisibilityState::Hidden);

        let hidden = VisibilityState::Hidden.on_reload(&ctx, ReloadPolicy::Reapply);
        assert_eq!(hidden.next, VisibilityState::Hidden);
    }

    #[test]
    fn test_reload_reapply_keeps_filters() {
        let fixture = Fixture::new();
        let selection = FilterSelection::new().with_theme(Theme::Risk, true);
        let ctx = fixture.ctx(&selection);

        let reapplied = VisibilityState::ThemeFiltered.on_reload(&ctx, ReloadPolicy::Reapply);
        assert_eq!(
            reapplied,
            VisibilityState::ThemeFiltered.on_filter_changed(&ctx)
        );
    }
}
