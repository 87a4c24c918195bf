use crate::core::constants::{CHECKBOX_PREFIX, NONE_THEME_CHECKBOX_ID, TOGGLE_BUTTON_ID};
use crate::core::geo::LatLng;
use crate::data::feature::{Category, Theme};
use serde::{Deserialize, Serialize};

/// Notifications the engine reacts to, from page controls and from the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// The show/hide all toggle button was clicked
    ToggleClicked,
    /// A filter checkbox changed, addressed by its element id
    CheckboxChanged { id: String, checked: bool },
    /// A data source finished loading or reloading
    SourceLoaded { source_id: String, loaded: bool },
    /// A rendered feature was clicked
    FeatureClicked {
        layer_id: String,
        location: String,
        at: LatLng,
    },
    PointerEnter { layer_id: String },
    PointerLeave { layer_id: String },
    /// The renderer needs an image id it does not have
    ImageMissing { id: String },
}

impl ControlEvent {
    pub fn checkbox(id: impl Into<String>, checked: bool) -> Self {
        ControlEvent::CheckboxChanged {
            id: id.into(),
            checked,
        }
    }

    pub fn source_loaded(source_id: impl Into<String>) -> Self {
        ControlEvent::SourceLoaded {
            source_id: source_id.into(),
            loaded: true,
        }
    }
}

/// A control resolved from its element id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Toggle,
    Category(Category),
    Theme(Theme),
    NoneTheme,
}

impl ControlId {
    /// Resolves `toggle-all-themes`, `filter-none-theme`, `filter-<category>`
    /// and `filter-<theme>`. Unknown ids give `None`.
    pub fn parse(id: &str) -> Option<Self> {
        if id == TOGGLE_BUTTON_ID {
            return Some(ControlId::Toggle);
        }
        if id == NONE_THEME_CHECKBOX_ID {
            return Some(ControlId::NoneTheme);
        }
        let label = id.strip_prefix(CHECKBOX_PREFIX)?;
        Category::from_label(label)
            .map(ControlId::Category)
            .or_else(|| Theme::from_label(label).map(ControlId::Theme))
    }

    pub fn dom_id(&self) -> String {
        match self {
            ControlId::Toggle => TOGGLE_BUTTON_ID.to_string(),
            ControlId::Category(category) => category.checkbox_id(),
            ControlId::Theme(theme) => theme.checkbox_id(),
            ControlId::NoneTheme => NONE_THEME_CHECKBOX_ID.to_string(),
        }
    }
}

/// Result of event handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}
