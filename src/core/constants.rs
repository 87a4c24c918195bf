//! Ids, property names and defaults shared across the engine

/// Maximum number of "none"-category fallback markers per assignment pass.
pub const DEFAULT_NONE_CAP: usize = 20;

/// Session seeds are drawn from `0..SEED_RANGE`.
pub const SEED_RANGE: u32 = 1_000_000;

/// Source id the feature collection is registered under.
pub const DEFAULT_SOURCE_ID: &str = "combined";

/// Static URL of the pre-built feature collection.
pub const DEFAULT_DATA_URL: &str = "output_final.geojson";

/// Property holding the location identity of a feature.
pub const LOCATION_PROPERTY: &str = "LocationName";

/// Property holding the JSON-encoded topic flags.
pub const TOPICS_PROPERTY: &str = "topics";

/// Property holding the JSON-encoded theme flags.
pub const THEMES_PROPERTY: &str = "themes";

/// Id of the translucent circle layer drawn beneath the category icons.
pub const BACKGROUND_LAYER_ID: &str = "circle-background";

/// Icon registered in place of any icon the renderer asks for but lacks.
pub const FALLBACK_ICON_URL: &str = "assets/marker_logo-01.png";

/// Dom id of the show/hide toggle button.
pub const TOGGLE_BUTTON_ID: &str = "toggle-all-themes";

/// Prefix shared by every filter checkbox id.
pub const CHECKBOX_PREFIX: &str = "filter-";

/// Checkbox id of the "no theme" filter.
pub const NONE_THEME_CHECKBOX_ID: &str = "filter-none-theme";

/// Toggle wording while every categorized location is shown.
pub const HIDE_ALL_LABEL: &str = "Hide All Points";

/// Toggle wording while points are hidden or filtered.
pub const SHOW_ALL_LABEL: &str = "Show All Points";

pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const NO_CONTEXT: &str = "No context provided.";
pub const NO_LITERATURE: &str = "No literature info.";
