use crate::core::{
    constants::{
        CHECKBOX_PREFIX, LOCATION_PROPERTY, NO_CONTEXT, NO_LITERATURE, THEMES_PROPERTY,
        TOPICS_PROPERTY, UNKNOWN_LOCATION,
    },
    geo::LatLng,
};
use crate::data::geojson::{GeoJsonFeature, GeoJsonGeometry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Physical or geographic nature of a location. `None` is the fallback for
/// locations whose excerpts name no category at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bus,
    River,
    Mountain,
    Wilderness,
    Trail,
    Lake,
    Forest,
    Desert,
    Road,
    Camp,
    None,
}

impl Category {
    /// Every category, fallback last
    pub const ALL: [Category; 11] = [
        Category::Bus,
        Category::River,
        Category::Mountain,
        Category::Wilderness,
        Category::Trail,
        Category::Lake,
        Category::Forest,
        Category::Desert,
        Category::Road,
        Category::Camp,
        Category::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bus => "bus",
            Category::River => "river",
            Category::Mountain => "mountain",
            Category::Wilderness => "wilderness",
            Category::Trail => "trail",
            Category::Lake => "lake",
            Category::Forest => "forest",
            Category::Desert => "desert",
            Category::Road => "road",
            Category::Camp => "camp",
            Category::None => "none",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Category::None)
    }

    /// Id of the symbol layer rendering this category
    pub fn layer_id(&self) -> String {
        format!("{}-layer", self.as_str())
    }

    /// Id the category's icon image is registered under
    pub fn icon_id(&self) -> String {
        format!("{}-icon", self.as_str())
    }

    pub fn checkbox_id(&self) -> String {
        format!("{}{}", CHECKBOX_PREFIX, self.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literary motif associated with an excerpt, independent of its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    FreedomAndEscape,
    RoadTripsAndPhysicalJourneys,
    NatureAsSolace,
    AgainstMaterialism,
    SearchForMeaning,
    Identity,
    LonelinessAndIsolation,
    Counterculture,
    TimeAndPresence,
    Risk,
    Family,
}

impl Theme {
    pub const ALL: [Theme; 11] = [
        Theme::FreedomAndEscape,
        Theme::RoadTripsAndPhysicalJourneys,
        Theme::NatureAsSolace,
        Theme::AgainstMaterialism,
        Theme::SearchForMeaning,
        Theme::Identity,
        Theme::LonelinessAndIsolation,
        Theme::Counterculture,
        Theme::TimeAndPresence,
        Theme::Risk,
        Theme::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::FreedomAndEscape => "freedom_and_escape",
            Theme::RoadTripsAndPhysicalJourneys => "road_trips_and_physical_journeys",
            Theme::NatureAsSolace => "nature_as_solace",
            Theme::AgainstMaterialism => "against_materialism",
            Theme::SearchForMeaning => "search_for_meaning",
            Theme::Identity => "identity",
            Theme::LonelinessAndIsolation => "loneliness_and_isolation",
            Theme::Counterculture => "counterculture",
            Theme::TimeAndPresence => "time_and_presence",
            Theme::Risk => "risk",
            Theme::Family => "family",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }

    pub fn checkbox_id(&self) -> String {
        format!("{}{}", CHECKBOX_PREFIX, self.as_str())
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which flag object of a feature a lookup reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagField {
    Topics,
    Themes,
}

impl FlagField {
    pub fn property(&self) -> &'static str {
        match self {
            FlagField::Topics => TOPICS_PROPERTY,
            FlagField::Themes => THEMES_PROPERTY,
        }
    }
}

/// Named boolean flags in source order. Only a literal JSON `true` sets a
/// flag; any other value reads as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    entries: Vec<(String, bool)>,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a flag object that may be inline JSON or a JSON-encoded string.
    /// A malformed value yields an empty set and a warning, never an error.
    pub fn parse(value: Option<&Value>, field: FlagField) -> Self {
        match value {
            None | Some(Value::Null) => Self::new(),
            Some(Value::Object(map)) => Self::from_object(map),
            Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
                Ok(Value::Object(map)) => Self::from_object(&map),
                Ok(other) => {
                    log::warn!(
                        "'{}' is not an object ({}), treating as empty",
                        field.property(),
                        other
                    );
                    Self::new()
                }
                Err(e) => {
                    log::warn!(
                        "malformed '{}' value {:?}: {}, treating as empty",
                        field.property(),
                        encoded,
                        e
                    );
                    Self::new()
                }
            },
            Some(other) => {
                log::warn!(
                    "unexpected '{}' value {}, treating as empty",
                    field.property(),
                    other
                );
                Self::new()
            }
        }
    }

    fn from_object(map: &serde_json::Map<String, Value>) -> Self {
        Self {
            entries: map
                .iter()
                .map(|(key, value)| (key.clone(), value.as_bool() == Some(true)))
                .collect(),
        }
    }

    /// Sets `key` to `value`, keeping its original position if already present
    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: bool) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, v)| k == key && *v)
    }

    /// Keys whose flag is set, in source order
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| *v)
            .map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One textual excerpt tied to a named location
#[derive(Debug, Clone, PartialEq)]
pub struct LiteraryFeature {
    /// `LocationName` as given; `None` when the source feature has none
    pub location: Option<String>,
    pub context: Option<String>,
    pub literature: Option<String>,
    pub topics: Flags,
    pub themes: Flags,
    /// Whether the source feature carried a `topics` property at all
    pub has_topics: bool,
    pub position: Option<LatLng>,
}

impl LiteraryFeature {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            context: None,
            literature: None,
            topics: Flags::new(),
            themes: Flags::new(),
            has_topics: true,
            position: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_literature(mut self, literature: impl Into<String>) -> Self {
        self.literature = Some(literature.into());
        self
    }

    pub fn with_topic(mut self, category: Category, value: bool) -> Self {
        self.topics.set(category.as_str(), value);
        self
    }

    pub fn with_theme(mut self, theme: Theme, value: bool) -> Self {
        self.themes.set(theme.as_str(), value);
        self
    }

    pub fn with_position(mut self, position: LatLng) -> Self {
        self.position = Some(position);
        self
    }

    /// Reads a feature out of a GeoJSON feature. Never fails: missing or
    /// malformed properties fall back to defaults.
    pub fn from_geojson(feature: &GeoJsonFeature) -> Self {
        let properties = feature.properties.as_ref();
        let string_prop = |key: &str| {
            properties
                .and_then(|p| p.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let position = match &feature.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => {
                Some(LatLng::from_lng_lat(*coordinates))
            }
            _ => None,
        };

        Self {
            location: string_prop(LOCATION_PROPERTY),
            context: string_prop("context"),
            literature: string_prop("Literature"),
            topics: Flags::parse(
                properties.and_then(|p| p.get(TOPICS_PROPERTY)),
                FlagField::Topics,
            ),
            themes: Flags::parse(
                properties.and_then(|p| p.get(THEMES_PROPERTY)),
                FlagField::Themes,
            ),
            has_topics: properties.is_some_and(|p| p.contains_key(TOPICS_PROPERTY)),
            position,
        }
    }

    /// Display name of the location
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(UNKNOWN_LOCATION)
    }

    /// The raw name, as filters on `LocationName` see it
    pub fn location_name(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn flags(&self, field: FlagField) -> &Flags {
        match field {
            FlagField::Topics => &self.topics,
            FlagField::Themes => &self.themes,
        }
    }

    pub fn context_or_default(&self) -> &str {
        self.context.as_deref().unwrap_or(NO_CONTEXT)
    }

    pub fn literature_or_default(&self) -> &str {
        self.literature.as_deref().unwrap_or(NO_LITERATURE)
    }

    /// Concrete categories from `categories` whose topic flag is set, in
    /// the order of `categories`
    pub fn true_categories(&self, categories: &[Category]) -> Vec<Category> {
        categories
            .iter()
            .copied()
            .filter(|c| !c.is_fallback() && self.topics.is_set(c.as_str()))
            .collect()
    }

    pub fn has_any_category(&self, categories: &[Category]) -> bool {
        categories
            .iter()
            .any(|c| !c.is_fallback() && self.topics.is_set(c.as_str()))
    }
}
