//! Configuration for the visibility engine
//!
//! One engine serves every map variant. A variant differs only in its icon
//! set, category and theme lists, viewport and marker sizing, so each is a
//! preset of [`EngineConfig`] resolved from a [`MapVariant`].

use crate::core::{
    constants::{DEFAULT_DATA_URL, DEFAULT_NONE_CAP, DEFAULT_SOURCE_ID, FALLBACK_ICON_URL},
    geo::{LatLng, LatLngBounds},
};
use crate::data::feature::{Category, Theme};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapVariant {
    /// Every category and theme, with theme filtering
    #[default]
    Full,
    /// Category icons only, no theme filter controls
    CategoriesOnly,
    Custom(Box<EngineConfig>),
}

impl MapVariant {
    pub fn resolve(&self) -> EngineConfig {
        match self {
            Self::Full => EngineConfig {
                source_id: DEFAULT_SOURCE_ID.to_string(),
                data_url: DEFAULT_DATA_URL.to_string(),
                icons: default_icons(),
                fallback_icon_url: FALLBACK_ICON_URL.to_string(),
                categories: Category::ALL.to_vec(),
                themes: Theme::ALL.to_vec(),
                viewport: ViewportConfig::default(),
                icon_size_stops: vec![(0.0, 0.4), (4.0, 0.5), (8.0, 1.2), (12.0, 1.5)],
                circle_radius_stops: vec![(0.0, 20.0), (4.0, 12.0), (8.0, 40.0), (12.0, 55.0)],
                none_cap: DEFAULT_NONE_CAP,
                none_gate: NoneGate::Assigned,
                reload_policy: ReloadPolicy::Collapse,
                seed: None,
            },
            Self::CategoriesOnly => EngineConfig {
                themes: Vec::new(),
                ..Self::Full.resolve()
            },
            Self::Custom(config) => config.as_ref().clone(),
        }
    }
}

/// How the fallback layer decides membership when filters are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoneGate {
    /// Locations the assignment pass gave the fallback category
    #[default]
    Assigned,
    /// Any feature with no true topic, ignoring the fallback cap
    NoTopics,
}

/// What a source reload does while points are hidden or filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Hide everything until a control is touched again
    #[default]
    Collapse,
    /// Rebuild the filtered predicates from the current selection
    Reapply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    /// Category label; the image registers as `<name>-icon`
    pub name: String,
    pub url: String,
}

impl IconSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn image_id(&self) -> String {
        format!("{}-icon", self.name)
    }
}

fn default_icons() -> Vec<IconSpec> {
    Category::ALL
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let url = if category.is_fallback() {
                FALLBACK_ICON_URL.to_string()
            } else {
                format!("assets/icon-{:02}.png", i + 1)
            };
            IconSpec::new(category.as_str(), url)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub max_bounds: Option<LatLngBounds>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(50.0, -110.0),
            zoom: 3.2,
            min_zoom: 0.0,
            max_zoom: 12.0,
            max_bounds: Some(LatLngBounds::from_coords(22.0, -150.0, 70.0, -62.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub source_id: String,
    pub data_url: String,
    pub icons: Vec<IconSpec>,
    pub fallback_icon_url: String,
    /// Category layers in creation order; the fallback category comes last
    pub categories: Vec<Category>,
    pub themes: Vec<Theme>,
    pub viewport: ViewportConfig,
    pub icon_size_stops: Vec<(f64, f64)>,
    pub circle_radius_stops: Vec<(f64, f64)>,
    pub none_cap: usize,
    pub none_gate: NoneGate,
    pub reload_policy: ReloadPolicy,
    /// Fixed hash seed; the session seed is used when absent
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        MapVariant::default().resolve()
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration. Missing fields take the
    /// values of the full variant.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Config("category list is empty".to_string()));
        }
        if let Some(pos) = self.categories.iter().position(Category::is_fallback) {
            if pos != self.categories.len() - 1 {
                return Err(Error::Config(
                    "the fallback category must come last".to_string(),
                ));
            }
        }
        let mut seen = crate::prelude::HashSet::default();
        if let Some(dup) = self.categories.iter().find(|c| !seen.insert(**c)) {
            return Err(Error::Config(format!("duplicate category '{}'", dup)));
        }
        let mut seen = crate::prelude::HashSet::default();
        if let Some(dup) = self.themes.iter().find(|t| !seen.insert(**t)) {
            return Err(Error::Config(format!("duplicate theme '{}'", dup)));
        }
        if self.viewport.min_zoom > self.viewport.max_zoom {
            return Err(Error::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.viewport.min_zoom, self.viewport.max_zoom
            )));
        }
        let center = self.viewport.center;
        let outside = self
            .viewport
            .max_bounds
            .as_ref()
            .is_some_and(|bounds| !bounds.contains(&center));
        if !center.is_valid() || outside {
            return Err(Error::Config(format!(
                "viewport center ({}, {}) is outside the map bounds",
                center.lat, center.lng
            )));
        }
        Ok(())
    }

    /// Icons to preload: those whose name is a configured category
    pub fn category_icons(&self) -> Vec<IconSpec> {
        self.icons
            .iter()
            .filter(|icon| {
                Category::from_label(&icon.name).is_some_and(|c| self.categories.contains(&c))
            })
            .cloned()
            .collect()
    }

    pub fn has_theme_filters(&self) -> bool {
        !self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_variant() {
        let config = MapVariant::Full.resolve();
        assert_eq!(config.categories.len(), 11);
        assert_eq!(config.categories.last(), Some(&Category::None));
        assert_eq!(config.themes.len(), 11);
        assert_eq!(config.none_cap, 20);
        assert_eq!(config.icons[0], IconSpec::new("bus", "assets/icon-01.png"));
        assert_eq!(config.icons[9], IconSpec::new("camp", "assets/icon-10.png"));
        assert_eq!(config.icons[10].url, FALLBACK_ICON_URL);
        assert_eq!(config.category_icons().len(), 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_categories_only_variant() {
        let config = MapVariant::CategoriesOnly.resolve();
        assert!(!config.has_theme_filters());
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn test_custom_variant() {
        let custom = EngineConfig {
            none_cap: 3,
            ..EngineConfig::default()
        };
        let config = MapVariant::Custom(Box::new(custom.clone())).resolve();
        assert_eq!(config, custom);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "none_cap": 5, "categories": ["river", "lake", "none"], "reload_policy": "reapply" }"#,
        )
        .unwrap();
        assert_eq!(config.none_cap, 5);
        assert_eq!(
            config.categories,
            vec![Category::River, Category::Lake, Category::None]
        );
        assert_eq!(config.reload_policy, ReloadPolicy::Reapply);
        assert_eq!(config.themes.len(), 11);
        assert_eq!(config.category_icons().len(), 3);
    }

    #[test]
    fn test_validation_errors() {
        let bad = [
            r#"{ "categories": [] }"#,
            r#"{ "categories": ["none", "river"] }"#,
            r#"{ "categories": ["river", "river"] }"#,
            r#"{ "themes": ["risk", "risk"] }"#,
            r#"{ "viewport": { "center": {"lat": 0, "lng": 0}, "zoom": 1, "min_zoom": 5, "max_zoom": 2, "max_bounds": null } }"#,
            r#"{ "viewport": { "center": {"lat": 0, "lng": 0}, "zoom": 1, "min_zoom": 0, "max_zoom": 12, "max_bounds": {"south_west": {"lat": 22, "lng": -150}, "north_east": {"lat": 70, "lng": -62}} } }"#,
            r#"{ "viewport": { "center": {"lat": 95, "lng": 0}, "zoom": 1, "min_zoom": 0, "max_zoom": 12, "max_bounds": null } }"#,
        ];
        for json in bad {
            assert!(
                matches!(EngineConfig::from_json_str(json), Err(Error::Config(_))),
                "{} should be rejected",
                json
            );
        }
        assert!(matches!(
            EngineConfig::from_json_str("{ nope"),
            Err(Error::Serialization(_))
        ));
    }
}
