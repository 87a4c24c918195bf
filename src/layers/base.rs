use crate::core::constants::BACKGROUND_LAYER_ID;
use crate::data::feature::Category;
use crate::layers::filter::Filter;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Circle,
    Symbol,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Circle => write!(f, "circle"),
            LayerType::Symbol => write!(f, "symbol"),
        }
    }
}

/// Layout visibility of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    None,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Declarative description of a layer bound to the feature source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub source: String,
    pub layout: Value,
    pub paint: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Category drawn by this layer, if it is a category layer
    #[serde(skip)]
    pub category: Option<Category>,
}

impl LayerSpec {
    /// Translucent white disc drawn under every point, never filtered
    pub fn circle_background(source: &str, radius_stops: &[(f64, f64)]) -> Self {
        Self {
            id: BACKGROUND_LAYER_ID.to_string(),
            layer_type: LayerType::Circle,
            source: source.to_string(),
            layout: json!({}),
            paint: json!({
                "circle-color": "#ffffff",
                "circle-opacity": 0.4,
                "circle-radius": interpolate_zoom(radius_stops),
                "circle-stroke-width": 0.3,
                "circle-stroke-color": "#ffffff"
            }),
            filter: None,
            category: None,
        }
    }

    /// Icon layer for one category. Starts empty; the visibility state
    /// machine installs its real filter.
    pub fn category_symbol(source: &str, category: Category, icon_size_stops: &[(f64, f64)]) -> Self {
        Self {
            id: category.layer_id(),
            layer_type: LayerType::Symbol,
            source: source.to_string(),
            layout: json!({
                "icon-image": category.icon_id(),
                "icon-size": interpolate_zoom(icon_size_stops),
                "icon-allow-overlap": true
            }),
            paint: json!({}),
            filter: Some(Filter::Never),
            category: Some(category),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// `["interpolate", ["linear"], ["zoom"], z0, v0, z1, v1, ..]`
pub fn interpolate_zoom(stops: &[(f64, f64)]) -> Value {
    let mut expr = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
    for (zoom, value) in stops {
        expr.push(json!(zoom));
        expr.push(json!(value));
    }
    Value::Array(expr)
}

/// Visibility and filter written to one layer in a single step
#[derive(Debug, Clone, PartialEq)]
pub struct LayerUpdate {
    pub layer_id: String,
    pub visibility: Visibility,
    pub filter: Filter,
}

impl LayerUpdate {
    pub fn show(layer_id: impl Into<String>, filter: Filter) -> Self {
        Self {
            layer_id: layer_id.into(),
            visibility: Visibility::Visible,
            filter,
        }
    }

    pub fn hide(layer_id: impl Into<String>) -> Self {
        Self {
            layer_id: layer_id.into(),
            visibility: Visibility::None,
            filter: Filter::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Circle.to_string(), "circle");
        assert_eq!(LayerType::Symbol.to_string(), "symbol");
    }

    #[test]
    fn test_interpolate_zoom() {
        assert_eq!(
            interpolate_zoom(&[(0.0, 0.4), (12.0, 1.5)]),
            json!(["interpolate", ["linear"], ["zoom"], 0.0, 0.4, 12.0, 1.5])
        );
    }

    #[test]
    fn test_category_symbol_spec() {
        let spec = LayerSpec::category_symbol("combined", Category::Trail, &[(0.0, 0.4)]);
        let value = spec.to_json();
        assert_eq!(value["id"], "trail-layer");
        assert_eq!(value["type"], "symbol");
        assert_eq!(value["source"], "combined");
        assert_eq!(value["layout"]["icon-image"], "trail-icon");
        assert_eq!(value["layout"]["icon-allow-overlap"], true);
        assert_eq!(value["filter"], json!(["literal", false]));
        assert_eq!(spec.category, Some(Category::Trail));
    }

    #[test]
    fn test_circle_background_has_no_filter() {
        let value = LayerSpec::circle_background("combined", &[(0.0, 20.0)]).to_json();
        assert_eq!(value["id"], BACKGROUND_LAYER_ID);
        assert_eq!(value["paint"]["circle-opacity"], 0.4);
        assert!(value.get("filter").is_none());
    }

    #[test]
    fn test_layer_update_hide_pairs_with_never() {
        let update = LayerUpdate::hide("river-layer");
        assert_eq!(update.visibility, Visibility::None);
        assert_eq!(update.filter, Filter::Never);
        assert!(!update.visibility.is_visible());
    }
}
