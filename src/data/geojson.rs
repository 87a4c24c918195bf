use crate::data::feature::LiteraryFeature;
use serde::{Deserialize, Serialize};

/// GeoJSON geometry types. Only points are read; the other kinds are
/// accepted so a mixed collection still parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties. Properties keep their
/// source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Geometry(GeoJsonGeometry),
}

impl GeoJson {
    /// Parses a GeoJSON document
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))
    }

    /// Raw features of the document, in source order. A bare geometry has none.
    pub fn raw_features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
            GeoJson::Geometry(_) => Vec::new(),
        }
    }

    /// Literary features of the document, in source order
    pub fn literary_features(&self) -> Vec<LiteraryFeature> {
        self.raw_features()
            .into_iter()
            .map(LiteraryFeature::from_geojson)
            .collect()
    }
}
