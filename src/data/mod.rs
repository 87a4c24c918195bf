pub mod feature;
pub mod geojson;
pub mod source;

// Re-export the essential types
pub use feature::{Category, FlagField, Flags, LiteraryFeature, Theme};
pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
pub use source::FeatureSource;
