//! # litmap
//!
//! Feature visibility and filter composition for maps of literary locations.
//!
//! Locations extracted from texts are grouped by name, each location is given
//! exactly one display category per session, and user-selected category and
//! theme filters are composed into one predicate per category layer. Drawing
//! is left to a rendering collaborator behind the [`MapSurface`] trait;
//! [`HeadlessMap`] is an in-memory implementation of it.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{EngineConfig, MapVariant},
    geo::{LatLng, LatLngBounds},
    map::HeadlessMap,
    seed::SessionSeed,
};

pub use crate::data::{
    feature::{Category, Flags, LiteraryFeature, Theme},
    geojson::GeoJson,
    source::FeatureSource,
};

pub use crate::layers::{
    assignment::CategoryAssignment,
    base::{LayerSpec, Visibility},
    filter::Filter,
};

pub use crate::input::{events::ControlEvent, handler::Explorer, state::VisibilityState};

pub use crate::ui::{controls::FilterSelection, popup::PopupContent};

pub use crate::rendering::icons::IconRegistry;

pub use crate::traits::{IconLoader, MapSurface};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Failed to load icon '{icon}': {reason}")]
    AssetLoad { icon: String, reason: String },

    #[cfg(feature = "fetch")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}
