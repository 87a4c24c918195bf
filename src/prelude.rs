//! Prelude module for common litmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use litmap::prelude::*;`

pub use crate::core::{
    config::{EngineConfig, IconSpec, MapVariant, NoneGate, ReloadPolicy, ViewportConfig},
    geo::{LatLng, LatLngBounds},
    map::HeadlessMap,
    seed::{hash_str, SessionSeed},
};

pub use crate::data::{
    feature::{Category, FlagField, Flags, LiteraryFeature, Theme},
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    source::FeatureSource,
};

pub use crate::layers::{
    assignment::{AssignmentPass, CategoryAssignment},
    base::{LayerSpec, LayerUpdate, Visibility},
    builder::PredicateBuilder,
    filter::Filter,
    manager::LayerManager,
};

pub use crate::input::{
    events::{ControlEvent, ControlId, EventHandled},
    handler::Explorer,
    state::VisibilityState,
};

pub use crate::ui::{
    controls::{FilterSelection, ToggleLabel},
    popup::{PopupContent, PopupEntry, PopupOptions},
};

pub use crate::rendering::icons::{IconImage, IconRegistry};

pub use crate::traits::{Cursor, IconLoader, MapSurface};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
