//! Trait seams towards the rendering collaborator
//!
//! The engine never draws. It describes sources, layers, filters and popups
//! to a [`MapSurface`] and fetches icon images through an [`IconLoader`].

use crate::{
    core::geo::LatLng,
    data::{feature::LiteraryFeature, source::FeatureSource},
    layers::{
        base::{LayerSpec, LayerUpdate, Visibility},
        filter::Filter,
    },
    rendering::icons::IconImage,
    ui::popup::{PopupContent, PopupOptions},
    Result,
};
use async_trait::async_trait;

/// Pointer cursor over the map canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// The operations the engine needs from whatever renders the map
pub trait MapSurface {
    /// Registers a point data source under `source.id()`
    fn add_source(&mut self, source: FeatureSource) -> Result<()>;

    /// Adds a layer on top of the existing ones
    fn add_layer(&mut self, spec: LayerSpec) -> Result<()>;

    fn set_visibility(&mut self, layer_id: &str, visibility: Visibility) -> Result<()>;

    /// Replaces the filter of a layer
    fn set_filter(&mut self, layer_id: &str, filter: &Filter) -> Result<()>;

    /// Currently loaded features of a source, optionally constrained by `filter`
    fn query_source_features(&self, source_id: &str, filter: Option<&Filter>)
        -> Vec<LiteraryFeature>;

    fn has_image(&self, id: &str) -> bool;

    fn add_image(&mut self, id: &str, image: IconImage) -> Result<()>;

    fn set_cursor(&mut self, cursor: Cursor);

    fn show_popup(&mut self, at: LatLng, content: &PopupContent, options: &PopupOptions);

    /// Writes visibility and filter of one layer together. A layer being
    /// shown gets its filter first; a layer being hidden is hidden first.
    fn apply(&mut self, update: &LayerUpdate) -> Result<()> {
        if update.visibility.is_visible() {
            self.set_filter(&update.layer_id, &update.filter)?;
            self.set_visibility(&update.layer_id, update.visibility)
        } else {
            self.set_visibility(&update.layer_id, update.visibility)?;
            self.set_filter(&update.layer_id, &update.filter)
        }
    }
}

/// Asynchronous image loading, e.g. an HTTP fetch of an icon
#[async_trait]
pub trait IconLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<IconImage>;
}
