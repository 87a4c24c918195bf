use crate::{
    data::{feature::LiteraryFeature, source::FeatureSource},
    layers::{
        base::{LayerSpec, Visibility},
        filter::Filter,
    },
    prelude::HashMap,
    Error, Result,
};

/// A layer as currently configured on the map
#[derive(Debug, Clone)]
pub struct ManagedLayer {
    pub spec: LayerSpec,
    pub visibility: Visibility,
    pub filter: Option<Filter>,
}

/// Manages layers for the map, handling ordering and filter state
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, ManagedLayer>,
    /// Layer IDs in creation order, bottom first
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer on top of the existing ones
    pub fn add_layer(&mut self, spec: LayerSpec) -> Result<()> {
        if self.layers.contains_key(&spec.id) {
            return Err(Error::Layer(format!("layer '{}' already exists", spec.id)));
        }
        let layer_id = spec.id.clone();
        let filter = spec.filter.clone();
        self.layers.insert(
            layer_id.clone(),
            ManagedLayer {
                spec,
                visibility: Visibility::Visible,
                filter,
            },
        );
        self.render_order.push(layer_id);
        Ok(())
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&ManagedLayer> {
        self.layers.get(layer_id)
    }

    fn layer_mut(&mut self, layer_id: &str) -> Result<&mut ManagedLayer> {
        self.layers
            .get_mut(layer_id)
            .ok_or_else(|| Error::Layer(format!("no layer '{}'", layer_id)))
    }

    pub fn set_visibility(&mut self, layer_id: &str, visibility: Visibility) -> Result<()> {
        self.layer_mut(layer_id)?.visibility = visibility;
        Ok(())
    }

    pub fn set_filter(&mut self, layer_id: &str, filter: Filter) -> Result<()> {
        self.layer_mut(layer_id)?.filter = Some(filter);
        Ok(())
    }

    /// Lists all layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&ManagedLayer> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id))
            .collect()
    }

    /// Features a layer currently draws from `source`: none when hidden,
    /// otherwise those passing its filter
    pub fn rendered<'a>(&self, layer_id: &str, source: &'a FeatureSource) -> Vec<&'a LiteraryFeature> {
        match self.layers.get(layer_id) {
            Some(layer) if layer.visibility.is_visible() && layer.spec.source == source.id() => {
                source.query(layer.filter.as_ref())
            }
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
