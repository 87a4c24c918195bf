use crate::{
    core::{config::ViewportConfig, geo::LatLng},
    data::{feature::LiteraryFeature, source::FeatureSource},
    layers::{
        base::{LayerSpec, Visibility},
        filter::Filter,
        manager::LayerManager,
    },
    prelude::HashMap,
    rendering::icons::IconImage,
    traits::{Cursor, MapSurface},
    ui::popup::{Popup, PopupContent, PopupOptions},
    Error, Result,
};

/// In-memory [`MapSurface`] that records everything the engine asks of a
/// renderer. Used by the demo and the tests, and as a reference for real
/// map backends.
pub struct HeadlessMap {
    viewport: ViewportConfig,
    sources: HashMap<String, FeatureSource>,
    layers: LayerManager,
    images: HashMap<String, IconImage>,
    cursor: Cursor,
    popup: Option<Popup>,
}

impl HeadlessMap {
    pub fn new(viewport: ViewportConfig) -> Self {
        Self {
            viewport,
            sources: HashMap::default(),
            layers: LayerManager::new(),
            images: HashMap::default(),
            cursor: Cursor::Default,
            popup: None,
        }
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn source(&self, source_id: &str) -> Option<&FeatureSource> {
        self.sources.get(source_id)
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn popup_mut(&mut self) -> Option<&mut Popup> {
        self.popup.as_mut()
    }

    pub fn image(&self, id: &str) -> Option<&IconImage> {
        self.images.get(id)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Distinct locations a layer currently draws, in source order
    pub fn rendered_locations(&self, layer_id: &str) -> Vec<String> {
        let Some(layer) = self.layers.get_layer(layer_id) else {
            return Vec::new();
        };
        let Some(source) = self.sources.get(&layer.spec.source) else {
            return Vec::new();
        };
        let mut seen = crate::prelude::HashSet::default();
        self.layers
            .rendered(layer_id, source)
            .into_iter()
            .filter(|f| seen.insert(f.location()))
            .map(|f| f.location().to_string())
            .collect()
    }

    /// Distinct locations drawn by any category symbol layer
    pub fn visible_locations(&self) -> Vec<String> {
        let mut seen = crate::prelude::HashSet::default();
        let mut out = Vec::new();
        for layer in self.layers.layers() {
            if layer.spec.category.is_none() {
                continue;
            }
            for location in self.rendered_locations(&layer.spec.id) {
                if seen.insert(location.clone()) {
                    out.push(location);
                }
            }
        }
        out
    }

    /// Icon ids that symbol layers reference but no image exists for.
    /// A real renderer reports these through its missing-image event.
    pub fn missing_images(&self) -> Vec<String> {
        self.layers
            .layers()
            .into_iter()
            .filter_map(|layer| layer.spec.category.map(|c| c.icon_id()))
            .filter(|id| !self.images.contains_key(id))
            .collect()
    }

    /// Closes the popup as a click elsewhere on the map would
    pub fn click_map(&mut self) {
        if let Some(popup) = self.popup.as_mut() {
            popup.on_map_click();
        }
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl MapSurface for HeadlessMap {
    fn add_source(&mut self, source: FeatureSource) -> Result<()> {
        if self.sources.contains_key(source.id()) {
            return Err(Error::Layer(format!(
                "source '{}' already exists",
                source.id()
            )));
        }
        log::debug!("source '{}' added with {} features", source.id(), source.len());
        self.sources.insert(source.id().to_string(), source);
        Ok(())
    }

    fn add_layer(&mut self, spec: LayerSpec) -> Result<()> {
        if !self.sources.contains_key(&spec.source) {
            return Err(Error::Layer(format!(
                "layer '{}' references unknown source '{}'",
                spec.id, spec.source
            )));
        }
        if let Some(category) = spec.category {
            if !self.images.contains_key(&category.icon_id()) {
                log::debug!("layer '{}' added before its icon", spec.id);
            }
        }
        self.layers.add_layer(spec)
    }

    fn set_visibility(&mut self, layer_id: &str, visibility: Visibility) -> Result<()> {
        self.layers.set_visibility(layer_id, visibility)
    }

    fn set_filter(&mut self, layer_id: &str, filter: &Filter) -> Result<()> {
        self.layers.set_filter(layer_id, filter.clone())
    }

    fn query_source_features(
        &self,
        source_id: &str,
        filter: Option<&Filter>,
    ) -> Vec<LiteraryFeature> {
        self.sources
            .get(source_id)
            .map(|source| source.query(filter).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    fn has_image(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    fn add_image(&mut self, id: &str, image: IconImage) -> Result<()> {
        if self.images.contains_key(id) {
            return Err(Error::AssetLoad {
                icon: id.to_string(),
                reason: "image already registered".to_string(),
            });
        }
        self.images.insert(id.to_string(), image);
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn show_popup(&mut self, at: LatLng, content: &PopupContent, options: &PopupOptions) {
        let mut popup = Popup::new(at, content.clone(), options.clone());
        popup.show();
        self.popup = Some(popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::Category;

    fn map_with_source() -> HeadlessMap {
        let mut map = HeadlessMap::default();
        map.add_source(FeatureSource::new(
            "combined",
            vec![
                LiteraryFeature::new("Denver").with_topic(Category::Road, true),
                LiteraryFeature::new("Denver").with_context("again"),
                LiteraryFeature::new("Boise"),
            ],
        ))
        .unwrap();
        map
    }

    #[test]
    fn test_layer_needs_source() {
        let mut map = HeadlessMap::default();
        let result = map.add_layer(LayerSpec::circle_background("combined", &[]));
        assert!(matches!(result, Err(Error::Layer(_))));
    }

    #[test]
    fn test_duplicate_source_rejected() {
        let mut map = map_with_source();
        assert!(map.add_source(FeatureSource::new("combined", vec![])).is_err());
    }

    #[test]
    fn test_rendered_locations_are_distinct() {
        let mut map = map_with_source();
        map.add_layer(LayerSpec::category_symbol("combined", Category::Road, &[]))
            .unwrap();
        assert!(map.rendered_locations("road-layer").is_empty());

        map.set_filter("road-layer", &Filter::location_in(["Denver", "Boise"]))
            .unwrap();
        assert_eq!(map.rendered_locations("road-layer"), vec!["Denver", "Boise"]);
        assert_eq!(map.visible_locations(), vec!["Denver", "Boise"]);

        map.set_visibility("road-layer", Visibility::None).unwrap();
        assert!(map.visible_locations().is_empty());
    }

    #[test]
    fn test_missing_images_tracked() {
        let mut map = map_with_source();
        map.add_layer(LayerSpec::category_symbol("combined", Category::Road, &[]))
            .unwrap();
        assert_eq!(map.missing_images(), vec!["road-icon"]);

        map.add_image("road-icon", IconImage::new("icon.png", vec![1]))
            .unwrap();
        assert!(map.missing_images().is_empty());
        assert!(map
            .add_image("road-icon", IconImage::new("icon.png", vec![1]))
            .is_err());
    }

    #[test]
    fn test_query_unknown_source_is_empty() {
        let map = map_with_source();
        assert!(map.query_source_features("other", None).is_empty());
        assert_eq!(map.query_source_features("combined", None).len(), 3);
    }

    #[test]
    fn test_popup_and_cursor() {
        let mut map = map_with_source();
        map.set_cursor(Cursor::Pointer);
        assert_eq!(map.cursor(), Cursor::Pointer);

        let content = PopupContent::build("Boise", Vec::<&LiteraryFeature>::new());
        map.show_popup(LatLng::new(43.6, -116.2), &content, &PopupOptions::default());
        assert!(map.popup().map_or(false, |p| p.visible));
        map.click_map();
        assert!(!map.popup().map_or(true, |p| p.visible));
    }
}
