use crate::{
    data::{feature::LiteraryFeature, geojson::GeoJson},
    layers::filter::Filter,
    Result,
};

#[cfg(feature = "fetch")]
use once_cell::sync::Lazy;

/// Shared async HTTP client for feature collection downloads
#[cfg(feature = "fetch")]
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent("litmap/0.1.0")
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// A point data source: the whole feature collection, supplied at load time
#[derive(Debug, Clone, Default)]
pub struct FeatureSource {
    id: String,
    features: Vec<LiteraryFeature>,
}

impl FeatureSource {
    pub fn new(id: impl Into<String>, features: Vec<LiteraryFeature>) -> Self {
        Self {
            id: id.into(),
            features,
        }
    }

    pub fn from_geojson(id: impl Into<String>, geojson: &GeoJson) -> Self {
        Self::new(id, geojson.literary_features())
    }

    pub fn from_str(id: impl Into<String>, geojson_str: &str) -> Result<Self> {
        let geojson = GeoJson::from_str(geojson_str)?;
        Ok(Self::from_geojson(id, &geojson))
    }

    /// Downloads and parses the collection at `url`
    #[cfg(feature = "fetch")]
    pub async fn fetch(id: impl Into<String>, url: &str) -> Result<Self> {
        log::debug!("fetching feature collection from {}", url);
        let geojson: GeoJson = HTTP_CLIENT
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let source = Self::from_geojson(id, &geojson);
        log::info!("loaded {} features from {}", source.len(), url);
        Ok(source)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn features(&self) -> &[LiteraryFeature] {
        &self.features
    }

    /// Features matching `filter` (all of them for `None`), in source order
    pub fn query(&self, filter: Option<&Filter>) -> Vec<&LiteraryFeature> {
        self.features
            .iter()
            .filter(|f| filter.map_or(true, |filter| filter.evaluate(f)))
            .collect()
    }

    /// Distinct location names in first-seen order. Unnamed features are skipped.
    pub fn locations(&self) -> Vec<&str> {
        let mut seen = fxhash::FxHashSet::default();
        self.features
            .iter()
            .filter_map(LiteraryFeature::location_name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature::Category;

    fn source() -> FeatureSource {
        FeatureSource::new(
            "combined",
            vec![
                LiteraryFeature::new("Denver").with_context("first"),
                LiteraryFeature::new("Walden Pond").with_topic(Category::Lake, true),
                LiteraryFeature::new("Denver").with_context("second"),
            ],
        )
    }

    #[test]
    fn test_locations_first_seen_order() {
        assert_eq!(source().locations(), vec!["Denver", "Walden Pond"]);
    }

    #[test]
    fn test_unnamed_features_have_no_location() {
        let mut unnamed = LiteraryFeature::new("x");
        unnamed.location = None;
        let source = FeatureSource::new("combined", vec![unnamed, LiteraryFeature::new("Boise")]);
        assert_eq!(source.locations(), vec!["Boise"]);
        assert!(source
            .query(Some(&Filter::location_eq("Unknown Location")))
            .is_empty());
    }

    #[test]
    fn test_query_without_filter_returns_everything() {
        let source = source();
        assert_eq!(source.query(None).len(), 3);
        assert_eq!(source.query(Some(&Filter::Never)).len(), 0);
    }

    #[test]
    fn test_from_str() {
        let source = FeatureSource::from_str(
            "combined",
            r#"{"type": "FeatureCollection", "features": []}"#,
        )
        .unwrap();
        assert!(source.is_empty());
        assert_eq!(source.id(), "combined");
    }
}
