use async_trait::async_trait;
use litmap::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves a few bytes for every url, except those told to fail
#[derive(Default)]
pub struct MockLoader {
    failing: Mutex<HashSet<String>>,
    calls: AtomicUsize,
}

impl MockLoader {
    pub fn failing(urls: &[&str]) -> Self {
        let loader = Self::default();
        if let Ok(mut failing) = loader.failing.lock() {
            failing.extend(urls.iter().map(|u| u.to_string()));
        }
        loader
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IconLoader for MockLoader {
    async fn load(&self, url: &str) -> litmap::Result<IconImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let fails = self
            .failing
            .lock()
            .map(|failing| failing.contains(url))
            .unwrap_or(false);
        if fails {
            return Err(MapError::AssetLoad {
                icon: url.to_string(),
                reason: "404 Not Found".to_string(),
            });
        }
        tokio::task::yield_now().await;
        Ok(IconImage::new(url, url.as_bytes().to_vec()))
    }
}

pub const COLLECTION: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-105.0, 39.7]},
            "properties": {
                "LocationName": "Denver",
                "context": "we rolled into Denver at dawn",
                "Literature": "On the Road",
                "topics": "{\"road\": true, \"bus\": true}",
                "themes": "{\"identity\": true, \"freedom_and_escape\": true}"
            }
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-105.0, 39.7]},
            "properties": {
                "LocationName": "Denver",
                "context": "we rolled into Denver at dawn",
                "Literature": "On the Road (reprint)",
                "topics": "{\"road\": true}",
                "themes": "{\"identity\": true}"
            }
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-71.3, 42.4]},
            "properties": {
                "LocationName": "Walden Pond",
                "context": "I went to the woods",
                "Literature": "Walden",
                "topics": {"lake": true, "forest": true},
                "themes": {"identity": false, "nature_as_solace": true}
            }
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-121.8, 36.3]},
            "properties": {
                "LocationName": "Big Sur",
                "context": "the cabin at Big Sur",
                "Literature": "Big Sur",
                "topics": "{}",
                "themes": "not json"
            }
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-90.2, 38.6]},
            "properties": {
                "LocationName": "St. Louis",
                "context": "down the river past St. Louis",
                "topics": "{\"river\": true}",
                "themes": "{}"
            }
        }
    ]
}"#;

pub fn source() -> FeatureSource {
    FeatureSource::from_str(litmap::constants::DEFAULT_SOURCE_ID, COLLECTION)
        .expect("fixture collection parses")
}

pub fn config() -> EngineConfig {
    EngineConfig {
        seed: Some(42),
        ..EngineConfig::default()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
