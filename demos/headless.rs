use async_trait::async_trait;
use litmap::prelude::*;

/// Pretends every icon url resolves to a tiny image
struct InlineIcons;

#[async_trait]
impl IconLoader for InlineIcons {
    async fn load(&self, url: &str) -> litmap::Result<IconImage> {
        Ok(IconImage::new(url, vec![0x89, b'P', b'N', b'G']))
    }
}

const COLLECTION: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-105.0, 39.7]},
         "properties": {"LocationName": "Denver", "context": "Denver at dawn", "Literature": "On the Road",
                        "topics": "{\"road\": true, \"bus\": true}", "themes": "{\"freedom_and_escape\": true}"}},
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-71.3, 42.4]},
         "properties": {"LocationName": "Walden Pond", "context": "I went to the woods at Walden Pond",
                        "Literature": "Walden", "topics": "{\"lake\": true}", "themes": "{\"nature_as_solace\": true}"}},
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-121.8, 36.3]},
         "properties": {"LocationName": "Big Sur", "context": "the cabin", "topics": "{}", "themes": "{}"}}
    ]
}"#;

/// Drives the engine against an in-memory map, without any renderer
fn main() -> anyhow::Result<()> {
    litmap::init_logging();
    println!("🗺️ litmap headless example");
    println!("==========================");

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let config = EngineConfig {
        seed: Some(2024),
        ..EngineConfig::default()
    };
    let mut explorer = Explorer::new(config.clone())?;
    let mut map = HeadlessMap::new(config.viewport.clone());

    let source = FeatureSource::from_str(&config.source_id, COLLECTION)?;
    runtime.block_on(explorer.load(&mut map, &InlineIcons, source))?;

    println!("✅ {} layers, {} icons", map.layers().len(), map.image_count());
    for (location, category) in explorer.assignment().iter() {
        println!("   📍 {} -> {}", location, category);
    }
    report(&explorer, &map);

    println!("\n🎯 Checking 'nature as solace':");
    explorer.handle(&mut map, ControlEvent::checkbox("filter-nature_as_solace", true))?;
    report(&explorer, &map);

    println!("\n🔁 Toggling:");
    explorer.handle(&mut map, ControlEvent::ToggleClicked)?;
    report(&explorer, &map);
    explorer.handle(&mut map, ControlEvent::ToggleClicked)?;
    report(&explorer, &map);

    println!("\n🖱️ Clicking Denver:");
    explorer.handle(
        &mut map,
        ControlEvent::FeatureClicked {
            layer_id: Category::Road.layer_id(),
            location: "Denver".to_string(),
            at: LatLng::new(39.7, -105.0),
        },
    )?;
    if let Some(popup) = map.popup() {
        print!("{}", popup.content);
    }

    Ok(())
}

fn report(explorer: &Explorer, map: &HeadlessMap) {
    println!(
        "   state {:?}, button '{}', visible: {:?}",
        explorer.state(),
        explorer.toggle_label(),
        map.visible_locations()
    );
}
