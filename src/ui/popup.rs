use crate::core::geo::LatLng;
use crate::data::feature::{Flags, LiteraryFeature};
use crate::prelude::HashSet;

/// Presentation options handed to the collaborator with a popup
#[derive(Debug, Clone, PartialEq)]
pub struct PopupOptions {
    pub class_name: String,
    pub close_on_click: bool,
    pub max_width: String,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            class_name: "my-custom-popup".to_string(),
            close_on_click: true,
            max_width: "350px".to_string(),
        }
    }
}

/// One deduplicated excerpt at a location
#[derive(Debug, Clone, PartialEq)]
pub struct PopupEntry {
    pub context: String,
    /// `context` with every occurrence of the location name in `<mark>`
    pub highlighted_context: String,
    pub literature: String,
    /// Active topics, human readable, or "None"
    pub topics: String,
    /// Active themes, human readable, or "None"
    pub themes: String,
}

/// Summary of every excerpt at a clicked location
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub entries: Vec<PopupEntry>,
}

impl PopupContent {
    /// Builds the popup for `location` from the features found there.
    /// Features repeating an earlier context are dropped.
    pub fn build<'a, I>(location: &str, features: I) -> Self
    where
        I: IntoIterator<Item = &'a LiteraryFeature>,
    {
        let mut seen_contexts = HashSet::default();
        let entries = features
            .into_iter()
            .filter(|f| seen_contexts.insert(f.context_or_default().to_string()))
            .map(|f| {
                let context = f.context_or_default();
                PopupEntry {
                    context: context.to_string(),
                    highlighted_context: highlight(context, location),
                    literature: f.literature_or_default().to_string(),
                    topics: humanize(&f.topics),
                    themes: humanize(&f.themes),
                }
            })
            .collect();

        Self {
            title: location.to_string(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"popup-content\">");
        html.push_str(&format!("<h2 style=\"margin: 0 0 8px 0;\">{}</h2>", self.title));
        for entry in &self.entries {
            html.push_str("<div class=\"entry\" style=\"margin-bottom:10px;\">");
            html.push_str(
                "<hr style=\"border: 0; height: 1px; background: #ccc; margin: 10px 0;\">",
            );
            html.push_str(&format!(
                "<p><strong>Context:</strong> {}</p>",
                entry.highlighted_context
            ));
            html.push_str(&format!(
                "<p><strong>Literature:</strong> {}</p>",
                entry.literature
            ));
            html.push_str(&format!("<p><strong>Objects:</strong> {}</p>", entry.topics));
            html.push_str(&format!("<p><strong>Themes:</strong> {}</p>", entry.themes));
            html.push_str("</div>");
        }
        html.push_str("</div>");
        html
    }
}

impl std::fmt::Display for PopupContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        for entry in &self.entries {
            writeln!(f, "---")?;
            writeln!(f, "Context: {}", entry.context)?;
            writeln!(f, "Literature: {}", entry.literature)?;
            writeln!(f, "Objects: {}", entry.topics)?;
            writeln!(f, "Themes: {}", entry.themes)?;
        }
        Ok(())
    }
}

/// Literal, case-sensitive replacement; an empty name highlights nothing
fn highlight(text: &str, name: &str) -> String {
    if name.is_empty() {
        return text.to_string();
    }
    text.replace(name, &format!("<mark>{}</mark>", name))
}

fn humanize(flags: &Flags) -> String {
    let names: Vec<String> = flags.active().map(|k| k.replace('_', " ")).collect();
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

/// A popup anchored to a map position
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub position: LatLng,
    pub content: PopupContent,
    pub options: PopupOptions,
    pub visible: bool,
}

impl Popup {
    pub fn new(position: LatLng, content: PopupContent, options: PopupOptions) -> Self {
        Self {
            position,
            content,
            options,
            visible: false,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// A click on the map closes the popup when configured to
    pub fn on_map_click(&mut self) {
        if self.options.close_on_click {
            self.hide();
        }
    }
}
