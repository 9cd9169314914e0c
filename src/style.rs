use serde::Deserialize;
use std::fs;
use std::path::Path;

/// CSS class strings emitted into rendered HTML fragments.
///
/// Defaults match the classes the web client ships with; a TOML file can
/// override any subset of fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Style {
    pub paragraph: String,
    pub link: String,
    pub code: String,
    pub list: String,
    pub list_item: String,
    pub h1: String,
    pub h2: String,
    pub h3: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            paragraph: "my-2".to_string(),
            link: "text-blue-500 underline".to_string(),
            code: "bg-gray-100 rounded px-1 py-0.5".to_string(),
            list: "list-disc my-2".to_string(),
            list_item: "ml-5".to_string(),
            h1: "text-2xl font-bold my-4".to_string(),
            h2: "text-xl font-bold my-3".to_string(),
            h3: "text-lg font-bold my-2".to_string(),
        }
    }
}

impl Style {
    /// Load a style from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}
