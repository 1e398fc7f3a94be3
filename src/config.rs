// ABOUTME: Presentation configuration loading for the soapbox compiler
// ABOUTME: Parses soapbox.json into sections, templates, and deck metadata

use crate::errors::{DeckError, Result};
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the presentation config file, looked up in the presentation root.
pub const CONFIG_FILE: &str = "soapbox.json";

/// The raw config file: either a full object or a bare list of sections.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Full(RawFull),
    Bare(Vec<RawSection>),
}

#[derive(Debug, Deserialize)]
struct RawFull {
    name: Option<String>,
    #[serde(default)]
    sections: Vec<RawSection>,
    #[serde(default)]
    templates: HashMap<String, String>,
    encoding: Option<String>,
}

/// A section descriptor: a plain path string, a `{"section": path}` object,
/// or a `#`-prefixed literal heading.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSection {
    Path(String),
    Object { section: String },
}

impl RawSection {
    fn into_string(self) -> String {
        match self {
            RawSection::Path(path) => path,
            RawSection::Object { section } => section,
        }
    }
}

/// Resolved presentation configuration for one deck.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deck title.
    pub title: String,
    /// Ordered section entries: paths or literal `#` headings.
    pub sections: Vec<String>,
    /// Template name to file path (relative to the presentation root).
    pub templates: HashMap<String, String>,
    /// Optional source file encoding label (e.g. "windows-1252").
    pub encoding: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            sections: vec![".".to_string()],
            templates: HashMap::new(),
            encoding: None,
        }
    }
}

impl Config {
    /// Load the config file from the presentation root. A missing or
    /// unparseable file falls back to a single default section covering the
    /// whole directory; compilation never fails on bad configuration.
    pub fn load(presentation_dir: &Path) -> Self {
        let path = presentation_dir.join(CONFIG_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "No config at {:?} ({}); using the current directory as the only section",
                    path, err
                );
                return Self::default();
            }
        };

        match Self::parse(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("Invalid config {:?} ({}); falling back to defaults", path, err);
                Self::default()
            }
        }
    }

    /// Parse config JSON in either accepted shape: a full object or a bare
    /// list of sections.
    pub fn parse(raw: &str) -> Result<Self> {
        match serde_json::from_str::<RawConfig>(raw) {
            Ok(RawConfig::Full(full)) => {
                let sections = if full.sections.is_empty() {
                    vec![".".to_string()]
                } else {
                    full.sections
                        .into_iter()
                        .map(RawSection::into_string)
                        .collect()
                };
                Ok(Self {
                    title: full.name.unwrap_or_else(|| "Presentation".to_string()),
                    sections,
                    templates: full.templates,
                    encoding: full.encoding,
                })
            }
            Ok(RawConfig::Bare(sections)) => Ok(Self {
                sections: sections.into_iter().map(RawSection::into_string).collect(),
                ..Self::default()
            }),
            Err(err) => Err(DeckError::ConfigError(err.to_string())),
        }
    }
}
