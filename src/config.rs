//! Configuration file parser for rssgen's `config.toml`.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::feed::{
    is_valid_element_name, ElementSet, Feed, RenderOptions, MANDATORY_CHANNEL_ELEMENTS,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// An override removes an element the feed cannot work without.
    #[error("Cannot remove required element '{0}'")]
    RequiredElement(String),

    /// An added element name cannot be written as an XML tag.
    #[error("Invalid element name '{0}': must be an unprefixed XML name")]
    InvalidElementName(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Additions to and removals from a default element whitelist.
///
/// Removals apply first, so an element listed in both ends up allowed and
/// moved to the end of the emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementOverrides {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl ElementOverrides {
    fn apply(&self, mut set: ElementSet, required: &[&str]) -> Result<ElementSet, ConfigError> {
        for name in &self.remove {
            if required.contains(&name.as_str()) {
                return Err(ConfigError::RequiredElement(name.clone()));
            }
            set.remove(name);
        }
        for name in &self.add {
            if !is_valid_element_name(name) {
                return Err(ConfigError::InvalidElementName(name.clone()));
            }
            set.insert(name.as_str());
        }
        Ok(set)
    }
}

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changes to the 18 standard channel elements.
    pub channel_elements: ElementOverrides,

    /// Changes to the 10 standard item elements.
    pub item_elements: ElementOverrides,

    /// Spaces per nesting level in rendered XML. 0 = single line.
    pub indent: usize,

    /// Whether to drop characters XML 1.0 forbids from values.
    pub strip_control_chars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_elements: ElementOverrides::default(),
            item_elements: ElementOverrides::default(),
            indent: 2,
            strip_control_chars: true,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text. Blank text yields defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "channel_elements",
                "item_elements",
                "indent",
                "strip_control_chars",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        // Surface invalid overrides at load time rather than at first use.
        config.channel_elements()?;
        config.item_elements()?;
        Ok(config)
    }

    /// Effective channel whitelist.
    pub fn channel_elements(&self) -> Result<ElementSet, ConfigError> {
        self.channel_elements
            .apply(ElementSet::channel(), &MANDATORY_CHANNEL_ELEMENTS)
    }

    /// Effective item whitelist.
    pub fn item_elements(&self) -> Result<ElementSet, ConfigError> {
        self.item_elements
            .apply(ElementSet::item(), &["title", "description"])
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent: self.indent,
            strip_control_chars: self.strip_control_chars,
        }
    }

    /// A fresh feed using this configuration's whitelists.
    pub fn new_feed(&self) -> Result<Feed, ConfigError> {
        Ok(Feed::with_elements(
            self.channel_elements()?,
            self.item_elements()?,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
