//! TOML feed definitions consumed by the `rssgen` binary.
//!
//! ```toml
//! [channel]
//! title = "My Feed"
//! link = "http://example.com"
//! description = "Feed desc"
//! lastBuildDate = 2023-11-14T22:13:20Z
//!
//! [[items]]
//! title = "Post 1"
//! link = "http://example.com/1"
//! pubDate = 1700000000
//! ```
//!
//! Strings, integers, floats, booleans and TOML datetimes are accepted as
//! values and converted to text. Arrays and tables are rejected.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::feed::{Feed, FeedError, Item};

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Invalid TOML in feed definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Value of '{key}' must be a scalar, not {kind}")]
    NotScalar { key: String, kind: &'static str },

    #[error("{context}: {source}")]
    Feed {
        context: String,
        #[source]
        source: FeedError,
    },
}

/// Raw channel and item tables as written in the definition file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedDefinition {
    pub channel: BTreeMap<String, toml::Value>,
    pub items: Vec<BTreeMap<String, toml::Value>>,
}

impl FeedDefinition {
    pub fn from_toml(content: &str) -> Result<Self, DefinitionError> {
        Ok(toml::from_str(content)?)
    }

    /// Sets every channel property and adds every item to `feed`.
    ///
    /// Stops at the first rejected value; the error names the property or
    /// the 1-based item number.
    pub fn apply(&self, feed: &mut Feed) -> Result<(), DefinitionError> {
        for (name, value) in &self.channel {
            let value = scalar_to_string(name, value)?;
            feed.set_channel_property(name, value)
                .map_err(|source| DefinitionError::Feed {
                    context: format!("channel property '{}'", name),
                    source,
                })?;
        }

        for (index, table) in self.items.iter().enumerate() {
            let item = table
                .iter()
                .map(|(key, value)| -> Result<(String, String), DefinitionError> {
                    Ok((key.clone(), scalar_to_string(key, value)?))
                })
                .collect::<Result<Item, _>>()?;
            feed.add_item(item).map_err(|source| DefinitionError::Feed {
                context: format!("item {}", index + 1),
                source,
            })?;
        }

        tracing::debug!(
            properties = self.channel.len(),
            items = self.items.len(),
            "Applied feed definition"
        );
        Ok(())
    }
}

fn scalar_to_string(key: &str, value: &toml::Value) -> Result<String, DefinitionError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(dt) => Ok(dt.to_string()),
        toml::Value::Array(_) => Err(DefinitionError::NotScalar {
            key: key.to_string(),
            kind: "an array",
        }),
        toml::Value::Table(_) => Err(DefinitionError::NotScalar {
            key: key.to_string(),
            kind: "a table",
        }),
    }
}
