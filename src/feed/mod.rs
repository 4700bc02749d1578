//! Feed assembly: validated channel metadata, item normalization, and RSS
//! serialization.
//!
//! - **Dates**: flexible inputs normalized to RFC-822 with a `GMT` zone
//! - **Properties**: channel metadata checked against a whitelist
//! - **Pipeline**: ordered prepare/check hooks every item passes through
//! - **Assembly**: the [`Feed`] lifecycle and its finalize step
//! - **Rendering**: RSS 2.0 XML output via `quick-xml`
//!
//! # Architecture
//!
//! - [`date`] - `normalize_date` and the accepted [`DateInput`] shapes
//! - [`elements`] - the channel and item whitelists as ordered [`ElementSet`]s
//! - [`properties`] - [`PropertyStore`]
//! - [`pipeline`] - [`ItemPipeline`] plus the built-in `check_item`/`clean_item`
//! - [`assembler`] - [`Feed`] and the [`RenderedFeed`] handoff
//! - [`render`] - `render_rss`
//!
//! # Example
//!
//! ```
//! use rssgen::feed::{render_rss, Feed, Item, RenderOptions};
//!
//! let mut feed = Feed::new();
//! feed.set_channel_property("title", "My Feed")?;
//! feed.set_channel_property("description", "Feed desc")?;
//! feed.set_channel_property("link", "http://example.com")?;
//! feed.add_item(Item::from([("title", "Post 1"), ("link", "http://example.com/1")]))?;
//!
//! let xml = render_rss(&feed.finalize()?, &RenderOptions::default())?;
//! assert!(xml.contains("<guid>http://example.com/1</guid>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assembler;
mod date;
mod elements;
mod item;
mod pipeline;
mod properties;
mod render;
mod types;

pub use assembler::{Feed, PropertiesHook, RenderedFeed};
pub use date::{normalize_date, DateInput};
pub use elements::{
    is_valid_element_name, ElementSet, CHANNEL_ELEMENTS, DATE_CHANNEL_ELEMENTS, ITEM_ELEMENTS,
    MANDATORY_CHANNEL_ELEMENTS,
};
pub use item::Item;
pub use pipeline::{check_item, clean_item, default_check_hooks, ItemHook, ItemPipeline};
pub use properties::PropertyStore;
pub use render::{render_rss, RenderError, RenderOptions};
pub use types::{FeedError, FeedState};
