use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::date::DateInput;
use super::elements::{ElementSet, MANDATORY_CHANNEL_ELEMENTS};
use super::item::Item;
use super::pipeline::ItemPipeline;
use super::properties::PropertyStore;
use super::types::{FeedError, FeedState};

/// A hook run on the channel properties at finalize time.
pub type PropertiesHook = Box<dyn FnMut(&mut PropertyStore) -> Result<(), FeedError> + Send>;

/// A feed under construction: channel properties plus an ordered item list.
///
/// Create one per render; a `Feed` is not meant to be shared between
/// threads or reused across requests.
///
/// # Example
///
/// ```
/// use rssgen::feed::{Feed, Item};
///
/// let mut feed = Feed::new();
/// feed.set_channel_property("title", "My Feed")?;
/// feed.set_channel_property("description", "Feed desc")?;
/// feed.set_channel_property("link", "http://example.com")?;
/// feed.add_item(Item::from([("title", "Post 1"), ("link", "http://example.com/1")]))?;
///
/// let rendered = feed.finalize()?;
/// assert_eq!(rendered.items[0].get("guid"), Some("http://example.com/1"));
/// # Ok::<(), rssgen::feed::FeedError>(())
/// ```
pub struct Feed {
    properties: PropertyStore,
    items: Vec<Item>,
    item_elements: ElementSet,
    pipeline: ItemPipeline,
    prepare_properties: Vec<PropertiesHook>,
    state: FeedState,
}

impl fmt::Debug for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feed")
            .field("properties", &self.properties)
            .field("items", &self.items.len())
            .field("pipeline", &self.pipeline)
            .field("prepare_properties_hooks", &self.prepare_properties.len())
            .field("state", &self.state)
            .finish()
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

impl Feed {
    /// Creates a feed with the standard RSS channel and item whitelists.
    pub fn new() -> Self {
        Self::with_elements(ElementSet::channel(), ElementSet::item())
    }

    /// Creates a feed with custom whitelists.
    pub fn with_elements(channel_elements: ElementSet, item_elements: ElementSet) -> Self {
        Self {
            properties: PropertyStore::new(channel_elements),
            items: Vec::new(),
            pipeline: ItemPipeline::new(item_elements.clone()),
            item_elements,
            prepare_properties: Vec::new(),
            state: FeedState::Building,
        }
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    // ------------------------------------------------------------------------
    // Channel properties
    // ------------------------------------------------------------------------

    /// Sets a channel property. See [`PropertyStore::set`].
    pub fn set_channel_property(
        &mut self,
        name: &str,
        value: impl Into<DateInput>,
    ) -> Result<(), FeedError> {
        self.ensure_building()?;
        self.properties.set(name, value)
    }

    /// Reads a channel property. See [`PropertyStore::get`].
    pub fn channel_property(&self, name: &str) -> Result<Option<String>, FeedError> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    // ------------------------------------------------------------------------
    // Hooks
    // ------------------------------------------------------------------------

    /// Registers a hook run on the properties before the mandatory check.
    pub fn on_prepare_properties<F>(&mut self, hook: F)
    where
        F: FnMut(&mut PropertyStore) -> Result<(), FeedError> + Send + 'static,
    {
        self.prepare_properties.push(Box::new(hook));
    }

    pub fn clear_prepare_properties_hooks(&mut self) {
        self.prepare_properties.clear();
    }

    /// Registers a hook run on each item before validation.
    pub fn on_prepare_item<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Item) -> Result<(), FeedError> + Send + 'static,
    {
        self.pipeline.on_prepare_item(hook);
    }

    /// Registers a hook run on each item after the built-in checks.
    pub fn on_check_item<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Item) -> Result<(), FeedError> + Send + 'static,
    {
        self.pipeline.on_check_item(hook);
    }

    /// Direct access to the item pipeline, e.g. to replace the check stage.
    pub fn pipeline_mut(&mut self) -> &mut ItemPipeline {
        &mut self.pipeline
    }

    // ------------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------------

    /// Runs `item` through the pipeline and appends it.
    ///
    /// On error nothing is appended and earlier items are untouched.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<(), FeedError> {
        self.ensure_building()?;
        let item = self.pipeline.accept(item.into())?;
        self.items.push(item);
        Ok(())
    }

    /// Adds items in order, stopping at the first failure. Items before the
    /// failing one stay in the feed.
    pub fn add_items<I>(&mut self, items: I) -> Result<(), FeedError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        for item in items {
            self.add_item(item)?;
        }
        Ok(())
    }

    /// Replaces the item list.
    pub fn set_items<I>(&mut self, items: I) -> Result<(), FeedError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        self.clear_items()?;
        self.add_items(items)
    }

    pub fn clear_items(&mut self) -> Result<(), FeedError> {
        self.ensure_building()?;
        self.items.clear();
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    // ------------------------------------------------------------------------
    // Finalize
    // ------------------------------------------------------------------------

    /// Runs the prepare-properties hooks, checks that `title`,
    /// `description` and `link` are set, and returns the data to render.
    ///
    /// May be called again once rendered. Each call re-runs the hooks, so
    /// hooks with side effects fire once per call.
    ///
    /// # Errors
    ///
    /// - [`FeedError::MissingMandatoryProperty`] naming every blank
    ///   mandatory property; the feed becomes [`FeedState::Failed`]
    /// - any error returned by a hook, which also fails the feed
    /// - [`FeedError::InvalidState`] if the feed already failed
    pub fn finalize(&mut self) -> Result<RenderedFeed, FeedError> {
        if self.state == FeedState::Failed {
            return Err(FeedError::InvalidState(self.state));
        }

        for hook in self.prepare_properties.iter_mut() {
            if let Err(e) = hook(&mut self.properties) {
                tracing::warn!(error = %e, "Prepare-properties hook failed");
                self.state = FeedState::Failed;
                return Err(e);
            }
        }

        let missing: Vec<String> = MANDATORY_CHANNEL_ELEMENTS
            .iter()
            .filter(|name| self.properties.is_blank(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "Feed is missing mandatory channel properties");
            self.state = FeedState::Failed;
            return Err(FeedError::MissingMandatoryProperty { missing });
        }

        self.state = FeedState::Rendered;
        tracing::debug!(
            properties = self.properties.all().len(),
            items = self.items.len(),
            "Feed finalized"
        );

        Ok(RenderedFeed {
            properties: self.properties.all().clone(),
            items: self.items.clone(),
            channel_elements: self.properties.elements().clone(),
            item_elements: self.item_elements.clone(),
        })
    }

    fn ensure_building(&self) -> Result<(), FeedError> {
        match self.state {
            FeedState::Building => Ok(()),
            state => Err(FeedError::InvalidState(state)),
        }
    }
}

/// The finalized channel properties and items, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFeed {
    pub properties: BTreeMap<String, String>,
    pub items: Vec<Item>,
    #[serde(skip)]
    channel_elements: ElementSet,
    #[serde(skip)]
    item_elements: ElementSet,
}

impl RenderedFeed {
    /// Channel properties in emission order.
    pub fn ordered_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        ordered(&self.channel_elements, |name| {
            self.properties.get(name).map(String::as_str)
        })
    }

    /// An item's fields in emission order.
    pub fn ordered_fields<'a>(
        &'a self,
        item: &'a Item,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        ordered(&self.item_elements, move |name| item.get(name))
    }
}

fn ordered<'a, F>(elements: &'a ElementSet, lookup: F) -> impl Iterator<Item = (&'a str, &'a str)> + 'a
where
    F: Fn(&str) -> Option<&'a str> + 'a,
{
    elements
        .iter()
        .filter_map(move |name| lookup(name).map(|value| (name, value)))
}
