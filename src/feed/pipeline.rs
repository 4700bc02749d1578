//! Per-item hook chain run before an item is accepted into a feed.
//!
//! Two extension points run in order:
//!
//! 1. **prepare** hooks, empty by default, for application-specific defaulting
//! 2. **check** hooks, seeded with [`check_item`] then [`clean_item`]
//!
//! Hooks run strictly in registration order; later hooks see earlier hooks'
//! mutations. The first error aborts the chain and the item is discarded.

use std::fmt;

use super::date::normalize_date;
use super::elements::ElementSet;
use super::item::Item;
use super::types::FeedError;

/// A hook that may mutate an item or reject it.
pub type ItemHook = Box<dyn FnMut(&mut Item) -> Result<(), FeedError> + Send>;

/// Ordered prepare and check hooks applied to every incoming item.
pub struct ItemPipeline {
    prepare: Vec<ItemHook>,
    check: Vec<ItemHook>,
}

impl fmt::Debug for ItemPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemPipeline")
            .field("prepare_hooks", &self.prepare.len())
            .field("check_hooks", &self.check.len())
            .finish()
    }
}

impl Default for ItemPipeline {
    fn default() -> Self {
        Self::new(ElementSet::item())
    }
}

impl ItemPipeline {
    /// Creates a pipeline whose check stage validates against `elements`.
    pub fn new(elements: ElementSet) -> Self {
        Self {
            prepare: Vec::new(),
            check: default_check_hooks(elements),
        }
    }

    /// Appends a hook to the prepare stage.
    pub fn on_prepare_item<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Item) -> Result<(), FeedError> + Send + 'static,
    {
        self.prepare.push(Box::new(hook));
    }

    /// Appends a hook to the check stage, after the built-ins.
    pub fn on_check_item<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Item) -> Result<(), FeedError> + Send + 'static,
    {
        self.check.push(Box::new(hook));
    }

    pub fn clear_prepare_hooks(&mut self) {
        self.prepare.clear();
    }

    /// Replaces the whole check stage, built-ins included.
    ///
    /// Use [`default_check_hooks`] to keep the built-ins in front of custom
    /// hooks.
    pub fn replace_check_hooks(&mut self, hooks: Vec<ItemHook>) {
        self.check = hooks;
    }

    pub fn prepare_hook_count(&self) -> usize {
        self.prepare.len()
    }

    pub fn check_hook_count(&self) -> usize {
        self.check.len()
    }

    /// Runs `item` through every hook and returns the normalized result.
    ///
    /// # Errors
    ///
    /// The first error returned by any hook. The item is dropped.
    pub fn accept(&mut self, mut item: Item) -> Result<Item, FeedError> {
        for hook in self.prepare.iter_mut().chain(self.check.iter_mut()) {
            if let Err(e) = hook(&mut item) {
                tracing::warn!(error = %e, "Item rejected");
                return Err(e);
            }
        }
        tracing::debug!(fields = item.len(), "Item accepted");
        Ok(item)
    }
}

/// The built-in check stage: [`check_item`] against `elements`, then
/// [`clean_item`].
pub fn default_check_hooks(elements: ElementSet) -> Vec<ItemHook> {
    let clean_elements = elements.clone();
    vec![
        Box::new(move |item: &mut Item| check_item(item, &elements)),
        Box::new(move |item: &mut Item| clean_item(item, &clean_elements)),
    ]
}

/// Validates an item.
///
/// # Errors
///
/// - [`FeedError::MissingField`] if both `title` and `description` are blank
/// - [`FeedError::UnknownElement`] for the first present key not in
///   `elements`
pub fn check_item(item: &Item, elements: &ElementSet) -> Result<(), FeedError> {
    if item.is_blank("title") && item.is_blank("description") {
        return Err(FeedError::MissingField);
    }

    match item.keys().find(|key| !elements.contains(key)) {
        Some(key) => Err(FeedError::unknown_element(key)),
        None => Ok(()),
    }
}

/// Normalizes an item in place.
///
/// A blank `guid` takes the value of a present `link`; otherwise a blank
/// `link` takes the value of a present `guid`. Either is only derived when
/// its name is in `elements`. A present `pubDate` is rewritten to RFC-822.
///
/// # Errors
///
/// [`FeedError::InvalidDate`] if `pubDate` does not parse.
pub fn clean_item(item: &mut Item, elements: &ElementSet) -> Result<(), FeedError> {
    if item.is_blank("guid") && elements.contains("guid") {
        if let Some(link) = item.get("link").map(str::to_string) {
            item.set("guid", link);
        }
    }

    if item.is_blank("link") && elements.contains("link") {
        if let Some(guid) = item.get("guid").map(str::to_string) {
            item.set("link", guid);
        }
    }

    if let Some(date) = item.get("pubDate") {
        let normalized = normalize_date(date)?;
        item.set("pubDate", normalized);
    }

    Ok(())
}
