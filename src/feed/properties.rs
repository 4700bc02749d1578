use std::collections::BTreeMap;

use super::date::{normalize_date, DateInput};
use super::elements::{ElementSet, DATE_CHANNEL_ELEMENTS};
use super::types::FeedError;

/// Whitelist-validated channel metadata.
///
/// Every name is checked against the channel [`ElementSet`]. `pubDate` and
/// `lastBuildDate` are normalized to RFC-822 before storage. Reads return
/// copies; all writes go through [`set`](Self::set) so validation cannot be
/// bypassed.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    elements: ElementSet,
    values: BTreeMap<String, String>,
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new(ElementSet::channel())
    }
}

impl PropertyStore {
    pub fn new(elements: ElementSet) -> Self {
        Self {
            elements,
            values: BTreeMap::new(),
        }
    }

    /// Stores `value` under `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnknownElement`] if `name` is not whitelisted
    /// - [`FeedError::InvalidDate`] if `name` is a date element and `value`
    ///   does not parse
    pub fn set(&mut self, name: &str, value: impl Into<DateInput>) -> Result<(), FeedError> {
        self.check(name)?;

        let value = if DATE_CHANNEL_ELEMENTS.contains(&name) {
            normalize_date(value)?
        } else {
            match value.into() {
                DateInput::Text(text) => text,
                DateInput::Timestamp(ts) => ts.to_string(),
                DateInput::Instant(dt) => dt.to_rfc3339(),
            }
        };

        tracing::debug!(element = %name, "Set channel property");
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Returns a copy of the stored value, or `None` if never set.
    ///
    /// # Errors
    ///
    /// [`FeedError::UnknownElement`] if `name` is not whitelisted.
    pub fn get(&self, name: &str) -> Result<Option<String>, FeedError> {
        self.check(name)?;
        Ok(self.values.get(name).cloned())
    }

    /// Removes a stored value, returning it.
    pub fn remove(&mut self, name: &str) -> Result<Option<String>, FeedError> {
        self.check(name)?;
        Ok(self.values.remove(name))
    }

    /// `true` if `name` is unset or empty. Unknown names count as blank.
    pub fn is_blank(&self, name: &str) -> bool {
        self.values.get(name).map_or(true, String::is_empty)
    }

    /// The full mapping of properties that were set.
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn elements(&self) -> &ElementSet {
        &self.elements
    }

    fn check(&self, name: &str) -> Result<(), FeedError> {
        if self.elements.contains(name) {
            Ok(())
        } else {
            Err(FeedError::unknown_element(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_round_trip() {
        let mut store = PropertyStore::default();
        store.set("title", "My Feed").unwrap();
        assert_eq!(store.get("title").unwrap().as_deref(), Some("My Feed"));
    }

    #[test]
    fn test_unset_whitelisted_name_is_none() {
        let store = PropertyStore::default();
        assert_eq!(store.get("copyright").unwrap(), None);
    }

    #[test]
    fn test_unknown_name_rejected_for_set_and_get() {
        let mut store = PropertyStore::default();
        assert_eq!(
            store.set("author", "me"),
            Err(FeedError::unknown_element("author"))
        );
        assert_eq!(store.get("author"), Err(FeedError::unknown_element("author")));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = PropertyStore::default();
        store.set("title", "first").unwrap();
        store.set("title", "second").unwrap();
        assert_eq!(store.get("title").unwrap().as_deref(), Some("second"));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_date_fields_normalized() {
        let mut store = PropertyStore::default();
        store.set("pubDate", 1_700_000_000_i64).unwrap();
        store.set("lastBuildDate", "2023-11-14T22:13:20Z").unwrap();
        let expected = "Tue, 14 Nov 2023 22:13:20 GMT";
        assert_eq!(store.get("pubDate").unwrap().as_deref(), Some(expected));
        assert_eq!(store.get("lastBuildDate").unwrap().as_deref(), Some(expected));
    }

    #[test]
    fn test_bad_date_leaves_previous_value() {
        let mut store = PropertyStore::default();
        store.set("pubDate", "2023-11-14").unwrap();
        let err = store.set("pubDate", "not a date").unwrap_err();
        assert!(matches!(err, FeedError::InvalidDate { .. }));
        assert_eq!(
            store.get("pubDate").unwrap().as_deref(),
            Some("Tue, 14 Nov 2023 00:00:00 GMT")
        );
    }

    #[test]
    fn test_non_date_fields_kept_verbatim() {
        let mut store = PropertyStore::default();
        store.set("ttl", 60_i64).unwrap();
        store.set("description", "2023-11-14").unwrap();
        assert_eq!(store.get("ttl").unwrap().as_deref(), Some("60"));
        assert_eq!(store.get("description").unwrap().as_deref(), Some("2023-11-14"));
    }

    #[test]
    fn test_custom_whitelist() {
        let mut elements = ElementSet::channel();
        elements.remove("rating");
        elements.insert("atomLink");
        let mut store = PropertyStore::new(elements);
        assert!(store.set("rating", "PG").is_err());
        store.set("atomLink", "http://example.com/rss").unwrap();
    }

    #[test]
    fn test_blank() {
        let mut store = PropertyStore::default();
        store.set("title", "").unwrap();
        assert!(store.is_blank("title"));
        assert!(store.is_blank("link"));
        store.set("link", "http://example.com").unwrap();
        assert!(!store.is_blank("link"));
    }
}
