use serde::Serialize;

/// Channel elements recognized by default, in RSS emission order.
pub const CHANNEL_ELEMENTS: [&str; 18] = [
    "title",
    "link",
    "description",
    "language",
    "copyright",
    "skipDays",
    "managingEditor",
    "webMaster",
    "pubDate",
    "lastBuildDate",
    "category",
    "generator",
    "docs",
    "ttl",
    "image",
    "rating",
    "textInput",
    "skipHours",
];

/// Item elements recognized by default, in RSS emission order.
pub const ITEM_ELEMENTS: [&str; 10] = [
    "title",
    "link",
    "description",
    "author",
    "category",
    "comments",
    "enclosure",
    "guid",
    "pubDate",
    "source",
];

/// Channel properties that must be non-empty when a feed is finalized.
pub const MANDATORY_CHANNEL_ELEMENTS: [&str; 3] = ["title", "description", "link"];

/// Channel properties stored in RFC-822 form.
pub const DATE_CHANNEL_ELEMENTS: [&str; 2] = ["pubDate", "lastBuildDate"];

/// `true` if `name` can be written as an unprefixed XML element name
/// (an NCName): a letter or `_`, then letters, digits, `-`, `.` or `_`.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

/// An ordered whitelist of element names.
///
/// Membership decides what may be stored; order decides how the renderer
/// emits elements. Names are case-sensitive (`pubDate`, not `pubdate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ElementSet {
    names: Vec<String>,
}

impl ElementSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set.insert(name);
        }
        set
    }

    pub fn channel() -> Self {
        Self::new(CHANNEL_ELEMENTS)
    }

    pub fn item() -> Self {
        Self::new(ITEM_ELEMENTS)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Appends `name` to the end of the order. Returns `false` if it was
    /// already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Removes `name`. Returns `false` if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
