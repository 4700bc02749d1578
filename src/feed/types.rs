use std::fmt;

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while building or finalizing a feed.
///
/// All variants are local validation failures. Nothing here is retryable:
/// the caller decides whether to skip the offending item, fix the value and
/// call again, or abandon the feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// A channel property or item key outside its whitelist.
    #[error("Element '{element}' is not valid!")]
    UnknownElement { element: String },

    /// An item has neither `title` nor `description`.
    #[error("One of 'title' or 'description' has to be set.")]
    MissingField,

    /// A date value that could not be parsed into a timestamp.
    #[error("Invalid date value: '{input}'")]
    InvalidDate { input: String },

    /// Finalize found mandatory channel properties unset or empty.
    #[error("Mandatory channel properties not set: {}", .missing.join(", "))]
    MissingMandatoryProperty { missing: Vec<String> },

    /// An application hook rejected the item or properties.
    #[error("Hook failed: {0}")]
    Hook(String),

    /// The operation is not allowed in the feed's current state.
    #[error("Operation not allowed while feed is {0}")]
    InvalidState(FeedState),
}

impl FeedError {
    pub(crate) fn unknown_element(element: impl Into<String>) -> Self {
        FeedError::UnknownElement {
            element: element.into(),
        }
    }
}

// ============================================================================
// Feed Lifecycle
// ============================================================================

/// Lifecycle state of a [`Feed`](super::Feed).
///
/// `Building` accepts any mutation. A successful `finalize` moves to
/// `Rendered`, which only permits further `finalize` calls. A failed
/// mandatory-property check moves to `Failed`, which permits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedState {
    #[default]
    Building,
    Rendered,
    Failed,
}

impl fmt::Display for FeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedState::Building => "building",
            FeedState::Rendered => "rendered",
            FeedState::Failed => "failed",
        };
        f.write_str(name)
    }
}
