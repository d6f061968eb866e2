//! Error types for the Annotator

use thiserror::Error;

/// Input validation failures, raised before any scanning happens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    /// Entity list supplied for empty text
    #[error("Cannot annotate empty text with {entities} entities")]
    EmptyText {
        /// Number of entities supplied
        entities: usize,
    },

    /// Span whose end does not lie after its start
    #[error("Empty span for '{label}': end {end} <= start {start}")]
    EmptySpan {
        /// Entity label
        label: String,
        /// Start offset
        start: usize,
        /// End offset
        end: usize,
    },

    /// Span reaching past the end of the text
    #[error("Span for '{label}' [{start}..{end}] out of bounds for text of {len} chars")]
    OutOfBounds {
        /// Entity label
        label: String,
        /// Start offset
        start: usize,
        /// End offset
        end: usize,
        /// Length of the text in characters
        len: usize,
    },

    /// Entity text disagrees with the text at its offsets
    #[error("Span for '{label}' [{start}..{end}] covers {found:?}, entity text is {expected:?}")]
    TextMismatch {
        /// Entity label
        label: String,
        /// Start offset
        start: usize,
        /// End offset
        end: usize,
        /// Text carried by the entity
        expected: String,
        /// Text found at the offsets
        found: String,
    },

    /// Two spans share characters
    #[error("Overlapping spans: {first} and {second}")]
    Overlap {
        /// The earlier span
        first: String,
        /// The span that starts inside it
        second: String,
    },
}
