//! Entity module - a labeled span produced by an extractor

use std::fmt;

/// A labeled span of text
///
/// `start` and `end` are character offsets into the source text, half-open,
/// so `text` is always the substring `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    /// The matched substring
    pub text: String,

    /// Offset of the first character of the span
    pub start: usize,

    /// Offset one past the last character of the span
    pub end: usize,

    /// Entity label (e.g. "AdverseReaction")
    pub label: String,
}

impl Entity {
    /// Create a new entity
    ///
    /// # Examples
    ///
    /// ```
    /// use drugner_domain::Entity;
    ///
    /// let entity = Entity::new("may", 34, 37, "Factor");
    /// assert_eq!(entity.len(), 3);
    /// ```
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        label: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            label: label.into(),
        }
    }

    /// Create an entity whose text is sliced out of `source` by character offsets
    ///
    /// Offsets beyond the end of `source` yield a shorter (possibly empty)
    /// `text`; the annotator rejects such entities during validation.
    pub fn from_source(source: &str, start: usize, end: usize, label: impl Into<String>) -> Self {
        let text = source
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect::<String>();
        Self::new(text, start, end, label)
    }

    /// Get the span as a tuple
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Number of characters covered by the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check whether the span covers no characters
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check whether two spans share at least one character
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{}] {:?}", self.label, self.start, self.end, self.text)
    }
}
