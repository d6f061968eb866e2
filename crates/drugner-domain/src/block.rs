//! Text blocks and the annotated sequence they form

/// Derive the display class for a label
///
/// The class is the label lowercased with all spaces removed, giving a stable
/// token that can be used directly as a CSS class.
///
/// # Examples
///
/// ```
/// use drugner_domain::display_class;
///
/// assert_eq!(display_class("Adverse Reaction"), "adversereaction");
/// assert_eq!(display_class("DrugClass"), "drugclass");
/// ```
pub fn display_class(label: &str) -> String {
    label.to_lowercase().chars().filter(|c| *c != ' ').collect()
}

/// A contiguous run of text in the annotated output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// The text covered by this block
    pub text: String,

    /// Entity label, `None` for plain text
    pub label: Option<String>,

    /// Display class derived from `label`
    pub class: Option<String>,
}

impl TextBlock {
    /// Create a plain (unlabeled) block
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: None,
            class: None,
        }
    }

    /// Create a labeled block; the class is derived from the label
    pub fn labeled(text: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            text: text.into(),
            class: Some(display_class(&label)),
            label: Some(label),
        }
    }

    /// Whether this block carries an entity label
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }
}

/// Ordered sequence of text blocks
///
/// Concatenating the `text` of every block reproduces the annotated input
/// exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedSequence {
    blocks: Vec<TextBlock>,
}

impl AnnotatedSequence {
    /// Create a sequence from already-ordered blocks
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Borrow the blocks in order
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// Consume the sequence, returning the blocks
    pub fn into_blocks(self) -> Vec<TextBlock> {
        self.blocks
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the sequence has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over labeled blocks only
    pub fn labeled(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter(|block| block.is_labeled())
    }

    /// Concatenate the text of every block
    pub fn reconstruct(&self) -> String {
        self.blocks.iter().map(|block| block.text.as_str()).collect()
    }
}

impl IntoIterator for AnnotatedSequence {
    type Item = TextBlock;
    type IntoIter = std::vec::IntoIter<TextBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnnotatedSequence {
    type Item = &'a TextBlock;
    type IntoIter = std::slice::Iter<'a, TextBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
