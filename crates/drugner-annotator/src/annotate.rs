//! Single-pass text annotation

use crate::error::AnnotateError;
use crate::normalize::normalize_spans;
use drugner_domain::{AnnotatedSequence, Entity, TextBlock};
use tracing::debug;

/// Where the scan currently is relative to the entity spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Accumulating text outside any span
    Plain,
    /// Accumulating text of the span under the cursor
    InSpan,
}

/// Partition `text` into plain and labeled blocks using `entities`
///
/// Entities may arrive in any order; they are validated and ordered by start
/// offset first. The scan then walks the characters once, advancing a single
/// cursor through the ordered spans. Zero-length blocks are never emitted, and
/// the concatenated block text equals `text`.
///
/// # Errors
///
/// Returns an [`AnnotateError`] if any span is malformed, out of bounds,
/// disagrees with the text, or overlaps another span.
pub fn annotate(entities: &[Entity], text: &str) -> Result<AnnotatedSequence, AnnotateError> {
    let spans = normalize_spans(entities, text)?;

    let mut blocks = Vec::with_capacity(spans.len() * 2 + 1);
    let mut buffer = String::new();
    let mut cursor = 0;
    let mut state = ScanState::Plain;

    for (i, ch) in text.chars().enumerate() {
        if state == ScanState::InSpan && i == spans[cursor].end {
            blocks.push(TextBlock::labeled(
                std::mem::take(&mut buffer),
                spans[cursor].label.as_str(),
            ));
            cursor += 1;
            state = ScanState::Plain;
        }

        if state == ScanState::Plain {
            if let Some(span) = spans.get(cursor) {
                if i == span.start {
                    if !buffer.is_empty() {
                        blocks.push(TextBlock::plain(std::mem::take(&mut buffer)));
                    }
                    state = ScanState::InSpan;
                }
            }
        }

        buffer.push(ch);
    }

    match state {
        // The last span runs to the final character
        ScanState::InSpan => {
            blocks.push(TextBlock::labeled(buffer, spans[cursor].label.as_str()));
        }
        ScanState::Plain if !buffer.is_empty() => {
            blocks.push(TextBlock::plain(buffer));
        }
        ScanState::Plain => {}
    }

    debug!(
        "Annotated {} chars: {} entities, {} blocks",
        text.chars().count(),
        spans.len(),
        blocks.len()
    );

    Ok(AnnotatedSequence::new(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL_TEXT: &str =
        "Beta-adrenergic agonist medicines may produce significant hypokalemia in some patients,";

    fn block(text: &str, label: Option<&str>) -> TextBlock {
        match label {
            Some(label) => TextBlock::labeled(text, label),
            None => TextBlock::plain(text),
        }
    }

    #[test]
    fn test_no_entities() {
        let sequence = annotate(&[], "hello world").unwrap();
        assert_eq!(sequence.blocks(), &[block("hello world", None)]);
        assert_eq!(sequence.blocks()[0].class, None);
    }

    #[test]
    fn test_empty_text() {
        let sequence = annotate(&[], "").unwrap();
        assert!(sequence.is_empty());
    }

    #[test]
    fn test_drug_label_sentence() {
        let entities = vec![
            Entity::from_source(LABEL_TEXT, 34, 37, "Factor"),
            Entity::from_source(LABEL_TEXT, 46, 57, "Severity"),
            Entity::from_source(LABEL_TEXT, 58, 69, "AdverseReaction"),
        ];

        let sequence = annotate(&entities, LABEL_TEXT).unwrap();

        assert_eq!(
            sequence.blocks(),
            &[
                block("Beta-adrenergic agonist medicines ", None),
                block("may", Some("Factor")),
                block(" produce ", None),
                block("significant", Some("Severity")),
                block(" ", None),
                block("hypokalemia", Some("AdverseReaction")),
                block(" in some patients,", None),
            ]
        );
        assert_eq!(sequence.blocks()[5].class.as_deref(), Some("adversereaction"));
    }

    #[test]
    fn test_unsorted_entities_match_sorted() {
        let sorted = vec![
            Entity::from_source(LABEL_TEXT, 34, 37, "Factor"),
            Entity::from_source(LABEL_TEXT, 46, 57, "Severity"),
            Entity::from_source(LABEL_TEXT, 58, 69, "AdverseReaction"),
        ];
        let mut shuffled = sorted.clone();
        shuffled.reverse();

        assert_eq!(
            annotate(&shuffled, LABEL_TEXT).unwrap(),
            annotate(&sorted, LABEL_TEXT).unwrap()
        );
    }

    #[test]
    fn test_entity_covers_whole_text() {
        let text = "hypokalemia";
        let entities = vec![Entity::new(text, 0, 11, "AdverseReaction")];

        let sequence = annotate(&entities, text).unwrap();
        assert_eq!(sequence.blocks(), &[block(text, Some("AdverseReaction"))]);
    }

    #[test]
    fn test_adjacent_entities() {
        let text = "severehypokalemia noted";
        let entities = vec![
            Entity::new("severe", 0, 6, "Severity"),
            Entity::new("hypokalemia", 6, 17, "AdverseReaction"),
        ];

        let sequence = annotate(&entities, text).unwrap();
        assert_eq!(
            sequence.blocks(),
            &[
                block("severe", Some("Severity")),
                block("hypokalemia", Some("AdverseReaction")),
                block(" noted", None),
            ]
        );
    }

    #[test]
    fn test_entity_at_end_of_text() {
        let text = "risk of hypokalemia";
        let entities = vec![Entity::new("hypokalemia", 8, 19, "AdverseReaction")];

        let sequence = annotate(&entities, text).unwrap();
        assert_eq!(
            sequence.blocks(),
            &[
                block("risk of ", None),
                block("hypokalemia", Some("AdverseReaction")),
            ]
        );
    }

    #[test]
    fn test_single_character_entities() {
        let text = "a+b";
        let entities = vec![
            Entity::new("a", 0, 1, "X"),
            Entity::new("+", 1, 2, "Y"),
            Entity::new("b", 2, 3, "Z"),
        ];

        let sequence = annotate(&entities, text).unwrap();
        assert_eq!(sequence.len(), 3);
        assert!(sequence.blocks().iter().all(TextBlock::is_labeled));
    }

    #[test]
    fn test_repeated_labels() {
        let text = "nausea and vomiting";
        let entities = vec![
            Entity::new("nausea", 0, 6, "AdverseReaction"),
            Entity::new("vomiting", 11, 19, "AdverseReaction"),
        ];

        let sequence = annotate(&entities, text).unwrap();
        assert_eq!(sequence.labeled().count(), 2);
        assert_eq!(sequence.reconstruct(), text);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Hépatite sévère possible";
        let entities = vec![
            Entity::new("Hépatite", 0, 8, "AdverseReaction"),
            Entity::new("sévère", 9, 15, "Severity"),
        ];

        let sequence = annotate(&entities, text).unwrap();
        assert_eq!(
            sequence.blocks(),
            &[
                block("Hépatite", Some("AdverseReaction")),
                block(" ", None),
                block("sévère", Some("Severity")),
                block(" possible", None),
            ]
        );
    }

    #[test]
    fn test_label_with_spaces_gets_compact_class() {
        let text = "beta blockers";
        let entities = vec![Entity::new("beta blockers", 0, 13, "Drug Class")];

        let sequence = annotate(&entities, text).unwrap();
        assert_eq!(sequence.blocks()[0].class.as_deref(), Some("drugclass"));
    }

    #[test]
    fn test_rejects_out_of_range_before_scanning() {
        let entities = vec![Entity::new("world!", 6, 12, "Factor")];
        assert!(matches!(
            annotate(&entities, "hello world"),
            Err(AnnotateError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_entities_for_empty_text() {
        let entities = vec![Entity::new("x", 0, 1, "Factor")];
        assert_eq!(
            annotate(&entities, ""),
            Err(AnnotateError::EmptyText { entities: 1 })
        );
    }
}
