//! Span validation and ordering

use crate::error::AnnotateError;
use drugner_domain::Entity;

/// Validate entity spans against `text` and order them by start offset
///
/// Ordering is stable, so entities sharing a start keep their relative order.
/// After ordering, no two spans may overlap.
///
/// # Errors
///
/// Returns an [`AnnotateError`] for the first malformed span found:
/// - `EmptyText` if `text` is empty but entities were supplied
/// - `EmptySpan` if `end <= start`
/// - `OutOfBounds` if `end` exceeds the character length of `text`
/// - `TextMismatch` if the entity's text differs from the text at its offsets
/// - `Overlap` if two spans share characters
pub fn normalize_spans<'a>(
    entities: &'a [Entity],
    text: &str,
) -> Result<Vec<&'a Entity>, AnnotateError> {
    if text.is_empty() && !entities.is_empty() {
        return Err(AnnotateError::EmptyText {
            entities: entities.len(),
        });
    }

    // Byte offset of every char boundary, including the end of the text
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    for entity in entities {
        validate_span(entity, text, &boundaries, char_len)?;
    }

    let mut ordered: Vec<&Entity> = entities.iter().collect();
    ordered.sort_by_key(|entity| entity.start);

    for pair in ordered.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.overlaps(second) {
            return Err(AnnotateError::Overlap {
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }

    Ok(ordered)
}

fn validate_span(
    entity: &Entity,
    text: &str,
    boundaries: &[usize],
    char_len: usize,
) -> Result<(), AnnotateError> {
    if entity.is_empty() {
        return Err(AnnotateError::EmptySpan {
            label: entity.label.clone(),
            start: entity.start,
            end: entity.end,
        });
    }

    if entity.end > char_len {
        return Err(AnnotateError::OutOfBounds {
            label: entity.label.clone(),
            start: entity.start,
            end: entity.end,
            len: char_len,
        });
    }

    let found = &text[boundaries[entity.start]..boundaries[entity.end]];
    if found != entity.text {
        return Err(AnnotateError::TextMismatch {
            label: entity.label.clone(),
            start: entity.start,
            end: entity.end,
            expected: entity.text.clone(),
            found: found.to_string(),
        });
    }

    Ok(())
}
