//! Lexicon Model
//!
//! A term lexicon loaded from a model directory. Each term maps to an entity
//! label; extraction finds every term occurrence in the input text.
//!
//! # Matching
//!
//! - Case-insensitive
//! - Whole words only: a term edge that is a word character must sit on a
//!   word boundary
//! - Leftmost match wins; at the same position the longer term wins
//! - Matches never overlap
//!
//! # File Format
//!
//! ```toml
//! name = "drug"
//!
//! [[terms]]
//! text = "hypokalemia"
//! label = "AdverseReaction"
//! ```

use crate::ModelError;
use drugner_domain::{Entity, EntityExtractor};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// File name of the lexicon inside a model directory
pub const LEXICON_FILE: &str = "lexicon.toml";

/// A single lexicon entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconTerm {
    /// Surface form to match
    pub text: String,

    /// Label assigned to matches
    pub label: String,
}

/// Term lexicon as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    /// Model name
    #[serde(default)]
    pub name: String,

    /// Lexicon entries
    #[serde(default)]
    pub terms: Vec<LexiconTerm>,
}

impl Lexicon {
    /// Load a lexicon from a model directory
    ///
    /// Reads `<dir>/lexicon.toml`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ModelError::ModelNotFound(dir.to_path_buf()));
        }

        let path = dir.join(LEXICON_FILE);
        if !path.is_file() {
            return Err(ModelError::ModelNotFound(path));
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parse a lexicon from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ModelError> {
        toml::from_str(toml_str)
            .map_err(|e| ModelError::InvalidLexicon(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize the lexicon to a TOML string
    pub fn to_toml(&self) -> Result<String, ModelError> {
        toml::to_string_pretty(self)
            .map_err(|e| ModelError::InvalidLexicon(format!("Failed to serialize to TOML: {}", e)))
    }
}

/// Compiled lexicon ready for extraction
///
/// Each term is its own capture group in one alternation; `labels[i]` is the
/// label of group `i + 1`.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    name: String,
    pattern: Option<Regex>,
    labels: Vec<String>,
}

/// Wrap an escaped term in `\b` on the edges that are word characters
///
/// A `\b` next to a non-word edge such as `(` would demand a word character
/// on the other side and the term could never match in running text.
fn term_pattern(term: &str, word_start: &Regex, word_end: &Regex) -> String {
    format!(
        "{}({}){}",
        if word_start.is_match(term) { r"\b" } else { "" },
        regex::escape(term),
        if word_end.is_match(term) { r"\b" } else { "" },
    )
}

impl LexiconModel {
    /// Compile a lexicon into a model
    ///
    /// # Errors
    ///
    /// Returns `InvalidLexicon` if a term or label is blank.
    pub fn compile(lexicon: Lexicon) -> Result<Self, ModelError> {
        let mut by_term: HashMap<String, (String, String)> = HashMap::new();

        for term in lexicon.terms {
            let text = term.text.trim();
            if text.is_empty() {
                return Err(ModelError::InvalidLexicon(format!(
                    "blank term for label '{}'",
                    term.label
                )));
            }
            if term.label.trim().is_empty() {
                return Err(ModelError::InvalidLexicon(format!(
                    "blank label for term '{}'",
                    text
                )));
            }

            let entry = (text.to_string(), term.label.clone());
            if let Some((_, previous)) = by_term.insert(text.to_lowercase(), entry) {
                warn!(
                    "Duplicate lexicon term '{}': '{}' replaces '{}'",
                    text, term.label, previous
                );
            }
        }

        // Longest terms first so the alternation prefers them at a shared start
        let mut terms: Vec<(String, String)> = by_term.into_values().collect();
        terms.sort_by(|(a, _), (b, _)| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        });

        let pattern = if terms.is_empty() {
            None
        } else {
            let word_start = Regex::new(r"^\w").map_err(|e| ModelError::Load(e.to_string()))?;
            let word_end = Regex::new(r"\w$").map_err(|e| ModelError::Load(e.to_string()))?;

            let alternation = terms
                .iter()
                .map(|(text, _)| term_pattern(text, &word_start, &word_end))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!("(?i)(?:{})", alternation))
                .map_err(|e| ModelError::InvalidLexicon(e.to_string()))?;
            Some(regex)
        };

        Ok(Self {
            name: lexicon.name,
            pattern,
            labels: terms.into_iter().map(|(_, label)| label).collect(),
        })
    }

    /// Load and compile the lexicon in a model directory
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        let model = Self::compile(Lexicon::from_dir(dir)?)?;
        info!(
            "Loaded lexicon model '{}' from {} ({} terms)",
            model.name,
            dir.display(),
            model.term_count()
        );
        Ok(model)
    }

    /// Model name from the lexicon file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.labels.len()
    }
}

impl EntityExtractor for LexiconModel {
    type Error = ModelError;

    fn extract(&self, text: &str) -> Result<Vec<Entity>, Self::Error> {
        let Some(pattern) = &self.pattern else {
            return Ok(Vec::new());
        };

        let mut entities = Vec::new();
        // Running byte -> char offset conversion; matches arrive in order
        let mut byte_pos = 0;
        let mut char_pos = 0;

        for captures in pattern.captures_iter(text) {
            // Group 0 always participates in a match
            let Some(found) = captures.get(0) else {
                continue;
            };
            char_pos += text[byte_pos..found.start()].chars().count();
            let start = char_pos;
            let length = found.as_str().chars().count();
            char_pos += length;
            byte_pos = found.end();

            // The matching term's group tells the label, whatever the case folding
            let label = captures
                .iter()
                .skip(1)
                .position(|group| group.is_some())
                .and_then(|index| self.labels.get(index))
                .ok_or_else(|| {
                    ModelError::Inference(format!("No label for match '{}'", found.as_str()))
                })?;

            entities.push(Entity::new(found.as_str(), start, start + length, label.as_str()));
        }

        debug!("Lexicon '{}' found {} entities", self.name, entities.len());
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(text: &str, label: &str) -> LexiconTerm {
        LexiconTerm {
            text: text.to_string(),
            label: label.to_string(),
        }
    }

    fn model(terms: Vec<LexiconTerm>) -> LexiconModel {
        LexiconModel::compile(Lexicon {
            name: "test".to_string(),
            terms,
        })
        .unwrap()
    }

    #[test]
    fn test_extract_terms() {
        let model = model(vec![
            term("may", "Factor"),
            term("significant", "Severity"),
            term("hypokalemia", "AdverseReaction"),
        ]);
        let text = "Beta-adrenergic agonist medicines may produce significant hypokalemia in some patients,";

        let entities = model.extract(text).unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new("may", 34, 37, "Factor"),
                Entity::new("significant", 46, 57, "Severity"),
                Entity::new("hypokalemia", 58, 69, "AdverseReaction"),
            ]
        );
    }

    #[test]
    fn test_case_insensitive_keeps_source_text() {
        let model = model(vec![term("laba", "DrugClass")]);
        let entities = model.extract("LABA, such as vilanterol").unwrap();
        assert_eq!(entities, vec![Entity::new("LABA", 0, 4, "DrugClass")]);
    }

    #[test]
    fn test_whole_words_only() {
        let model = model(vec![term("death", "AdverseReaction")]);
        assert!(model.extract("deathly quiet").unwrap().is_empty());
        assert_eq!(model.extract("risk of death.").unwrap().len(), 1);
    }

    #[test]
    fn test_longest_term_wins() {
        let model = model(vec![
            term("asthma", "AdverseReaction"),
            term("asthma-related death", "AdverseReaction"),
        ]);

        let entities = model.extract("increase the risk of asthma-related death").unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "asthma-related death");
        assert_eq!(entities[0].span(), (21, 41));
    }

    #[test]
    fn test_char_offsets_after_multibyte_text() {
        let model = model(vec![term("hépatite", "AdverseReaction")]);
        let entities = model.extract("Risque élevé d'hépatite").unwrap();
        assert_eq!(entities, vec![Entity::new("hépatite", 15, 23, "AdverseReaction")]);
    }

    #[test]
    fn test_empty_lexicon_and_text() {
        let empty = model(vec![]);
        assert!(empty.extract("anything").unwrap().is_empty());

        let model = model(vec![term("nausea", "AdverseReaction")]);
        assert!(model.extract("").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_term_last_wins() {
        let model = model(vec![term("LABA", "Factor"), term("laba", "DrugClass")]);
        assert_eq!(model.term_count(), 1);
        assert_eq!(model.extract("laba").unwrap()[0].label, "DrugClass");
    }

    #[test]
    fn test_blank_term_rejected() {
        let result = LexiconModel::compile(Lexicon {
            name: "test".to_string(),
            terms: vec![term("  ", "Factor")],
        });
        assert!(matches!(result, Err(ModelError::InvalidLexicon(_))));
    }

    #[test]
    fn test_case_folded_spelling_keeps_label() {
        // U+017F (long s) folds to 's' but does not lowercase to it
        let model = model(vec![term("nausea", "AdverseReaction")]);
        let entities = model.extract("severe nau\u{17F}ea reported").unwrap();
        assert_eq!(
            entities,
            vec![Entity::new("nau\u{17F}ea", 7, 13, "AdverseReaction")]
        );
    }

    #[test]
    fn test_terms_with_punctuation_edges() {
        let model = model(vec![
            term("(5.1)", "Factor"),
            term("beta (2)", "DrugClass"),
        ]);

        let entities = model
            .extract("See Warnings and Precautions (5.1). Avoid beta (2) agonists.")
            .unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new("(5.1)", 29, 34, "Factor"),
                Entity::new("beta (2)", 42, 50, "DrugClass"),
            ]
        );

        // Word-character edges still need a boundary
        assert!(model.extract("alphabeta (2)").unwrap().is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let model = model(vec![term("beta (2)", "DrugClass")]);
        assert!(model.extract("beta 2").unwrap().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            name = "drug"

            [[terms]]
            text = "hypokalemia"
            label = "AdverseReaction"

            [[terms]]
            text = "LABA"
            label = "DrugClass"
        "#;

        let lexicon = Lexicon::from_toml(toml).unwrap();
        assert_eq!(lexicon.name, "drug");
        assert_eq!(lexicon.terms.len(), 2);
        assert_eq!(lexicon.terms[1], term("LABA", "DrugClass"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Lexicon::from_toml("terms = 5"),
            Err(ModelError::InvalidLexicon(_))
        ));
    }

    #[test]
    fn test_load_missing_dir() {
        let result = LexiconModel::load("./definitely/not/a/model");
        assert!(matches!(result, Err(ModelError::ModelNotFound(_))));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let lexicon = Lexicon {
            name: "drug".to_string(),
            terms: vec![term("nausea", "AdverseReaction")],
        };
        std::fs::write(dir.path().join(LEXICON_FILE), lexicon.to_toml().unwrap()).unwrap();

        let model = LexiconModel::load(dir.path()).unwrap();
        assert_eq!(model.name(), "drug");
        assert_eq!(model.term_count(), 1);
    }
}
