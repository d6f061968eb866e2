//! DrugNER Annotator
//!
//! Turns raw text plus extracted entity spans into an ordered sequence of
//! plain and labeled text blocks ready for rendering.
//!
//! # Architecture
//!
//! ```text
//! Text → EntityExtractor → Entities → normalize → annotate → AnnotatedSequence
//! ```
//!
//! Spans are validated and ordered up front, after which a single forward
//! pass over the characters emits blocks. Concatenating the emitted blocks
//! always reproduces the input text exactly.
//!
//! # Example Usage
//!
//! ```
//! use drugner_annotator::annotate;
//! use drugner_domain::Entity;
//!
//! let text = "may cause hypokalemia";
//! let entities = vec![Entity::new("hypokalemia", 10, 21, "AdverseReaction")];
//!
//! let sequence = annotate(&entities, text).unwrap();
//! assert_eq!(sequence.len(), 2);
//! assert_eq!(sequence.reconstruct(), text);
//! ```

#![warn(missing_docs)]

mod annotate;
mod error;
mod normalize;

pub use annotate::annotate;
pub use error::AnnotateError;
pub use normalize::normalize_spans;
