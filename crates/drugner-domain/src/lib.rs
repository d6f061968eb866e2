//! DrugNER Domain Layer
//!
//! Core value types and trait interfaces shared by every other crate in the
//! workspace. Like any domain layer here, it has ZERO external dependencies.
//!
//! ## Key Concepts
//!
//! - **Entity**: a labeled span of text with start/end character offsets
//! - **TextBlock**: a contiguous run of output text, plain or labeled
//! - **AnnotatedSequence**: the ordered blocks that reconstruct the input text
//! - **EntityExtractor**: the capability that turns raw text into entities
//!
//! ## Offsets
//!
//! All offsets are counted in characters (Unicode scalar values), not bytes,
//! and spans are half-open: `[start, end)`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod entity;
pub mod traits;

// Re-exports for convenience
pub use block::{display_class, AnnotatedSequence, TextBlock};
pub use entity::Entity;
pub use traits::EntityExtractor;
