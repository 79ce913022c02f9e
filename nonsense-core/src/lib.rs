//! Template-based nonsense text generation library.
//!
//! This crate provides:
//! - A lexicon of words partitioned by grammatical category
//! - Sentence and title templates weighted by duplication
//! - A text generator producing titles, sentences and paragraphs
//! - Stochastic samplers for parent/child hierarchies and date ranges
//! - Drivers that populate a content repository with generated units
//!
//! Every random decision is drawn from a caller-provided `rand::Rng`,
//! so a seeded generator reproduces the same output.

/// Lexicon, templates and the text generator.
pub mod text;

/// Hierarchy and date range samplers.
pub mod sampling;

/// Repository seam and the document, term, user and reply drivers.
pub mod content;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
