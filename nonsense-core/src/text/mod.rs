//! Template-driven text generation.
//!
//! - Word lists per grammatical category (`Lexicon`)
//! - Sentence and title shapes (`TemplateSet`)
//! - The two-slot word buffer used while filling one template (`session`)
//! - A high-level interface producing titles, sentences and paragraphs (`Generator`)

/// Word lists loaded from disk, one per grammatical category.
///
/// Handles the on-disk format, the binary cache and random word lookup.
pub mod lexicon;

/// Token sequences describing the shape of sentences and titles.
pub mod template;

/// Per-call word buffer with per-category cursors.
///
/// This module is not exposed publicly.
mod session;

/// Generator configuration (sentence and paragraph bounds, wrapper).
pub mod config;

/// High-level interface for generating titles, sentences and paragraphs.
pub mod generator;

pub use config::GeneratorConfig;
pub use generator::{GenerateError, Generator, capitalize_words, upper_first};
pub use lexicon::{Category, Lexicon, LexiconError, Noun, Word};
pub use template::{Template, TemplateKind, TemplateSet, Token};
