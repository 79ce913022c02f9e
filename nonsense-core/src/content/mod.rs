//! Drivers that fill a content repository with generated units.
//!
//! Each driver loops over a count, asks the hierarchy sampler for a
//! parent, the range sampler for a date and the text generator for the
//! text, then hands the unit to a `Repository`.

/// Storage seam: record types and the `Repository` trait.
pub mod repository;

/// In-memory `Repository`, used by tests and demonstrations.
pub mod memory;

/// Random documents with terms and authors.
pub mod documents;

/// Random taxonomy terms.
pub mod terms;

/// Random users.
pub mod users;

/// Random threaded replies on existing documents.
pub mod replies;

use rand::Rng;

use crate::sampling::{EntityId, RangeError};
use crate::text::{GenerateError, Generator};

pub use documents::{AuthorChoice, DocumentOptions, generate_documents};
pub use memory::MemoryRepository;
pub use replies::{ReplyOptions, ReplyTarget, generate_replies};
pub use repository::{Repository, RepositoryError};
pub use terms::{TermOptions, generate_terms};
pub use users::{UserOptions, generate_users};

/// Errors aborting a generation run.
///
/// Validation errors are raised before anything is written. Failures of
/// single create calls are not errors: the unit is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
	/// The content type is not registered in the repository
	#[error("The {0} content type does not exist")]
	UnknownContentType(String),

	/// The taxonomy is not registered in the repository
	#[error("The {0} taxonomy does not exist")]
	UnknownTaxonomy(String),

	/// The role is not registered in the repository
	#[error("Role doesn't exist: {0}")]
	UnknownRole(String),

	/// The target document does not exist
	#[error("The document ID {0} does not exist")]
	UnknownDocument(EntityId),

	/// A count range with its minimum above its maximum
	#[error("Invalid {name} range: min {min} is greater than max {max}")]
	InvalidRange { name: &'static str, min: usize, max: usize },

	/// Text generation failed
	#[error(transparent)]
	Generate(#[from] GenerateError),

	/// Date range failed
	#[error(transparent)]
	Range(#[from] RangeError),
}

/// Checks that `min <= max` for a named count option.
pub(crate) fn check_range(name: &'static str, min: usize, max: usize) -> Result<(), ContentError> {
	if min > max {
		return Err(ContentError::InvalidRange { name, min, max });
	}
	Ok(())
}

/// Draws a body of `min..=max` paragraphs.
///
/// Unlike `Generator::paragraphs`, a drawn length of `0` yields an empty
/// body instead of the configured default.
pub(crate) fn random_body<R: Rng>(
	generator: &Generator,
	rng: &mut R,
	min: usize,
	max: usize,
) -> Result<String, GenerateError> {
	match rng.random_range(min..=max) {
		0 => Ok(String::new()),
		length => generator.paragraphs(rng, length, length),
	}
}

/// Splits a comma separated option such as `"category,post_tag"`.
pub fn split_list(value: &str) -> Vec<String> {
	value.split(',').map(str::trim).filter(|item| !item.is_empty()).map(str::to_owned).collect()
}
