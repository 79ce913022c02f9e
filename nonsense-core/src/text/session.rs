use rand::Rng;

use super::generator::GenerateError;
use super::lexicon::{Category, Lexicon, Word};

/// Number of words drawn per category for one template instantiation.
pub(crate) const SLOTS: usize = 2;

/// Words available while filling a single template.
///
/// Exactly `SLOTS` entries are drawn for every category up front,
/// whether or not the template uses the category. Each use advances the
/// category cursor; nouns and plural nouns share one cursor.
///
/// # Invariants
/// - A cursor never reads past `SLOTS`, overuse is reported as an error
/// - Lives for one instantiation only, never shared
pub(crate) struct Session<'a> {
	buffer: [[Word<'a>; SLOTS]; Category::COUNT],
	cursors: [usize; Category::COUNT],
}

impl<'a> Session<'a> {
	/// Draws the buffer for every category.
	pub(crate) fn prefetch<R: Rng>(lexicon: &'a Lexicon, rng: &mut R) -> Self {
		let buffer = std::array::from_fn(|index| {
			let category = Category::ALL[index];
			std::array::from_fn(|_| lexicon.word(rng, category))
		});
		Self { buffer, cursors: [0; Category::COUNT] }
	}

	/// Takes the next buffered word of a category.
	///
	/// # Errors
	/// Returns `CategoryOverused` on the third use of a category.
	pub(crate) fn take(&mut self, category: Category) -> Result<Word<'a>, GenerateError> {
		let cursor = &mut self.cursors[category.index()];
		let word = *self.buffer[category.index()]
			.get(*cursor)
			.ok_or(GenerateError::CategoryOverused { category, limit: SLOTS })?;
		*cursor += 1;
		Ok(word)
	}

	/// Number of words already taken from a category.
	#[cfg(test)]
	pub(crate) fn used(&self, category: Category) -> usize {
		self.cursors[category.index()]
	}
}
