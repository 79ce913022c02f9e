/// Bounds and wrapper used by the text generator.
///
/// A bound of `0` passed to `Generator::sentences` or
/// `Generator::paragraphs` is replaced by the matching value here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
	/// Minimum number of sentences per block.
	pub min_sentences: usize,

	/// Maximum number of sentences per block.
	pub max_sentences: usize,

	/// Minimum number of paragraphs.
	pub min_paragraphs: usize,

	/// Maximum number of paragraphs.
	pub max_paragraphs: usize,

	/// Opening and closing markup around each paragraph.
	pub paragraph_wrapper: (String, String),
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			min_sentences: 2,
			max_sentences: 12,
			min_paragraphs: 1,
			max_paragraphs: 5,
			paragraph_wrapper: ("<p>".to_owned(), "</p>".to_owned()),
		}
	}
}

impl GeneratorConfig {
	/// Sets the paragraph bounds.
	pub fn with_paragraphs(mut self, min: usize, max: usize) -> Self {
		self.min_paragraphs = min;
		self.max_paragraphs = max;
		self
	}

	/// Sets the sentence bounds.
	pub fn with_sentences(mut self, min: usize, max: usize) -> Self {
		self.min_sentences = min;
		self.max_sentences = max;
		self
	}

	/// Sets the paragraph wrapper.
	pub fn with_wrapper(mut self, open: &str, close: &str) -> Self {
		self.paragraph_wrapper = (open.to_owned(), close.to_owned());
		self
	}
}
