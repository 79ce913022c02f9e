use std::path::Path;
use std::sync::Arc;

use rand::Rng;

use super::config::GeneratorConfig;
use super::lexicon::{Category, Lexicon, LexiconError, Noun, Word};
use super::session::Session;
use super::template::{Template, TemplateKind, TemplateSet, Token};

/// Errors raised while generating text.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
	/// A template used a category more often than the word buffer holds
	#[error("Category '{category}' used more than {limit} times in one template")]
	CategoryOverused { category: Category, limit: usize },

	/// A count range with its minimum above its maximum
	#[error("Invalid count range: min {min} is greater than max {max}")]
	InvalidCountRange { min: usize, max: usize },

	/// A template set without any template of a kind
	#[error("No {0} template registered")]
	NoTemplates(TemplateKind),
}

/// High-level nonsense text generator.
///
/// # Responsibilities
/// - Pick templates and fill them with buffered lexicon words
/// - Apply capitalization and punctuation spacing
/// - Assemble sentences into blocks and paragraphs
///
/// The lexicon and templates are shared read-only; every call draws
/// from the `Rng` it is given, so a seeded `Rng` gives repeatable text.
#[derive(Clone, Debug)]
pub struct Generator {
	lexicon: Arc<Lexicon>,
	templates: Arc<TemplateSet>,
	config: GeneratorConfig,
}

impl Generator {
	/// Creates a generator with the registered templates and default bounds.
	pub fn new(lexicon: Lexicon) -> Self {
		Self::from_shared(Arc::new(lexicon), Arc::new(TemplateSet::default()), GeneratorConfig::default())
	}

	/// Creates a generator by loading a lexicon folder.
	///
	/// # Errors
	/// Returns an error if any word list is missing, empty or malformed.
	pub fn from_dir<P: AsRef<Path>>(folder: P) -> Result<Self, LexiconError> {
		Ok(Self::new(Lexicon::load(folder)?))
	}

	/// Creates a generator over an already shared lexicon and template set.
	pub fn from_shared(lexicon: Arc<Lexicon>, templates: Arc<TemplateSet>, config: GeneratorConfig) -> Self {
		Self { lexicon, templates, config }
	}

	/// Replaces the template set.
	pub fn with_templates(mut self, templates: TemplateSet) -> Self {
		self.templates = Arc::new(templates);
		self
	}

	/// Replaces the configuration.
	pub fn with_config(mut self, config: GeneratorConfig) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	pub fn lexicon(&self) -> &Lexicon {
		&self.lexicon
	}

	/// Generates one title, every word capitalized.
	pub fn title<R: Rng>(&self, rng: &mut R) -> Result<String, GenerateError> {
		let template = self.templates.pick(rng, TemplateKind::Title);
		let text = self.instantiate(rng, template)?;
		Ok(capitalize_words(text.trim()))
	}

	/// Generates one sentence.
	pub fn sentence<R: Rng>(&self, rng: &mut R) -> Result<String, GenerateError> {
		let template = self.templates.pick(rng, TemplateKind::Sentence);
		let text = self.instantiate(rng, template)?;
		Ok(text.trim().to_owned())
	}

	/// Generates between `min` and `max` sentences joined by a space.
	///
	/// A bound of `0` uses the configured sentence bound.
	pub fn sentences<R: Rng>(&self, rng: &mut R, min: usize, max: usize) -> Result<String, GenerateError> {
		let count = draw_count(rng, min, max, self.config.min_sentences, self.config.max_sentences)?;
		let sentences = (0..count).map(|_| self.sentence(rng)).collect::<Result<Vec<_>, _>>()?;
		Ok(sentences.join(" "))
	}

	/// Generates between `min` and `max` wrapped paragraphs followed by a line break.
	///
	/// A bound of `0` uses the configured paragraph bound. Each paragraph
	/// holds a block of sentences within the configured sentence bounds.
	pub fn paragraphs<R: Rng>(&self, rng: &mut R, min: usize, max: usize) -> Result<String, GenerateError> {
		let count = draw_count(rng, min, max, self.config.min_paragraphs, self.config.max_paragraphs)?;
		let (open, close) = &self.config.paragraph_wrapper;

		let mut output = String::new();
		for _ in 0..count {
			output.push_str(open);
			output.push_str(&self.sentences(rng, 0, 0)?);
			output.push_str(close);
		}
		output.push('\n');
		Ok(output)
	}

	/// Returns a random word of a category.
	pub fn word<R: Rng>(&self, rng: &mut R, category: Category) -> Word<'_> {
		self.lexicon.word(rng, category)
	}

	/// Returns a random word of a named category, nouns if the name is unknown.
	pub fn word_by_name<R: Rng>(&self, rng: &mut R, name: &str) -> Word<'_> {
		self.lexicon.word_by_name(rng, name)
	}

	/// Returns a random noun.
	pub fn noun<R: Rng>(&self, rng: &mut R) -> &Noun {
		self.lexicon.noun(rng)
	}

	/// Fills a template with random words.
	///
	/// # Behavior
	/// - Two words per category are drawn before the first token.
	/// - The first token is capitalized.
	/// - Placeholders take the next buffered word of their category,
	///   `[plural_nouns]` uses the plural form and shares the noun cursor.
	/// - Punctuation sticks to the previous word and is followed by a
	///   space, except the full stop.
	/// - Every other token is followed by a space.
	///
	/// # Errors
	/// Returns `CategoryOverused` if a category appears more than twice.
	pub fn instantiate<R: Rng>(&self, rng: &mut R, template: &Template) -> Result<String, GenerateError> {
		let mut session = Session::prefetch(&self.lexicon, rng);
		let mut text = String::new();

		for (position, token) in template.tokens().iter().enumerate() {
			let word = match token {
				Token::Punctuation(mark) => {
					text.truncate(text.trim_end().len());
					text.push(*mark);
					if *mark != '.' {
						text.push(' ');
					}
					continue;
				}
				Token::Placeholder(category) => session.take(*category)?.text(),
				Token::PluralNoun => session.take(Category::Nouns)?.plural(),
				Token::Literal(literal) => literal.as_str(),
			};

			if position == 0 {
				text.push_str(&upper_first(word));
			} else {
				text.push_str(word);
			}
			text.push(' ');
		}

		Ok(text)
	}
}

/// Draws a count in `[min, max]`, zero bounds replaced by the defaults.
fn draw_count<R: Rng>(
	rng: &mut R,
	min: usize,
	max: usize,
	default_min: usize,
	default_max: usize,
) -> Result<usize, GenerateError> {
	let min = if min == 0 { default_min } else { min };
	let max = if max == 0 { default_max } else { max };
	if min > max {
		return Err(GenerateError::InvalidCountRange { min, max });
	}
	Ok(rng.random_range(min..=max))
}

/// Uppercases the first character of a word.
pub fn upper_first(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Uppercases the first character of every whitespace separated word.
pub fn capitalize_words(text: &str) -> String {
	let mut output = String::with_capacity(text.len());
	let mut word_start = true;
	for c in text.chars() {
		if word_start {
			output.extend(c.to_uppercase());
		} else {
			output.push(c);
		}
		word_start = c.is_whitespace();
	}
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::text::lexicon::tests::single_word_lexicon;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn generator() -> Generator {
		Generator::new(single_word_lexicon())
	}

	fn fill(source: &str) -> Result<String, GenerateError> {
		let mut rng = StdRng::seed_from_u64(1);
		generator().instantiate(&mut rng, &Template::parse(source))
	}

	#[test]
	fn fills_the_reference_template() {
		let lexicon = Lexicon::from_lists(Category::ALL.map(|category| match category {
			Category::Nouns => (category, vec!["cat|cats"]),
			Category::Adjectives => (category, vec!["red"]),
			_ => (category, vec!["filler"]),
		}))
		.unwrap();
		let templates = TemplateSet::new(vec![Template::parse("[adjectives] [nouns] .")], vec![Template::parse("[nouns]")]).unwrap();
		let generator = Generator::new(lexicon).with_templates(templates);

		let mut rng = StdRng::seed_from_u64(99);
		assert_eq!(generator.sentence(&mut rng).unwrap(), "Red cat.");
	}

	#[test]
	fn plural_placeholder_uses_plural_form() {
		assert_eq!(fill("[adjectives] [plural_nouns] [verbs] .").unwrap(), "Red cats jumps.");
	}

	#[test]
	fn marks_attach_to_previous_word() {
		assert_eq!(fill("[interjections] , [determiners] [nouns] ?").unwrap(), "Wow, the cat? ");
		assert_eq!(fill("[nouns] ; [verbs] : [adverbs] !").unwrap(), "Cat; jumps: quickly! ");
	}

	#[test]
	fn leading_literal_is_capitalized() {
		assert_eq!(fill("the [nouns] .").unwrap(), "The cat.");
	}

	#[test]
	fn third_use_of_a_category_fails() {
		match fill("[verbs] [verbs] [verbs] .") {
			Err(GenerateError::CategoryOverused { category, .. }) => assert_eq!(category, Category::Verbs),
			other => panic!("expected overuse, got {other:?}"),
		}
		// Singular and plural nouns share the cursor
		assert!(fill("[nouns] [plural_nouns] [nouns] .").is_err());
	}

	#[test]
	fn titles_capitalize_every_word() {
		let generator = generator();
		let mut rng = StdRng::seed_from_u64(21);
		for _ in 0..200 {
			let title = generator.title(&mut rng).unwrap();
			assert!(!title.is_empty());
			assert_eq!(title, title.trim());
			for word in title.split_whitespace() {
				let first = word.chars().next().unwrap();
				assert!(!first.is_lowercase(), "{title}");
			}
		}
	}

	#[test]
	fn sentences_are_joined_by_single_spaces() {
		let generator = generator();
		let mut rng = StdRng::seed_from_u64(8);
		for _ in 0..100 {
			let text = generator.sentences(&mut rng, 3, 3).unwrap();
			assert_eq!(text.matches('.').count(), 3, "{text}");
			assert!(text.ends_with('.'));
			assert!(!text.contains("  "));
			assert!(!text.contains(" ."));
			assert!(!text.contains(" ,"));
		}
	}

	#[test]
	fn zero_bounds_use_configuration() {
		let generator = generator().with_config(GeneratorConfig::default().with_sentences(4, 4));
		let mut rng = StdRng::seed_from_u64(2);
		let text = generator.sentences(&mut rng, 0, 0).unwrap();
		assert_eq!(text.matches('.').count(), 4);
	}

	#[test]
	fn reversed_bounds_are_rejected() {
		let mut rng = StdRng::seed_from_u64(2);
		assert!(matches!(
			generator().sentences(&mut rng, 5, 2),
			Err(GenerateError::InvalidCountRange { min: 5, max: 2 })
		));
	}

	#[test]
	fn paragraphs_are_wrapped_and_terminated() {
		let generator = generator();
		let mut rng = StdRng::seed_from_u64(13);
		for _ in 0..50 {
			let text = generator.paragraphs(&mut rng, 2, 2).unwrap();
			assert!(text.starts_with("<p>"));
			assert!(text.ends_with("</p>\n"));

			let blocks: Vec<&str> = text.trim_end().split("</p>").filter(|block| !block.is_empty()).collect();
			assert_eq!(blocks.len(), 2);
			for block in blocks {
				let body = block.strip_prefix("<p>").unwrap();
				assert!(!body.contains("<p>"));
				assert!(body.ends_with('.'));
			}
		}
	}

	#[test]
	fn zero_paragraph_bounds_use_configuration() {
		let generator = generator().with_config(GeneratorConfig::default().with_paragraphs(3, 3).with_sentences(1, 1));
		assert_eq!(generator.config().min_paragraphs, 3);
		assert_eq!(generator.lexicon().len(Category::Nouns), 1);

		let mut rng = StdRng::seed_from_u64(5);
		let text = generator.paragraphs(&mut rng, 0, 0).unwrap();
		assert_eq!(text.matches("<p>").count(), 3);
	}

	#[test]
	fn custom_wrapper_is_used() {
		let generator = generator().with_config(GeneratorConfig::default().with_wrapper("[", "]"));
		let mut rng = StdRng::seed_from_u64(4);
		let text = generator.paragraphs(&mut rng, 1, 1).unwrap();
		assert!(text.starts_with('['));
		assert!(text.ends_with("]\n"));
	}

	#[test]
	fn seeded_runs_are_identical() {
		let lexicon = Lexicon::from_lists(Category::ALL.map(|category| {
			let entries = match category {
				Category::Nouns => vec!["cat|cats", "dog|dogs", "goose|geese"],
				_ => vec!["alpha", "beta", "gamma", "delta"],
			};
			(category, entries)
		}))
		.unwrap();
		let generator = Generator::new(lexicon);

		let run = |seed: u64| {
			let mut rng = StdRng::seed_from_u64(seed);
			(
				generator.title(&mut rng).unwrap(),
				generator.sentences(&mut rng, 1, 6).unwrap(),
				generator.paragraphs(&mut rng, 1, 3).unwrap(),
			)
		};
		assert_eq!(run(42), run(42));
	}

	#[test]
	fn capitalization_helpers() {
		assert_eq!(upper_first("élan vital"), "Élan vital");
		assert_eq!(upper_first(""), "");
		assert_eq!(capitalize_words("wow, the cat jumps"), "Wow, The Cat Jumps");
		assert_eq!(capitalize_words("a\tb\nc"), "A\tB\nC");
	}
}
