use std::fmt;

use rand::Rng;

use super::generator::GenerateError;
use super::lexicon::Category;

/// Punctuation marks recognised inside templates.
pub const PUNCTUATION: [char; 6] = [',', '.', '?', '!', ';', ':'];

/// Placeholder for the plural form of a noun.
const PLURAL_NOUNS: &str = "[plural_nouns]";

/// Registered sentence shapes.
///
/// The first shapes are listed several times: duplication is the only
/// weighting, each entry is equally likely to be picked.
const SENTENCE_TEMPLATES: [&str; 10] = [
	"[determiners] [adjectives] [nouns] [verbs] [prepositions] [determiners] [nouns] .",
	"[determiners] [adjectives] [nouns] [verbs] [prepositions] [determiners] [nouns] .",
	"[determiners] [adjectives] [nouns] [verbs] [prepositions] [determiners] [nouns] .",
	"[determiners] [adjectives] [nouns] [adverbs] [verbs] [prepositions] [determiners] [adjectives] [nouns] .",
	"[determiners] [adjectives] [nouns] [adverbs] [verbs] [prepositions] [determiners] [adjectives] [nouns] .",
	"[determiners] [adjectives] [nouns] [adverbs] [verbs] [prepositions] [determiners] [adjectives] [nouns] .",
	"[interjections] , [determiners] [nouns] is [comparatives] [adjectives] than [determiners] [adjectives] [nouns] .",
	"[adjectives] [plural_nouns] [verbs] [prepositions] [plural_nouns] [adverbs] .",
	"[determiners] [nouns] , [adverbs] [verbs] the [nouns] .",
	"[interjections] ! The [nouns] [verbs] the [nouns] .",
];

/// Registered title shapes.
const TITLE_TEMPLATES: [&str; 9] = [
	"[adjectives] [nouns]",
	"[adverbs] [verbs] [nouns]",
	"[adverbs] [verbs] [nouns]",
	"[interjections] , [determiners] [nouns] [verbs]",
	"[interjections] ! The [nouns] [verbs] the [nouns]",
	"[adverbs] [verbs] [nouns] [conjunctions] [adjectives] [plural_nouns]",
	"[adverbs] [verbs] [nouns] [conjunctions] [adjectives] [plural_nouns]",
	"[determiners] [adjectives] [nouns] [verbs] [prepositions] [determiners] [nouns]",
	"[determiners] [adjectives] [nouns] [adverbs] [verbs] [prepositions] [determiners] [adjectives] [nouns]",
];

/// One element of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
	/// Copied verbatim.
	Literal(String),
	/// One of `PUNCTUATION`, attached to the previous word.
	Punctuation(char),
	/// A random word of the category (singular form for nouns).
	Placeholder(Category),
	/// A random noun in its plural form.
	PluralNoun,
}

impl Token {
	/// Parses a single whitespace-free token.
	///
	/// - `[plural_nouns]` is the plural noun placeholder
	/// - `[name]` is a category placeholder, unknown names resolve to nouns
	/// - a lone punctuation mark is punctuation
	/// - anything else is a literal
	pub fn parse(raw: &str) -> Self {
		if raw == PLURAL_NOUNS {
			return Token::PluralNoun;
		}
		if raw.starts_with('[') {
			let name: String = raw.chars().filter(|c| *c != '[' && *c != ']').collect();
			return Token::Placeholder(Category::resolve(&name));
		}
		let mut chars = raw.chars();
		if let (Some(mark), None) = (chars.next(), chars.next()) {
			if PUNCTUATION.contains(&mark) {
				return Token::Punctuation(mark);
			}
		}
		Token::Literal(raw.to_owned())
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Literal(word) => f.write_str(word),
			Token::Punctuation(mark) => write!(f, "{mark}"),
			Token::Placeholder(category) => write!(f, "[{category}]"),
			Token::PluralNoun => f.write_str(PLURAL_NOUNS),
		}
	}
}

/// An ordered token sequence describing a sentence or title shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
	tokens: Vec<Token>,
}

impl Template {
	/// Parses a space separated template such as `"[adjectives] [nouns] ."`.
	pub fn parse(source: &str) -> Self {
		Self { tokens: source.split_whitespace().map(Token::parse).collect() }
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}
}

impl fmt::Display for Template {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts: Vec<String> = self.tokens.iter().map(Token::to_string).collect();
		f.write_str(&parts.join(" "))
	}
}

/// The two kinds of registered templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
	Sentence,
	Title,
}

impl fmt::Display for TemplateKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TemplateKind::Sentence => f.write_str("sentence"),
			TemplateKind::Title => f.write_str("title"),
		}
	}
}

/// Sentence and title templates.
///
/// # Invariants
/// - Both lists are non-empty
/// - Never mutated after construction
#[derive(Clone, Debug)]
pub struct TemplateSet {
	sentences: Vec<Template>,
	titles: Vec<Template>,
}

impl Default for TemplateSet {
	/// Returns the registered sentence and title templates.
	fn default() -> Self {
		Self {
			sentences: SENTENCE_TEMPLATES.iter().map(|source| Template::parse(source)).collect(),
			titles: TITLE_TEMPLATES.iter().map(|source| Template::parse(source)).collect(),
		}
	}
}

impl TemplateSet {
	/// Creates a set from custom templates.
	///
	/// # Errors
	/// Returns `NoTemplates` if either list is empty.
	pub fn new(sentences: Vec<Template>, titles: Vec<Template>) -> Result<Self, GenerateError> {
		if sentences.is_empty() {
			return Err(GenerateError::NoTemplates(TemplateKind::Sentence));
		}
		if titles.is_empty() {
			return Err(GenerateError::NoTemplates(TemplateKind::Title));
		}
		Ok(Self { sentences, titles })
	}

	/// Returns all templates of a kind, duplicates included.
	pub fn templates(&self, kind: TemplateKind) -> &[Template] {
		match kind {
			TemplateKind::Sentence => &self.sentences,
			TemplateKind::Title => &self.titles,
		}
	}

	/// Picks a template of the given kind uniformly at random.
	pub fn pick<R: Rng>(&self, rng: &mut R, kind: TemplateKind) -> &Template {
		let templates = self.templates(kind);
		&templates[rng.random_range(0..templates.len())]
	}
}
