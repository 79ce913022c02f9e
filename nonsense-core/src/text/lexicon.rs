use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::io::{normalize_folder, read_file, word_list_path};

/// Name of the binary cache written next to the word lists.
pub const CACHE_FILE: &str = "lexicon.bin";

/// Grammatical word class backing one word list.
///
/// The discriminant doubles as the index of the category inside
/// per-category arrays (see `Category::index`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
	Interjections,
	Determiners,
	Adjectives,
	Nouns,
	Adverbs,
	Verbs,
	Prepositions,
	Conjunctions,
	Comparatives,
	FirstNames,
	LastNames,
}

impl Category {
	/// Number of categories.
	pub const COUNT: usize = 11;

	/// All categories, in load order.
	pub const ALL: [Category; Category::COUNT] = [
		Category::Interjections,
		Category::Determiners,
		Category::Adjectives,
		Category::Nouns,
		Category::Adverbs,
		Category::Verbs,
		Category::Prepositions,
		Category::Conjunctions,
		Category::Comparatives,
		Category::FirstNames,
		Category::LastNames,
	];

	/// Position of the category in `Category::ALL`.
	pub fn index(self) -> usize {
		self as usize
	}

	/// File stem of the word list backing this category.
	pub fn file_stem(self) -> &'static str {
		match self {
			Category::Interjections => "interjections",
			Category::Determiners => "determiners",
			Category::Adjectives => "adjectives",
			Category::Nouns => "nouns",
			Category::Adverbs => "adverbs",
			Category::Verbs => "verbs",
			Category::Prepositions => "prepositions",
			Category::Conjunctions => "conjunctions",
			Category::Comparatives => "comparatives",
			Category::FirstNames => "names-first",
			Category::LastNames => "names-last",
		}
	}

	/// Looks up a category by name.
	///
	/// Accepts the file stems (`names-first`) as well as the
	/// `first-names` / `last-names` spellings.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"first-names" | "first_names" => return Some(Category::FirstNames),
			"last-names" | "last_names" => return Some(Category::LastNames),
			_ => (),
		}
		Category::ALL.into_iter().find(|category| category.file_stem() == name)
	}

	/// Looks up a category by name, falling back to `Nouns` when the name is unknown.
	///
	/// Templates and callers written against loosely named categories
	/// keep working; the fallback is only logged.
	pub fn resolve(name: &str) -> Self {
		Self::from_name(name).unwrap_or_else(|| {
			log::debug!("unknown category '{name}', falling back to nouns");
			Category::Nouns
		})
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.file_stem())
	}
}

/// A noun with both of its forms.
///
/// Stored on disk as `singular|plural`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Noun {
	pub singular: String,
	pub plural: String,
}

impl Noun {
	/// Parses a `singular|plural` entry.
	///
	/// Returns `None` unless the line holds exactly one pipe with a
	/// non-empty form on each side.
	pub fn parse(entry: &str) -> Option<Self> {
		let mut forms = entry.split('|').map(str::trim);
		match (forms.next(), forms.next(), forms.next()) {
			(Some(singular), Some(plural), None) if !singular.is_empty() && !plural.is_empty() => {
				Some(Self { singular: singular.to_owned(), plural: plural.to_owned() })
			}
			_ => None,
		}
	}

	/// Formats the noun back to its on-disk form.
	pub fn to_entry(&self) -> String {
		format!("{}|{}", self.singular, self.plural)
	}
}

/// A word drawn from the lexicon.
///
/// Nouns carry both forms, every other category a single string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Word<'a> {
	Plain(&'a str),
	Noun(&'a Noun),
}

impl<'a> Word<'a> {
	/// Returns the plain text, or the singular form for nouns.
	pub fn text(&self) -> &'a str {
		match *self {
			Word::Plain(text) => text,
			Word::Noun(noun) => &noun.singular,
		}
	}

	/// Returns the plural form for nouns, the plain text otherwise.
	pub fn plural(&self) -> &'a str {
		match *self {
			Word::Plain(text) => text,
			Word::Noun(noun) => &noun.plural,
		}
	}
}

/// Errors raised while building a lexicon.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
	/// The word list file could not be read
	#[error("Cannot read the {category} word list at {}: {source}", .path.display())]
	Missing {
		category: Category,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The word list has no entries
	#[error("The {category} word list is empty")]
	Empty { category: Category },

	/// A noun entry is not formatted as `singular|plural`
	#[error("Malformed noun entry '{entry}', expected 'singular|plural'")]
	MalformedNoun { entry: String },

	/// The binary cache could not be written
	#[error("Lexicon cache error: {0}")]
	Cache(String),
}

/// Word lists for every category.
///
/// # Invariants
/// - Every category holds at least one entry
/// - Nouns live in `nouns`, the other categories in `words` (indexed by `Category::index`)
/// - Never mutated after construction
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Lexicon {
	words: Vec<Vec<String>>,
	nouns: Vec<Noun>,
}

impl Lexicon {
	/// Builds a lexicon from in-memory lists.
	///
	/// Each list is cleaned the same way as a file: entries are trimmed
	/// and blank entries ignored. Noun entries are `singular|plural`.
	///
	/// # Errors
	/// - `Empty` if a category has no entry (or is not provided)
	/// - `MalformedNoun` if a noun entry is not exactly `singular|plural`
	pub fn from_lists<I, S>(lists: I) -> Result<Self, LexiconError>
	where
		I: IntoIterator<Item = (Category, Vec<S>)>,
		S: AsRef<str>,
	{
		let mut raw: Vec<Vec<String>> = vec![Vec::new(); Category::COUNT];
		for (category, entries) in lists {
			raw[category.index()].extend(entries.iter().map(|entry| entry.as_ref().to_owned()));
		}
		Self::build(raw)
	}

	/// Loads every word list from `<folder>/<stem>.txt`.
	///
	/// # Errors
	/// - `Missing` if a file does not exist or cannot be read
	/// - `Empty` / `MalformedNoun` as in `from_lists`
	pub fn from_dir<P: AsRef<Path>>(folder: P) -> Result<Self, LexiconError> {
		let folder = normalize_folder(folder.as_ref());
		let mut raw = Vec::with_capacity(Category::COUNT);
		for category in Category::ALL {
			let path = word_list_path(&folder, category.file_stem());
			let lines = read_file(&path).map_err(|source| LexiconError::Missing { category, path, source })?;
			raw.push(lines);
		}
		let lexicon = Self::build(raw)?;
		log::debug!("loaded lexicon from {} ({} nouns)", folder.display(), lexicon.nouns.len());
		Ok(lexicon)
	}

	/// Loads a lexicon, using the binary cache when it is up to date.
	///
	/// - Every word list must exist and be readable, cache or not.
	/// - `<folder>/lexicon.bin` (`postcard`) is used only when it is strictly
	///   newer than every word list, otherwise the lists are parsed again.
	/// - A cache that cannot be written is logged and skipped.
	///
	/// # Errors
	/// Same as `from_dir`.
	pub fn load<P: AsRef<Path>>(folder: P) -> Result<Self, LexiconError> {
		let folder = normalize_folder(folder.as_ref());
		let newest_list = Self::newest_list(&folder)?;
		let cache_path = folder.join(CACHE_FILE);
		if let Some(lexicon) = Self::read_cache(&cache_path, newest_list) {
			return Ok(lexicon);
		}

		let lexicon = Self::from_dir(&folder)?;
		if let Err(e) = lexicon.write_cache(&cache_path) {
			log::warn!("lexicon cache not written to {}: {e}", cache_path.display());
		}
		Ok(lexicon)
	}

	/// Opens every word list and returns the latest modification time.
	fn newest_list(folder: &Path) -> Result<SystemTime, LexiconError> {
		let mut newest = SystemTime::UNIX_EPOCH;
		for category in Category::ALL {
			let path = word_list_path(folder, category.file_stem());
			let modified = File::open(&path)
				.and_then(|file| file.metadata())
				.and_then(|metadata| metadata.modified())
				.map_err(|source| LexiconError::Missing { category, path, source })?;
			newest = newest.max(modified);
		}
		Ok(newest)
	}

	/// Returns the cached lexicon if it is fresh and decodes to a valid lexicon.
	fn read_cache(cache_path: &Path, newest_list: SystemTime) -> Option<Self> {
		let modified = fs::metadata(cache_path).and_then(|metadata| metadata.modified()).ok()?;
		if modified <= newest_list {
			log::debug!("lexicon cache {} is stale or missing", cache_path.display());
			return None;
		}
		let bytes = fs::read(cache_path).ok()?;
		let lexicon: Lexicon = match postcard::from_bytes(&bytes) {
			Ok(lexicon) => lexicon,
			Err(e) => {
				log::debug!("ignoring unreadable lexicon cache {}: {e}", cache_path.display());
				return None;
			}
		};
		lexicon.validate().ok()?;
		Some(lexicon)
	}

	fn write_cache(&self, cache_path: &Path) -> Result<(), LexiconError> {
		let bytes = postcard::to_stdvec(self).map_err(|e| LexiconError::Cache(e.to_string()))?;
		fs::write(cache_path, bytes).map_err(|e| LexiconError::Cache(e.to_string()))
	}

	/// Trims entries, drops blank lines, splits nouns and checks invariants.
	fn build(raw: Vec<Vec<String>>) -> Result<Self, LexiconError> {
		let mut words: Vec<Vec<String>> = raw
			.into_iter()
			.map(|lines| {
				lines
					.iter()
					.map(|line| line.trim())
					.filter(|line| !line.is_empty())
					.map(str::to_owned)
					.collect()
			})
			.collect();

		let nouns = std::mem::take(&mut words[Category::Nouns.index()])
			.iter()
			.map(|entry| Noun::parse(entry).ok_or_else(|| LexiconError::MalformedNoun { entry: entry.clone() }))
			.collect::<Result<Vec<_>, _>>()?;

		let lexicon = Self { words, nouns };
		lexicon.validate()?;
		Ok(lexicon)
	}

	fn validate(&self) -> Result<(), LexiconError> {
		for category in Category::ALL {
			if self.len(category) == 0 {
				return Err(LexiconError::Empty { category });
			}
		}
		Ok(())
	}

	/// Number of entries in a category.
	pub fn len(&self, category: Category) -> usize {
		match category {
			Category::Nouns => self.nouns.len(),
			other => self.words.get(other.index()).map_or(0, Vec::len),
		}
	}

	/// Returns a uniformly random entry of the given category.
	pub fn word<R: Rng>(&self, rng: &mut R, category: Category) -> Word<'_> {
		match category {
			Category::Nouns => Word::Noun(self.noun(rng)),
			other => {
				let list = &self.words[other.index()];
				Word::Plain(&list[rng.random_range(0..list.len())])
			}
		}
	}

	/// Returns a random entry of the named category.
	///
	/// Unknown names fall back to nouns.
	pub fn word_by_name<R: Rng>(&self, rng: &mut R, name: &str) -> Word<'_> {
		self.word(rng, Category::resolve(name))
	}

	/// Returns a uniformly random noun.
	pub fn noun<R: Rng>(&self, rng: &mut R) -> &Noun {
		&self.nouns[rng.random_range(0..self.nouns.len())]
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	/// A complete lexicon with a single entry per category.
	pub(crate) fn single_word_lexicon() -> Lexicon {
		Lexicon::from_lists(Category::ALL.map(|category| {
			let entry = match category {
				Category::Interjections => "wow",
				Category::Determiners => "the",
				Category::Adjectives => "red",
				Category::Nouns => "cat|cats",
				Category::Adverbs => "quickly",
				Category::Verbs => "jumps",
				Category::Prepositions => "over",
				Category::Conjunctions => "and",
				Category::Comparatives => "more",
				Category::FirstNames => "ada",
				Category::LastNames => "lovelace",
			};
			(category, vec![entry])
		}))
		.unwrap()
	}

	fn write_lists(folder: &Path, skip: Option<Category>) {
		for category in Category::ALL {
			if Some(category) == skip {
				continue;
			}
			let body = match category {
				Category::Nouns => "cat|cats\n  dog|dogs  \n\nmouse|mice\n",
				_ => "one\ntwo\n",
			};
			std::fs::write(word_list_path(folder, category.file_stem()), body).unwrap();
		}
	}

	#[test]
	fn category_names_round_trip_through_file_stems() {
		for category in Category::ALL {
			assert_eq!(Category::from_name(category.file_stem()), Some(category));
		}
		assert_eq!(Category::from_name("first-names"), Some(Category::FirstNames));
		assert_eq!(Category::from_name("last-names"), Some(Category::LastNames));
		assert_eq!(Category::from_name("colours"), None);
	}

	#[test]
	fn unknown_category_falls_back_to_nouns() {
		let lexicon = single_word_lexicon();
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(Category::resolve("colours"), Category::Nouns);
		assert!(matches!(lexicon.word_by_name(&mut rng, "colours"), Word::Noun(noun) if noun.singular == "cat"));
	}

	#[test]
	fn noun_entries_are_split_once() {
		let noun = Noun::parse("goose|geese").unwrap();
		assert_eq!(noun.singular, "goose");
		assert_eq!(noun.plural, "geese");
		assert_eq!(noun.to_entry(), "goose|geese");
		assert!(Noun::parse("goose").is_none());
	}

	#[test]
	fn noun_entries_need_exactly_two_forms() {
		assert_eq!(Noun::parse(" ox | oxen ").unwrap().plural, "oxen");
		assert!(Noun::parse("a|b|c").is_none());
		assert!(Noun::parse("cat|").is_none());
		assert!(Noun::parse("|cats").is_none());
		assert!(Noun::parse(" | ").is_none());
	}

	#[test]
	fn from_dir_trims_and_skips_blank_lines() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), None);

		let lexicon = Lexicon::from_dir(dir.path()).unwrap();
		assert_eq!(lexicon.len(Category::Nouns), 3);
		assert_eq!(lexicon.len(Category::Verbs), 2);

		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..50 {
			let noun = lexicon.noun(&mut rng);
			assert!(["cat", "dog", "mouse"].contains(&noun.singular.as_str()));
			assert!(!noun.plural.contains(' '));
		}
	}

	#[test]
	fn from_dir_fails_on_missing_list() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), Some(Category::Comparatives));

		match Lexicon::from_dir(dir.path()) {
			Err(LexiconError::Missing { category, .. }) => assert_eq!(category, Category::Comparatives),
			other => panic!("expected a missing list error, got {other:?}"),
		}
	}

	#[test]
	fn from_dir_fails_on_empty_list() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), None);
		std::fs::write(word_list_path(dir.path(), "adverbs"), "\n   \n").unwrap();

		match Lexicon::from_dir(dir.path()) {
			Err(LexiconError::Empty { category }) => assert_eq!(category, Category::Adverbs),
			other => panic!("expected an empty list error, got {other:?}"),
		}
	}

	#[test]
	fn malformed_noun_is_rejected() {
		let lists = Category::ALL.map(|category| {
			let entry = if category == Category::Nouns { "cat" } else { "word" };
			(category, vec![entry])
		});
		assert!(matches!(Lexicon::from_lists(lists), Err(LexiconError::MalformedNoun { .. })));
	}

	fn touch_later(path: &Path) {
		let later = SystemTime::now() + std::time::Duration::from_secs(60);
		File::options().write(true).open(path).unwrap().set_modified(later).unwrap();
	}

	#[test]
	fn load_writes_the_cache_and_reads_it_back() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), None);

		let first = Lexicon::load(dir.path()).unwrap();
		assert!(dir.path().join(CACHE_FILE).is_file());

		let second = Lexicon::load(dir.path()).unwrap();
		assert_eq!(first.nouns, second.nouns);
		assert_eq!(first.words, second.words);
	}

	#[test]
	fn load_fails_on_missing_list_even_with_a_cache() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), None);
		Lexicon::load(dir.path()).unwrap();

		std::fs::remove_file(word_list_path(dir.path(), "comparatives")).unwrap();
		match Lexicon::load(dir.path()) {
			Err(LexiconError::Missing { category, .. }) => assert_eq!(category, Category::Comparatives),
			other => panic!("expected a missing list error, got {other:?}"),
		}
	}

	#[test]
	fn edited_list_invalidates_the_cache() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), None);
		Lexicon::load(dir.path()).unwrap();

		let nouns = word_list_path(dir.path(), "nouns");
		std::fs::write(&nouns, "dog|dogs\n").unwrap();
		touch_later(&nouns);

		let lexicon = Lexicon::load(dir.path()).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(lexicon.len(Category::Nouns), 1);
		assert_eq!(lexicon.noun(&mut rng).singular, "dog");
	}

	#[test]
	fn unwritable_cache_still_returns_the_lexicon() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), None);
		// A directory in place of the cache file makes every write fail
		std::fs::create_dir(dir.path().join(CACHE_FILE)).unwrap();

		let lexicon = Lexicon::load(dir.path()).unwrap();
		assert_eq!(lexicon.len(Category::Nouns), 3);
		assert!(dir.path().join(CACHE_FILE).is_dir());
	}

	#[test]
	fn corrupt_cache_is_rebuilt() {
		let dir = tempfile::tempdir().unwrap();
		write_lists(dir.path(), None);
		let cache = dir.path().join(CACHE_FILE);
		std::fs::write(&cache, [0xff; 4]).unwrap();
		touch_later(&cache);

		let lexicon = Lexicon::load(dir.path()).unwrap();
		assert_eq!(lexicon.len(Category::Verbs), 2);
	}
}
