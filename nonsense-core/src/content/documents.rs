use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::sampling::range::today;
use crate::sampling::{DateRange, EntityId, HierarchySampler, HierarchyState};
use crate::text::Generator;

use super::repository::{NewDocument, Repository, Taxonomy};
use super::terms::{TermOptions, generate_terms};
use super::{ContentError, check_range, random_body, split_list};

/// Number of candidate users a random author is picked from.
const AUTHOR_POOL: usize = 20;

/// How the author of each document is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorChoice {
	/// Uniformly among the first authors of the repository.
	Random,
	/// Always the given user.
	Fixed(EntityId),
}

/// Options of a document run.
#[derive(Clone, Debug)]
pub struct DocumentOptions {
	/// Number of documents to create.
	pub count: usize,

	pub content_type: String,

	pub status: String,

	pub author: AuthorChoice,

	/// Oldest document date.
	pub min_date: NaiveDate,

	/// Newest document date.
	pub max_date: NaiveDate,

	/// Deepest nesting level for hierarchical content types.
	pub max_depth: u32,

	/// Minimum body length, in paragraphs. `0` allows an empty body.
	pub min_length: usize,

	/// Maximum body length, in paragraphs.
	pub max_length: usize,

	/// Minimum number of terms attached per taxonomy.
	pub min_terms: usize,

	/// Maximum number of terms attached per taxonomy.
	pub max_terms: usize,

	pub taxonomies: Vec<String>,

	/// Generate terms in `taxonomies` before the documents.
	pub with_terms: bool,
}

impl Default for DocumentOptions {
	fn default() -> Self {
		Self {
			count: 100,
			content_type: "post".to_owned(),
			status: "publish".to_owned(),
			author: AuthorChoice::Random,
			min_date: today(),
			max_date: today(),
			max_depth: 1,
			min_length: 1,
			max_length: 10,
			min_terms: 0,
			max_terms: 5,
			taxonomies: split_list("category,post_tag"),
			with_terms: false,
		}
	}
}

/// Creates random documents.
///
/// # Behavior
/// - Hierarchical content types nest documents under the previous one
///   following `HierarchySampler`, flat ones stay at the top level.
/// - Title, paragraphs, author and date are drawn for each document.
/// - Each created document receives random terms of every taxonomy.
/// - A document the repository rejects is logged and skipped.
///
/// # Errors
/// Unknown content type or taxonomy, reversed option ranges, text
/// generation failures.
pub fn generate_documents<Repo, R>(
	repository: &mut Repo,
	generator: &Generator,
	rng: &mut R,
	options: &DocumentOptions,
) -> Result<Vec<EntityId>, ContentError>
where
	Repo: Repository + ?Sized,
	R: Rng,
{
	let content_type = repository
		.content_type(&options.content_type)
		.ok_or_else(|| ContentError::UnknownContentType(options.content_type.clone()))?;
	let taxonomies = options
		.taxonomies
		.iter()
		.map(|name| repository.taxonomy(name).ok_or_else(|| ContentError::UnknownTaxonomy(name.clone())))
		.collect::<Result<Vec<_>, _>>()?;
	check_range("length", options.min_length, options.max_length)?;
	check_range("terms", options.min_terms, options.max_terms)?;

	if options.with_terms {
		let term_options = TermOptions { taxonomies: options.taxonomies.clone(), ..TermOptions::default() };
		generate_terms(repository, generator, rng, &term_options)?;
	}

	let range = DateRange::new(options.min_date, options.max_date);
	let mut state = HierarchyState::new();
	let mut created = Vec::with_capacity(options.count);

	for _ in 0..options.count {
		if content_type.hierarchical {
			state = HierarchySampler::advance(rng, state, options.max_depth);
		}

		let document = NewDocument {
			content_type: content_type.name.clone(),
			status: options.status.clone(),
			parent: state.parent_id,
			title: generator.title(rng)?,
			body: random_body(generator, rng, options.min_length, options.max_length)?,
			author: pick_author(repository, rng, options.author),
			date: range.sample(rng),
		};

		match repository.create_document(document) {
			Ok(id) => {
				attach_random_terms(repository, rng, id, &taxonomies, options);
				state.record(id);
				created.push(id);
			}
			Err(e) => log::warn!("skipping {} document: {e}", content_type.name),
		}
	}

	log::info!("generated {} of {} {} documents", created.len(), options.count, content_type.name);
	Ok(created)
}

fn pick_author<Repo, R>(repository: &Repo, rng: &mut R, choice: AuthorChoice) -> Option<EntityId>
where
	Repo: Repository + ?Sized,
	R: Rng,
{
	match choice {
		AuthorChoice::Fixed(id) => Some(id),
		AuthorChoice::Random => {
			let authors = repository.authors(AUTHOR_POOL);
			if authors.is_empty() {
				return None;
			}
			Some(authors[rng.random_range(0..authors.len())])
		}
	}
}

/// Attaches a random subset of each taxonomy's terms.
///
/// A count of zero leaves the taxonomy untouched; otherwise the terms
/// are shuffled and at most `count` of them are kept.
fn attach_random_terms<Repo, R>(
	repository: &mut Repo,
	rng: &mut R,
	document: EntityId,
	taxonomies: &[Taxonomy],
	options: &DocumentOptions,
) where
	Repo: Repository + ?Sized,
	R: Rng,
{
	for taxonomy in taxonomies {
		let count = rng.random_range(options.min_terms..=options.max_terms);
		if count == 0 {
			continue;
		}

		let mut terms = repository.term_ids(&taxonomy.name);
		terms.shuffle(rng);
		terms.truncate(count);

		if let Err(e) = repository.attach_terms(document, &taxonomy.name, &terms) {
			log::warn!("cannot attach {} terms to document {document}: {e}", taxonomy.name);
		}
	}
}
