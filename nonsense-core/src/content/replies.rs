use chrono::NaiveDate;
use rand::Rng;

use crate::sampling::range::today;
use crate::sampling::{DateRange, EntityId, HierarchySampler, HierarchyState};
use crate::text::{Category, GenerateError, Generator};

use super::repository::{DocumentSummary, NewReply, Repository};
use super::{ContentError, check_range, random_body};

/// Documents receiving replies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyTarget {
	/// A single document.
	Document(EntityId),
	/// At most `limit` documents of a content type.
	ContentType { name: String, limit: usize },
}

/// Options of a reply run.
#[derive(Clone, Debug)]
pub struct ReplyOptions {
	pub target: ReplyTarget,

	/// Minimum number of replies per document.
	pub min_count: usize,

	/// Maximum number of replies per document.
	pub max_count: usize,

	/// Deepest thread level, the repository setting when `None`.
	pub max_depth: Option<u32>,

	/// Minimum reply length, in paragraphs. `0` allows an empty body.
	pub min_length: usize,

	/// Maximum reply length, in paragraphs.
	pub max_length: usize,

	/// Newest reply date. The oldest is the document's own date.
	pub max_date: NaiveDate,
}

impl Default for ReplyOptions {
	fn default() -> Self {
		Self {
			target: ReplyTarget::ContentType { name: "post".to_owned(), limit: 100 },
			min_count: 0,
			max_count: 50,
			max_depth: None,
			min_length: 1,
			max_length: 5,
			max_date: today(),
		}
	}
}

/// Creates random replies on existing documents.
///
/// # Behavior
/// - Each document gets a random number of replies dated between the
///   document date and `max_date`.
/// - The hierarchy restarts for each document; replies nest only when
///   the repository has threading enabled.
/// - A reply the repository rejects is logged and skipped.
///
/// # Errors
/// Unknown document or content type, reversed option ranges, text
/// generation failures.
pub fn generate_replies<Repo, R>(
	repository: &mut Repo,
	generator: &Generator,
	rng: &mut R,
	options: &ReplyOptions,
) -> Result<Vec<EntityId>, ContentError>
where
	Repo: Repository + ?Sized,
	R: Rng,
{
	check_range("reply count", options.min_count, options.max_count)?;
	check_range("length", options.min_length, options.max_length)?;

	let documents = match &options.target {
		ReplyTarget::Document(id) => vec![repository.document(*id).ok_or(ContentError::UnknownDocument(*id))?],
		ReplyTarget::ContentType { name, limit } => {
			if repository.content_type(name).is_none() {
				return Err(ContentError::UnknownContentType(name.clone()));
			}
			repository.documents(name, *limit)
		}
	};

	let threading = repository.threading();
	let max_depth = options.max_depth.unwrap_or(threading.max_depth);
	let mut created = Vec::new();

	for document in &documents {
		let range = DateRange::new(document.date, options.max_date);
		let count = rng.random_range(options.min_count..=options.max_count);
		let mut state = HierarchyState::new();
		let mut done = 0;

		for _ in 0..count {
			if threading.enabled {
				state = HierarchySampler::advance(rng, state, max_depth);
			}

			let reply = random_reply(generator, rng, document, state.parent_id, &range, options)?;
			match repository.create_reply(reply) {
				Ok(id) => {
					state.record(id);
					created.push(id);
					done += 1;
				}
				Err(e) => log::warn!("skipping reply on document {}: {e}", document.id),
			}
		}

		log::info!(
			"generated {done} of {count} replies on {} {}: {}",
			document.content_type,
			document.id,
			document.title
		);
	}

	Ok(created)
}

/// Draws the author, date and body of one reply.
fn random_reply<R: Rng>(
	generator: &Generator,
	rng: &mut R,
	document: &DocumentSummary,
	parent: EntityId,
	range: &DateRange,
	options: &ReplyOptions,
) -> Result<NewReply, GenerateError> {
	let first_name = generator.word(rng, Category::FirstNames).text();
	let last_name = generator.word(rng, Category::LastNames).text();
	let author_name = format!("{first_name} {last_name}");
	let username = slugify(&author_name);

	// One author in three has a website
	let author_url = if rng.random_range(1..=3) == 3 {
		format!("https://{username}.example.com")
	} else {
		"https://".to_owned()
	};

	Ok(NewReply {
		document: document.id,
		parent,
		author_email: format!("{username}@example.com"),
		author_url,
		date: range.sample(rng),
		body: random_body(generator, rng, options.min_length, options.max_length)?,
		author_name,
	})
}

/// Lowercases and joins alphanumeric runs with dashes.
///
/// Example: `"Ada  Lovelace!"` → `"ada-lovelace"`
pub fn slugify(text: &str) -> String {
	text.split(|c: char| !c.is_alphanumeric())
		.filter(|part| !part.is_empty())
		.map(str::to_lowercase)
		.collect::<Vec<_>>()
		.join("-")
}
