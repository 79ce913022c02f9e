use rand::Rng;

use crate::sampling::{EntityId, HierarchySampler, HierarchyState};
use crate::text::{Generator, upper_first};

use super::repository::{NewTerm, Repository};
use super::{ContentError, split_list};

/// Options of a term run.
#[derive(Clone, Debug)]
pub struct TermOptions {
	/// Number of terms per taxonomy.
	pub count: usize,

	pub taxonomies: Vec<String>,

	/// Deepest nesting level for hierarchical taxonomies.
	pub max_depth: u32,
}

impl Default for TermOptions {
	fn default() -> Self {
		Self { count: 20, taxonomies: split_list("category,post_tag"), max_depth: 1 }
	}
}

/// Creates random terms in every taxonomy.
///
/// Each term is named after a random plural noun (capitalized), uses the
/// plural as slug and gets a short description. Every taxonomy starts a
/// fresh hierarchy; only hierarchical taxonomies nest terms.
///
/// # Errors
/// Unknown taxonomy (checked before anything is created), text
/// generation failures.
pub fn generate_terms<Repo, R>(
	repository: &mut Repo,
	generator: &Generator,
	rng: &mut R,
	options: &TermOptions,
) -> Result<Vec<EntityId>, ContentError>
where
	Repo: Repository + ?Sized,
	R: Rng,
{
	let taxonomies = options
		.taxonomies
		.iter()
		.map(|name| repository.taxonomy(name).ok_or_else(|| ContentError::UnknownTaxonomy(name.clone())))
		.collect::<Result<Vec<_>, _>>()?;

	let mut created = Vec::new();
	for taxonomy in taxonomies {
		let mut state = HierarchyState::new();
		let mut count = 0;

		for _ in 0..options.count {
			if taxonomy.hierarchical {
				state = HierarchySampler::advance(rng, state, options.max_depth);
			}

			let noun = generator.noun(rng);
			let term = NewTerm {
				taxonomy: taxonomy.name.clone(),
				name: upper_first(&noun.plural),
				slug: noun.plural.clone(),
				description: generator.sentences(rng, 1, 5)?,
				parent: state.parent_id,
			};

			match repository.create_term(term) {
				Ok(id) => {
					state.record(id);
					created.push(id);
					count += 1;
				}
				Err(e) => log::warn!("skipping {} term: {e}", taxonomy.name),
			}
		}

		log::info!("generated {count} of {} {} terms", options.count, taxonomy.name);
	}

	Ok(created)
}
