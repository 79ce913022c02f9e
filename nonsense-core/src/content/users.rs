use rand::Rng;

use crate::sampling::EntityId;
use crate::text::{Category, Generator};

use super::ContentError;
use super::repository::{NewUser, Repository};

/// Options of a user run.
#[derive(Clone, Debug)]
pub struct UserOptions {
	/// Number of users to create.
	pub count: usize,

	/// Role given to every user, none for users without role.
	pub role: Option<String>,
}

impl Default for UserOptions {
	fn default() -> Self {
		Self { count: 100, role: Some("author".to_owned()) }
	}
}

/// Creates random users.
///
/// Names come from the first and last name lists. Logins are
/// `{first}_{last}_{n}` where `n` continues from the current user count,
/// so repeated runs do not collide.
///
/// # Errors
/// Unknown role, text generation failures.
pub fn generate_users<Repo, R>(
	repository: &mut Repo,
	generator: &Generator,
	rng: &mut R,
	options: &UserOptions,
) -> Result<Vec<EntityId>, ContentError>
where
	Repo: Repository + ?Sized,
	R: Rng,
{
	if let Some(role) = &options.role {
		if !repository.role_exists(role) {
			return Err(ContentError::UnknownRole(role.clone()));
		}
	}

	let total = repository.user_count();
	let mut created = Vec::with_capacity(options.count);

	for number in total..total + options.count {
		let first_name = generator.word(rng, Category::FirstNames).text().to_owned();
		let last_name = generator.word(rng, Category::LastNames).text().to_owned();
		let login = format!("{first_name}_{last_name}_{number}");

		let user = NewUser {
			email: format!("{login}@example.com"),
			display_name: format!("{first_name} {last_name}"),
			description: generator.sentences(rng, 1, 5)?,
			role: options.role.clone(),
			login,
			first_name,
			last_name,
		};

		match repository.create_user(user) {
			Ok(id) => created.push(id),
			Err(e) => log::warn!("skipping user: {e}"),
		}
	}

	log::info!("generated {} of {} users", created.len(), options.count);
	Ok(created)
}
