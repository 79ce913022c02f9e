use std::collections::HashMap;

use crate::sampling::{EntityId, ROOT};

use super::repository::{
	ContentType, DocumentSummary, NewDocument, NewReply, NewTerm, NewUser, Repository, RepositoryError, Taxonomy,
	Threading,
};

/// A created unit with its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stored<T> {
	pub id: EntityId,
	pub value: T,
}

/// Repository keeping everything in memory.
///
/// Ids come from one counter shared by every kind of unit, starting at 1.
/// Starts with the `post` (flat) and `page` (hierarchical) content types,
/// the `category` (hierarchical) and `post_tag` (flat) taxonomies, the
/// usual roles, threading enabled up to depth 5 and one administrator.
///
/// # Validation
/// - Parents must exist (same content type, taxonomy or document)
/// - Term slugs are unique within a taxonomy, logins are unique
#[derive(Debug)]
pub struct MemoryRepository {
	content_types: Vec<ContentType>,
	taxonomies: Vec<Taxonomy>,
	roles: Vec<String>,
	threading: Threading,
	documents: Vec<Stored<NewDocument>>,
	terms: Vec<Stored<NewTerm>>,
	users: Vec<Stored<NewUser>>,
	replies: Vec<Stored<NewReply>>,
	attachments: HashMap<(EntityId, String), Vec<EntityId>>,
	next_id: EntityId,
}

impl Default for MemoryRepository {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryRepository {
	pub fn new() -> Self {
		let mut repository = Self::empty();
		repository = repository
			.with_content_type("post", false)
			.with_content_type("page", true)
			.with_taxonomy("category", true)
			.with_taxonomy("post_tag", false)
			.with_threading(true, 5);
		for role in ["subscriber", "contributor", "author", "editor", "administrator"] {
			repository = repository.with_role(role);
		}
		let admin = NewUser {
			login: "admin".to_owned(),
			email: "admin@example.com".to_owned(),
			first_name: String::new(),
			last_name: String::new(),
			display_name: "admin".to_owned(),
			description: String::new(),
			role: Some("administrator".to_owned()),
		};
		let id = repository.allocate();
		repository.users.push(Stored { id, value: admin });
		repository
	}

	/// A repository without registrations, users or threading.
	pub fn empty() -> Self {
		Self {
			content_types: Vec::new(),
			taxonomies: Vec::new(),
			roles: Vec::new(),
			threading: Threading { enabled: false, max_depth: 1 },
			documents: Vec::new(),
			terms: Vec::new(),
			users: Vec::new(),
			replies: Vec::new(),
			attachments: HashMap::new(),
			next_id: 1,
		}
	}

	pub fn with_content_type(mut self, name: &str, hierarchical: bool) -> Self {
		self.content_types.retain(|existing| existing.name != name);
		self.content_types.push(ContentType { name: name.to_owned(), hierarchical });
		self
	}

	pub fn with_taxonomy(mut self, name: &str, hierarchical: bool) -> Self {
		self.taxonomies.retain(|existing| existing.name != name);
		self.taxonomies.push(Taxonomy { name: name.to_owned(), hierarchical });
		self
	}

	pub fn with_role(mut self, role: &str) -> Self {
		if !self.role_exists(role) {
			self.roles.push(role.to_owned());
		}
		self
	}

	pub fn with_threading(mut self, enabled: bool, max_depth: u32) -> Self {
		self.threading = Threading { enabled, max_depth };
		self
	}

	pub fn documents_stored(&self) -> &[Stored<NewDocument>] {
		&self.documents
	}

	pub fn terms_stored(&self) -> &[Stored<NewTerm>] {
		&self.terms
	}

	pub fn users_stored(&self) -> &[Stored<NewUser>] {
		&self.users
	}

	pub fn replies_stored(&self) -> &[Stored<NewReply>] {
		&self.replies
	}

	/// Terms attached to a document within a taxonomy.
	pub fn attached_terms(&self, document: EntityId, taxonomy: &str) -> &[EntityId] {
		self.attachments
			.get(&(document, taxonomy.to_owned()))
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	fn allocate(&mut self) -> EntityId {
		let id = self.next_id;
		self.next_id += 1;
		id
	}

	fn find<T>(items: &[Stored<T>], id: EntityId) -> Option<&Stored<T>> {
		items.iter().find(|item| item.id == id)
	}
}

impl Repository for MemoryRepository {
	fn content_type(&self, name: &str) -> Option<ContentType> {
		self.content_types.iter().find(|content_type| content_type.name == name).cloned()
	}

	fn taxonomy(&self, name: &str) -> Option<Taxonomy> {
		self.taxonomies.iter().find(|taxonomy| taxonomy.name == name).cloned()
	}

	fn role_exists(&self, role: &str) -> bool {
		self.roles.iter().any(|existing| existing == role)
	}

	fn threading(&self) -> Threading {
		self.threading
	}

	fn authors(&self, limit: usize) -> Vec<EntityId> {
		self.users
			.iter()
			.filter(|user| user.value.role.as_deref() != Some("subscriber"))
			.take(limit)
			.map(|user| user.id)
			.collect()
	}

	fn user_count(&self) -> usize {
		self.users.len()
	}

	fn term_ids(&self, taxonomy: &str) -> Vec<EntityId> {
		self.terms.iter().filter(|term| term.value.taxonomy == taxonomy).map(|term| term.id).collect()
	}

	fn document(&self, id: EntityId) -> Option<DocumentSummary> {
		Self::find(&self.documents, id).map(summarize)
	}

	fn documents(&self, content_type: &str, limit: usize) -> Vec<DocumentSummary> {
		self.documents
			.iter()
			.filter(|document| document.value.content_type == content_type)
			.take(limit)
			.map(summarize)
			.collect()
	}

	fn create_document(&mut self, document: NewDocument) -> Result<EntityId, RepositoryError> {
		if document.parent != ROOT {
			let parent = Self::find(&self.documents, document.parent);
			if parent.is_none_or(|parent| parent.value.content_type != document.content_type) {
				return Err(RepositoryError::NotFound { kind: "parent document", id: document.parent });
			}
		}
		let id = self.allocate();
		self.documents.push(Stored { id, value: document });
		Ok(id)
	}

	fn attach_terms(&mut self, document: EntityId, taxonomy: &str, terms: &[EntityId]) -> Result<(), RepositoryError> {
		if Self::find(&self.documents, document).is_none() {
			return Err(RepositoryError::NotFound { kind: "document", id: document });
		}
		let known = self.term_ids(taxonomy);
		if let Some(missing) = terms.iter().find(|id| !known.contains(*id)) {
			return Err(RepositoryError::NotFound { kind: "term", id: *missing });
		}
		self.attachments.insert((document, taxonomy.to_owned()), terms.to_vec());
		Ok(())
	}

	fn create_term(&mut self, term: NewTerm) -> Result<EntityId, RepositoryError> {
		let same_taxonomy = |stored: &&Stored<NewTerm>| stored.value.taxonomy == term.taxonomy;
		if self.terms.iter().filter(same_taxonomy).any(|stored| stored.value.slug == term.slug) {
			return Err(RepositoryError::Duplicate { kind: "term", key: term.slug });
		}
		if term.parent != ROOT && !self.terms.iter().filter(same_taxonomy).any(|stored| stored.id == term.parent) {
			return Err(RepositoryError::NotFound { kind: "parent term", id: term.parent });
		}
		let id = self.allocate();
		self.terms.push(Stored { id, value: term });
		Ok(id)
	}

	fn create_user(&mut self, user: NewUser) -> Result<EntityId, RepositoryError> {
		if self.users.iter().any(|stored| stored.value.login == user.login) {
			return Err(RepositoryError::Duplicate { kind: "user", key: user.login });
		}
		let id = self.allocate();
		self.users.push(Stored { id, value: user });
		Ok(id)
	}

	fn create_reply(&mut self, reply: NewReply) -> Result<EntityId, RepositoryError> {
		if Self::find(&self.documents, reply.document).is_none() {
			return Err(RepositoryError::NotFound { kind: "document", id: reply.document });
		}
		if reply.parent != ROOT {
			let parent = Self::find(&self.replies, reply.parent);
			if parent.is_none_or(|parent| parent.value.document != reply.document) {
				return Err(RepositoryError::NotFound { kind: "parent reply", id: reply.parent });
			}
		}
		let id = self.allocate();
		self.replies.push(Stored { id, value: reply });
		Ok(id)
	}
}

fn summarize(document: &Stored<NewDocument>) -> DocumentSummary {
	DocumentSummary {
		id: document.id,
		content_type: document.value.content_type.clone(),
		title: document.value.title.clone(),
		date: document.value.date,
	}
}
