use chrono::NaiveDate;

use crate::sampling::EntityId;

/// A registered kind of document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentType {
	pub name: String,
	/// Documents of this type may have a parent document.
	pub hierarchical: bool,
}

/// A registered taxonomy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Taxonomy {
	pub name: String,
	/// Terms of this taxonomy may have a parent term.
	pub hierarchical: bool,
}

/// Reply threading settings of the repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Threading {
	pub enabled: bool,
	pub max_depth: u32,
}

/// A document to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
	pub content_type: String,
	pub status: String,
	pub parent: EntityId,
	pub title: String,
	pub body: String,
	pub author: Option<EntityId>,
	pub date: NaiveDate,
}

/// What replies need to know about an existing document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentSummary {
	pub id: EntityId,
	pub content_type: String,
	pub title: String,
	pub date: NaiveDate,
}

/// A taxonomy term to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTerm {
	pub taxonomy: String,
	pub name: String,
	pub slug: String,
	pub description: String,
	pub parent: EntityId,
}

/// A user to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
	pub login: String,
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub display_name: String,
	pub description: String,
	pub role: Option<String>,
}

/// A reply to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReply {
	pub document: EntityId,
	pub parent: EntityId,
	pub author_name: String,
	pub author_email: String,
	pub author_url: String,
	pub body: String,
	pub date: NaiveDate,
}

/// Errors reported by a repository backend.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
	/// A unique key is already taken
	#[error("A {kind} with key '{key}' already exists")]
	Duplicate { kind: &'static str, key: String },

	/// A referenced entity does not exist
	#[error("No {kind} with ID {id}")]
	NotFound { kind: &'static str, id: EntityId },

	/// Any other backend failure
	#[error("{0}")]
	Backend(String),
}

/// Content repository the drivers write to.
///
/// Implementations own persistence and validation; the drivers only
/// query registrations and create units one at a time.
pub trait Repository {
	/// Looks up a registered content type.
	fn content_type(&self, name: &str) -> Option<ContentType>;

	/// Looks up a registered taxonomy.
	fn taxonomy(&self, name: &str) -> Option<Taxonomy>;

	fn role_exists(&self, role: &str) -> bool;

	fn threading(&self) -> Threading;

	/// Users allowed to author documents, at most `limit`.
	fn authors(&self, limit: usize) -> Vec<EntityId>;

	fn user_count(&self) -> usize;

	/// All term ids of a taxonomy.
	fn term_ids(&self, taxonomy: &str) -> Vec<EntityId>;

	fn document(&self, id: EntityId) -> Option<DocumentSummary>;

	/// Documents of a content type, at most `limit`.
	fn documents(&self, content_type: &str, limit: usize) -> Vec<DocumentSummary>;

	fn create_document(&mut self, document: NewDocument) -> Result<EntityId, RepositoryError>;

	/// Replaces the terms of a document within one taxonomy.
	fn attach_terms(&mut self, document: EntityId, taxonomy: &str, terms: &[EntityId]) -> Result<(), RepositoryError>;

	fn create_term(&mut self, term: NewTerm) -> Result<EntityId, RepositoryError>;

	fn create_user(&mut self, user: NewUser) -> Result<EntityId, RepositoryError>;

	fn create_reply(&mut self, reply: NewReply) -> Result<EntityId, RepositoryError>;
}
