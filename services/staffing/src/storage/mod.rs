//! Data access.
//!
//! Each resource is an [`Entity`] with a create/update body ([`Entity::Draft`])
//! and a list query ([`Entity::Filter`]). Handlers only talk to the
//! [`Repository`] trait so the backing store can be swapped.

mod memory;

pub use memory::InMemoryRepository;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{User, Validate};

/// Numeric resource identifier. Assigned by the store, starting at 1.
pub type EntityId = i64;

/// Storage errors.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing store cannot serve the request
    #[error("Storage unavailable: {reason}")]
    Unavailable {
        /// Description of the failure
        reason: String,
    },
}

/// A stored resource.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Fields supplied on create and update.
    type Draft: Validate + DeserializeOwned + Send + Sync + 'static;
    /// List query parameters.
    type Filter: DeserializeOwned + Default + Send + Sync + 'static;

    /// Human-readable resource name used in messages.
    const NAME: &'static str;

    /// Store-assigned id.
    fn id(&self) -> EntityId;

    /// Build the stored value for `id`.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Whether this value passes the list filter.
    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// CRUD access to one resource type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All values passing `filter`, ordered by id.
    async fn find_all(&self, filter: &E::Filter) -> Result<Vec<E>, StorageError>;

    /// Value with `id`, if any.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, StorageError>;

    /// Store a new value under a fresh id.
    async fn create(&self, draft: E::Draft) -> Result<E, StorageError>;

    /// Replace the value with `id`. `None` if it does not exist.
    async fn update(&self, id: EntityId, draft: E::Draft) -> Result<Option<E>, StorageError>;

    /// Remove the value with `id`. `false` if it did not exist.
    async fn delete(&self, id: EntityId) -> Result<bool, StorageError>;
}

/// Lookup of login credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// User with exactly this username, if any.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;
}

/// Prefix filter on a text field. An absent filter matches everything.
pub(crate) fn prefix_matches(value: &str, prefix: Option<&String>) -> bool {
    prefix.map_or(true, |p| value.starts_with(p.as_str()))
}

/// Exact filter on a field. An absent filter matches everything.
pub(crate) fn exact_matches<T: PartialEq>(value: &T, expected: Option<&T>) -> bool {
    expected.map_or(true, |e| e == value)
}
