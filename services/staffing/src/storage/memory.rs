//! In-memory repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{CredentialStore, Entity, EntityId, Repository, StorageError};
use crate::models::User;

#[derive(Debug)]
struct Table<E> {
    next_id: EntityId,
    rows: BTreeMap<EntityId, E>,
}

/// Process-local store. Ids increase monotonically from 1 and are never
/// reused after a delete.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    table: RwLock<Table<E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self, filter: &E::Filter) -> Result<Vec<E>, StorageError> {
        let table = self.table.read();
        Ok(table
            .rows
            .values()
            .filter(|row| row.matches(filter))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, StorageError> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn create(&self, draft: E::Draft) -> Result<E, StorageError> {
        let mut table = self.table.write();
        let id = table.next_id;
        table.next_id += 1;

        let row = E::from_draft(id, draft);
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: EntityId, draft: E::Draft) -> Result<Option<E>, StorageError> {
        let mut table = self.table.write();
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = E::from_draft(id, draft);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: EntityId) -> Result<bool, StorageError> {
        Ok(self.table.write().rows.remove(&id).is_some())
    }
}

#[async_trait]
impl CredentialStore for InMemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, EmployeeDraft, EmployeeFilter, UserDraft};

    fn employee(first: &str, available: bool) -> EmployeeDraft {
        EmployeeDraft {
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            is_available: available,
            role: "developer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_are_not_reused() {
        let repo = InMemoryRepository::<Employee>::new();
        let first = repo.create(employee("Ann", true)).await.unwrap();
        let second = repo.create(employee("Bob", true)).await.unwrap();
        assert_eq!(first.employee_id, 1);
        assert_eq!(second.employee_id, 2);

        assert!(repo.delete(2).await.unwrap());
        let third = repo.create(employee("Cid", true)).await.unwrap();
        assert_eq!(third.employee_id, 3);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryRepository::<Employee>::new();
        assert!(repo.update(7, employee("Ann", true)).await.unwrap().is_none());
        assert!(!repo.delete(7).await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let repo = InMemoryRepository::<Employee>::new();
        let created = repo.create(employee("Ann", true)).await.unwrap();
        let updated = repo
            .update(created.employee_id, employee("Anna", false))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.employee_id, created.employee_id);
        assert_eq!(updated.first_name, "Anna");
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().first_name, "Anna");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_filters_in_id_order() {
        let repo = InMemoryRepository::<Employee>::new();
        for (name, available) in [("Ann", true), ("Bob", false), ("Abe", true)] {
            repo.create(employee(name, available)).await.unwrap();
        }

        let filter = EmployeeFilter {
            first_name: Some("A".to_string()),
            is_available: Some(true),
            ..EmployeeFilter::default()
        };
        let names: Vec<_> = repo
            .find_all(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.first_name)
            .collect();
        assert_eq!(names, ["Ann", "Abe"]);

        assert_eq!(repo.find_all(&EmployeeFilter::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_find_by_username_is_exact() {
        let repo = InMemoryRepository::<User>::new();
        repo.create(UserDraft {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
            role: "admin".to_string(),
        })
        .await
        .unwrap();

        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_username("ali").await.unwrap().is_none());
        assert!(repo.find_by_username("Alice").await.unwrap().is_none());
    }
}
