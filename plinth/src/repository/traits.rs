//! Repository trait definitions
//!
//! Generic CRUD traits using RPITIT (Return Position Impl Trait In Traits), so
//! handlers can be written against any store without `async_trait`.
//!
//! - [`Repository`]: read, create and delete
//! - [`UpdateRepository`]: partial updates for entities that support them
//!
//! Services extend these with their own domain queries (by category, by
//! owning list, by substring) in their own crates.

use std::future::Future;

use super::error::RepositoryError;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base repository trait
///
/// # Type Parameters
///
/// - `Id`: The identifier type for the entity (usually `i64`)
/// - `Entity`: The full entity type returned from queries
/// - `Create`: The data needed to create a new entity
///
/// # Example
///
/// ```rust,ignore
/// use plinth::repository::{Repository, RepositoryResult};
///
/// impl Repository<i64, Drink, NewDrink> for PgDrinkRepository {
///     async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Drink>> {
///         sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drink WHERE id = $1")
///             .bind(id)
///             .fetch_optional(&self.pool)
///             .await?
///             .map(TryInto::try_into)
///             .transpose()
///     }
///     // ... other methods
/// }
/// ```
pub trait Repository<Id, Entity, Create>: Send + Sync {
    /// Find an entity by its unique identifier
    ///
    /// Returns `Ok(Some(entity))` if found, `Ok(None)` if not found.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// All entities, ordered by identifier
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Count all entities
    fn count(&self) -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Check if an entity exists by its identifier
    fn exists(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send {
        let found = self.find_by_id(id);
        async move { Ok(found.await?.is_some()) }
    }

    /// Create a new entity
    ///
    /// Returns the created entity with its store-assigned identifier.
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Delete an entity by its identifier
    ///
    /// Returns `true` if the entity was deleted, `false` if it didn't exist.
    fn delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}

/// Repository extension for entities with an update operation
pub trait UpdateRepository<Id, Entity, Create, Update>: Repository<Id, Entity, Create> {
    /// Apply a partial update
    ///
    /// Returns `Ok(None)` if the entity doesn't exist.
    fn update(
        &self,
        id: &Id,
        data: Update,
    ) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;
}
