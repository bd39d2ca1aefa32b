//! PostgreSQL drink store
//!
//! Expected schema; the recipe column holds the ingredient list as JSON text:
//!
//! ```sql
//! CREATE TABLE drinks (
//!     id     BIGSERIAL PRIMARY KEY,
//!     title  VARCHAR(80) NOT NULL UNIQUE,
//!     recipe VARCHAR(180) NOT NULL
//! );
//! ```

use sqlx::PgPool;

use plinth::repository::{
    Repository, RepositoryError, RepositoryOperation, RepositoryResult, UpdateRepository,
};

use crate::models::{Drink, DrinkPatch, Ingredient, NewDrink};

#[derive(Debug, Clone)]
pub struct PgDrinkRepository {
    pool: PgPool,
}

impl PgDrinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = RepositoryError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&row.recipe).map_err(|e| {
            RepositoryError::serialization_error(
                RepositoryOperation::FindById,
                format!("unreadable recipe: {e}"),
            )
            .with_entity("Drink", row.id.to_string())
        })?;

        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe,
        })
    }
}

fn encode_recipe(recipe: &[Ingredient], operation: RepositoryOperation) -> RepositoryResult<String> {
    serde_json::to_string(recipe)
        .map_err(|e| RepositoryError::serialization_error(operation, e.to_string()))
}

impl Repository<i64, Drink, NewDrink> for PgDrinkRepository {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Drink>> {
        sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindById))?
            .map(Drink::try_from)
            .transpose()
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Drink>> {
        sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindAll))?
            .into_iter()
            .map(Drink::try_from)
            .collect()
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drinks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Count))?;
        Ok(count.max(0) as u64)
    }

    async fn create(&self, data: NewDrink) -> RepositoryResult<Drink> {
        let recipe = encode_recipe(&data.recipe, RepositoryOperation::Create)?;

        let row = sqlx::query_as::<_, DrinkRow>(
            "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(&data.title)
        .bind(recipe)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from(e)
                .with_operation(RepositoryOperation::Create)
                .with_entity("Drink", data.title.clone())
        })?;

        Drink::try_from(row)
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Delete))?;
        Ok(result.rows_affected() > 0)
    }
}

impl UpdateRepository<i64, Drink, NewDrink, DrinkPatch> for PgDrinkRepository {
    async fn update(&self, id: &i64, data: DrinkPatch) -> RepositoryResult<Option<Drink>> {
        let recipe = data
            .recipe
            .as_deref()
            .map(|recipe| encode_recipe(recipe, RepositoryOperation::Update))
            .transpose()?;

        sqlx::query_as::<_, DrinkRow>(
            "UPDATE drinks SET title = COALESCE($2, title), recipe = COALESCE($3, recipe) \
             WHERE id = $1 RETURNING id, title, recipe",
        )
        .bind(id)
        .bind(data.title)
        .bind(recipe)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Update))?
        .map(Drink::try_from)
        .transpose()
    }
}
