//! In-memory drink store

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use plinth::repository::{
    Repository, RepositoryError, RepositoryOperation, RepositoryResult, UpdateRepository,
};

use crate::models::{Drink, DrinkPatch, NewDrink};

#[derive(Debug, Default)]
struct Menu {
    drinks: BTreeMap<i64, Drink>,
    next_id: i64,
}

impl Menu {
    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.drinks
            .values()
            .any(|drink| drink.title == title && Some(drink.id) != except)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDrinks {
    menu: Arc<RwLock<Menu>>,
}

impl InMemoryDrinks {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_title(title: &str) -> RepositoryError {
    RepositoryError::already_exists("Drink", title)
}

impl Repository<i64, Drink, NewDrink> for InMemoryDrinks {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Drink>> {
        Ok(self.menu.read().await.drinks.get(id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Drink>> {
        Ok(self.menu.read().await.drinks.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.menu.read().await.drinks.len() as u64)
    }

    async fn create(&self, data: NewDrink) -> RepositoryResult<Drink> {
        let mut menu = self.menu.write().await;
        if menu.title_taken(&data.title, None) {
            return Err(duplicate_title(&data.title));
        }

        let id = menu.next_id.max(0) + 1;
        menu.next_id = id;

        let drink = Drink {
            id,
            title: data.title,
            recipe: data.recipe,
        };
        menu.drinks.insert(id, drink.clone());
        Ok(drink)
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        Ok(self.menu.write().await.drinks.remove(id).is_some())
    }
}

impl UpdateRepository<i64, Drink, NewDrink, DrinkPatch> for InMemoryDrinks {
    async fn update(&self, id: &i64, data: DrinkPatch) -> RepositoryResult<Option<Drink>> {
        let mut menu = self.menu.write().await;

        if !menu.drinks.contains_key(id) {
            return Ok(None);
        }
        if let Some(title) = &data.title {
            if menu.title_taken(title, Some(*id)) {
                return Err(duplicate_title(title).with_operation(RepositoryOperation::Update));
            }
        }

        let Some(drink) = menu.drinks.get_mut(id) else {
            return Ok(None);
        };
        if let Some(title) = data.title {
            drink.title = title;
        }
        if let Some(recipe) = data.recipe {
            drink.recipe = recipe;
        }
        Ok(Some(drink.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;
    use plinth::repository::RepositoryErrorKind;

    fn espresso() -> NewDrink {
        NewDrink {
            title: "espresso".to_string(),
            recipe: vec![Ingredient {
                color: "brown".to_string(),
                name: "coffee".to_string(),
                parts: 1,
            }],
        }
    }

    #[tokio::test]
    async fn test_titles_are_unique() {
        let drinks = InMemoryDrinks::new();
        drinks.create(espresso()).await.unwrap();

        let err = drinks.create(espresso()).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::AlreadyExists);
        assert_eq!(drinks.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_applies_only_given_fields() {
        let drinks = InMemoryDrinks::new();
        let created = drinks.create(espresso()).await.unwrap();

        let patch = DrinkPatch {
            title: Some("ristretto".to_string()),
            recipe: None,
        };
        let updated = drinks.update(&created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.title, "ristretto");
        assert_eq!(updated.recipe, created.recipe);
    }

    #[tokio::test]
    async fn test_rename_onto_existing_title_fails() {
        let drinks = InMemoryDrinks::new();
        drinks.create(NewDrink::water()).await.unwrap();
        let espresso = drinks.create(espresso()).await.unwrap();

        let patch = DrinkPatch {
            title: Some("water".to_string()),
            recipe: None,
        };
        let err = drinks.update(&espresso.id, patch).await.unwrap_err();
        assert!(err.is_unprocessable());

        // Keeping its own title is not a conflict
        let patch = DrinkPatch {
            title: Some("espresso".to_string()),
            recipe: None,
        };
        assert!(drinks.update(&espresso.id, patch).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let drinks = InMemoryDrinks::new();
        assert!(drinks.update(&999, DrinkPatch::default()).await.unwrap().is_none());
        assert!(!drinks.delete(&999).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_checks_existence_before_title() {
        let drinks = InMemoryDrinks::new();
        drinks.create(NewDrink::water()).await.unwrap();

        let patch = DrinkPatch {
            title: Some("water".to_string()),
            recipe: None,
        };
        assert!(drinks.update(&999, patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let drinks = InMemoryDrinks::new();
        let first = drinks.create(NewDrink::water()).await.unwrap();
        drinks.delete(&first.id).await.unwrap();
        let second = drinks.create(NewDrink::water()).await.unwrap();
        assert!(second.id > first.id);
    }
}
