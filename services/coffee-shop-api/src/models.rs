//! Drinks, recipes and request bodies

use serde::{Deserialize, Serialize};

/// One ingredient of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub color: String,
    pub name: String,
    pub parts: u32,
}

/// Ingredient as shown on the public menu: the colour band without the name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientShort {
    pub color: String,
    pub parts: u32,
}

/// A drink on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public representation of a drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientShort>,
}

impl Drink {
    /// The public view: ingredient names are hidden
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| IngredientShort {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }

    /// The detailed view for baristas and managers
    pub fn long(&self) -> Drink {
        self.clone()
    }
}

/// Validated data for a new drink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl NewDrink {
    /// The drink every fresh menu starts with
    pub fn water() -> Self {
        Self {
            title: "water".to_string(),
            recipe: vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        }
    }
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkPatch {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// A recipe as clients send it
///
/// The barista app posts a list, older clients post a single ingredient
/// object, and some send the whole thing pre-encoded as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    List(Vec<Ingredient>),
    Single(Ingredient),
    Encoded(String),
}

impl RecipeInput {
    /// Normalize into an ingredient list
    pub fn into_ingredients(self) -> Result<Vec<Ingredient>, serde_json::Error> {
        match self {
            Self::List(ingredients) => Ok(ingredients),
            Self::Single(ingredient) => Ok(vec![ingredient]),
            Self::Encoded(text) => match serde_json::from_str::<RecipeInput>(&text)? {
                Self::List(ingredients) => Ok(ingredients),
                Self::Single(ingredient) => Ok(vec![ingredient]),
                Self::Encoded(_) => Err(serde::de::Error::custom("recipe is encoded twice")),
            },
        }
    }
}

/// Body of `POST /drinks` and `PATCH /drinks/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

impl DrinkRequest {
    /// Validate as a new drink: both fields required, recipe non-empty
    pub fn into_new_drink(self) -> Result<NewDrink, &'static str> {
        let title = non_empty_title(self.title).ok_or("title")?;
        let recipe = self
            .recipe
            .map(RecipeInput::into_ingredients)
            .transpose()
            .map_err(|_| "recipe")?
            .filter(|recipe| !recipe.is_empty())
            .ok_or("recipe")?;
        Ok(NewDrink { title, recipe })
    }

    /// Validate as a partial update: empty values count as absent
    pub fn into_patch(self) -> Result<DrinkPatch, &'static str> {
        let recipe = self
            .recipe
            .map(RecipeInput::into_ingredients)
            .transpose()
            .map_err(|_| "recipe")?
            .filter(|recipe| !recipe.is_empty());
        Ok(DrinkPatch {
            title: non_empty_title(self.title),
            recipe,
        })
    }
}

fn non_empty_title(title: Option<String>) -> Option<String> {
    title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn mocha() -> Drink {
        Drink {
            id: 2,
            title: "mocha".to_string(),
            recipe: vec![
                Ingredient {
                    color: "brown".to_string(),
                    name: "espresso".to_string(),
                    parts: 1,
                },
                Ingredient {
                    color: "white".to_string(),
                    name: "milk".to_string(),
                    parts: 2,
                },
            ],
        }
    }

    #[test]
    fn test_short_hides_ingredient_names() {
        let value = serde_json::to_value(mocha().short()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 2,
                "title": "mocha",
                "recipe": [
                    {"color": "brown", "parts": 1},
                    {"color": "white", "parts": 2}
                ]
            })
        );
    }

    #[test]
    fn test_long_keeps_ingredient_names() {
        let value = serde_json::to_value(mocha().long()).unwrap();
        assert_eq!(value["recipe"][1]["name"], "milk");
    }

    #[rstest]
    #[case(json!([{"color": "blue", "name": "water", "parts": 1}]))]
    #[case(json!({"color": "blue", "name": "water", "parts": 1}))]
    #[case(json!(r#"[{"color": "blue", "name": "water", "parts": 1}]"#))]
    #[case(json!(r#"{"color": "blue", "name": "water", "parts": 1}"#))]
    fn test_recipe_shapes_normalize(#[case] recipe: serde_json::Value) {
        let body: DrinkRequest =
            serde_json::from_value(json!({"title": "water", "recipe": recipe})).unwrap();
        assert_eq!(body.into_new_drink().unwrap(), NewDrink::water());
    }

    #[rstest]
    #[case(json!({"recipe": [{"color": "blue", "name": "water", "parts": 1}]}), "title")]
    #[case(json!({"title": "  ", "recipe": [{"color": "blue", "name": "water", "parts": 1}]}), "title")]
    #[case(json!({"title": "water"}), "recipe")]
    #[case(json!({"title": "water", "recipe": []}), "recipe")]
    #[case(json!({"title": "water", "recipe": "not json"}), "recipe")]
    fn test_invalid_new_drink(#[case] body: serde_json::Value, #[case] field: &str) {
        let body: DrinkRequest = serde_json::from_value(body).unwrap();
        assert_eq!(body.into_new_drink().unwrap_err(), field);
    }

    #[test]
    fn test_patch_treats_empty_as_absent() {
        let body: DrinkRequest = serde_json::from_value(json!({"title": "", "recipe": []})).unwrap();
        assert_eq!(body.into_patch().unwrap(), DrinkPatch::default());

        let body: DrinkRequest = serde_json::from_value(json!({"title": "latte"})).unwrap();
        assert_eq!(body.into_patch().unwrap().title.as_deref(), Some("latte"));
    }
}
