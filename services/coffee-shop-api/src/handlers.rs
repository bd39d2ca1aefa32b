//! Drink handlers
//!
//! Privileged handlers never look at credentials themselves; the permission
//! guard in front of them has already admitted the caller and left the
//! verified [`Claims`] in the request extensions.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::{info, instrument};

use plinth::{
    error::{Error, Result},
    extract::{EntityPath, JsonBody},
    middleware::Claims,
    repository::{Repository, UpdateRepository},
};

use crate::models::{Drink, DrinkRequest, DrinkShort};
use crate::repository::DrinkRepository;

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    fn new(drinks: Vec<T>) -> Json<Self> {
        Json(Self {
            success: true,
            drinks,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub delete: i64,
}

fn invalid_field(field: &str) -> Error {
    Error::BadRequest(format!("missing or invalid field: {field}"))
}

/// `GET /drinks`: the public menu
#[instrument(skip(drinks))]
pub async fn list_drinks<D>(State(drinks): State<D>) -> Result<Json<DrinksResponse<DrinkShort>>>
where
    D: DrinkRepository,
{
    let menu = drinks.find_all().await?;
    Ok(DrinksResponse::new(menu.iter().map(Drink::short).collect()))
}

/// `GET /drinks-detail`: the menu with ingredient names
#[instrument(skip(drinks, claims), fields(sub = %claims.sub))]
pub async fn drinks_detail<D>(
    State(drinks): State<D>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DrinksResponse<Drink>>>
where
    D: DrinkRepository,
{
    let menu = drinks.find_all().await?;
    Ok(DrinksResponse::new(menu.iter().map(Drink::long).collect()))
}

/// `POST /drinks`
#[instrument(skip(drinks, claims), fields(sub = %claims.sub))]
pub async fn create_drink<D>(
    State(drinks): State<D>,
    Extension(claims): Extension<Claims>,
    JsonBody(body): JsonBody<DrinkRequest>,
) -> Result<Json<DrinksResponse<Drink>>>
where
    D: DrinkRepository,
{
    let new_drink = body.into_new_drink().map_err(invalid_field)?;
    let drink = drinks.create(new_drink).await?;

    info!(drink_id = drink.id, title = %drink.title, "Created drink");
    Ok(DrinksResponse::new(vec![drink.long()]))
}

/// `PATCH /drinks/{id}`
#[instrument(skip(drinks, claims), fields(sub = %claims.sub))]
pub async fn update_drink<D>(
    State(drinks): State<D>,
    Extension(claims): Extension<Claims>,
    EntityPath(id): EntityPath<i64>,
    JsonBody(body): JsonBody<DrinkRequest>,
) -> Result<Json<DrinksResponse<Drink>>>
where
    D: DrinkRepository,
{
    let patch = body.into_patch().map_err(invalid_field)?;
    let drink = drinks
        .update(&id, patch)
        .await?
        .ok_or_else(Error::resource_not_found)?;

    info!(drink_id = drink.id, "Updated drink");
    Ok(DrinksResponse::new(vec![drink.long()]))
}

/// `DELETE /drinks/{id}`
#[instrument(skip(drinks, claims), fields(sub = %claims.sub))]
pub async fn delete_drink<D>(
    State(drinks): State<D>,
    Extension(claims): Extension<Claims>,
    EntityPath(id): EntityPath<i64>,
) -> Result<Json<DeletedResponse>>
where
    D: DrinkRepository,
{
    if !drinks.delete(&id).await? {
        return Err(Error::resource_not_found());
    }

    info!(drink_id = id, "Deleted drink");
    Ok(Json(DeletedResponse {
        success: true,
        delete: id,
    }))
}
