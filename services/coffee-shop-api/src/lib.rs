//! Coffee shop drinks API
//!
//! The public menu hides ingredient names. Everything else needs a bearer
//! token carrying the matching permission:
//!
//! | route | permission |
//! |---|---|
//! | `GET /drinks-detail` | `get:drinks-detail` |
//! | `POST /drinks` | `post:drinks` |
//! | `PATCH /drinks/{id}` | `patch:drinks` |
//! | `DELETE /drinks/{id}` | `delete:drinks` |

pub mod handlers;
pub mod models;
pub mod repository;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, MethodRouter},
    Router,
};
use plinth::{
    health,
    middleware::{JwtAuth, RequirePermission},
    server::json_fallbacks,
    state::AppState,
};

use repository::DrinkRepository;

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";

/// Build the drinks router, health probes included
pub fn router<D>(drinks: D, auth: &JwtAuth, app_state: AppState) -> Router
where
    D: DrinkRepository + Clone + 'static,
{
    let guarded = |permission: &'static str, route: MethodRouter<D>| {
        route.route_layer(from_fn_with_state(
            auth.require(permission),
            RequirePermission::middleware,
        ))
    };

    let api = Router::new()
        .route(
            "/drinks",
            get(handlers::list_drinks::<D>)
                .merge(guarded(POST_DRINKS, post(handlers::create_drink::<D>))),
        )
        .route(
            "/drinks-detail",
            guarded(GET_DRINKS_DETAIL, get(handlers::drinks_detail::<D>)),
        )
        .route(
            "/drinks/{id}",
            guarded(PATCH_DRINKS, patch(handlers::update_drink::<D>))
                .merge(guarded(DELETE_DRINKS, delete(handlers::delete_drink::<D>))),
        )
        .with_state(drinks);

    json_fallbacks(api.merge(health::routes(app_state)))
}
