use anyhow::Context;
use coffee_shop_api::{models::NewDrink, repository::InMemoryDrinks, router};
use plinth::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("coffee-shop-api")?;
    init_tracing(&config)?;

    let jwt = config
        .jwt
        .as_ref()
        .context("coffee-shop-api needs a [jwt] section to verify bearer tokens")?;
    let auth = JwtAuth::new(jwt)?;

    let state = AppState::connect(config.clone()).await?;

    let app = match postgres_router(&state, &auth) {
        Some(app) => app,
        None => {
            tracing::warn!("No database configured, serving an in-memory menu");
            let drinks = InMemoryDrinks::new();
            drinks.create(NewDrink::water()).await?;
            router(drinks, &auth, state)
        }
    };

    Server::new(config).serve(app).await?;
    Ok(())
}

#[cfg(feature = "database")]
fn postgres_router(state: &AppState, auth: &JwtAuth) -> Option<Router> {
    use coffee_shop_api::repository::PgDrinkRepository;

    let pool = state.db()?.clone();
    tracing::info!("Serving drinks from PostgreSQL");
    Some(router(PgDrinkRepository::new(pool), auth, state.clone()))
}

#[cfg(not(feature = "database"))]
fn postgres_router(_state: &AppState, _auth: &JwtAuth) -> Option<Router> {
    None
}
