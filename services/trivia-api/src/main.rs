use plinth::prelude::*;
use trivia_api::{handlers::TriviaState, repository::InMemoryTrivia, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("trivia-api")?;
    init_tracing(&config)?;

    let state = AppState::connect(config.clone()).await?;

    let app = match postgres_router(&state) {
        Some(app) => app,
        None => {
            tracing::warn!("No database configured, serving from an empty in-memory store");
            let store = InMemoryTrivia::with_default_categories();
            router(TriviaState::new(store.questions(), store.categories()), state)
        }
    };

    Server::new(config).serve(app).await?;
    Ok(())
}

#[cfg(feature = "database")]
fn postgres_router(state: &AppState) -> Option<Router> {
    use trivia_api::repository::{PgCategoryRepository, PgQuestionRepository};

    let pool = state.db()?.clone();
    tracing::info!("Serving questions from PostgreSQL");
    Some(router(
        TriviaState::new(PgQuestionRepository::new(pool.clone()), PgCategoryRepository::new(pool)),
        state.clone(),
    ))
}

#[cfg(not(feature = "database"))]
fn postgres_router(_state: &AppState) -> Option<Router> {
    None
}
