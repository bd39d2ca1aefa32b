use plinth::prelude::*;
use todo_api::{handlers::TodoState, repository::InMemoryTodoStore, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("todo-api")?;
    init_tracing(&config)?;

    let state = AppState::connect(config.clone()).await?;

    let app = match postgres_router(&state) {
        Some(app) => app,
        None => {
            tracing::warn!("No database configured, keeping lists in memory");
            let store = InMemoryTodoStore::new();
            router(TodoState::new(store.lists(), store.todos()), state)
        }
    };

    Server::new(config).serve(app).await?;
    Ok(())
}

#[cfg(feature = "database")]
fn postgres_router(state: &AppState) -> Option<Router> {
    use todo_api::repository::{PgTodoListRepository, PgTodoRepository};

    let pool = state.db()?.clone();
    tracing::info!("Serving lists from PostgreSQL");
    Some(router(
        TodoState::new(PgTodoListRepository::new(pool.clone()), PgTodoRepository::new(pool)),
        state.clone(),
    ))
}

#[cfg(not(feature = "database"))]
fn postgres_router(_state: &AppState) -> Option<Router> {
    None
}
