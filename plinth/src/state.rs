//! Shared service state

use std::sync::Arc;

#[cfg(feature = "database")]
use sqlx::PgPool;

use crate::{config::Config, error::Result};

/// Configuration and connection handles shared by the health endpoints and
/// the service's own stores
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,

    #[cfg(feature = "database")]
    db_pool: Option<PgPool>,
}

impl AppState {
    /// State without any connections
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            #[cfg(feature = "database")]
            db_pool: None,
        }
    }

    /// Build state, opening a database pool when one is configured
    pub async fn connect(config: Config) -> Result<Self> {
        #[cfg(feature = "database")]
        if let Some(db) = &config.database {
            let pool = crate::database::create_pool(db).await?;
            return Ok(Self::new(config).with_pool(pool));
        }

        #[cfg(not(feature = "database"))]
        if config.database.is_some() {
            tracing::warn!("Database configured but the `database` feature is disabled; using in-memory stores");
        }

        Ok(Self::new(config))
    }

    /// Attach an existing pool
    #[cfg(feature = "database")]
    #[must_use]
    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the database pool, if connected
    #[cfg(feature = "database")]
    pub fn db(&self) -> Option<&PgPool> {
        self.db_pool.as_ref()
    }
}
