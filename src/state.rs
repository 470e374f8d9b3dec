use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::users::repo::{PgUserRepository, UserRepository};

/// Everything a handler needs, assembled once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config.db).await?;
        db::ensure_schema(&pool).await?;

        let users = Arc::new(PgUserRepository::new(pool)) as Arc<dyn UserRepository>;
        Ok(Self::from_parts(users))
    }

    pub fn from_parts(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
