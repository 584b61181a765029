use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

use crate::{
    repo::auth_realms::{AuthRealmsRepo, SeaOrmAuthRealmsRepo},
    service::{
        auth_realms::{AuthRealmsService, AuthRealmsServiceImpl},
        config::ConfigService,
    },
};

pub trait DatabaseClient: Send + Sync {
    fn conn(&self) -> &DatabaseConnection;
}

pub struct SeaOrmDatabaseClient {
    conn: DatabaseConnection,
}

impl SeaOrmDatabaseClient {
    pub async fn new(config: &dyn ConfigService) -> Result<Self, DbErr> {
        let values = config.values();
        let conn = crate::db::connect(values.database_url.as_deref()).await?;
        if values.apply_schema {
            crate::schema::apply(&conn).await?;
            tracing::info!("db: schema applied");
        }
        Ok(Self { conn })
    }
}

impl DatabaseClient for SeaOrmDatabaseClient {
    fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }
}

pub struct AppState {
    auth_realms: Arc<dyn AuthRealmsService>,
    config: Arc<dyn ConfigService>,
}

impl AppState {
    pub async fn new(config: Arc<dyn ConfigService>) -> Result<Arc<Self>, DbErr> {
        let db = Arc::new(SeaOrmDatabaseClient::new(config.as_ref()).await?);
        let repo = Arc::new(SeaOrmAuthRealmsRepo::new(db));
        Ok(Self::from_parts(config, repo))
    }

    pub fn from_parts(
        config: Arc<dyn ConfigService>,
        repo: Arc<dyn AuthRealmsRepo>,
    ) -> Arc<Self> {
        let auth_realms = Arc::new(AuthRealmsServiceImpl::new(repo));
        Arc::new(Self {
            auth_realms,
            config,
        })
    }

    pub fn auth_realms(&self) -> &dyn AuthRealmsService {
        self.auth_realms.as_ref()
    }

    pub fn config(&self) -> &dyn ConfigService {
        self.config.as_ref()
    }
}
