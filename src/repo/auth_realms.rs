use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{entities::auth_realms, state::DatabaseClient};

/// Storage for auth realms. Every lookup hides soft-deleted rows unless its
/// name says otherwise.
#[async_trait]
pub trait AuthRealmsRepo: Send + Sync {
    async fn insert(
        &self,
        model: auth_realms::ActiveModel,
    ) -> Result<auth_realms::Model, sea_orm::DbErr>;
    async fn find_by_id(&self, id: i64) -> Result<Option<auth_realms::Model>, sea_orm::DbErr>;
    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<auth_realms::Model>, sea_orm::DbErr>;
    async fn list_by_account(
        &self,
        account: &str,
    ) -> Result<Vec<auth_realms::Model>, sea_orm::DbErr>;
    /// Saves the changed columns of an active realm. Fails with
    /// `RecordNotUpdated` once the realm has been soft-deleted.
    async fn update(
        &self,
        model: auth_realms::ActiveModel,
    ) -> Result<auth_realms::Model, sea_orm::DbErr>;
    async fn soft_delete(
        &self,
        model: auth_realms::Model,
    ) -> Result<auth_realms::Model, sea_orm::DbErr>;
}

pub struct SeaOrmAuthRealmsRepo {
    db: std::sync::Arc<dyn DatabaseClient>,
}

impl SeaOrmAuthRealmsRepo {
    pub fn new(db: std::sync::Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthRealmsRepo for SeaOrmAuthRealmsRepo {
    async fn insert(
        &self,
        model: auth_realms::ActiveModel,
    ) -> Result<auth_realms::Model, sea_orm::DbErr> {
        model.insert(self.db.conn()).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<auth_realms::Model>, sea_orm::DbErr> {
        auth_realms::Entity::find_by_id(id)
            .filter(auth_realms::Column::DeletedAt.is_null())
            .one(self.db.conn())
            .await
    }

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<auth_realms::Model>, sea_orm::DbErr> {
        auth_realms::Entity::find_by_id(id).one(self.db.conn()).await
    }

    async fn list_by_account(
        &self,
        account: &str,
    ) -> Result<Vec<auth_realms::Model>, sea_orm::DbErr> {
        auth_realms::Entity::find()
            .filter(auth_realms::Column::Account.eq(account))
            .filter(auth_realms::Column::DeletedAt.is_null())
            .order_by_asc(auth_realms::Column::Id)
            .all(self.db.conn())
            .await
    }

    async fn update(
        &self,
        model: auth_realms::ActiveModel,
    ) -> Result<auth_realms::Model, sea_orm::DbErr> {
        auth_realms::Entity::update(model)
            .filter(auth_realms::Column::DeletedAt.is_null())
            .exec(self.db.conn())
            .await
    }

    async fn soft_delete(
        &self,
        model: auth_realms::Model,
    ) -> Result<auth_realms::Model, sea_orm::DbErr> {
        let mut active: auth_realms::ActiveModel = model.into();
        active.deleted_at = sea_orm::Set(Some(chrono::Utc::now().into()));
        active.update(self.db.conn()).await
    }
}
