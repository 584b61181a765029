use async_trait::async_trait;
use sea_orm::{ActiveValue, DbErr};
use std::sync::Mutex;

use crate::{entities::auth_realms, repo::auth_realms::AuthRealmsRepo};

/// In-process stand-in for the Postgres table, including the partial unique
/// index on (account, name).
#[derive(Default)]
pub struct InMemoryAuthRealmsRepo {
    rows: Mutex<Vec<auth_realms::Model>>,
    failure: Mutex<Option<(&'static str, String)>>,
}

impl InMemoryAuthRealmsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call of `operation` (a repo method name) fail
    /// with the given driver message. Other operations keep working.
    pub fn fail_on(&self, operation: &'static str, message: &str) {
        *self.failure.lock().unwrap() = Some((operation, message.to_string()));
    }

    pub fn rows(&self) -> Vec<auth_realms::Model> {
        self.rows.lock().unwrap().clone()
    }

    fn check_failure(&self, operation: &str) -> Result<(), DbErr> {
        match self.failure.lock().unwrap().as_ref() {
            Some((failing, message)) if *failing == operation => {
                Err(DbErr::Custom(message.clone()))
            }
            _ => Ok(()),
        }
    }

    fn check_unique(
        rows: &[auth_realms::Model],
        id: Option<i64>,
        account: &str,
        name: &str,
    ) -> Result<(), DbErr> {
        let taken = rows.iter().any(|row| {
            row.deleted_at.is_none()
                && Some(row.id) != id
                && row.account == account
                && row.name == name
        });
        if taken {
            return Err(DbErr::Custom(
                "duplicate key value violates unique constraint \"auth_realms_account_name_unique\""
                    .to_string(),
            ));
        }
        Ok(())
    }
}

fn take<V>(value: &mut ActiveValue<V>, column: &str) -> Result<V, DbErr>
where
    V: Into<sea_orm::Value>,
{
    value
        .take()
        .ok_or_else(|| DbErr::Custom(format!("null value in column \"{}\"", column)))
}

#[async_trait]
impl AuthRealmsRepo for InMemoryAuthRealmsRepo {
    async fn insert(
        &self,
        mut model: auth_realms::ActiveModel,
    ) -> Result<auth_realms::Model, DbErr> {
        self.check_failure("insert")?;
        let account = take(&mut model.account, "account")?;
        let name = take(&mut model.name, "name")?;
        let custom_resource = take(&mut model.custom_resource, "custom_resource")?;

        let mut rows = self.rows.lock().unwrap();
        Self::check_unique(&rows, None, &account, &name)?;

        let now: sea_orm::entity::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let row = auth_realms::Model {
            id,
            account,
            name,
            custom_resource,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<auth_realms::Model>, DbErr> {
        self.check_failure("find_by_id")?;
        Ok(self
            .find_by_id_including_deleted(id)
            .await?
            .filter(|row| row.deleted_at.is_none()))
    }

    async fn find_by_id_including_deleted(
        &self,
        id: i64,
    ) -> Result<Option<auth_realms::Model>, DbErr> {
        self.check_failure("find_by_id_including_deleted")?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_by_account(&self, account: &str) -> Result<Vec<auth_realms::Model>, DbErr> {
        self.check_failure("list_by_account")?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|row| row.account == account && row.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn update(&self, model: auth_realms::ActiveModel) -> Result<auth_realms::Model, DbErr> {
        self.check_failure("update")?;
        self.save(model)
    }

    async fn soft_delete(&self, model: auth_realms::Model) -> Result<auth_realms::Model, DbErr> {
        self.check_failure("soft_delete")?;
        let mut active: auth_realms::ActiveModel = model.into();
        active.deleted_at = sea_orm::Set(Some(chrono::Utc::now().into()));
        self.save(active)
    }
}

impl InMemoryAuthRealmsRepo {
    /// Writes only to rows that are not soft-deleted, like the guarded
    /// UPDATE of the Postgres repo.
    fn save(&self, mut model: auth_realms::ActiveModel) -> Result<auth_realms::Model, DbErr> {
        let id = take(&mut model.id, "id")?;
        let mut rows = self.rows.lock().unwrap();
        let Some(index) = rows
            .iter()
            .position(|row| row.id == id && row.deleted_at.is_none())
        else {
            return Err(DbErr::RecordNotUpdated);
        };

        let mut row = rows[index].clone();
        if let Some(account) = model.account.take() {
            row.account = account;
        }
        if let Some(name) = model.name.take() {
            row.name = name;
        }
        if let Some(custom_resource) = model.custom_resource.take() {
            row.custom_resource = custom_resource;
        }
        if let Some(created_at) = model.created_at.take() {
            row.created_at = created_at;
        }
        if let Some(deleted_at) = model.deleted_at.take() {
            row.deleted_at = deleted_at;
        }
        if row.deleted_at.is_none() {
            Self::check_unique(&rows, Some(row.id), &row.account, &row.name)?;
        }
        row.updated_at = chrono::Utc::now().into();

        rows[index] = row.clone();
        Ok(row)
    }
}
