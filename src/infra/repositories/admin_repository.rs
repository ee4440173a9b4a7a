//! Admin user repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::admin_user::{self, ActiveModel, Entity as AdminUserEntity};
use crate::domain::AdminUser;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<AdminUser>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<AdminUser>>;

    /// Insert a new account; a taken username surfaces as `Conflict`.
    async fn create(&self, username: String, password_hash: String, role: String)
        -> AppResult<AdminUser>;
}

pub struct AdminStore {
    db: DatabaseConnection,
}

impl AdminStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for AdminStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<AdminUser>> {
        let result = AdminUserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(AdminUser::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<AdminUser>> {
        let result = AdminUserEntity::find()
            .filter(admin_user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(AdminUser::from))
    }

    async fn create(
        &self,
        username: String,
        password_hash: String,
        role: String,
    ) -> AppResult<AdminUser> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            username: Set(username),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::conflict("Username"),
            other => other,
        })?;
        Ok(AdminUser::from(model))
    }
}
