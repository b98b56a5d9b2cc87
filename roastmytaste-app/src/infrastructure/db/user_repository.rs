use super::entities::{user, User};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(self.db.as_ref()).await
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::GoogleId.eq(google_id))
            .one(self.db.as_ref())
            .await
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<user::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        User::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await
    }

    /// Login upsert keyed by the identity provider's stable subject id.
    pub async fn upsert(&self, user_data: &crate::domain::User) -> Result<user::Model, DbErr> {
        if let Some(existing) = self.find_by_google_id(&user_data.google_id).await? {
            let mut active: user::ActiveModel = existing.into();
            active.email = Set(user_data.email.clone());
            active.name = Set(user_data.name.clone());
            active.avatar_url = Set(user_data.avatar_url.clone());
            active.updated_at = Set(Some(chrono::Utc::now()));
            active.update(self.db.as_ref()).await
        } else {
            let active = user::ActiveModel {
                id: Set(user_data.id),
                google_id: Set(user_data.google_id.clone()),
                email: Set(user_data.email.clone()),
                name: Set(user_data.name.clone()),
                avatar_url: Set(user_data.avatar_url.clone()),
                created_at: Set(Some(chrono::Utc::now())),
                updated_at: Set(Some(chrono::Utc::now())),
            };
            active.insert(self.db.as_ref()).await
        }
    }
}
