use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::entities::UserProfile;
use crate::domain::value_objects::UserId;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, avatar, reputation, is_banned, is_restricted, can_upload, is_trusted
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }

    async fn add_reputation(&self, id: &UserId, points: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET reputation = reputation + $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(points)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn top_by_reputation(&self, limit: i64) -> Result<Vec<UserProfile>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, avatar, reputation, is_banned, is_restricted, can_upload, is_trusted
            FROM users
            ORDER BY reputation DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_domain).collect()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: Option<String>,
    avatar: Option<String>,
    reputation: i64,
    is_banned: bool,
    is_restricted: bool,
    can_upload: bool,
    is_trusted: bool,
}

impl UserRow {
    fn into_domain(self) -> Result<UserProfile, RepositoryError> {
        let id = UserId::new(self.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(UserProfile {
            id,
            name: self.name,
            avatar: self.avatar,
            reputation: self.reputation,
            is_banned: self.is_banned,
            is_restricted: self.is_restricted,
            can_upload: self.can_upload,
            is_trusted: self.is_trusted,
        })
    }
}
