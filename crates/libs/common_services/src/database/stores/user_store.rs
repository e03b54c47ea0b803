use crate::database::DbError;
use crate::database::app_user::{User, UserWithPassword};
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    /// Inserts a new user. A duplicate email surfaces as `DbError::UniqueViolation`.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, created_at
            ",
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at FROM app_user WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            r"
            SELECT id, email, name, created_at, password_hash
            FROM app_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(executor)
        .await?)
    }
}
