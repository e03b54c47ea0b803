use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let is_unique_violation = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if is_unique_violation {
            Self::UniqueViolation(err)
        } else {
            Self::Sqlx(err)
        }
    }
}
