use crate::database::DbError;
use crate::database::expense::{Expense, ExpenseWithAuthor};
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

pub struct ExpenseStore;

impl ExpenseStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        user_id: i32,
        amount: Decimal,
        purpose: &str,
    ) -> Result<Expense, DbError> {
        Ok(sqlx::query_as::<_, Expense>(
            r"
            INSERT INTO expense (trip_id, user_id, amount, purpose)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(amount)
        .bind(purpose)
        .fetch_one(executor)
        .await?)
    }

    /// Finds an expense, scoped to the trip it must belong to.
    pub async fn find_in_trip(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        expense_id: i32,
    ) -> Result<Option<Expense>, DbError> {
        Ok(
            sqlx::query_as::<_, Expense>("SELECT * FROM expense WHERE id = $1 AND trip_id = $2")
                .bind(expense_id)
                .bind(trip_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Expenses of a trip with their authors, newest first.
    pub async fn list_with_authors(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
    ) -> Result<Vec<ExpenseWithAuthor>, DbError> {
        Ok(sqlx::query_as::<_, ExpenseWithAuthor>(
            r"
            SELECT e.*, u.email AS author_email, u.name AS author_name
            FROM expense e
            JOIN app_user u ON u.id = e.user_id
            WHERE e.trip_id = $1
            ORDER BY e.created_at DESC, e.id DESC
            ",
        )
        .bind(trip_id)
        .fetch_all(executor)
        .await?)
    }

    /// Deletes the expense only if `user_id` authored it.
    pub async fn delete_by_author(
        executor: impl Executor<'_, Database = Postgres>,
        expense_id: i32,
        user_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM expense WHERE id = $1 AND user_id = $2")
            .bind(expense_id)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
