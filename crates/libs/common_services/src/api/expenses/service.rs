use crate::api::access::gate::{SafeView, authorize, ensure, ensure_member, resolve_access};
use crate::api::access::policy::TripAction;
use crate::api::expenses::interfaces::CreateExpenseRequest;
use crate::api::non_blank;
use crate::api::trips::error::TripError;
use crate::database::expense::Expense;
use crate::database::expense_store::ExpenseStore;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

/// Largest amount a `NUMERIC(12, 2)` column holds.
const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Rounds to cents and checks the amount is positive and storable.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, TripError> {
    let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if amount <= Decimal::ZERO {
        return Err(TripError::Validation(
            "Amount must be greater than zero".to_owned(),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(TripError::Validation("Amount is too large".to_owned()));
    }
    Ok(amount)
}

/// Records an expense paid by the caller. Any member may add one.
#[instrument(skip(pool, payload), err(Debug))]
pub async fn add_expense(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
    payload: &CreateExpenseRequest,
) -> Result<Expense, TripError> {
    authorize(
        pool,
        trip_id,
        user_id,
        TripAction::CreateExpense,
        SafeView::Trip(trip_id),
    )
    .await?;

    payload.validate()?;
    let purpose = non_blank(&payload.purpose)
        .ok_or_else(|| TripError::Validation("Purpose is required".to_owned()))?;
    let amount = validate_amount(payload.amount)?;

    Ok(ExpenseStore::create(pool, trip_id, user_id, amount, purpose).await?)
}

/// Deletes an expense. Only the member who added it may do so.
#[instrument(skip(pool), err(Debug))]
pub async fn delete_expense(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
    expense_id: i32,
) -> Result<(), TripError> {
    let denied_view = SafeView::Trip(trip_id);
    let access = resolve_access(pool, trip_id, user_id).await?;
    ensure_member(access, denied_view)?;

    let expense = ExpenseStore::find_in_trip(pool, trip_id, expense_id)
        .await?
        .ok_or(TripError::Denied(denied_view))?;
    ensure(
        access,
        user_id,
        TripAction::DeleteExpense {
            author_id: expense.user_id,
        },
        denied_view,
    )?;

    if !ExpenseStore::delete_by_author(pool, expense.id, user_id).await? {
        return Err(TripError::Denied(denied_view));
    }
    info!("Expense {} removed from trip {}", expense.id, trip_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("valid decimal")
    }

    #[test]
    fn amounts_are_rounded_to_cents() {
        assert_eq!(validate_amount(dec("12.345")).ok(), Some(dec("12.35")));
        assert_eq!(validate_amount(dec("1500")).ok(), Some(dec("1500")));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(matches!(
            validate_amount(Decimal::ZERO),
            Err(TripError::Validation(_))
        ));
        assert!(matches!(
            validate_amount(dec("-10")),
            Err(TripError::Validation(_))
        ));
        assert!(matches!(
            validate_amount(dec("0.001")),
            Err(TripError::Validation(_))
        ));
    }

    #[test]
    fn amounts_must_fit_the_column() {
        assert_eq!(MAX_AMOUNT, dec("9999999999.99"));
        assert!(validate_amount(dec("9999999999.99")).is_ok());
        assert!(validate_amount(dec("10000000000")).is_err());
    }
}
