use crate::api::access::gate::{SafeView, authorize};
use crate::api::access::policy::TripAction;
use crate::api::export::error::ExportError;
use crate::api::export::pdf::ReportRenderer;
use crate::api::export::report::{build_trip_report, export_filename};
use crate::database::app_user::User;
use crate::database::expense_store::ExpenseStore;
use crate::database::membership_store::MembershipStore;
use crate::database::trip_store::TripStore;
use sqlx::PgPool;
use tracing::{info, instrument};

/// A rendered report, ready to be sent as an attachment.
pub struct ExportedReport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders the trip summary (information, members, budget) for a member of the trip.
#[instrument(skip(pool, renderer, user), fields(user_id = user.id), err(Debug))]
pub async fn export_trip_report(
    pool: &PgPool,
    renderer: &dyn ReportRenderer,
    user: &User,
    trip_id: i32,
) -> Result<ExportedReport, ExportError> {
    authorize(
        pool,
        trip_id,
        user.id,
        TripAction::Export,
        SafeView::Dashboard,
    )
    .await?;
    let trip = TripStore::find_by_id(pool, trip_id)
        .await?
        .ok_or(ExportError::Denied(SafeView::Dashboard))?;

    let (members, expenses) = tokio::try_join!(
        MembershipStore::list_members(pool, trip_id),
        ExpenseStore::list_with_authors(pool, trip_id),
    )?;

    let report = build_trip_report(&trip, &members, &expenses, user.display_name());
    let bytes = renderer.render(&report)?;
    info!("Exported trip {} ({} bytes)", trip.id, bytes.len());

    Ok(ExportedReport {
        filename: export_filename(&trip.name),
        content_type: renderer.content_type(),
        bytes,
    })
}
