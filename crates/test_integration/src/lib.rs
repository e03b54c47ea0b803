#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

#[cfg(test)]
pub mod runner;
#[cfg(test)]
pub mod test_constants;
#[cfg(test)]
pub mod test_helpers;
#[cfg(test)]
pub mod tests;

#[cfg(test)]
mod test_runner {
    use crate::execute_suite;
    use crate::runner::context::test_context::TestContext;
    use crate::runner::orchestration_utils::setup_tracing_and_panic_handling;
    use crate::tests::{
        test_auth, test_chat, test_expenses, test_export, test_gallery, test_itinerary,
        test_maps, test_root, test_trips,
    };
    use color_eyre::Result;
    use color_eyre::eyre::eyre;

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn integration_suite() -> Result<()> {
        setup_tracing_and_panic_handling();
        let context = TestContext::new().await?;

        let failed = execute_suite!(
            &context,
            [
                // -- Root --
                test_root::test_health_endpoint,
                // -- Auth --
                test_auth::test_register,
                test_auth::test_second_register_attempt,
                test_auth::test_register_rejects_invalid_email,
                test_auth::test_login,
                test_auth::test_login_with_wrong_password,
                test_auth::test_anonymous_requests_go_to_login,
                test_auth::test_bearer_token,
                test_auth::test_logout,
                // -- Trips --
                test_trips::test_trip_planning_flow,
                test_trips::test_join_is_idempotent,
                test_trips::test_join_with_invalid_code,
                test_trips::test_create_trip_rejects_inverted_dates,
                test_trips::test_dashboard_lists_own_trips,
                test_trips::test_outsider_is_sent_to_dashboard,
                test_trips::test_trip_details,
                test_trips::test_change_member_role,
                test_trips::test_leave_trip,
                // -- Itinerary --
                test_itinerary::test_itinerary_is_ordered_by_day_and_time,
                test_itinerary::test_member_cannot_add_itinerary,
                test_itinerary::test_itinerary_validation,
                // -- Expenses --
                test_expenses::test_expenses_are_totalled,
                test_expenses::test_expense_validation,
                test_expenses::test_only_author_deletes_expense,
                test_expenses::test_outsider_cannot_add_expense,
                // -- Chat --
                test_chat::test_chat_polling,
                test_chat::test_empty_message_is_rejected,
                test_chat::test_outsider_cannot_read_chat,
                // -- Gallery --
                test_gallery::test_gallery_upload_and_serve,
                test_gallery::test_gallery_rejects_bad_uploads,
                test_gallery::test_only_uploader_deletes_media,
                test_gallery::test_outsider_cannot_see_uploads,
                test_gallery::test_outsider_upload_is_denied_before_validation,
                // -- Export --
                test_export::test_export_trip_report,
                test_export::test_export_requires_membership,
                // -- Maps --
                test_maps::test_trip_map_with_route,
                test_maps::test_trip_map_destination_only,
            ]
        );

        context.teardown().await?;
        if failed.is_empty() {
            Ok(())
        } else {
            Err(eyre!("{} integration test(s) failed: {failed:?}", failed.len()))
        }
    }
}
