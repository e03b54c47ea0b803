use crate::runner::context::test_context::TestContext;
use crate::test_constants::{ALICE, BOB};
use crate::test_helpers::{Session, redirect_target, shared_trip, sign_in, trip_details};
use color_eyre::Result;
use common_services::api::itinerary::interfaces::CreateItineraryItemRequest;
use reqwest::{Response, StatusCode};

async fn add_item(
    context: &TestContext,
    session: &Session,
    trip_id: i32,
    day_number: i32,
    time: Option<&str>,
    activity: &str,
) -> Result<Response> {
    Ok(session
        .client
        .post(context.url(&format!("/trip/{trip_id}/itinerary")))
        .json(&CreateItineraryItemRequest {
            day_number,
            time: time.map(ToOwned::to_owned),
            activity: activity.to_owned(),
            location: Some("Baga".to_owned()),
            description: None,
        })
        .send()
        .await?)
}

pub async fn test_itinerary_is_ordered_by_day_and_time(context: &TestContext) -> Result<()> {
    // ARRANGE
    let alice = sign_in(context, &ALICE).await?;
    let bob = sign_in(context, &BOB).await?;
    let trip = shared_trip(context, &alice, &bob, "Ordering").await?;

    // ACT
    for (day, time, activity) in [
        (2, Some("18:00"), "Sunset cruise"),
        (1, Some("10:00"), "Beach"),
        (2, Some("09:00"), "Fort Aguada"),
        (1, None, "Check in"),
    ] {
        let response = add_item(context, &alice, trip.id, day, time, activity).await?;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let details = trip_details(context, &bob, trip.id).await?;

    // ASSERT
    let activities: Vec<&str> = details
        .itinerary
        .iter()
        .map(|item| item.activity.as_str())
        .collect();
    assert_eq!(
        activities,
        ["Check in", "Beach", "Fort Aguada", "Sunset cruise"]
    );

    Ok(())
}

pub async fn test_member_cannot_add_itinerary(context: &TestContext) -> Result<()> {
    // ARRANGE
    let alice = sign_in(context, &ALICE).await?;
    let bob = sign_in(context, &BOB).await?;
    let trip = shared_trip(context, &alice, &bob, "Members plan nothing").await?;

    // ACT
    let response = add_item(context, &bob, trip.id, 1, None, "Nap").await?;

    // ASSERT
    assert_eq!(
        redirect_target(&response),
        Some(format!("/trip/{}", trip.id))
    );
    assert!(trip_details(context, &alice, trip.id).await?.itinerary.is_empty());

    Ok(())
}

pub async fn test_itinerary_validation(context: &TestContext) -> Result<()> {
    // ARRANGE
    let alice = sign_in(context, &ALICE).await?;
    let bob = sign_in(context, &BOB).await?;
    let trip = shared_trip(context, &alice, &bob, "Validation").await?;

    // ACT
    let day_zero = add_item(context, &alice, trip.id, 0, None, "Nothing").await?;
    // Days after the trip's end date are allowed, e.g. for travel home.
    let past_the_end = add_item(context, &alice, trip.id, 6, None, "Flight home").await?;
    let blank = add_item(context, &alice, trip.id, 1, None, "   ").await?;

    // ASSERT
    assert_eq!(day_zero.status(), StatusCode::BAD_REQUEST);
    assert_eq!(past_the_end.status(), StatusCode::CREATED);
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    let itinerary = trip_details(context, &alice, trip.id).await?.itinerary;
    assert_eq!(itinerary.len(), 1);
    assert_eq!(itinerary[0].day_number, 6);
    assert_eq!(itinerary[0].activity, "Flight home");

    Ok(())
}
