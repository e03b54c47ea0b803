use crate::runner::context::test_context::TestContext;
use crate::test_constants::TestUser;
use chrono::NaiveDate;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::interfaces::{CreateUser, LoginUser};
use common_services::api::trips::interfaces::{
    CreateTripRequest, JoinTripRequest, TripDetailsResponse,
};
use common_services::database::app_user::User;
use common_services::database::trip::Trip;
use reqwest::header::LOCATION;
use reqwest::{Client, Response, StatusCode};

/// A logged-in user and the cookie-carrying client that acts as their browser.
pub struct Session {
    pub client: Client,
    pub user: User,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// The `Location` of a 303 response, or `None` for anything else.
pub fn redirect_target(response: &Response) -> Option<String> {
    if response.status() != StatusCode::SEE_OTHER {
        return None;
    }
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

pub async fn register(context: &TestContext, client: &Client, user: &TestUser) -> Result<Response> {
    Ok(client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            email: user.email.to_owned(),
            password: user.password.to_owned(),
            name: Some(user.name.to_owned()),
        })
        .send()
        .await?)
}

pub async fn login(context: &TestContext, client: &Client, user: &TestUser) -> Result<Response> {
    Ok(client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: user.email.to_owned(),
            password: user.password.to_owned(),
        })
        .send()
        .await?)
}

/// Registers `user` unless they already exist, then logs them in on a new client.
pub async fn sign_in(context: &TestContext, user: &TestUser) -> Result<Session> {
    let client = TestContext::client()?;

    let registered = register(context, &client, user).await?;
    if !matches!(registered.status(), StatusCode::SEE_OTHER | StatusCode::CONFLICT) {
        return Err(eyre!("Registering {} failed: {}", user.email, registered.status()));
    }

    let logged_in = login(context, &client, user).await?;
    if redirect_target(&logged_in).as_deref() != Some("/dashboard") {
        return Err(eyre!("Logging in {} failed: {}", user.email, logged_in.status()));
    }

    let user = client
        .get(context.url("/auth/me"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(Session { client, user })
}

/// Creates a five day trip starting on 2025-01-01.
pub async fn create_trip(
    context: &TestContext,
    session: &Session,
    name: &str,
    destination: &str,
    start_location: Option<&str>,
) -> Result<Trip> {
    let response = session
        .client
        .post(context.url("/trip"))
        .json(&CreateTripRequest {
            name: name.to_owned(),
            destination: destination.to_owned(),
            start_date: date(2025, 1, 1),
            end_date: date(2025, 1, 5),
            start_location: start_location.map(ToOwned::to_owned),
        })
        .send()
        .await?;
    if response.status() != StatusCode::CREATED {
        return Err(eyre!("Creating trip failed: {}", response.status()));
    }
    Ok(response.json().await?)
}

pub async fn join_trip(context: &TestContext, session: &Session, join_code: &str) -> Result<Response> {
    Ok(session
        .client
        .post(context.url("/trip/join"))
        .json(&JoinTripRequest {
            join_code: join_code.to_owned(),
        })
        .send()
        .await?)
}

/// A trip with `owner` as organizer and `member` joined as a plain member.
pub async fn shared_trip(
    context: &TestContext,
    owner: &Session,
    member: &Session,
    name: &str,
) -> Result<Trip> {
    let trip = create_trip(context, owner, name, "Goa", None).await?;
    join_trip(context, member, &trip.join_code)
        .await?
        .error_for_status()?;
    Ok(trip)
}

pub async fn trip_details(
    context: &TestContext,
    session: &Session,
    trip_id: i32,
) -> Result<TripDetailsResponse> {
    Ok(session
        .client
        .get(context.url(&format!("/trip/{trip_id}")))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?)
}
