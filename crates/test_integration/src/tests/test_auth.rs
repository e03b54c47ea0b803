use crate::runner::context::test_context::TestContext;
use crate::test_constants::{ALICE, TestUser};
use crate::test_helpers::{login, redirect_target, register, sign_in};
use color_eyre::Result;
use common_services::api::auth::interfaces::CreateUser;
use common_services::database::app_user::User;
use common_services::database::user_store::UserStore;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

pub async fn test_register(context: &TestContext) -> Result<()> {
    // ARRANGE
    let client = TestContext::client()?;

    // ACT
    let response = register(context, &client, &ALICE).await?;

    // ASSERT
    assert_eq!(redirect_target(&response).as_deref(), Some("/login"));
    let stored = UserStore::find_by_email_with_password(&context.pool, ALICE.email)
        .await?
        .expect("registered user is stored");
    assert_eq!(stored.name.as_deref(), Some(ALICE.name));
    assert_ne!(stored.password_hash, ALICE.password);
    assert!(stored.password_hash.starts_with("$argon2"));

    Ok(())
}

pub async fn test_second_register_attempt(context: &TestContext) -> Result<()> {
    // ARRANGE
    let client = TestContext::client()?;
    register(context, &client, &ALICE).await?;

    // ACT
    let response = register(context, &client, &ALICE).await?;
    let status = response.status();
    let body: Value = response.json().await?;

    // ASSERT
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A user with this email already exists");

    Ok(())
}

pub async fn test_register_rejects_invalid_email(context: &TestContext) -> Result<()> {
    // ACT
    let response = TestContext::client()?
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            email: "not-an-email".to_owned(),
            password: "pw".to_owned(),
            name: None,
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        UserStore::find_by_email_with_password(&context.pool, "not-an-email")
            .await?
            .is_none()
    );

    Ok(())
}

pub async fn test_login(context: &TestContext) -> Result<()> {
    // ARRANGE
    let client = TestContext::client()?;
    register(context, &client, &ALICE).await?;

    // ACT
    let response = login(context, &client, &ALICE).await?;
    let session_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "access_token")
        .map(|cookie| (cookie.http_only(), cookie.path().map(ToOwned::to_owned)));
    let target = redirect_target(&response);
    let me: User = client
        .get(context.url("/auth/me"))
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(target.as_deref(), Some("/dashboard"));
    assert_eq!(session_cookie, Some((true, Some("/".to_owned()))));
    assert_eq!(me.email, ALICE.email);
    assert_eq!(me.name.as_deref(), Some(ALICE.name));

    Ok(())
}

pub async fn test_login_with_wrong_password(context: &TestContext) -> Result<()> {
    // ARRANGE
    let client = TestContext::client()?;
    register(context, &client, &ALICE).await?;
    let wrong = TestUser {
        password: "not-the-password",
        ..ALICE
    };

    // ACT
    let response = login(context, &client, &wrong).await?;
    let status = response.status();
    let body: Value = response.json().await?;
    let dashboard = client.get(context.url("/dashboard")).send().await?;

    // ASSERT
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
    assert_eq!(redirect_target(&dashboard).as_deref(), Some("/login"));

    Ok(())
}

pub async fn test_anonymous_requests_go_to_login(context: &TestContext) -> Result<()> {
    // ARRANGE
    let client = TestContext::client()?;

    // ACT
    let dashboard = client.get(context.url("/dashboard")).send().await?;
    let trip = client.get(context.url("/trip/1")).send().await?;
    let forged = client
        .get(context.url("/auth/me"))
        .header(AUTHORIZATION, "Bearer not.a.token")
        .send()
        .await?;

    // ASSERT
    assert_eq!(redirect_target(&dashboard).as_deref(), Some("/login"));
    assert_eq!(redirect_target(&trip).as_deref(), Some("/login"));
    assert_eq!(redirect_target(&forged).as_deref(), Some("/login"));

    Ok(())
}

pub async fn test_bearer_token(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = sign_in(context, &ALICE).await?;
    let response = login(context, &session.client, &ALICE).await?;
    let token = response
        .cookies()
        .find(|cookie| cookie.name() == "access_token")
        .map(|cookie| cookie.value().to_owned())
        .expect("login sets the session cookie");

    // ACT
    let me: User = TestContext::client()?
        .get(context.url("/auth/me"))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;

    // ASSERT
    assert_eq!(me.id, session.user.id);

    Ok(())
}

pub async fn test_logout(context: &TestContext) -> Result<()> {
    // ARRANGE
    let session = sign_in(context, &ALICE).await?;

    // ACT
    let response = session
        .client
        .post(context.url("/auth/logout"))
        .send()
        .await?;
    let after = session.client.get(context.url("/dashboard")).send().await?;

    // ASSERT
    assert_eq!(redirect_target(&response).as_deref(), Some("/login"));
    assert_eq!(redirect_target(&after).as_deref(), Some("/login"));

    Ok(())
}
