mod common;

use axum::http::StatusCode;
use common::*;
use pulse_hub::auth::AuthKeys;
use serde_json::json;

#[tokio::test]
async fn profile_requires_valid_token() {
    let app = test_app().await;
    register(&app, "alice", true).await;

    let (status, _) = request(&app, "GET", "/api/me/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "GET", "/api/me/profile", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Signed with the wrong secret.
    let forged = AuthKeys::new("some-other-secret", 24)
        .issue("alice", 0)
        .unwrap();
    let (status, _) = request(&app, "GET", "/api/me/profile", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Expired.
    let expired = AuthKeys::new(TEST_SECRET, -2).issue("alice", 0).unwrap();
    let (status, _) = request(&app, "GET", "/api/me/profile", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Valid token for a login that no longer exists.
    let orphan = AuthKeys::new(TEST_SECRET, 24).issue("ghost", 0).unwrap();
    let (status, _) = request(&app, "GET", "/api/me/profile", Some(&orphan), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn quoted_token_still_works() {
    let app = test_app().await;
    let token = register_and_sign_in(&app, "alice", true).await;

    let quoted = format!("\"{token}\"");
    let (status, body) = request(&app, "GET", "/api/me/profile", Some(&quoted), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], json!("alice"));
}

#[tokio::test]
async fn patch_updates_only_provided_fields() {
    let app = test_app().await;
    let mut body = register_body("alice", true);
    body["phone"] = json!("+79991234567");
    body["image"] = json!("http://example.com/a.png");
    let (status, _) = request(&app, "POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let token = sign_in(&app, "alice", PASSWORD).await;

    let (status, body) = request(
        &app,
        "PATCH",
        "/api/me/profile",
        Some(&token),
        Some(json!({ "phone": "+70000000001", "isPublic": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], json!("+70000000001"));
    assert_eq!(body["isPublic"], json!(false));
    assert_eq!(body["image"], json!("http://example.com/a.png"));
    assert_eq!(body["countryCode"], json!("RU"));

    // The change persists.
    let (_, body) = request(&app, "GET", "/api/me/profile", Some(&token), None).await;
    assert_eq!(body["phone"], json!("+70000000001"));
    assert_eq!(body["isPublic"], json!(false));
}

#[tokio::test]
async fn patch_with_empty_body_changes_nothing() {
    let app = test_app().await;
    let token = register_and_sign_in(&app, "alice", true).await;

    let (status, body) = request(&app, "PATCH", "/api/me/profile", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], json!("alice"));
    assert_eq!(body["isPublic"], json!(true));
}

#[tokio::test]
async fn patch_validates_fields() {
    let app = test_app().await;
    let token = register_and_sign_in(&app, "alice", true).await;

    let (status, _) = request(
        &app,
        "PATCH",
        "/api/me/profile",
        Some(&token),
        Some(json!({ "countryCode": "XX" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "PATCH",
        "/api/me/profile",
        Some(&token),
        Some(json!({ "phone": "not-a-phone" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "PATCH",
        "/api/me/profile",
        Some(&token),
        Some(json!({ "image": format!("http://{}", "x".repeat(200)) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_rejects_taken_phone() {
    let app = test_app().await;
    let mut body = register_body("alice", true);
    body["phone"] = json!("+79991234567");
    let (status, _) = request(&app, "POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let token = register_and_sign_in(&app, "bob", true).await;
    let (status, _) = request(
        &app,
        "PATCH",
        "/api/me/profile",
        Some(&token),
        Some(json!({ "phone": "+79991234567" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-submitting your own phone is not a conflict.
    let alice_token = sign_in(&app, "alice", PASSWORD).await;
    let (status, _) = request(
        &app,
        "PATCH",
        "/api/me/profile",
        Some(&alice_token),
        Some(json!({ "phone": "+79991234567" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn password_change_invalidates_old_tokens() {
    let app = test_app().await;
    let token = register_and_sign_in(&app, "alice", true).await;

    // The token works and the profile is what was submitted.
    let (status, body) = request(&app, "GET", "/api/me/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "login": "alice",
            "email": "alice@example.com",
            "countryCode": "RU",
            "isPublic": true,
        })
    );

    let (status, body) = request(
        &app,
        "POST",
        "/api/me/updatePassword",
        Some(&token),
        Some(json!({ "oldPassword": PASSWORD, "newPassword": "Fresh123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    // The pre-change token is dead.
    let (status, _) = request(&app, "GET", "/api/me/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The old password no longer signs in, the new one does.
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/sign-in",
        None,
        Some(json!({ "login": "alice", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let new_token = sign_in(&app, "alice", "Fresh123").await;
    let (status, _) = request(&app, "GET", "/api/me/profile", Some(&new_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn password_change_rejects_wrong_old_password() {
    let app = test_app().await;
    let token = register_and_sign_in(&app, "alice", true).await;

    // Wrong old password is 403 even when the new one is also bad.
    let (status, _) = request(
        &app,
        "POST",
        "/api/me/updatePassword",
        Some(&token),
        Some(json!({ "oldPassword": "Wrong123", "newPassword": "weak" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Right old password, weak new one: 400, and nothing changed.
    let (status, _) = request(
        &app,
        "POST",
        "/api/me/updatePassword",
        Some(&token),
        Some(json!({ "oldPassword": PASSWORD, "newPassword": "weak" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = request(&app, "GET", "/api/me/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn public_profiles_are_readable_private_are_not() {
    let app = test_app().await;
    register(&app, "pub-user", true).await;
    register(&app, "priv-user", false).await;
    let token = register_and_sign_in(&app, "viewer", true).await;

    let (status, body) = request(&app, "GET", "/api/profiles/pub-user", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], json!("pub-user"));

    let (status, _) = request(&app, "GET", "/api/profiles/priv-user", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A private user still sees their own profile through this route.
    let priv_token = sign_in(&app, "priv-user", PASSWORD).await;
    let (status, _) = request(
        &app,
        "GET",
        "/api/profiles/priv-user",
        Some(&priv_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_profile_looks_like_private() {
    let app = test_app().await;
    let token = register_and_sign_in(&app, "alice", true).await;

    let (status, body) = request(&app, "GET", "/api/profiles/nobody", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["reason"].is_string());
}

#[tokio::test]
async fn friendship_does_not_open_profiles() {
    let app = test_app().await;
    let alice = register_and_sign_in(&app, "alice", false).await;
    let bob = register_and_sign_in(&app, "bob", true).await;

    // Alice (private) adds bob; bob still cannot read her profile.
    add_friend(&app, &alice, "bob").await;
    let (status, _) = request(&app, "GET", "/api/profiles/alice", Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
