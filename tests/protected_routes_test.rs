mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;
use travel_optimizer_api::middleware::auth::issue_token;

#[actix_rt::test]
#[serial]
async fn test_protected_routes_require_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for uri in [
        "/api/auth/session",
        "/api/searches",
        "/api/itineraries",
        "/api/itineraries/65f1a2b3c4d5e6f708192a3b",
        "/api/itineraries/65f1a2b3c4d5e6f708192a3b/export",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "{} should require a token", uri);
    }

    let req = test::TestRequest::delete()
        .uri("/api/itineraries/65f1a2b3c4d5e6f708192a3b")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_invalid_token_rejected() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let forged = issue_token("someone-else", "asha@example.com", "65f1a2b3c4d5e6f708192a3b")
        .unwrap();
    for token in ["not-a-jwt", forged.as_str()] {
        let req = test::TestRequest::get()
            .uri("/api/itineraries")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid token");
    }
}

#[actix_rt::test]
#[serial]
async fn test_missing_header_message() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/searches").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No authorization header");
}

#[actix_rt::test]
#[serial]
async fn test_invalid_itinerary_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let auth = ("Authorization", format!("Bearer {}", test_app.token()));

    let req = test::TestRequest::get()
        .uri("/api/itineraries/not-an-id")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid ID: not-an-id");

    let req = test::TestRequest::get()
        .uri("/api/itineraries/not-an-id/export")
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::put()
        .uri("/api/itineraries/not-an-id/favorite")
        .insert_header(auth.clone())
        .set_json(&json!({ "isFavorite": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::delete()
        .uri("/api/itineraries/not-an-id")
        .insert_header(auth)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_favorite_requires_flag() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/itineraries/65f1a2b3c4d5e6f708192a3b/favorite")
        .insert_header(("Authorization", format!("Bearer {}", test_app.token())))
        .set_json(&json!({ "favorite": "yes" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_token_with_malformed_user_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = issue_token(common::JWT_SECRET, "asha@example.com", "legacy-id").unwrap();

    for uri in ["/api/itineraries", "/api/auth/session"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "{} should reject the token", uri);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid user id in token");
    }
}
