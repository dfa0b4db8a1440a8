use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use crate::integration::common::{body_json, json_request, setup_test_app};

fn registration() -> serde_json::Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "userName": "jane",
        "password": "Password1000",
        "email": "jane@example.com",
        "phoneNumber": "589-654-254",
        "roles": ["Manager"]
    })
}

#[tokio::test]
async fn register_then_login_returns_usable_token() {
    let app = setup_test_app().await;

    let response = app
        .send(json_request("POST", "/api/authentication", None, registration()))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .send(json_request(
            "POST",
            "/api/authentication/login",
            None,
            json!({ "userName": "jane", "password": "Password1000" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["expiresIn"], 300);
    let token = body["token"].as_str().unwrap();

    let claims = app.auth.validate(token).unwrap();
    assert_eq!(claims.sub, "jane");
    assert_eq!(claims.roles, vec!["Manager".to_string()]);

    let response = app
        .send(
            Request::builder()
                .uri("/api/companies")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_user_name_conflicts() {
    let app = setup_test_app().await;

    let first = app
        .send(json_request("POST", "/api/authentication", None, registration()))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .send(json_request("POST", "/api/authentication", None, registration()))
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_role_is_unprocessable() {
    let app = setup_test_app().await;
    let mut body = registration();
    body["roles"] = json!(["Overlord"]);

    let response = app
        .send(json_request("POST", "/api/authentication", None, body))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = setup_test_app().await;
    app.send(json_request("POST", "/api/authentication", None, registration()))
        .await;

    for credentials in [
        json!({ "userName": "jane", "password": "not-it" }),
        json!({ "userName": "nobody", "password": "Password1000" }),
    ] {
        let response = app
            .send(json_request("POST", "/api/authentication/login", None, credentials))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Unauthorized: Wrong user name or password");
    }
}
