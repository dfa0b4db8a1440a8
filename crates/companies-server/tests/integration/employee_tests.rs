use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;

use crate::integration::common::{
    SEEDED_COMPANY_ID, TestApp, body_json, json_request, setup_test_app,
};

/// "Sam Raiden" from the seed migration.
const SEEDED_EMPLOYEE_ID: &str = "80abbca8-664d-4b20-b5de-024705497d4a";

fn employee_uri(id: &str) -> String {
    format!("/api/companies/{SEEDED_COMPANY_ID}/employees/{id}")
}

fn request(app: &TestApp, method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, app.bearer())
        .body(Body::empty())
        .unwrap()
}

fn merge_patch(app: &TestApp, uri: &str, patch: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(header::AUTHORIZATION, app.bearer())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(patch.to_string()))
        .unwrap()
}

#[tokio::test]
async fn list_employees_of_seeded_company() {
    let app = setup_test_app().await;

    let response = app
        .send(request(
            &app,
            Method::GET,
            &format!("/api/companies/{SEEDED_COMPANY_ID}/employees"),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn employees_of_unknown_company_return_404() {
    let app = setup_test_app().await;

    let response = app
        .send(request(
            &app,
            Method::GET,
            "/api/companies/00000000-0000-0000-0000-000000000001/employees",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn employee_of_other_company_returns_404() {
    let app = setup_test_app().await;

    // Kane Miller works for Admin_Solutions Ltd.
    let response = app
        .send(request(
            &app,
            Method::GET,
            &employee_uri("021ca3c1-0deb-4afd-ae94-2159a8479811"),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_and_get_employee() {
    let app = setup_test_app().await;
    let bearer = app.bearer();

    let response = app
        .send(json_request(
            "POST",
            &format!("/api/companies/{SEEDED_COMPANY_ID}/employees"),
            Some(&bearer),
            json!({ "name": "Mihael Worth", "age": 30, "position": "Marketing expert" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created = body_json(response).await;
    assert_eq!(created["age"], 30);

    let fetched = body_json(app.send(request(&app, Method::GET, &location)).await).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_employee_replaces_fields() {
    let app = setup_test_app().await;
    let bearer = app.bearer();
    let uri = employee_uri(SEEDED_EMPLOYEE_ID);

    let response = app
        .send(json_request(
            "PUT",
            &uri,
            Some(&bearer),
            json!({ "name": "Sam Raiden", "age": 27, "position": "Team lead" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = body_json(app.send(request(&app, Method::GET, &uri)).await).await;
    assert_eq!(fetched["age"], 27);
    assert_eq!(fetched["position"], "Team lead");
}

#[tokio::test]
async fn patch_employee_keeps_omitted_fields() {
    let app = setup_test_app().await;
    let uri = employee_uri(SEEDED_EMPLOYEE_ID);

    let response = app.send(merge_patch(&app, &uri, json!({ "age": 28 }))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = body_json(app.send(request(&app, Method::GET, &uri)).await).await;
    assert_eq!(fetched["age"], 28);
    assert_eq!(fetched["name"], "Sam Raiden");
    assert_eq!(fetched["position"], "Software developer");
}

#[tokio::test]
async fn patch_producing_invalid_employee_is_unprocessable() {
    let app = setup_test_app().await;
    let uri = employee_uri(SEEDED_EMPLOYEE_ID);

    let response = app.send(merge_patch(&app, &uri, json!({ "age": 12 }))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.send(merge_patch(&app, &uri, json!({ "age": null }))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let fetched = body_json(app.send(request(&app, Method::GET, &uri)).await).await;
    assert_eq!(fetched["age"], 26);
}

#[tokio::test]
async fn patch_with_non_object_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .send(merge_patch(&app, &employee_uri(SEEDED_EMPLOYEE_ID), json!([1, 2])))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_employee() {
    let app = setup_test_app().await;
    let uri = employee_uri(SEEDED_EMPLOYEE_ID);

    let response = app.send(request(&app, Method::DELETE, &uri)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.send(request(&app, Method::GET, &uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(request(&app, Method::DELETE, &uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
