use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use crate::integration::common::{
    SEEDED_COMPANY_ID, TestApp, body_json, body_text, json_request, setup_test_app,
};

fn get(app: &TestApp, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, app.bearer())
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn list_companies_v1_returns_full_address() {
    let app = setup_test_app().await;

    let response = app.send(get(&app, "/api/companies")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["api-supported-versions"], "1.0, 2.0");
    let body = body_json(response).await;
    let companies = body.as_array().unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0]["name"], "Admin_Solutions Ltd");
    assert_eq!(companies[1]["fullAddress"], "583 Wall Dr. Gwynn Oak, MD 21207 USA");
}

#[tokio::test]
async fn list_companies_v2_returns_summaries() {
    let app = setup_test_app().await;
    let mut request = get(&app, "/api/companies");
    request
        .headers_mut()
        .insert("api-version", "2.0".parse().unwrap());

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let first = body[0].as_object().unwrap();
    assert_eq!(first.len(), 2);
    assert!(first.contains_key("id"));
    assert!(first.contains_key("name"));
}

#[tokio::test]
async fn list_companies_as_csv() {
    let app = setup_test_app().await;
    let mut request = get(&app, "/api/companies");
    request
        .headers_mut()
        .insert(header::ACCEPT, "text/csv".parse().unwrap());

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let text = body_text(response).await;
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,name,fullAddress"));
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn unknown_company_returns_404() {
    let app = setup_test_app().await;

    let response = app
        .send(get(&app, "/api/companies/00000000-0000-0000-0000-000000000001"))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn create_company_with_employees_and_fetch_it() {
    let app = setup_test_app().await;
    let bearer = app.bearer();

    let response = app
        .send(json_request(
            "POST",
            "/api/companies",
            Some(&bearer),
            json!({
                "name": "Electronics Solutions Ltd",
                "address": "312 Deviever Avenue, RS 234",
                "country": "USA",
                "employees": [
                    { "name": "Joan Dane", "age": 29, "position": "Manager" },
                    { "name": "Martin Geil", "age": 29, "position": "Administrative" }
                ]
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created = body_json(response).await;
    assert_eq!(created["fullAddress"], "312 Deviever Avenue, RS 234 USA");
    assert_eq!(location, format!("/api/companies/{}", created["id"].as_str().unwrap()));

    let fetched = body_json(app.send(get(&app, &location)).await).await;
    assert_eq!(fetched, created);

    let employees = body_json(app.send(get(&app, &format!("{location}/employees"))).await).await;
    assert_eq!(employees.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_and_get_company_collection() {
    let app = setup_test_app().await;
    let bearer = app.bearer();

    let response = app
        .send(json_request(
            "POST",
            "/api/companies/collection",
            Some(&bearer),
            json!([
                { "name": "First Ltd", "address": "1 First St", "country": "UK" },
                { "name": "Second Ltd", "address": "2 Second St", "country": "UK" }
            ]),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let fetched = body_json(app.send(get(&app, &location)).await).await;
    let names: Vec<&str> = fetched
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"First Ltd"));
    assert!(names.contains(&"Second Ltd"));
}

#[tokio::test]
async fn collection_with_unknown_id_returns_404() {
    let app = setup_test_app().await;
    let uri = format!(
        "/api/companies/collection/{SEEDED_COMPANY_ID},00000000-0000-0000-0000-000000000001"
    );

    let response = app.send(get(&app, &uri)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_collection_is_bad_request() {
    let app = setup_test_app().await;
    let bearer = app.bearer();

    let response = app
        .send(json_request("POST", "/api/companies/collection", Some(&bearer), json!([])))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_company_adds_employees() {
    let app = setup_test_app().await;
    let bearer = app.bearer();

    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/companies/{SEEDED_COMPANY_ID}"),
            Some(&bearer),
            json!({
                "name": "IT_Solutions Inc",
                "address": "583 Wall Dr. Gwynn Oak, MD 21207",
                "country": "USA",
                "employees": [{ "name": "Geil Metain", "age": 23, "position": "Administrative" }]
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let company = body_json(
        app.send(get(&app, &format!("/api/companies/{SEEDED_COMPANY_ID}")))
            .await,
    )
    .await;
    assert_eq!(company["name"], "IT_Solutions Inc");

    let employees = body_json(
        app.send(get(&app, &format!("/api/companies/{SEEDED_COMPANY_ID}/employees")))
            .await,
    )
    .await;
    assert_eq!(employees.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn delete_company_cascades_to_employees() {
    let app = setup_test_app().await;
    let uri = format!("/api/companies/{SEEDED_COMPANY_ID}");

    let mut request = get(&app, &uri);
    *request.method_mut() = axum::http::Method::DELETE;
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.send(get(&app, &uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(get(&app, "/api/companies/c9d4c053-49b6-410c-bc78-2d54a9991870/employees/80abbca8-664d-4b20-b5de-024705497d4a"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
