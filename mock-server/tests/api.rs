use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Envelope, MockConfig};
use tower::ServiceExt;

async fn body_envelope(response: axum::response::Response) -> Envelope {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    authed(Request::builder().method(method).uri(uri))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    authed(Request::builder().uri(uri))
        .body(String::new())
        .unwrap()
}

/// Headers matching the default `MockConfig` after a successful login.
fn authed(builder: http::request::Builder) -> http::request::Builder {
    builder
        .header("ApiKey", "test-key")
        .header("Authorization", "Bearer access-token")
        .header("tenantId", "tenant-1")
        .header("lang", "tr-TR")
}

fn login_request(api_key: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/user/integrationLogin")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("ApiKey", api_key)
        .body(body.to_string())
        .unwrap()
}

// --- login ---

#[tokio::test]
async fn login_with_password_grants_token() {
    let resp = app()
        .oneshot(login_request(
            "test-key",
            r#"{"username":"user@example.com","password":"secret"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope = body_envelope(resp).await;
    assert!(!envelope.is_error);
    assert_eq!(envelope.data["accessToken"], "access-token");
    assert_eq!(envelope.data["tenantId"], "tenant-1");
    assert!(envelope.data["baseUrl"].is_null());
}

#[tokio::test]
async fn login_with_integration_token() {
    let resp = app()
        .oneshot(login_request("test-key", r#"{"accessToken":"integration-token"}"#))
        .await
        .unwrap();

    let envelope = body_envelope(resp).await;
    assert!(!envelope.is_error);
    assert_eq!(envelope.data["accessToken"], "access-token");
}

#[tokio::test]
async fn login_returns_configured_base_url() {
    let config = MockConfig {
        base_url: "http://tenant.example.com".to_string(),
        ..MockConfig::default()
    };
    let resp = app_with(config)
        .oneshot(login_request("test-key", r#"{"accessToken":"integration-token"}"#))
        .await
        .unwrap();

    let envelope = body_envelope(resp).await;
    assert_eq!(envelope.data["baseUrl"], "http://tenant.example.com");
}

#[tokio::test]
async fn login_with_wrong_password_is_flagged() {
    let resp = app()
        .oneshot(login_request(
            "test-key",
            r#"{"username":"user@example.com","password":"nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let envelope = body_envelope(resp).await;
    assert!(envelope.is_error);
    assert_eq!(envelope.message, "bad credentials");
}

#[tokio::test]
async fn login_with_wrong_api_key_is_flagged() {
    let resp = app()
        .oneshot(login_request(
            "other-key",
            r#"{"username":"user@example.com","password":"secret"}"#,
        ))
        .await
        .unwrap();

    let envelope = body_envelope(resp).await;
    assert!(envelope.is_error);
    assert_eq!(envelope.message, "invalid api key");
}

// --- auth guard ---

#[tokio::test]
async fn resource_without_bearer_is_unauthorized() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/products/42/1")
                .header("ApiKey", "test-key")
                .header("tenantId", "tenant-1")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let envelope = body_envelope(resp).await;
    assert!(envelope.is_error);
    assert_eq!(envelope.code, 401);
}

// --- products ---

#[tokio::test]
async fn seeded_product_is_found() {
    let resp = app().oneshot(get_request("/products/42/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope = body_envelope(resp).await;
    assert_eq!(envelope.data["name"], "Consulting");
    assert_eq!(envelope.data["type"], 1);
}

#[tokio::test]
async fn product_with_other_type_is_not_found() {
    let resp = app().oneshot(get_request("/products/42/2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let envelope = body_envelope(resp).await;
    assert!(envelope.is_error);
    assert_eq!(envelope.message, "product not found");
}

// --- firms ---

#[tokio::test]
async fn firm_without_name_is_rejected() {
    let resp = app()
        .oneshot(json_request("PUT", "/firms", r#"{"city":"Ankara"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let envelope = body_envelope(resp).await;
    assert!(envelope.is_error);
    assert_eq!(envelope.message, "firm name is required");
}

#[tokio::test]
async fn get_firm_not_found() {
    let resp = app().oneshot(get_request("/firms/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let envelope = body_envelope(resp).await;
    assert_eq!(envelope.message, "firm not found");
}

// --- invoices ---

#[tokio::test]
async fn invoice_for_unknown_customer_is_rejected() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/invoices/integrationInvoices",
            r#"{"customerId":77,"total":10.0}"#,
        ))
        .await
        .unwrap();

    let envelope = body_envelope(resp).await;
    assert!(envelope.is_error);
    assert_eq!(envelope.message, "unknown customer");
}

// --- full lifecycle ---

#[tokio::test]
async fn firm_and_invoice_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create firm
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/firms", r#"{"name":"Acme","city":"Izmir"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_envelope(resp).await;
    let id = created.data["id"].as_i64().unwrap();
    assert_eq!(created.data["name"], "Acme");

    // upsert same id — keeps the id, replaces the record
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/firms",
            &format!(r#"{{"id":{id},"name":"Acme Ltd"}}"#),
        ))
        .await
        .unwrap();
    let updated = body_envelope(resp).await;
    assert_eq!(updated.data["id"], id);
    assert_eq!(updated.data["name"], "Acme Ltd");

    // get firm
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/firms/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_envelope(resp).await;
    assert_eq!(fetched.data["name"], "Acme Ltd");
    assert!(fetched.data.get("city").is_none());

    // invoice for that firm
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/invoices/integrationInvoices",
            &format!(r#"{{"customerId":{id},"total":118.0}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let invoice = body_envelope(resp).await;
    assert!(!invoice.is_error);
    assert!(invoice.data["id"].as_i64().unwrap() > id);
    assert!(invoice.data["number"].as_str().unwrap().starts_with("INV-"));
}
