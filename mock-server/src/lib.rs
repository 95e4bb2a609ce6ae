//! In-process stand-in for the Isbaşı API.
//!
//! Serves the login, firm, invoice and product endpoints with the same
//! `{code, message, isError, data}` envelope as the real service. Records are
//! kept as raw JSON objects so the server does not pin down a schema.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Accounts and routing the mock accepts.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub api_key: String,
    pub username: String,
    pub password: String,
    /// Pre-issued token accepted in place of username/password.
    pub integration_token: String,
    pub access_token: String,
    pub tenant_id: String,
    /// Base URL handed back on login; empty means no override.
    pub base_url: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_key: "test-key".to_string(),
            username: "user@example.com".to_string(),
            password: "secret".to_string(),
            integration_token: "integration-token".to_string(),
            access_token: "access-token".to_string(),
            tenant_id: "tenant-1".to_string(),
            base_url: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    pub is_error: bool,
    pub data: Value,
}

impl Envelope {
    fn ok(data: Value) -> (StatusCode, Json<Envelope>) {
        (
            StatusCode::OK,
            Json(Envelope {
                code: StatusCode::OK.as_u16(),
                message: "OK".to_string(),
                is_error: false,
                data,
            }),
        )
    }

    fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Envelope>) {
        (
            status,
            Json(Envelope {
                code: status.as_u16(),
                message: message.to_string(),
                is_error: true,
                data: Value::Null,
            }),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub access_token: String,
    pub tenant_id: String,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    firms: HashMap<i64, Value>,
    invoices: HashMap<i64, Value>,
    products: HashMap<(i64, i64), Value>,
}

impl Store {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Register a product for `GET /products/{id}/{type}`.
    pub fn add_product(&mut self, id: i64, kind: i64, product: Value) {
        self.products.insert((id, kind), product);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<MockConfig>,
    pub store: Arc<RwLock<Store>>,
}

type Reply = (StatusCode, Json<Envelope>);

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let mut store = Store::default();
    store.add_product(
        42,
        1,
        serde_json::json!({
            "id": 42,
            "code": "SRV-042",
            "name": "Consulting",
            "type": 1,
            "vatRate": 20.0,
            "isActive": true
        }),
    );
    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(RwLock::new(store)),
    };
    Router::new()
        .route("/user/integrationLogin", post(login))
        .route("/firms", put(upsert_firm))
        .route("/firms/{id}", get(get_firm))
        .route("/invoices/integrationInvoices", post(create_invoice))
        .route("/products/{id}/{kind}", get(get_product))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Reject calls that do not carry the API key, bearer token and tenant
/// granted at login.
fn authorize(config: &MockConfig, headers: &HeaderMap) -> Result<(), Reply> {
    let expected_bearer = format!("Bearer {}", config.access_token);
    if header(headers, "apikey") != config.api_key
        || header(headers, "authorization") != expected_bearer
        || header(headers, "tenantid") != config.tenant_id
    {
        tracing::debug!("rejecting unauthenticated request");
        return Err(Envelope::error(StatusCode::UNAUTHORIZED, "unauthorized"));
    }
    Ok(())
}

async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> Reply {
    let config = &state.config;
    if header(&headers, "apikey") != config.api_key {
        return Envelope::error(StatusCode::UNAUTHORIZED, "invalid api key");
    }
    let by_password = !input.username.is_empty()
        && input.username == config.username
        && input.password == config.password;
    let by_token = !input.access_token.is_empty() && input.access_token == config.integration_token;
    if !by_password && !by_token {
        return Envelope::error(StatusCode::UNAUTHORIZED, "bad credentials");
    }

    let mut data = Map::new();
    data.insert("accessToken".to_string(), Value::from(config.access_token.clone()));
    data.insert("tenantId".to_string(), Value::from(config.tenant_id.clone()));
    data.insert(
        "baseUrl".to_string(),
        if config.base_url.is_empty() {
            Value::Null
        } else {
            Value::from(config.base_url.clone())
        },
    );
    Envelope::ok(Value::Object(data))
}

async fn upsert_firm(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut firm): Json<Map<String, Value>>,
) -> Reply {
    if let Err(reply) = authorize(&state.config, &headers) {
        return reply;
    }
    if firm.get("name").and_then(Value::as_str).unwrap_or("").is_empty() {
        return Envelope::error(StatusCode::BAD_REQUEST, "firm name is required");
    }
    let mut store = state.store.write().await;
    let id = match firm.get("id").and_then(Value::as_i64) {
        Some(id) if store.firms.contains_key(&id) => id,
        _ => store.assign_id(),
    };
    firm.insert("id".to_string(), Value::from(id));
    let firm = Value::Object(firm);
    store.firms.insert(id, firm.clone());
    Envelope::ok(firm)
}

async fn get_firm(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    if let Err(reply) = authorize(&state.config, &headers) {
        return reply;
    }
    let store = state.store.read().await;
    match store.firms.get(&id) {
        Some(firm) => Envelope::ok(firm.clone()),
        None => Envelope::error(StatusCode::NOT_FOUND, "firm not found"),
    }
}

async fn create_invoice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut invoice): Json<Map<String, Value>>,
) -> Reply {
    if let Err(reply) = authorize(&state.config, &headers) {
        return reply;
    }
    let mut store = state.store.write().await;
    let customer = invoice.get("customerId").and_then(Value::as_i64).unwrap_or(0);
    if !store.firms.contains_key(&customer) {
        return Envelope::error(StatusCode::BAD_REQUEST, "unknown customer");
    }
    let id = store.assign_id();
    invoice.insert("id".to_string(), Value::from(id));
    invoice
        .entry("number")
        .or_insert_with(|| Value::from(format!("INV-{id:06}")));
    let invoice = Value::Object(invoice);
    store.invoices.insert(id, invoice.clone());
    Envelope::ok(invoice)
}

async fn get_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, kind)): Path<(i64, i64)>,
) -> Reply {
    if let Err(reply) = authorize(&state.config, &headers) {
        return reply;
    }
    let store = state.store.read().await;
    match store.products.get(&(id, kind)) {
        Some(product) => Envelope::ok(product.clone()),
        None => Envelope::error(StatusCode::NOT_FOUND, "product not found"),
    }
}
