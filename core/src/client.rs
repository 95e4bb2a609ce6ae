//! Request dispatch, login and resource operations for the Isbaşı API.
//!
//! # Design
//! `Isbasi` owns one [`Session`] and one [`Transport`]. Each operation is
//! split the same way: a `build_*` method turns the session and the input into
//! an [`HttpRequest`], the transport performs the round trip, and a parser
//! decodes the envelope and raises on its error flag. The build and parse
//! halves never touch the network, so they can be checked on their own.
//!
//! Session state is only written after a response has been fully decoded and
//! accepted, so a failed call never leaves it half updated.
//!
//! # Concurrency
//! `login` and the setters take `&mut self`; resource operations take `&self`.
//! One client serves one logical caller. Share it across threads only behind
//! a lock supplied by the caller.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::envelope::Envelope;
use crate::error::{IsbasiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use crate::settings::ClientConfig;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Credentials, Firm, Invoice, Product};

pub const LOGIN_PATH: &str = "/user/integrationLogin";
pub const FIRMS_PATH: &str = "/firms";
pub const INVOICES_PATH: &str = "/invoices/integrationInvoices";
pub const PRODUCTS_PATH: &str = "/products";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Client for the Isbaşı accounting API.
#[derive(Debug)]
pub struct Isbasi<T = UreqTransport> {
    session: Session,
    transport: T,
    timeout: Option<Duration>,
}

impl Isbasi {
    /// Client for the default endpoint using the built-in HTTP transport.
    pub fn new(secret_key: &str) -> Self {
        Self::with_transport(secret_key, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = Self::new(&config.api_key);
        client.set_base_url(&config.base_url);
        client.set_language(&config.language);
        client.set_timeout(config.timeout());
        client
    }
}

impl<T: Transport> Isbasi<T> {
    pub fn with_transport(secret_key: &str, transport: T) -> Self {
        Self {
            session: Session::new(secret_key),
            transport,
            timeout: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.session.set_base_url(url);
    }

    pub fn set_language(&mut self, language: &str) {
        self.session.set_language(language);
    }

    /// Deadline applied to every later round trip. `None` waits indefinitely.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    // -----------------------------------------------------------------------
    // Dispatcher
    // -----------------------------------------------------------------------

    /// Send `body` (if any) to `base_url + path` with the session headers and
    /// return the raw response. Status codes and envelopes are left to the
    /// caller.
    pub fn send<B>(&self, method: HttpMethod, path: &str, body: Option<&B>) -> Result<HttpResponse>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(encode).transpose()?;
        self.transport.execute(self.build_request(method, path, body))
    }

    /// Authenticated request carrying the full session header set.
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let session = &self.session;
        HttpRequest {
            method,
            url: format!("{}{path}", session.base_url()),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                ("ApiKey".to_string(), session.secret_key().to_string()),
                ("Authorization".to_string(), format!("Bearer {}", session.auth_token())),
                ("tenantId".to_string(), session.tenant_id().to_string()),
                ("lang".to_string(), session.language().to_string()),
            ],
            body,
            timeout: self.timeout,
        }
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    /// Exchange credentials for a bearer token.
    ///
    /// On success the session takes the returned token and tenant id, and the
    /// returned base URL when it is non-empty. On failure the session is left
    /// exactly as it was.
    pub fn login(&mut self, credentials: &Credentials) -> Result<Envelope<Credentials>> {
        let request = self.build_login(credentials)?;
        let response = self.transport.execute(request)?;
        let envelope = parse_login(response)?;

        self.session.apply_login(&envelope.data);
        info!(
            tenant_id = %self.session.tenant_id(),
            base_url = %self.session.base_url(),
            "logged in"
        );
        Ok(envelope)
    }

    /// Login request. Only the API key is sent: no bearer token exists yet.
    pub fn build_login(&self, credentials: &Credentials) -> Result<HttpRequest> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{LOGIN_PATH}", self.session.base_url()),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                ("ApiKey".to_string(), self.session.secret_key().to_string()),
            ],
            body: Some(encode(credentials)?),
            timeout: self.timeout,
        })
    }

    // -----------------------------------------------------------------------
    // Resources
    // -----------------------------------------------------------------------

    /// Create or update a firm (`PUT /firms`).
    pub fn create_firm(&self, firm: &Firm) -> Result<Envelope<Firm>> {
        self.fetch(self.build_create_firm(firm)?)
    }

    pub fn get_firm(&self, id: i64) -> Result<Envelope<Firm>> {
        self.fetch(self.build_get_firm(id))
    }

    /// Create an invoice (`POST /invoices/integrationInvoices`). Not
    /// idempotent: repeating the call may create a second invoice.
    pub fn create_invoice(&self, invoice: &Invoice) -> Result<Envelope<Invoice>> {
        self.fetch(self.build_create_invoice(invoice)?)
    }

    /// Look up a product by id and type discriminator.
    pub fn get_product(&self, id: i64, product_type: i32) -> Result<Envelope<Product>> {
        self.fetch(self.build_get_product(id, product_type))
    }

    pub fn build_create_firm(&self, firm: &Firm) -> Result<HttpRequest> {
        Ok(self.build_request(HttpMethod::Put, FIRMS_PATH, Some(encode(firm)?)))
    }

    pub fn build_get_firm(&self, id: i64) -> HttpRequest {
        self.build_request(HttpMethod::Get, &format!("{FIRMS_PATH}/{id}"), None)
    }

    pub fn build_create_invoice(&self, invoice: &Invoice) -> Result<HttpRequest> {
        Ok(self.build_request(HttpMethod::Post, INVOICES_PATH, Some(encode(invoice)?)))
    }

    pub fn build_get_product(&self, id: i64, product_type: i32) -> HttpRequest {
        self.build_request(
            HttpMethod::Get,
            &format!("{PRODUCTS_PATH}/{id}/{product_type}"),
            None,
        )
    }

    /// Perform `request` and decode its envelope as `D`.
    fn fetch<D>(&self, request: HttpRequest) -> Result<Envelope<D>>
    where
        D: DeserializeOwned + Default,
    {
        parse_envelope(self.transport.execute(request)?)
    }
}

// ---------------------------------------------------------------------------
// Encoding and decoding
// ---------------------------------------------------------------------------

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String> {
    serde_json::to_string(body).map_err(|e| IsbasiError::Encoding(e.to_string()))
}

/// Decode a resource envelope, failing with `Api` when its error flag is set.
pub fn parse_envelope<D>(response: HttpResponse) -> Result<Envelope<D>>
where
    D: DeserializeOwned + Default,
{
    let raw = decode_raw(&response)?;
    if raw.is_error {
        warn!(code = raw.code, message = %raw.message, "request rejected");
        return Err(IsbasiError::Api {
            code: raw.code,
            message: raw.message,
        });
    }
    into_typed(raw)
}

/// Decode a login envelope, failing with `Authentication` when its error flag
/// is set.
pub fn parse_login(response: HttpResponse) -> Result<Envelope<Credentials>> {
    let raw = decode_raw(&response)?;
    if raw.is_error {
        warn!(code = raw.code, message = %raw.message, "login rejected");
        return Err(IsbasiError::Authentication {
            code: raw.code,
            message: raw.message,
        });
    }
    into_typed(raw)
}

/// Read the envelope frame without committing to a payload type, so a flagged
/// envelope is reported as such even when its `data` has another shape.
fn decode_raw(response: &HttpResponse) -> Result<Envelope<Value>> {
    debug!(status = response.status, "decoding envelope");
    let mut value: Value = serde_json::from_str(&response.body).map_err(|e| {
        IsbasiError::Decoding(format!("HTTP {} with non-JSON body: {e}", response.status))
    })?;
    if !value.is_object() {
        return Err(IsbasiError::Decoding(format!(
            "HTTP {}: expected an envelope object",
            response.status
        )));
    }
    strip_nulls(&mut value);
    serde_json::from_value(value).map_err(|e| IsbasiError::Decoding(e.to_string()))
}

fn into_typed<D>(raw: Envelope<Value>) -> Result<Envelope<D>>
where
    D: DeserializeOwned + Default,
{
    let data = match raw.data {
        Value::Null => D::default(),
        data => serde_json::from_value(data).map_err(|e| IsbasiError::Decoding(e.to_string()))?,
    };
    Ok(Envelope {
        code: raw.code,
        message: raw.message,
        is_error: false,
        data,
    })
}

/// Drop `null` members so they decode exactly like absent ones.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
