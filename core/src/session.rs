//! Per-caller session state: endpoint, credentials and locale.

use std::fmt;

use crate::types::Credentials;

/// Service endpoint used until the caller or a login response overrides it.
pub const DEFAULT_BASE_URL: &str = "https://isbasimw.isbasi.com/api/v1.0";

/// Locale sent in the `lang` header unless changed with `set_language`.
pub const DEFAULT_LANGUAGE: &str = "tr-TR";

/// Mutable state shared by every call made through one client.
///
/// The API key is fixed at construction. The bearer token and tenant id start
/// empty and are only ever written by a successful login; the base URL and
/// language can also be changed through the setters, which perform no
/// validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    secret_key: String,
    tenant_id: String,
    auth_token: String,
    language: String,
}

impl Session {
    pub fn new(secret_key: &str) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            secret_key: secret_key.to_string(),
            tenant_id: String::new(),
            auth_token: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// True once a login has stored a non-empty bearer token. Informational
    /// only: requests are never blocked locally when this is false.
    pub fn is_authenticated(&self) -> bool {
        !self.auth_token.is_empty()
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.to_string();
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    /// Store the outcome of a successful login. An empty base URL in the
    /// response keeps whatever base URL is currently configured.
    pub(crate) fn apply_login(&mut self, granted: &Credentials) {
        self.auth_token = granted.access_token.clone();
        self.tenant_id = granted.tenant_id.clone();
        if !granted.base_url.is_empty() {
            self.base_url = granted.base_url.clone();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("secret_key", &"[REDACTED]")
            .field("tenant_id", &self.tenant_id)
            .field("auth_token", &redact(&self.auth_token))
            .field("language", &self.language)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<empty>"
    } else {
        "[REDACTED]"
    }
}
