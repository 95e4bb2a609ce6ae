//! Blocking, typed client for the Isbaşı accounting and invoicing API.
//!
//! # Overview
//! Log in once with an API key plus credentials, then create and read firms,
//! invoices and products. Every reply arrives in the same
//! `{code, message, isError, data}` envelope; a set error flag is returned as
//! an [`IsbasiError`] instead of a payload.
//!
//! # Design
//! - [`Session`] holds the base URL, API key, tenant id, bearer token and
//!   locale. Only a successful login writes the token and tenant id.
//! - [`Isbasi`] builds plain-data [`HttpRequest`] values, hands them to a
//!   [`Transport`] and decodes the [`Envelope`] that comes back. The default
//!   transport is `ureq`; tests substitute their own.
//! - Request bodies omit every field that holds its default value, and
//!   `null`/absent response fields decode to defaults.
//!
//! ```no_run
//! use isbasi_core::{Credentials, Isbasi};
//!
//! # fn main() -> isbasi_core::Result<()> {
//! let mut client = Isbasi::new("my-api-key");
//! client.login(&Credentials::password("user@example.com", "secret"))?;
//! let product = client.get_product(42, 1)?.into_data();
//! println!("{}", product.name);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod session;
pub mod settings;
pub mod transport;
pub mod types;

pub use client::{parse_envelope, parse_login, Isbasi};
pub use envelope::Envelope;
pub use error::{IsbasiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{Session, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use settings::ClientConfig;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Bank, BankAccount, Category, Credentials, EPortalLogin, Employee, Firm, Invoice, Product,
    ShippingAddress,
};
