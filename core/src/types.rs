//! Records exchanged with the remote API.
//!
//! # Design
//! The schema belongs to the remote service and changes over time, so these
//! are plain data with no behavior. Every field is omitted from the encoded
//! JSON while it holds its default value, and absent fields decode back to
//! that default. The service validates requests by field presence, so an
//! unset field must never be sent as an explicit `0`, `""` or `false`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serializer policy shared by every record: skip values equal to `Default`.
pub(crate) fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login payload, used both for the request and for the granted session
/// returned in the response envelope.
///
/// A request carries either `username`/`password` or a pre-issued
/// `access_token`, optionally with a tenant id and base URL hint. The response
/// carries the bearer token, the tenant id and an optional base URL override.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Credentials {
    #[serde(skip_serializing_if = "is_default")]
    pub username: String,
    #[serde(skip_serializing_if = "is_default")]
    pub password: String,
    #[serde(skip_serializing_if = "is_default")]
    pub access_token: String,
    #[serde(skip_serializing_if = "is_default")]
    pub tenant_id: String,
    #[serde(skip_serializing_if = "is_default")]
    pub base_url: String,
}

impl Credentials {
    pub fn password(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }

    pub fn access_token(token: &str) -> Self {
        Self {
            access_token: token.to_string(),
            ..Self::default()
        }
    }

    pub fn with_tenant(mut self, tenant_id: &str) -> Self {
        self.tenant_id = tenant_id.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hidden = |value: &str| if value.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &hidden(&self.password))
            .field("access_token", &hidden(&self.access_token))
            .field("tenant_id", &self.tenant_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Firm and its nested records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub code: String,
    #[serde(rename = "type", skip_serializing_if = "is_default")]
    pub kind: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Employee {
    #[serde(skip_serializing_if = "is_default")]
    pub full_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(rename = "firmid", skip_serializing_if = "is_default")]
    pub firm_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub title: String,
    #[serde(skip_serializing_if = "is_default")]
    pub address: String,
    #[serde(skip_serializing_if = "is_default")]
    pub country: String,
    #[serde(skip_serializing_if = "is_default")]
    pub city: String,
    #[serde(skip_serializing_if = "is_default")]
    pub district: String,
    #[serde(skip_serializing_if = "is_default")]
    pub code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub full_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bank {
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub branch: String,
    #[serde(skip_serializing_if = "is_default")]
    pub branch_code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub account_number: String,
    #[serde(skip_serializing_if = "is_default")]
    pub currency: String,
    #[serde(skip_serializing_if = "is_default")]
    pub iban: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(skip_serializing_if = "is_default")]
    pub bank_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub account_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub account_code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub iban: String,
    #[serde(skip_serializing_if = "is_default")]
    pub currency: String,
    #[serde(skip_serializing_if = "is_default")]
    pub bank_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub branch_name: String,
}

/// Login for the government e-archive portal.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EPortalLogin {
    #[serde(skip_serializing_if = "is_default")]
    pub user_id: String,
    #[serde(skip_serializing_if = "is_default")]
    pub password: String,
}

impl fmt::Debug for EPortalLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EPortalLogin")
            .field("user_id", &self.user_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A customer or supplier account. Created with `PUT /firms`, which behaves
/// as an upsert keyed by `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Firm {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub is_active: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub is_personal_company: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub first_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub last_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub full_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub display_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub tax_or_personal_id: String,
    #[serde(skip_serializing_if = "is_default")]
    pub tax_office: String,

    // Address and contact
    #[serde(skip_serializing_if = "is_default")]
    pub country: String,
    #[serde(skip_serializing_if = "is_default")]
    pub city: String,
    #[serde(skip_serializing_if = "is_default")]
    pub validate_city_and_district: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub district: String,
    #[serde(skip_serializing_if = "is_default")]
    pub postal_code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub address: String,
    #[serde(skip_serializing_if = "is_default")]
    pub phone: String,
    #[serde(skip_serializing_if = "is_default")]
    pub web_address: String,
    #[serde(skip_serializing_if = "is_default")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub category: Category,
    #[serde(skip_serializing_if = "is_default")]
    pub phone_numbers: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub email_address: String,
    #[serde(skip_serializing_if = "is_default")]
    pub employees: Vec<Employee>,
    #[serde(skip_serializing_if = "is_default")]
    pub shipping_addresses: Vec<ShippingAddress>,
    #[serde(skip_serializing_if = "is_default")]
    pub banks: Vec<Bank>,
    #[serde(skip_serializing_if = "is_default")]
    pub fax_number: String,
    #[serde(skip_serializing_if = "is_default")]
    pub icon: String,
    #[serde(rename = "UserId", skip_serializing_if = "is_default")]
    pub user_id: String,

    // E-invoice / e-archive
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_responsible: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub default_report_template: String,
    #[serde(skip_serializing_if = "is_default")]
    pub firm_type: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_profile: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_sender_label: String,
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_post_label: String,
    #[serde(skip_serializing_if = "is_default")]
    pub e_logo_user_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub e_logo_password: String,
    #[serde(skip_serializing_if = "is_default")]
    pub nace_code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_control_type: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_customs: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_broker_comp: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub e_archive_responsible: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub e_archive_web_site: String,
    #[serde(skip_serializing_if = "is_default")]
    pub additional_invoice_type: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub sgk_responsible_code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub sgk_responsible_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub e_archive_send_mod: i32,
    // The remote field name is misspelled.
    #[serde(rename = "eGovermentType", skip_serializing_if = "is_default")]
    pub e_government_type: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub e_smm_responsible: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub e_smm_send_mod: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub accept_einv_public: i32,

    // Tax behavior
    #[serde(skip_serializing_if = "is_default")]
    pub generic_customer: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub not_apply_vat: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub not_apply_with_holding: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub not_apply_additional_tax: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub mersis_no: String,
    #[serde(skip_serializing_if = "is_default")]
    pub trade_register_number: String,
    #[serde(skip_serializing_if = "is_default")]
    pub predefined_description: String,
    #[serde(skip_serializing_if = "is_default")]
    pub is_admin: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub is_chartered_accountant: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub error_message: String,

    // Balances
    #[serde(skip_serializing_if = "is_default")]
    pub beginning_balance: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub beginning_balance_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_default")]
    pub balance: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub currency_balance: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub cost_method_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub currency: String,
    #[serde(skip_serializing_if = "is_default")]
    pub description: String,
    #[serde(skip_serializing_if = "is_default")]
    pub e_invoice_begin_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_default")]
    pub e_archive_begin_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_default")]
    pub is_send_dispatch_in_e_invoice: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub sender_iban_bank_account_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub purchase_services_receipt_reading_method: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub was_access_permission_granted: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub bank_account: BankAccount,
    #[serde(skip_serializing_if = "is_default")]
    pub parent_tenant_set_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_default")]
    pub is_integration_firm: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub has_api_auth_authority: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub e_portal_archive_responsible: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub e_a_portal_login_information: EPortalLogin,
}

// ---------------------------------------------------------------------------
// Invoice and product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Invoice {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(rename = "type", skip_serializing_if = "is_default")]
    pub kind: String,
    #[serde(skip_serializing_if = "is_default")]
    pub number: String,
    #[serde(skip_serializing_if = "is_default")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_default")]
    pub customer_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub customer_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub currency: String,
    #[serde(skip_serializing_if = "is_default")]
    pub exchange_rate: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub total: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub vat_amount: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub description: String,
    #[serde(skip_serializing_if = "is_default")]
    pub is_cancelled: bool,
}

/// A product or service. Looked up by id together with its type
/// discriminator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub code: String,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "is_default")]
    pub kind: i32,
    #[serde(skip_serializing_if = "is_default")]
    pub vat_rate: f64,
    #[serde(skip_serializing_if = "is_default")]
    pub is_active: bool,
}
