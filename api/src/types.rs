//! Wire types shared with the rifa backend
//!
//! Field names mirror the JSON the backend speaks (`montoBs`, `vendidos`,
//! …); Rust-side names stay idiomatic via serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit prices for one ticket, in both currencies
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Prices {
    /// Price per ticket in bolívares
    #[serde(rename = "montoBs")]
    pub monto_bs: f64,
    /// Price per ticket in US dollars
    #[serde(rename = "montoUsd")]
    pub monto_usd: f64,
}

/// Payment channels offered at checkout
///
/// A closed enumeration; the wire values are the exact strings the backend
/// stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Venezuelan interbank mobile payment
    #[serde(rename = "pago movil")]
    PagoMovil,
    /// Zelle transfer
    #[serde(rename = "zelle")]
    Zelle,
}

impl PaymentMethod {
    /// The wire value for this channel
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PagoMovil => "pago movil",
            Self::Zelle => "zelle",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    /// Awaiting manual review
    Pending,
    /// Payment confirmed by an admin
    Verified,
    /// Rejected or withdrawn
    Cancelled,
}

impl PurchaseStatus {
    /// The wire value for this status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter for the purchase listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurchaseFilter {
    /// No status restriction
    #[default]
    All,
    /// Restrict to one review status
    Status(PurchaseStatus),
}

impl PurchaseFilter {
    /// Value for the `status` query parameter; `All` sends an empty value
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Status(status) => status.as_str(),
        }
    }
}

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Access role
    pub role: UserRole,
}

/// Access role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Dashboard access
    Admin,
    /// Regular buyer
    User,
}

/// A buyer as embedded in admin listings (no role)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    /// Backend identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Contact phone
    pub phone: String,
}

/// One purchase as returned by the admin listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Backend identifier
    pub id: i64,
    /// Who bought
    pub user: Buyer,
    /// Number of tickets
    pub quantity: u32,
    /// Amount paid in bolívares
    #[serde(rename = "montoBs")]
    pub monto_bs: f64,
    /// Amount paid in US dollars
    #[serde(rename = "montoUsd")]
    pub monto_usd: f64,
    /// Channel used
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    /// Last 6 digits of the transaction
    #[serde(rename = "transactionDigits")]
    pub transaction_digits: String,
    /// Base64-encoded proof image
    #[serde(rename = "paymentScreenshot")]
    pub payment_screenshot: String,
    /// Review status
    pub status: PurchaseStatus,
    /// When the purchase was submitted
    pub date: DateTime<Utc>,
}

/// One row of the "most tickets bought" ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// The buyer
    pub user: Buyer,
    /// Total tickets bought
    pub quantity: u32,
}

/// Owner lookup result for one ticket number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberOwnership {
    /// The buyer holding the number
    pub user: Buyer,
    /// All numbers that buyer holds
    pub tickets: Vec<String>,
}

/// A page of results plus the total row count
///
/// The total comes from the `X-Total-Count` response header, not the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The rows of this page
    pub items: Vec<T>,
    /// Total rows across all pages
    pub total: u64,
}

impl<T> Page<T> {
    /// Number of pages at the given page size, never below 1
    #[must_use]
    pub fn page_count(&self, per_page: u64) -> u64 {
        if per_page == 0 {
            return 1;
        }
        std::cmp::max(1, self.total.div_ceil(per_page))
    }
}

/// Payment proof image held in memory until submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofImage {
    /// Original file name
    pub file_name: String,
    /// MIME type, e.g. `image/png`
    pub content_type: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl ProofImage {
    /// Size of the image in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Everything the backend needs to record a purchase
///
/// Serialized as a multipart form, not JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPurchaseRequest {
    /// Number of tickets
    pub quantity: u32,
    /// Total in bolívares, already formatted to 2 decimals
    pub monto_bs: String,
    /// Total in US dollars, already formatted to 2 decimals
    pub monto_usd: String,
    /// Channel used
    pub payment_method: PaymentMethod,
    /// Exactly 6 digits of the transaction reference
    pub transaction_digits: String,
    /// Explicitly chosen numbers; empty means "assign randomly"
    pub selected_numbers: Vec<String>,
    /// Proof of payment
    pub payment_screenshot: ProofImage,
}

/// Registration form payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// Plain password, sent over TLS only
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_wire_values() {
        assert_eq!(PaymentMethod::PagoMovil.as_str(), "pago movil");
        assert_eq!(PaymentMethod::Zelle.as_str(), "zelle");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::PagoMovil).unwrap(),
            "\"pago movil\""
        );
    }

    #[test]
    fn purchase_filter_query_values() {
        assert_eq!(PurchaseFilter::All.as_query_value(), "");
        assert_eq!(
            PurchaseFilter::Status(PurchaseStatus::Verified).as_query_value(),
            "verified"
        );
    }

    #[test]
    fn page_count_rounds_up_and_never_hits_zero() {
        let page = Page::<u8> {
            items: vec![],
            total: 0,
        };
        assert_eq!(page.page_count(10), 1);

        let page = Page::<u8> {
            items: vec![],
            total: 21,
        };
        assert_eq!(page.page_count(10), 3);
    }

    #[test]
    fn prices_round_trips_wire_names() {
        let prices: Prices = serde_json::from_str(r#"{"montoBs":350.0,"montoUsd":1.5}"#).unwrap();
        assert_eq!(prices.monto_bs, 350.0);
        assert_eq!(prices.monto_usd, 1.5);
        let back = serde_json::to_string(&prices).unwrap();
        assert!(back.contains("montoBs"));
    }
}
