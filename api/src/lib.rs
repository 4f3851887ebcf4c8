//! # Rifa API Client
//!
//! Typed REST client for the rifa backend: purchases, ticket availability,
//! prices, and session-cookie authentication.
//!
//! ## Example
//!
//! ```no_run
//! use rifa_api::{ApiClient, PurchaseFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:3000")?;
//!
//!     let prices = client.prices().await?;
//!     println!("Ticket price: {} Bs / {} USD", prices.monto_bs, prices.monto_usd);
//!
//!     let taken = client.check_tickets(&["7".into(), "1234".into()]).await?;
//!     println!("Already taken: {taken:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - Multipart purchase submission with payment proof upload
//! - Availability check for explicitly chosen ticket numbers
//! - Paginated admin listings driven by the `X-Total-Count` header
//! - Session-cookie auth; 401 surfaces as [`ApiError::Unauthorized`]

pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    Buyer, LeaderboardRow, NumberOwnership, Page, PaymentMethod, Prices, ProofImage, Purchase,
    PurchaseFilter, PurchaseStatus, Registration, SubmitPurchaseRequest, User, UserRole,
};
