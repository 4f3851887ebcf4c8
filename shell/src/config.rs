//! Configuration for the rifa client.
//!
//! Loads configuration from environment variables with explicit defaults,
//! resolved once per process start. The price fields are *fallbacks* shown
//! before (or instead of) a successful price fetch.

use rifa_api::Prices;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the backend
    pub api_url: String,
    /// Unit prices to show until the price fetch resolves
    pub fallback_prices: Prices,
    /// Fewest tickets per purchase
    pub ticket_min: u32,
    /// Most tickets per purchase
    pub ticket_max: u32,
}

impl AppConfig {
    /// Load configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("RIFA_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            fallback_prices: Prices {
                monto_bs: env::var("RIFA_MONTO_BS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0.0),
                monto_usd: env::var("RIFA_MONTO_USD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0.0),
            },
            ticket_min: env::var("RIFA_TICKET_MIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            ticket_max: env::var("RIFA_TICKET_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            fallback_prices: Prices {
                monto_bs: 0.0,
                monto_usd: 0.0,
            },
            ticket_min: 2,
            ticket_max: 500,
        }
    }
}
