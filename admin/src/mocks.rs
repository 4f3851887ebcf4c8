//! Scripted admin gateway for tests.

use crate::environment::AdminGateway;
use chrono::{TimeZone, Utc};
use rifa_api::{
    ApiError, Buyer, LeaderboardRow, NumberOwnership, Page, Prices, Purchase, PurchaseFilter,
    PurchaseStatus,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A purchase with plausible fields for fixtures
#[must_use]
pub fn sample_purchase(id: i64, status: PurchaseStatus) -> Purchase {
    Purchase {
        id,
        user: Buyer {
            id: 100 + id,
            name: format!("Comprador {id}"),
            email: format!("comprador{id}@example.com"),
            phone: "04141112233".to_string(),
        },
        quantity: 2,
        monto_bs: 200.0,
        monto_usd: 20.0,
        payment_method: "pago movil".to_string(),
        transaction_digits: "123456".to_string(),
        payment_screenshot: "aGVsbG8=".to_string(),
        status,
        date: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).single().unwrap_or_default(),
    }
}

/// Admin gateway answering from scripted fixtures
#[derive(Clone, Default)]
pub struct StubAdmin {
    purchases: Arc<std::sync::Mutex<Vec<Purchase>>>,
    leaderboard: Arc<std::sync::Mutex<Vec<LeaderboardRow>>>,
    ownership: Arc<std::sync::Mutex<Option<NumberOwnership>>>,
    prices: Arc<std::sync::Mutex<Prices>>,
    fail_mutations: Arc<AtomicBool>,
    unauthorized: Arc<AtomicBool>,
    list_calls: Arc<AtomicUsize>,
    status_calls: Arc<AtomicUsize>,
}

impl StubAdmin {
    /// Gateway with the given purchase fixtures
    #[must_use]
    pub fn with_purchases(purchases: Vec<Purchase>) -> Self {
        let stub = Self::default();
        {
            let mut guard = stub
                .purchases
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *guard = purchases;
        }
        stub
    }

    /// Script the leaderboard rows
    pub fn set_leaderboard(&self, rows: Vec<LeaderboardRow>) {
        *self
            .leaderboard
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = rows;
    }

    /// Script the owner-lookup answer
    pub fn set_ownership(&self, ownership: Option<NumberOwnership>) {
        *self
            .ownership
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = ownership;
    }

    /// Script the current prices
    pub fn set_prices(&self, prices: Prices) {
        *self
            .prices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = prices;
    }

    /// Make mutations (status and price updates) fail with a server error
    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Make every call answer 401
    pub fn expire_session(&self, expired: bool) {
        self.unauthorized.store(expired, Ordering::SeqCst);
    }

    /// How many listing calls ran
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// How many status updates ran
    #[must_use]
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    fn check_session(&self) -> Result<(), ApiError> {
        if self.unauthorized.load(Ordering::SeqCst) {
            Err(ApiError::Unauthorized)
        } else {
            Ok(())
        }
    }
}

impl AdminGateway for StubAdmin {
    async fn list_purchases(
        &self,
        filter: PurchaseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Purchase>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_session()?;

        let all: Vec<Purchase> = self
            .purchases
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|p| match filter {
                PurchaseFilter::All => true,
                PurchaseFilter::Status(status) => p.status == status,
            })
            .cloned()
            .collect();

        let total = all.len() as u64;
        let start = usize::try_from((page.saturating_sub(1)) * per_page).unwrap_or(usize::MAX);
        let items = all
            .into_iter()
            .skip(start)
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .collect();

        Ok(Page { items, total })
    }

    async fn update_status(&self, id: i64, status: PurchaseStatus) -> Result<(), ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.check_session()?;

        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }

        let mut purchases = self
            .purchases
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(purchase) = purchases.iter_mut().find(|p| p.id == id) {
            purchase.status = status;
        }
        Ok(())
    }

    async fn leaderboard(&self, page: u64, per_page: u64) -> Result<Page<LeaderboardRow>, ApiError> {
        self.check_session()?;

        let all = self
            .leaderboard
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        let total = all.len() as u64;
        let start = usize::try_from((page.saturating_sub(1)) * per_page).unwrap_or(usize::MAX);
        let items = all
            .into_iter()
            .skip(start)
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .collect();

        Ok(Page { items, total })
    }

    async fn search_by_number(&self, _number: String) -> Result<Option<NumberOwnership>, ApiError> {
        self.check_session()?;
        Ok(self
            .ownership
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    async fn prices(&self) -> Result<Prices, ApiError> {
        Ok(*self
            .prices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    async fn update_prices(&self, prices: Prices) -> Result<(), ApiError> {
        self.check_session()?;

        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }

        self.set_prices(prices);
        Ok(())
    }
}
