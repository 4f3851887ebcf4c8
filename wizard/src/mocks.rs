//! Scripted gateway stubs for wizard tests.
//!
//! Kept in the library (not behind `cfg(test)`) so integration tests and
//! downstream crates can drive the wizard without a backend.

use crate::environment::{PurchaseGateway, TicketsGateway};
use rifa_api::{ApiError, SubmitPurchaseRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Tickets gateway answering from a scripted taken-set
#[derive(Clone, Default)]
pub struct StubTickets {
    taken: Arc<std::sync::Mutex<Vec<String>>>,
    fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl StubTickets {
    /// Gateway where every number is available
    #[must_use]
    pub fn all_available() -> Self {
        Self::default()
    }

    /// Gateway where the given numbers are already taken
    #[must_use]
    pub fn with_taken(taken: &[&str]) -> Self {
        let stub = Self::default();
        stub.set_taken(taken);
        stub
    }

    /// Replace the scripted taken-set
    pub fn set_taken(&self, taken: &[&str]) {
        let mut guard = self
            .taken
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = taken.iter().map(ToString::to_string).collect();
    }

    /// Make every call fail with a transport error
    pub fn fail_requests(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// How many availability checks ran
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TicketsGateway for StubTickets {
    async fn check_unavailable(&self, numbers: Vec<String>) -> Result<Vec<String>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::RequestFailed("connection refused".to_string()));
        }

        let taken = self
            .taken
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(numbers
            .into_iter()
            .filter(|n| taken.contains(n))
            .collect())
    }
}

/// Purchase gateway recording submissions
#[derive(Clone, Default)]
pub struct StubPurchases {
    fail: Arc<AtomicBool>,
    submissions: Arc<std::sync::Mutex<Vec<SubmitPurchaseRequest>>>,
}

impl StubPurchases {
    /// Gateway that accepts every submission
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Make every submission fail with a server error
    pub fn fail_requests(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Every submission received so far
    #[must_use]
    pub fn submissions(&self) -> Vec<SubmitPurchaseRequest> {
        self.submissions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl PurchaseGateway for StubPurchases {
    async fn submit(&self, request: SubmitPurchaseRequest) -> Result<(), ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }

        self.submissions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);
        Ok(())
    }
}
