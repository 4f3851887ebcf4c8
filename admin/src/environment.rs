//! Admin environment: the gateway to review endpoints.

use rifa_api::{
    ApiClient, ApiError, LeaderboardRow, NumberOwnership, Page, Prices, Purchase, PurchaseFilter,
    PurchaseStatus,
};
use std::future::Future;

/// Backend operations the admin surfaces need
///
/// Every method requires an authenticated admin session; a 401 surfaces as
/// [`ApiError::Unauthorized`] and the reducers turn it into a redirect
/// decision.
pub trait AdminGateway: Send + Sync {
    /// One page of purchases under review
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx response, or
    /// a lost session.
    fn list_purchases(
        &self,
        filter: PurchaseFilter,
        page: u64,
        per_page: u64,
    ) -> impl Future<Output = Result<Page<Purchase>, ApiError>> + Send;

    /// Change one purchase's review status
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx response, or
    /// a lost session.
    fn update_status(
        &self,
        id: i64,
        status: PurchaseStatus,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// One page of the "most tickets bought" ranking
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx response, or
    /// a lost session.
    fn leaderboard(
        &self,
        page: u64,
        per_page: u64,
    ) -> impl Future<Output = Result<Page<LeaderboardRow>, ApiError>> + Send;

    /// Owner lookup for one ticket number
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx response, or
    /// a lost session.
    fn search_by_number(
        &self,
        number: String,
    ) -> impl Future<Output = Result<Option<NumberOwnership>, ApiError>> + Send;

    /// Current unit prices
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-2xx response.
    fn prices(&self) -> impl Future<Output = Result<Prices, ApiError>> + Send;

    /// Replace the unit prices
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx response, or
    /// a lost session.
    fn update_prices(&self, prices: Prices) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl AdminGateway for ApiClient {
    async fn list_purchases(
        &self,
        filter: PurchaseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Purchase>, ApiError> {
        Self::list_purchases(self, filter, page, per_page).await
    }

    async fn update_status(&self, id: i64, status: PurchaseStatus) -> Result<(), ApiError> {
        self.update_purchase_status(id, status).await
    }

    async fn leaderboard(&self, page: u64, per_page: u64) -> Result<Page<LeaderboardRow>, ApiError> {
        Self::leaderboard(self, page, per_page).await
    }

    async fn search_by_number(&self, number: String) -> Result<Option<NumberOwnership>, ApiError> {
        Self::search_by_number(self, &number).await
    }

    async fn prices(&self) -> Result<Prices, ApiError> {
        Self::prices(self).await
    }

    async fn update_prices(&self, prices: Prices) -> Result<(), ApiError> {
        Self::update_prices(self, prices).await
    }
}

/// Dependencies injected into the admin reducers
#[derive(Clone)]
pub struct AdminEnvironment<G>
where
    G: AdminGateway + Clone,
{
    /// Review endpoint gateway
    pub gateway: G,
}

impl<G> AdminEnvironment<G>
where
    G: AdminGateway + Clone,
{
    /// Wrap a gateway
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self { gateway }
    }
}
