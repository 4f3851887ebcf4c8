//! Wizard environment: gateways to the backend.
//!
//! The reducer never owns an HTTP client; it captures a gateway clone inside
//! each effect. Production wires [`rifa_api::ApiClient`]; tests wire the
//! scripted stubs from [`crate::mocks`].

use rifa_api::{ApiClient, ApiError, SubmitPurchaseRequest};

/// Availability queries for explicitly chosen ticket numbers
pub trait TicketsGateway: Send + Sync {
    /// Return the unavailable subset of `numbers`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-2xx response.
    fn check_unavailable(
        &self,
        numbers: Vec<String>,
    ) -> impl std::future::Future<Output = Result<Vec<String>, ApiError>> + Send;
}

/// Purchase submission
pub trait PurchaseGateway: Send + Sync {
    /// Record one purchase; called at most once per submit action
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-2xx response.
    fn submit(
        &self,
        request: SubmitPurchaseRequest,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}

impl TicketsGateway for ApiClient {
    async fn check_unavailable(&self, numbers: Vec<String>) -> Result<Vec<String>, ApiError> {
        self.check_tickets(&numbers).await
    }
}

impl PurchaseGateway for ApiClient {
    async fn submit(&self, request: SubmitPurchaseRequest) -> Result<(), ApiError> {
        self.submit_purchase(request).await
    }
}

/// Dependencies injected into the wizard reducer
#[derive(Clone)]
pub struct WizardEnvironment<T, P>
where
    T: TicketsGateway + Clone,
    P: PurchaseGateway + Clone,
{
    /// Availability queries
    pub tickets: T,
    /// Purchase submission
    pub purchases: P,
}

impl<T, P> WizardEnvironment<T, P>
where
    T: TicketsGateway + Clone,
    P: PurchaseGateway + Clone,
{
    /// Bundle the two gateways
    #[must_use]
    pub const fn new(tickets: T, purchases: P) -> Self {
        Self { tickets, purchases }
    }
}

/// Production environment backed by one shared [`ApiClient`]
#[must_use]
pub fn live_environment(client: ApiClient) -> WizardEnvironment<ApiClient, ApiClient> {
    WizardEnvironment::new(client.clone(), client)
}
