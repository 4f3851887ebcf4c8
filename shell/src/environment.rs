//! Shell environment: session and landing gateways.

use rifa_api::{ApiClient, ApiError, Prices, Registration, User};
use std::future::Future;

/// Session operations
pub trait AuthGateway: Send + Sync {
    /// Who is logged in; `Unauthorized` for an anonymous session
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx response, or
    /// an anonymous session.
    fn current_user(&self) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Log in with email and password
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on bad credentials or transport failure.
    fn login(
        &self,
        email: String,
        password: String,
    ) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on a rejected registration or transport
    /// failure.
    fn register(
        &self,
        registration: Registration,
    ) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// End the session
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-2xx response.
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Landing page data
pub trait LandingGateway: Send + Sync {
    /// Current unit prices
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-2xx response.
    fn prices(&self) -> impl Future<Output = Result<Prices, ApiError>> + Send;

    /// Percentage of tickets sold
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-2xx response.
    fn sold_percentage(&self) -> impl Future<Output = Result<f64, ApiError>> + Send;

    /// How many tickets the current user holds
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx response, or
    /// a lost session.
    fn user_ticket_count(&self) -> impl Future<Output = Result<u32, ApiError>> + Send;
}

impl AuthGateway for ApiClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        Self::current_user(self).await
    }

    async fn login(&self, email: String, password: String) -> Result<User, ApiError> {
        Self::login(self, &email, &password).await
    }

    async fn register(&self, registration: Registration) -> Result<User, ApiError> {
        Self::register(self, &registration).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Self::logout(self).await
    }
}

impl LandingGateway for ApiClient {
    async fn prices(&self) -> Result<Prices, ApiError> {
        Self::prices(self).await
    }

    async fn sold_percentage(&self) -> Result<f64, ApiError> {
        Self::sold_percentage(self).await
    }

    async fn user_ticket_count(&self) -> Result<u32, ApiError> {
        Self::user_ticket_count(self).await
    }
}

/// Dependencies injected into the shell reducers
#[derive(Clone)]
pub struct ShellEnvironment<G>
where
    G: AuthGateway + LandingGateway + Clone,
{
    /// Session and landing gateway
    pub gateway: G,
}

impl<G> ShellEnvironment<G>
where
    G: AuthGateway + LandingGateway + Clone,
{
    /// Wrap a gateway
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self { gateway }
    }
}
