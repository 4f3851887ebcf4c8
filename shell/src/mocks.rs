//! Scripted session and landing gateway for tests.

use crate::environment::{AuthGateway, LandingGateway};
use rifa_api::{ApiError, Prices, Registration, User, UserRole};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A regular buyer fixture
#[must_use]
pub fn regular_user() -> User {
    User {
        id: 7,
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        phone: "04141112233".to_string(),
        role: UserRole::User,
    }
}

/// An admin fixture
#[must_use]
pub fn admin_user() -> User {
    User {
        id: 1,
        name: "Vicente".to_string(),
        email: "admin@example.com".to_string(),
        phone: "04141551801".to_string(),
        role: UserRole::Admin,
    }
}

/// Shell gateway answering from scripted fixtures
#[derive(Clone, Default)]
pub struct StubShell {
    session_user: Arc<std::sync::Mutex<Option<User>>>,
    prices: Arc<std::sync::Mutex<Prices>>,
    percent_sold: Arc<std::sync::Mutex<f64>>,
    ticket_count: Arc<std::sync::Mutex<u32>>,
    reject_credentials: Arc<AtomicBool>,
    fail_requests: Arc<AtomicBool>,
}

impl StubShell {
    /// Gateway with an existing session
    #[must_use]
    pub fn logged_in(user: User) -> Self {
        let stub = Self::default();
        stub.set_session(Some(user));
        stub
    }

    /// Script the current session
    pub fn set_session(&self, user: Option<User>) {
        *self
            .session_user
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = user;
    }

    /// Script the prices
    pub fn set_prices(&self, prices: Prices) {
        *self
            .prices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = prices;
    }

    /// Script the percent sold
    pub fn set_percent_sold(&self, sold: f64) {
        *self
            .percent_sold
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = sold;
    }

    /// Script the owned-tickets count
    pub fn set_ticket_count(&self, count: u32) {
        *self
            .ticket_count
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = count;
    }

    /// Reject login and registration attempts
    pub fn reject_credentials(&self, reject: bool) {
        self.reject_credentials.store(reject, Ordering::SeqCst);
    }

    /// Fail every call with a transport error
    pub fn fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    fn check_transport(&self) -> Result<(), ApiError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            Err(ApiError::RequestFailed("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl AuthGateway for StubShell {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.check_transport()?;
        self.session_user
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
            .ok_or(ApiError::Unauthorized)
    }

    async fn login(&self, email: String, _password: String) -> Result<User, ApiError> {
        self.check_transport()?;
        if self.reject_credentials.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 400,
                message: "Credenciales inválidas".to_string(),
            });
        }

        let user = User {
            email,
            ..regular_user()
        };
        self.set_session(Some(user.clone()));
        Ok(user)
    }

    async fn register(&self, registration: Registration) -> Result<User, ApiError> {
        self.check_transport()?;
        if self.reject_credentials.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 409,
                message: "El correo ya está registrado".to_string(),
            });
        }

        let user = User {
            id: 99,
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
            role: UserRole::User,
        };
        self.set_session(Some(user.clone()));
        Ok(user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.check_transport()?;
        self.set_session(None);
        Ok(())
    }
}

impl LandingGateway for StubShell {
    async fn prices(&self) -> Result<Prices, ApiError> {
        self.check_transport()?;
        Ok(*self
            .prices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    async fn sold_percentage(&self) -> Result<f64, ApiError> {
        self.check_transport()?;
        Ok(*self
            .percent_sold
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    async fn user_ticket_count(&self) -> Result<u32, ApiError> {
        self.check_transport()?;
        if self
            .session_user
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_none()
        {
            return Err(ApiError::Unauthorized);
        }
        Ok(*self
            .ticket_count
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }
}
