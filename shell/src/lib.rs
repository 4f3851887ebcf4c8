//! # Rifa Shell
//!
//! Everything around the purchase flow: session bootstrap and auth modal,
//! route guarding for the admin dashboard, and the landing page data
//! (prices with config fallbacks, percent sold, draw countdown,
//! owned-tickets modal).
//!
//! Configuration is an explicit [`AppConfig`](config::AppConfig) resolved
//! once from the environment; the session guard fails loudly when read
//! before bootstrap, instead of guessing.

pub mod config;
pub mod countdown;
pub mod environment;
pub mod landing;
pub mod mocks;
pub mod session;
pub mod validate;

pub use config::AppConfig;
pub use countdown::{TimeLeft, time_left};
pub use environment::{AuthGateway, LandingGateway, ShellEnvironment};
pub use landing::{LandingAction, LandingReducer, LandingState, TicketsModalState};
pub use session::{
    AuthModal, GuardDecision, GuardError, SessionAction, SessionPhase, SessionReducer,
    SessionState,
};
pub use validate::{RegistrationErrors, is_valid_email, is_valid_phone, validate_registration};
