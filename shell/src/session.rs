//! Session bootstrap, auth modal, and route guarding.
//!
//! The session is the provider every routed surface reads through
//! [`SessionState::guard_admin`]; reading the guard before bootstrap has
//! started is a programming error and fails loudly instead of guessing.

use crate::environment::{AuthGateway, LandingGateway, ShellEnvironment};
use crate::validate::{self, RegistrationErrors};
use rifa_api::{ApiError, Registration, User, UserRole};
use rifa_core::effect::Effect;
use rifa_core::reducer::Reducer;
use rifa_core::{SmallVec, smallvec};

/// Fallback message for a failed login
pub const LOGIN_FAILED_MESSAGE: &str = "No se pudo iniciar sesión, intenta nuevamente";

/// Fallback message for a failed registration
pub const REGISTER_FAILED_MESSAGE: &str = "No se pudo crear la cuenta, intenta nuevamente";

/// Visible message for a failed logout
pub const LOGOUT_FAILED_MESSAGE: &str = "No se pudo cerrar sesión, intenta nuevamente";

/// Field message for a malformed login email
pub const LOGIN_EMAIL_MESSAGE: &str = "Correo inválido";

/// Field message for an empty login password
pub const LOGIN_PASSWORD_MESSAGE: &str = "La contraseña es obligatoria";

/// Where the session stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Bootstrap has not started yet
    #[default]
    Idle,
    /// `/api/me` is in flight
    Bootstrapping,
    /// Nobody is logged in
    Anonymous,
    /// A user is logged in
    Authenticated(User),
}

/// Which auth modal is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthModal {
    /// No modal
    #[default]
    Closed,
    /// Login form
    Login,
    /// Registration form
    Register,
}

/// What the router should do with a guarded route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bootstrap still in flight; show a loader, decide later
    Pending,
    /// Let the route render
    Allow,
    /// Send the user to the public landing route
    RedirectToLanding,
}

/// Misuse of the session guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// The guard was read before `SessionAction::Bootstrap` was dispatched
    #[error("session guard read before bootstrap started")]
    NotBootstrapped,
}

/// Session, auth modal, and form state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    /// Where the session stands
    pub phase: SessionPhase,
    /// Which auth modal is showing
    pub modal: AuthModal,
    /// A login request is in flight
    pub logging_in: bool,
    /// Visible login failure
    pub login_error: Option<String>,
    /// A registration request is in flight
    pub registering: bool,
    /// Visible registration failure
    pub register_error: Option<String>,
    /// Per-field registration problems
    pub registration_errors: RegistrationErrors,
    /// A logout request is in flight
    pub logging_out: bool,
    /// Visible logout failure
    pub logout_error: Option<String>,
}

impl SessionState {
    /// The logged-in user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match &self.phase {
            SessionPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Whether someone is logged in
    #[must_use]
    pub const fn authenticated(&self) -> bool {
        matches!(self.phase, SessionPhase::Authenticated(_))
    }

    /// Guard an admin route
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::NotBootstrapped`] when read before bootstrap was
    /// dispatched; that is a wiring bug, not a user state.
    pub fn guard_admin(&self) -> Result<GuardDecision, GuardError> {
        match &self.phase {
            SessionPhase::Idle => Err(GuardError::NotBootstrapped),
            SessionPhase::Bootstrapping => Ok(GuardDecision::Pending),
            SessionPhase::Authenticated(user) if user.role == UserRole::Admin => {
                Ok(GuardDecision::Allow)
            },
            SessionPhase::Anonymous | SessionPhase::Authenticated(_) => {
                Ok(GuardDecision::RedirectToLanding)
            },
        }
    }
}

/// Inputs to the session reducer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Resolve the session from the backend (`GET /api/me`)
    Bootstrap,
    /// Bootstrap finished; `None` means anonymous
    BootstrapResolved {
        /// The logged-in user, if any
        user: Option<User>,
    },
    /// Show the login or registration modal
    OpenAuthModal {
        /// `true` opens the registration form
        register: bool,
    },
    /// Hide the auth modal
    CloseAuthModal,
    /// Validate and send a login
    SubmitLogin {
        /// Login email
        email: String,
        /// Plain password
        password: String,
    },
    /// The backend accepted the login
    LoginSucceeded(User),
    /// The backend rejected the login
    LoginFailed {
        /// Visible message
        message: String,
    },
    /// Validate and send a registration
    SubmitRegistration(Registration),
    /// The backend accepted the registration
    RegistrationSucceeded(User),
    /// The backend rejected the registration
    RegistrationFailed {
        /// Visible message
        message: String,
    },
    /// End the session
    Logout,
    /// The backend ended the session
    LoggedOut,
    /// The logout failed; the session stands
    LogoutFailed {
        /// Visible message
        message: String,
    },
}

/// Map an API failure to a visible auth message, preferring backend detail
fn auth_failure_message(error: &ApiError, fallback: &'static str) -> String {
    match error {
        ApiError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}

/// Reducer for session and auth modal state
#[derive(Debug, Clone)]
pub struct SessionReducer<G> {
    _phantom: std::marker::PhantomData<G>,
}

impl<G> SessionReducer<G> {
    /// Create a new session reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for SessionReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Reducer for SessionReducer<G>
where
    G: AuthGateway + LandingGateway + Clone + 'static,
{
    type State = SessionState;
    type Action = SessionAction;
    type Environment = ShellEnvironment<G>;

    #[allow(clippy::too_many_lines)] // One arm per action keeps the flows in one place
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SessionAction::Bootstrap if state.phase != SessionPhase::Bootstrapping => {
                state.phase = SessionPhase::Bootstrapping;

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.current_user().await {
                        Ok(user) => Some(SessionAction::BootstrapResolved { user: Some(user) }),
                        Err(ApiError::Unauthorized) => {
                            Some(SessionAction::BootstrapResolved { user: None })
                        },
                        Err(error) => {
                            tracing::warn!(%error, "Session bootstrap failed");
                            Some(SessionAction::BootstrapResolved { user: None })
                        },
                    }
                })]
            },

            SessionAction::BootstrapResolved { user }
                if state.phase == SessionPhase::Bootstrapping =>
            {
                state.phase = user.map_or(SessionPhase::Anonymous, SessionPhase::Authenticated);
                smallvec![Effect::None]
            },

            SessionAction::OpenAuthModal { register } => {
                state.modal = if register {
                    AuthModal::Register
                } else {
                    AuthModal::Login
                };
                state.login_error = None;
                state.register_error = None;
                state.registration_errors = RegistrationErrors::default();
                smallvec![Effect::None]
            },

            SessionAction::CloseAuthModal => {
                state.modal = AuthModal::Closed;
                smallvec![Effect::None]
            },

            SessionAction::SubmitLogin { email, password } if !state.logging_in => {
                if !validate::is_valid_email(&email) {
                    state.login_error = Some(LOGIN_EMAIL_MESSAGE.to_string());
                    return smallvec![Effect::None];
                }
                if password.is_empty() {
                    state.login_error = Some(LOGIN_PASSWORD_MESSAGE.to_string());
                    return smallvec![Effect::None];
                }

                state.logging_in = true;
                state.login_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.login(email, password).await {
                        Ok(user) => Some(SessionAction::LoginSucceeded(user)),
                        Err(error) => {
                            tracing::warn!(%error, "Login failed");
                            Some(SessionAction::LoginFailed {
                                message: auth_failure_message(&error, LOGIN_FAILED_MESSAGE),
                            })
                        },
                    }
                })]
            },

            SessionAction::LoginSucceeded(user) if state.logging_in => {
                state.logging_in = false;
                state.phase = SessionPhase::Authenticated(user);
                state.modal = AuthModal::Closed;
                smallvec![Effect::None]
            },

            SessionAction::LoginFailed { message } if state.logging_in => {
                state.logging_in = false;
                state.login_error = Some(message);
                smallvec![Effect::None]
            },

            SessionAction::SubmitRegistration(registration) if !state.registering => {
                let errors = validate::validate_registration(&registration);
                if !errors.is_clean() {
                    state.registration_errors = errors;
                    return smallvec![Effect::None];
                }

                state.registering = true;
                state.register_error = None;
                state.registration_errors = RegistrationErrors::default();

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.register(registration).await {
                        Ok(user) => Some(SessionAction::RegistrationSucceeded(user)),
                        Err(error) => {
                            tracing::warn!(%error, "Registration failed");
                            Some(SessionAction::RegistrationFailed {
                                message: auth_failure_message(&error, REGISTER_FAILED_MESSAGE),
                            })
                        },
                    }
                })]
            },

            SessionAction::RegistrationSucceeded(user) if state.registering => {
                state.registering = false;
                state.phase = SessionPhase::Authenticated(user);
                state.modal = AuthModal::Closed;
                smallvec![Effect::None]
            },

            SessionAction::RegistrationFailed { message } if state.registering => {
                state.registering = false;
                state.register_error = Some(message);
                smallvec![Effect::None]
            },

            SessionAction::Logout if state.authenticated() && !state.logging_out => {
                state.logging_out = true;
                state.logout_error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.logout().await {
                        Ok(()) => Some(SessionAction::LoggedOut),
                        Err(error) => {
                            tracing::warn!(%error, "Logout failed");
                            Some(SessionAction::LogoutFailed {
                                message: LOGOUT_FAILED_MESSAGE.to_string(),
                            })
                        },
                    }
                })]
            },

            SessionAction::LoggedOut if state.logging_out => {
                state.logging_out = false;
                state.phase = SessionPhase::Anonymous;
                smallvec![Effect::None]
            },

            SessionAction::LogoutFailed { message } if state.logging_out => {
                state.logging_out = false;
                state.logout_error = Some(message);
                smallvec![Effect::None]
            },

            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{StubShell, admin_user, regular_user};
    use rifa_testing::{ReducerTest, assertions};

    type TestReducer = SessionReducer<StubShell>;

    fn env() -> ShellEnvironment<StubShell> {
        ShellEnvironment::new(StubShell::default())
    }

    #[test]
    fn guard_fails_loudly_before_bootstrap() {
        let state = SessionState::default();
        assert_eq!(state.guard_admin(), Err(GuardError::NotBootstrapped));
    }

    #[test]
    fn guard_is_pending_while_bootstrapping() {
        let mut state = SessionState::default();
        state.phase = SessionPhase::Bootstrapping;
        assert_eq!(state.guard_admin(), Ok(GuardDecision::Pending));
    }

    #[test]
    fn guard_redirects_anonymous_and_non_admin_sessions() {
        let mut state = SessionState::default();
        state.phase = SessionPhase::Anonymous;
        assert_eq!(state.guard_admin(), Ok(GuardDecision::RedirectToLanding));

        state.phase = SessionPhase::Authenticated(regular_user());
        assert_eq!(state.guard_admin(), Ok(GuardDecision::RedirectToLanding));
    }

    #[test]
    fn guard_allows_admins() {
        let mut state = SessionState::default();
        state.phase = SessionPhase::Authenticated(admin_user());
        assert_eq!(state.guard_admin(), Ok(GuardDecision::Allow));
    }

    #[test]
    fn bootstrap_goes_busy_and_fires_a_request() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(SessionAction::Bootstrap)
            .then_state(|state| assert_eq!(state.phase, SessionPhase::Bootstrapping))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn bootstrap_resolves_to_anonymous_without_a_user() {
        let mut state = SessionState::default();
        state.phase = SessionPhase::Bootstrapping;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(SessionAction::BootstrapResolved { user: None })
            .then_state(|state| assert_eq!(state.phase, SessionPhase::Anonymous))
            .run();
    }

    #[test]
    fn malformed_login_email_never_leaves_the_client() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(SessionAction::SubmitLogin {
                email: "nope".to_string(),
                password: "secret".to_string(),
            })
            .then_state(|state| {
                assert!(!state.logging_in);
                assert_eq!(state.login_error.as_deref(), Some(LOGIN_EMAIL_MESSAGE));
            })
            .then_effects(assertions::assert_no_future_effect)
            .run();
    }

    #[test]
    fn login_success_authenticates_and_closes_the_modal() {
        let mut state = SessionState::default();
        state.modal = AuthModal::Login;
        state.logging_in = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(SessionAction::LoginSucceeded(regular_user()))
            .then_state(|state| {
                assert!(state.authenticated());
                assert_eq!(state.modal, AuthModal::Closed);
                assert!(!state.logging_in);
            })
            .run();
    }

    #[test]
    fn invalid_registration_reports_field_errors_without_a_request() {
        let registration = Registration {
            email: "bad".to_string(),
            name: String::new(),
            phone: "abc".to_string(),
            password: "x".to_string(),
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(SessionAction::SubmitRegistration(registration))
            .then_state(|state| {
                assert!(!state.registering);
                assert!(state.registration_errors.email.is_some());
                assert!(state.registration_errors.name.is_some());
                assert!(state.registration_errors.phone.is_some());
                assert!(state.registration_errors.password.is_some());
            })
            .then_effects(assertions::assert_no_future_effect)
            .run();
    }

    #[test]
    fn failed_logout_keeps_the_session_and_is_visible() {
        let mut state = SessionState::default();
        state.phase = SessionPhase::Authenticated(regular_user());
        state.logging_out = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(SessionAction::LogoutFailed {
                message: LOGOUT_FAILED_MESSAGE.to_string(),
            })
            .then_state(|state| {
                assert!(state.authenticated());
                assert_eq!(state.logout_error.as_deref(), Some(LOGOUT_FAILED_MESSAGE));
            })
            .run();
    }
}
