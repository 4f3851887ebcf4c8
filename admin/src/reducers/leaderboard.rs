//! "Most tickets bought" ranking with previous/next pagination.

use crate::environment::{AdminEnvironment, AdminGateway};
use rifa_api::{ApiError, LeaderboardRow};
use rifa_core::effect::Effect;
use rifa_core::reducer::Reducer;
use rifa_core::{SmallVec, smallvec};

/// General message when the ranking cannot load
pub const LEADERBOARD_FAILED_MESSAGE: &str = "Error cargando datos";

/// State of the leaderboard table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardState {
    /// Current page, 1-based
    pub page: u64,
    /// Rows per page
    pub per_page: u64,
    /// Rows of the current page
    pub rows: Vec<LeaderboardRow>,
    /// Total rows across all pages
    pub total: u64,
    /// A listing request is in flight
    pub loading: bool,
    /// Visible error
    pub error: Option<String>,
    /// The session is gone; the router should leave the dashboard
    pub redirect_to_landing: bool,
}

impl Default for LeaderboardState {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            rows: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            redirect_to_landing: false,
        }
    }
}

impl LeaderboardState {
    /// Number of pages at the current size, never below 1
    #[must_use]
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        std::cmp::max(1, self.total.div_ceil(self.per_page))
    }
}

/// Inputs to the leaderboard reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardAction {
    /// Load (or reload) the current page
    Load,
    /// Advance one page, clamped to the last
    NextPage,
    /// Go back one page, clamped to the first
    PrevPage,
    /// A page arrived
    PageLoaded {
        /// Rows of the page
        rows: Vec<LeaderboardRow>,
        /// Total rows across all pages
        total: u64,
    },
    /// The listing failed
    LoadFailed {
        /// Visible message
        message: String,
    },
    /// A protected call answered 401
    SessionExpired,
}

/// Reducer for the leaderboard table
#[derive(Debug, Clone)]
pub struct LeaderboardReducer<G> {
    _phantom: std::marker::PhantomData<G>,
}

impl<G> LeaderboardReducer<G> {
    /// Create a new leaderboard reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for LeaderboardReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> LeaderboardReducer<G>
where
    G: AdminGateway + Clone + 'static,
{
    fn start_load(
        state: &mut LeaderboardState,
        env: &AdminEnvironment<G>,
    ) -> SmallVec<[Effect<LeaderboardAction>; 4]> {
        state.loading = true;
        state.error = None;

        let gateway = env.gateway.clone();
        let page = state.page;
        let per_page = state.per_page;

        smallvec![Effect::future(async move {
            match gateway.leaderboard(page, per_page).await {
                Ok(page) => Some(LeaderboardAction::PageLoaded {
                    rows: page.items,
                    total: page.total,
                }),
                Err(ApiError::Unauthorized) => Some(LeaderboardAction::SessionExpired),
                Err(error) => {
                    tracing::warn!(%error, "Leaderboard load failed");
                    Some(LeaderboardAction::LoadFailed {
                        message: LEADERBOARD_FAILED_MESSAGE.to_string(),
                    })
                },
            }
        })]
    }
}

impl<G> Reducer for LeaderboardReducer<G>
where
    G: AdminGateway + Clone + 'static,
{
    type State = LeaderboardState;
    type Action = LeaderboardAction;
    type Environment = AdminEnvironment<G>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LeaderboardAction::Load if !state.loading => Self::start_load(state, env),

            LeaderboardAction::NextPage if !state.loading => {
                let next = std::cmp::min(state.page + 1, state.page_count());
                if next == state.page {
                    return smallvec![Effect::None];
                }
                state.page = next;
                Self::start_load(state, env)
            },

            LeaderboardAction::PrevPage if !state.loading => {
                if state.page <= 1 {
                    return smallvec![Effect::None];
                }
                state.page -= 1;
                Self::start_load(state, env)
            },

            LeaderboardAction::PageLoaded { rows, total } if state.loading => {
                state.loading = false;
                state.rows = rows;
                state.total = total;
                smallvec![Effect::None]
            },

            LeaderboardAction::LoadFailed { message } if state.loading => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            LeaderboardAction::SessionExpired => {
                state.loading = false;
                state.redirect_to_landing = true;
                smallvec![Effect::None]
            },

            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::StubAdmin;
    use rifa_api::Buyer;
    use rifa_testing::{ReducerTest, assertions};

    type TestReducer = LeaderboardReducer<StubAdmin>;

    fn env() -> AdminEnvironment<StubAdmin> {
        AdminEnvironment::new(StubAdmin::default())
    }

    fn row(id: i64, quantity: u32) -> LeaderboardRow {
        LeaderboardRow {
            user: Buyer {
                id,
                name: format!("Comprador {id}"),
                email: format!("c{id}@example.com"),
                phone: "04140000000".to_string(),
            },
            quantity,
        }
    }

    #[test]
    fn next_page_clamps_at_the_last_page() {
        let state = LeaderboardState {
            page: 3,
            total: 25,
            ..LeaderboardState::default()
        };
        assert_eq!(state.page_count(), 3);

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(LeaderboardAction::NextPage)
            .then_state(|state| assert_eq!(state.page, 3))
            .then_effects(assertions::assert_no_future_effect)
            .run();
    }

    #[test]
    fn prev_page_clamps_at_the_first_page() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(LeaderboardState::default())
            .when_action(LeaderboardAction::PrevPage)
            .then_state(|state| assert_eq!(state.page, 1))
            .then_effects(assertions::assert_no_future_effect)
            .run();
    }

    #[test]
    fn page_loaded_replaces_rows() {
        let mut state = LeaderboardState::default();
        state.loading = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(LeaderboardAction::PageLoaded {
                rows: vec![row(1, 50), row(2, 30)],
                total: 12,
            })
            .then_state(|state| {
                assert_eq!(state.rows.len(), 2);
                assert_eq!(state.page_count(), 2);
                assert!(!state.loading);
            })
            .run();
    }

    #[test]
    fn session_expiry_requests_a_redirect() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(LeaderboardState::default())
            .when_action(LeaderboardAction::SessionExpired)
            .then_state(|state| assert!(state.redirect_to_landing))
            .run();
    }
}
