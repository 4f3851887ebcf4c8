//! Purchase review: filtered, paginated listing with inline status edits.
//!
//! Status edits are optimistic: the row changes immediately, the PATCH runs
//! as an effect, and a failure rolls the row back *and* surfaces a visible
//! error. A confirmed edit invalidates the page and refetches it.

use crate::environment::{AdminEnvironment, AdminGateway};
use rifa_api::{ApiError, Purchase, PurchaseFilter, PurchaseStatus};
use rifa_core::effect::Effect;
use rifa_core::reducer::Reducer;
use rifa_core::{SmallVec, smallvec};
use std::collections::HashMap;

/// General message when the listing cannot load
pub const LIST_FAILED_MESSAGE: &str = "Error cargando datos";

/// Visible message when a status edit is rejected
pub const STATUS_UPDATE_FAILED_MESSAGE: &str =
    "No se pudo actualizar el estado, intenta nuevamente";

/// State of the purchase review table
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    /// Active status filter
    pub filter: PurchaseFilter,
    /// Current page, 1-based
    pub page: u64,
    /// Rows per page
    pub per_page: u64,
    /// Rows of the current page
    pub purchases: Vec<Purchase>,
    /// Total rows across all pages
    pub total: u64,
    /// A listing request is in flight
    pub loading: bool,
    /// Visible error, listing or mutation
    pub error: Option<String>,
    /// The session is gone; the router should leave the dashboard
    pub redirect_to_landing: bool,
    /// Previous status per purchase with an edit in flight, for rollback
    pub pending_edits: HashMap<i64, PurchaseStatus>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            filter: PurchaseFilter::All,
            page: 1,
            per_page: 10,
            purchases: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            redirect_to_landing: false,
            pending_edits: HashMap::new(),
        }
    }
}

impl ReviewState {
    /// Number of pages at the current size, never below 1
    #[must_use]
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        std::cmp::max(1, self.total.div_ceil(self.per_page))
    }
}

/// Inputs to the review reducer
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAction {
    /// Load (or reload) the current page
    Load,
    /// Switch the status filter; resets to page 1 and reloads
    SetFilter(PurchaseFilter),
    /// Jump to a page; clamped to at least 1
    GoToPage(u64),
    /// A page arrived
    PageLoaded {
        /// Rows of the page
        purchases: Vec<Purchase>,
        /// Total rows across all pages
        total: u64,
    },
    /// The listing failed
    LoadFailed {
        /// Visible message
        message: String,
    },
    /// Change one purchase's status (optimistic)
    EditStatus {
        /// Which purchase
        id: i64,
        /// New review status
        status: PurchaseStatus,
    },
    /// The backend accepted a status edit
    EditConfirmed {
        /// Which purchase
        id: i64,
    },
    /// The backend rejected a status edit
    EditFailed {
        /// Which purchase
        id: i64,
        /// Visible message
        message: String,
    },
    /// A protected call answered 401
    SessionExpired,
}

/// Reducer for the purchase review table
#[derive(Debug, Clone)]
pub struct ReviewReducer<G> {
    _phantom: std::marker::PhantomData<G>,
}

impl<G> ReviewReducer<G> {
    /// Create a new review reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for ReviewReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> ReviewReducer<G>
where
    G: AdminGateway + Clone + 'static,
{
    fn load_effect(state: &ReviewState, env: &AdminEnvironment<G>) -> Effect<ReviewAction> {
        let gateway = env.gateway.clone();
        let filter = state.filter;
        let page = state.page;
        let per_page = state.per_page;

        Effect::future(async move {
            match gateway.list_purchases(filter, page, per_page).await {
                Ok(page) => Some(ReviewAction::PageLoaded {
                    purchases: page.items,
                    total: page.total,
                }),
                Err(ApiError::Unauthorized) => Some(ReviewAction::SessionExpired),
                Err(error) => {
                    tracing::warn!(%error, "Purchase listing failed");
                    Some(ReviewAction::LoadFailed {
                        message: LIST_FAILED_MESSAGE.to_string(),
                    })
                },
            }
        })
    }

    fn start_load(
        state: &mut ReviewState,
        env: &AdminEnvironment<G>,
    ) -> SmallVec<[Effect<ReviewAction>; 4]> {
        state.loading = true;
        state.error = None;
        smallvec![Self::load_effect(state, env)]
    }
}

impl<G> Reducer for ReviewReducer<G>
where
    G: AdminGateway + Clone + 'static,
{
    type State = ReviewState;
    type Action = ReviewAction;
    type Environment = AdminEnvironment<G>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ReviewAction::Load if !state.loading => Self::start_load(state, env),

            ReviewAction::SetFilter(filter) if !state.loading => {
                state.filter = filter;
                state.page = 1;
                Self::start_load(state, env)
            },

            ReviewAction::GoToPage(page) if !state.loading => {
                state.page = std::cmp::max(1, page);
                Self::start_load(state, env)
            },

            ReviewAction::PageLoaded { purchases, total } if state.loading => {
                state.loading = false;
                state.purchases = purchases;
                state.total = total;
                smallvec![Effect::None]
            },

            ReviewAction::LoadFailed { message } if state.loading => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            ReviewAction::EditStatus { id, status }
                if !state.pending_edits.contains_key(&id) =>
            {
                let Some(purchase) = state.purchases.iter_mut().find(|p| p.id == id) else {
                    return smallvec![Effect::None];
                };
                if purchase.status == status {
                    return smallvec![Effect::None];
                }

                state.pending_edits.insert(id, purchase.status);
                purchase.status = status;
                state.error = None;

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.update_status(id, status).await {
                        Ok(()) => Some(ReviewAction::EditConfirmed { id }),
                        Err(ApiError::Unauthorized) => Some(ReviewAction::SessionExpired),
                        Err(error) => {
                            tracing::warn!(%error, purchase_id = id, "Status update failed");
                            Some(ReviewAction::EditFailed {
                                id,
                                message: STATUS_UPDATE_FAILED_MESSAGE.to_string(),
                            })
                        },
                    }
                })]
            },

            ReviewAction::EditConfirmed { id } => {
                state.pending_edits.remove(&id);
                // Invalidate: the page may have left the active filter, so
                // refetch rather than trust the optimistic row.
                Self::start_load(state, env)
            },

            ReviewAction::EditFailed { id, message } => {
                if let Some(previous) = state.pending_edits.remove(&id) {
                    if let Some(purchase) = state.purchases.iter_mut().find(|p| p.id == id) {
                        purchase.status = previous;
                    }
                }
                state.error = Some(message);
                smallvec![Effect::None]
            },

            ReviewAction::SessionExpired => {
                state.loading = false;
                state.pending_edits.clear();
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
    use crate::mocks::{StubAdmin, sample_purchase};
    use rifa_testing::{ReducerTest, assertions};

    type TestReducer = ReviewReducer<StubAdmin>;

    fn env() -> AdminEnvironment<StubAdmin> {
        AdminEnvironment::new(StubAdmin::default())
    }

    fn loaded_state() -> ReviewState {
        ReviewState {
            purchases: vec![
                sample_purchase(1, PurchaseStatus::Pending),
                sample_purchase(2, PurchaseStatus::Pending),
            ],
            total: 2,
            ..ReviewState::default()
        }
    }

    #[test]
    fn load_goes_busy_and_fires_a_request() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(ReviewState::default())
            .when_action(ReviewAction::Load)
            .then_state(|state| assert!(state.loading))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn load_is_inert_while_in_flight() {
        let mut state = ReviewState::default();
        state.loading = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ReviewAction::Load)
            .then_effects(assertions::assert_no_future_effect)
            .run();
    }

    #[test]
    fn set_filter_resets_to_first_page() {
        let mut state = loaded_state();
        state.page = 4;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ReviewAction::SetFilter(PurchaseFilter::Status(
                PurchaseStatus::Verified,
            )))
            .then_state(|state| {
                assert_eq!(state.page, 1);
                assert!(state.loading);
            })
            .run();
    }

    #[test]
    fn page_loaded_replaces_rows_and_total() {
        let mut state = ReviewState::default();
        state.loading = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ReviewAction::PageLoaded {
                purchases: vec![sample_purchase(5, PurchaseStatus::Verified)],
                total: 31,
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.purchases.len(), 1);
                assert_eq!(state.total, 31);
                assert_eq!(state.page_count(), 4);
            })
            .run();
    }

    #[test]
    fn edit_status_is_optimistic() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(loaded_state())
            .when_action(ReviewAction::EditStatus {
                id: 1,
                status: PurchaseStatus::Verified,
            })
            .then_state(|state| {
                assert_eq!(state.purchases[0].status, PurchaseStatus::Verified);
                assert_eq!(
                    state.pending_edits.get(&1),
                    Some(&PurchaseStatus::Pending)
                );
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn failed_edit_rolls_back_and_is_visible() {
        let mut state = loaded_state();
        state.purchases[0].status = PurchaseStatus::Verified;
        state.pending_edits.insert(1, PurchaseStatus::Pending);

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ReviewAction::EditFailed {
                id: 1,
                message: STATUS_UPDATE_FAILED_MESSAGE.to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.purchases[0].status, PurchaseStatus::Pending);
                assert!(state.pending_edits.is_empty());
                assert_eq!(state.error.as_deref(), Some(STATUS_UPDATE_FAILED_MESSAGE));
            })
            .run();
    }

    #[test]
    fn confirmed_edit_refetches_the_page() {
        let mut state = loaded_state();
        state.pending_edits.insert(1, PurchaseStatus::Pending);

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ReviewAction::EditConfirmed { id: 1 })
            .then_state(|state| {
                assert!(state.pending_edits.is_empty());
                assert!(state.loading);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn session_expiry_requests_a_redirect() {
        let mut state = ReviewState::default();
        state.loading = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ReviewAction::SessionExpired)
            .then_state(|state| {
                assert!(state.redirect_to_landing);
                assert!(!state.loading);
            })
            .run();
    }

    #[test]
    fn second_edit_on_same_purchase_is_inert_while_pending() {
        let mut state = loaded_state();
        state.purchases[0].status = PurchaseStatus::Verified;
        state.pending_edits.insert(1, PurchaseStatus::Pending);

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(ReviewAction::EditStatus {
                id: 1,
                status: PurchaseStatus::Cancelled,
            })
            .then_state(|state| {
                assert_eq!(state.purchases[0].status, PurchaseStatus::Verified);
            })
            .then_effects(assertions::assert_no_future_effect)
            .run();
    }
}
