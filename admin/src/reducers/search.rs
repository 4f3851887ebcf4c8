//! Owner lookup for a single ticket number.
//!
//! The query is validated client-side (1-4 digits, 0-9999) before any
//! request leaves the machine.

use crate::environment::{AdminEnvironment, AdminGateway};
use rifa_api::{ApiError, NumberOwnership};
use rifa_core::effect::Effect;
use rifa_core::reducer::Reducer;
use rifa_core::{SmallVec, smallvec};

/// General message when the lookup fails
pub const SEARCH_FAILED_MESSAGE: &str = "Error buscando el número, intenta nuevamente";

/// Visible hint for a malformed query
pub const INVALID_QUERY_MESSAGE: &str = "Ingresa un número válido entre 0 y 9999.";

/// Whether a query may be submitted: 1-4 digits, i.e. 0-9999
#[must_use]
pub fn is_valid_query(query: &str) -> bool {
    let trimmed = query.trim();
    !trimmed.is_empty() && trimmed.len() <= 4 && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// State of the number searcher
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    /// Raw query text
    pub query: String,
    /// A lookup is in flight
    pub searching: bool,
    /// Result of the last lookup; `None` when the number is unowned
    pub result: Option<NumberOwnership>,
    /// At least one lookup has completed
    pub searched: bool,
    /// Visible error
    pub error: Option<String>,
    /// The session is gone; the router should leave the dashboard
    pub redirect_to_landing: bool,
}

impl SearchState {
    /// Whether the current query may be submitted
    #[must_use]
    pub fn query_is_valid(&self) -> bool {
        is_valid_query(&self.query)
    }
}

/// Inputs to the search reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Replace the query text
    EditQuery(String),
    /// Run the lookup for the current query
    Search,
    /// The lookup finished
    SearchLoaded {
        /// Owner and their numbers, or `None` for an unowned number
        result: Option<NumberOwnership>,
    },
    /// The lookup failed
    SearchFailed {
        /// Visible message
        message: String,
    },
    /// A protected call answered 401
    SessionExpired,
}

/// Reducer for the number searcher
#[derive(Debug, Clone)]
pub struct SearchReducer<G> {
    _phantom: std::marker::PhantomData<G>,
}

impl<G> SearchReducer<G> {
    /// Create a new search reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for SearchReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Reducer for SearchReducer<G>
where
    G: AdminGateway + Clone + 'static,
{
    type State = SearchState;
    type Action = SearchAction;
    type Environment = AdminEnvironment<G>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SearchAction::EditQuery(query) => {
                state.error = if query.is_empty() || is_valid_query(&query) {
                    None
                } else {
                    Some(INVALID_QUERY_MESSAGE.to_string())
                };
                state.query = query;
                smallvec![Effect::None]
            },

            SearchAction::Search if !state.searching && state.query_is_valid() => {
                state.searching = true;
                state.error = None;

                let gateway = env.gateway.clone();
                let number = state.query.trim().to_string();

                smallvec![Effect::future(async move {
                    match gateway.search_by_number(number).await {
                        Ok(result) => Some(SearchAction::SearchLoaded { result }),
                        Err(ApiError::Unauthorized) => Some(SearchAction::SessionExpired),
                        Err(error) => {
                            tracing::warn!(%error, "Number search failed");
                            Some(SearchAction::SearchFailed {
                                message: SEARCH_FAILED_MESSAGE.to_string(),
                            })
                        },
                    }
                })]
            },

            SearchAction::SearchLoaded { result } if state.searching => {
                state.searching = false;
                state.searched = true;
                state.result = result;
                smallvec![Effect::None]
            },

            SearchAction::SearchFailed { message } if state.searching => {
                state.searching = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            SearchAction::SessionExpired => {
                state.searching = false;
                state.redirect_to_landing = true;
                smallvec![Effect::None]
            },

            _ => smallvec![Effect::None],
        }
    }
}
