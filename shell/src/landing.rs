//! Landing page data: prices with config fallbacks, percent sold, and the
//! "my numbers" modal.

use crate::config::AppConfig;
use crate::environment::{AuthGateway, LandingGateway, ShellEnvironment};
use rifa_api::{ApiError, Prices};
use rifa_core::effect::Effect;
use rifa_core::reducer::Reducer;
use rifa_core::{SmallVec, smallvec};

/// Visible message when the owned-tickets count cannot load
pub const TICKET_COUNT_FAILED_MESSAGE: &str = "Error al cargar tickets";

/// State of the "my numbers" modal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketsModalState {
    /// The modal is showing
    pub open: bool,
    /// The count is loading
    pub loading: bool,
    /// How many tickets the user holds
    pub count: Option<u32>,
    /// Visible error
    pub error: Option<String>,
}

/// Landing page state
#[derive(Debug, Clone, PartialEq)]
pub struct LandingState {
    /// Unit prices; starts at the config fallbacks
    pub prices: Prices,
    /// The backend confirmed the prices
    pub prices_loaded: bool,
    /// A price fetch is in flight
    pub loading_prices: bool,
    /// Percent of tickets sold, 0-100
    pub percent_sold: f64,
    /// A percentage fetch is in flight
    pub loading_percentage: bool,
    /// The "my numbers" modal
    pub tickets_modal: TicketsModalState,
}

impl LandingState {
    /// Fresh landing state seeded from configuration
    #[must_use]
    pub const fn new(config: &AppConfig) -> Self {
        Self {
            prices: config.fallback_prices,
            prices_loaded: false,
            loading_prices: false,
            percent_sold: 0.0,
            loading_percentage: false,
            tickets_modal: TicketsModalState {
                open: false,
                loading: false,
                count: None,
                error: None,
            },
        }
    }
}

impl Default for LandingState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

/// Inputs to the landing reducer
#[derive(Debug, Clone, PartialEq)]
pub enum LandingAction {
    /// Fetch the unit prices
    LoadPrices,
    /// Prices arrived
    PricesLoaded(Prices),
    /// The price fetch failed; the config fallbacks stand
    PricesUnavailable,
    /// Fetch the percent sold
    LoadPercentage,
    /// Percent sold arrived
    PercentageLoaded(f64),
    /// The percentage fetch failed
    PercentageUnavailable,
    /// Show the "my numbers" modal and fetch the count
    OpenTicketsModal,
    /// Hide the "my numbers" modal
    CloseTicketsModal,
    /// The owned-tickets count arrived
    TicketCountLoaded(u32),
    /// The owned-tickets count failed to load
    TicketCountFailed {
        /// Visible message
        message: String,
    },
}

/// Reducer for the landing page data
#[derive(Debug, Clone)]
pub struct LandingReducer<G> {
    _phantom: std::marker::PhantomData<G>,
}

impl<G> LandingReducer<G> {
    /// Create a new landing reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for LandingReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Reducer for LandingReducer<G>
where
    G: AuthGateway + LandingGateway + Clone + 'static,
{
    type State = LandingState;
    type Action = LandingAction;
    type Environment = ShellEnvironment<G>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LandingAction::LoadPrices if !state.loading_prices => {
                state.loading_prices = true;

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.prices().await {
                        Ok(prices) => Some(LandingAction::PricesLoaded(prices)),
                        Err(error) => {
                            tracing::warn!(%error, "Price fetch failed, keeping config fallbacks");
                            Some(LandingAction::PricesUnavailable)
                        },
                    }
                })]
            },

            LandingAction::PricesLoaded(prices) if state.loading_prices => {
                state.loading_prices = false;
                state.prices = prices;
                state.prices_loaded = true;
                smallvec![Effect::None]
            },

            LandingAction::PricesUnavailable if state.loading_prices => {
                state.loading_prices = false;
                smallvec![Effect::None]
            },

            LandingAction::LoadPercentage if !state.loading_percentage => {
                state.loading_percentage = true;

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.sold_percentage().await {
                        Ok(sold) => Some(LandingAction::PercentageLoaded(sold)),
                        Err(error) => {
                            tracing::warn!(%error, "Percentage fetch failed");
                            Some(LandingAction::PercentageUnavailable)
                        },
                    }
                })]
            },

            LandingAction::PercentageLoaded(sold) if state.loading_percentage => {
                state.loading_percentage = false;
                state.percent_sold = sold.clamp(0.0, 100.0);
                smallvec![Effect::None]
            },

            LandingAction::PercentageUnavailable if state.loading_percentage => {
                state.loading_percentage = false;
                smallvec![Effect::None]
            },

            LandingAction::OpenTicketsModal if !state.tickets_modal.open => {
                state.tickets_modal = TicketsModalState {
                    open: true,
                    loading: true,
                    count: None,
                    error: None,
                };

                let gateway = env.gateway.clone();
                smallvec![Effect::future(async move {
                    match gateway.user_ticket_count().await {
                        Ok(count) => Some(LandingAction::TicketCountLoaded(count)),
                        Err(error) => {
                            tracing::warn!(%error, "Owned-tickets count failed");
                            Some(LandingAction::TicketCountFailed {
                                message: TICKET_COUNT_FAILED_MESSAGE.to_string(),
                            })
                        },
                    }
                })]
            },

            LandingAction::CloseTicketsModal => {
                state.tickets_modal = TicketsModalState::default();
                smallvec![Effect::None]
            },

            LandingAction::TicketCountLoaded(count) if state.tickets_modal.loading => {
                state.tickets_modal.loading = false;
                state.tickets_modal.count = Some(count);
                smallvec![Effect::None]
            },

            LandingAction::TicketCountFailed { message } if state.tickets_modal.loading => {
                state.tickets_modal.loading = false;
                state.tickets_modal.error = Some(message);
                smallvec![Effect::None]
            },

            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::StubShell;
    use rifa_testing::{ReducerTest, assertions};

    type TestReducer = LandingReducer<StubShell>;

    fn env() -> ShellEnvironment<StubShell> {
        ShellEnvironment::new(StubShell::default())
    }

    fn config_with_fallbacks() -> AppConfig {
        AppConfig {
            fallback_prices: Prices {
                monto_bs: 350.0,
                monto_usd: 1.0,
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn state_starts_at_the_config_fallbacks() {
        let state = LandingState::new(&config_with_fallbacks());
        assert_eq!(state.prices.monto_bs, 350.0);
        assert!(!state.prices_loaded);
    }

    #[test]
    fn failed_price_fetch_keeps_the_fallbacks() {
        let mut state = LandingState::new(&config_with_fallbacks());
        state.loading_prices = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(LandingAction::PricesUnavailable)
            .then_state(|state| {
                assert_eq!(state.prices.monto_bs, 350.0);
                assert!(!state.prices_loaded);
                assert!(!state.loading_prices);
            })
            .run();
    }

    #[test]
    fn loaded_prices_replace_the_fallbacks() {
        let mut state = LandingState::new(&config_with_fallbacks());
        state.loading_prices = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(LandingAction::PricesLoaded(Prices {
                monto_bs: 400.0,
                monto_usd: 1.2,
            }))
            .then_state(|state| {
                assert_eq!(state.prices.monto_bs, 400.0);
                assert!(state.prices_loaded);
            })
            .run();
    }

    #[test]
    fn percentage_is_clamped_to_the_bar_range() {
        let mut state = LandingState::default();
        state.loading_percentage = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(LandingAction::PercentageLoaded(140.0))
            .then_state(|state| assert_eq!(state.percent_sold, 100.0))
            .run();
    }

    #[test]
    fn opening_the_tickets_modal_fetches_the_count() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(LandingState::default())
            .when_action(LandingAction::OpenTicketsModal)
            .then_state(|state| {
                assert!(state.tickets_modal.open);
                assert!(state.tickets_modal.loading);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn failed_count_is_visible_in_the_modal() {
        let mut state = LandingState::default();
        state.tickets_modal.open = true;
        state.tickets_modal.loading = true;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(LandingAction::TicketCountFailed {
                message: TICKET_COUNT_FAILED_MESSAGE.to_string(),
            })
            .then_state(|state| {
                assert_eq!(
                    state.tickets_modal.error.as_deref(),
                    Some(TICKET_COUNT_FAILED_MESSAGE)
                );
                assert!(!state.tickets_modal.loading);
            })
            .run();
    }
}
