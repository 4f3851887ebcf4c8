//! Price management: load, stage edits, confirm, save, refetch.
//!
//! Saving runs behind an explicit confirm step, mirroring the dashboard's
//! "¿Confirmar cambios?" dialog. A successful save invalidates the cached
//! prices and refetches them.

use crate::environment::{AdminEnvironment, AdminGateway};
use rifa_api::{ApiError, Prices};
use rifa_core::effect::Effect;
use rifa_core::reducer::Reducer;
use rifa_core::{SmallVec, smallvec};

/// General message when prices cannot load
pub const PRICES_LOAD_FAILED_MESSAGE: &str = "No se pudo cargar los precios";

/// Visible message when the update is rejected
pub const PRICES_SAVE_FAILED_MESSAGE: &str = "Error al actualizar precios, intenta nuevamente";

/// Parse a staged price: a finite, non-negative decimal
#[must_use]
pub fn parse_price(draft: &str) -> Option<f64> {
    let value: f64 = draft.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// State of the price management form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceAdminState {
    /// Last loaded prices
    pub prices: Option<Prices>,
    /// Staged bolívar price text
    pub draft_bs: String,
    /// Staged dollar price text
    pub draft_usd: String,
    /// A load is in flight
    pub loading: bool,
    /// A save is in flight
    pub saving: bool,
    /// The confirm dialog is showing
    pub confirming: bool,
    /// The last save succeeded
    pub saved: bool,
    /// Visible error, load or save
    pub error: Option<String>,
    /// The session is gone; the router should leave the dashboard
    pub redirect_to_landing: bool,
}

impl PriceAdminState {
    /// Whether both staged prices parse
    #[must_use]
    pub fn drafts_are_valid(&self) -> bool {
        parse_price(&self.draft_bs).is_some() && parse_price(&self.draft_usd).is_some()
    }
}

/// Inputs to the price management reducer
#[derive(Debug, Clone, PartialEq)]
pub enum PriceAdminAction {
    /// Load (or reload) the current prices
    Load,
    /// Prices arrived; drafts reset to them
    Loaded(Prices),
    /// The load failed
    LoadFailed {
        /// Visible message
        message: String,
    },
    /// Replace the staged bolívar price
    EditBs(String),
    /// Replace the staged dollar price
    EditUsd(String),
    /// Open the confirm dialog
    Confirm,
    /// Dismiss the confirm dialog
    CancelConfirm,
    /// Persist the staged prices (only from the confirm dialog)
    Save,
    /// The backend accepted the new prices
    Saved,
    /// The backend rejected the new prices
    SaveFailed {
        /// Visible message
        message: String,
    },
    /// A protected call answered 401
    SessionExpired,
}

/// Reducer for the price management form
#[derive(Debug, Clone)]
pub struct PriceAdminReducer<G> {
    _phantom: std::marker::PhantomData<G>,
}

impl<G> PriceAdminReducer<G> {
    /// Create a new price management reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for PriceAdminReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> PriceAdminReducer<G>
where
    G: AdminGateway + Clone + 'static,
{
    fn start_load(
        state: &mut PriceAdminState,
        env: &AdminEnvironment<G>,
    ) -> SmallVec<[Effect<PriceAdminAction>; 4]> {
        state.loading = true;
        state.error = None;

        let gateway = env.gateway.clone();
        smallvec![Effect::future(async move {
            match gateway.prices().await {
                Ok(prices) => Some(PriceAdminAction::Loaded(prices)),
                Err(ApiError::Unauthorized) => Some(PriceAdminAction::SessionExpired),
                Err(error) => {
                    tracing::warn!(%error, "Price load failed");
                    Some(PriceAdminAction::LoadFailed {
                        message: PRICES_LOAD_FAILED_MESSAGE.to_string(),
                    })
                },
            }
        })]
    }
}

impl<G> Reducer for PriceAdminReducer<G>
where
    G: AdminGateway + Clone + 'static,
{
    type State = PriceAdminState;
    type Action = PriceAdminAction;
    type Environment = AdminEnvironment<G>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PriceAdminAction::Load if !state.loading && !state.saving => {
                Self::start_load(state, env)
            },

            PriceAdminAction::Loaded(prices) if state.loading => {
                state.loading = false;
                state.prices = Some(prices);
                state.draft_bs = prices.monto_bs.to_string();
                state.draft_usd = prices.monto_usd.to_string();
                smallvec![Effect::None]
            },

            PriceAdminAction::LoadFailed { message } if state.loading => {
                state.loading = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            PriceAdminAction::EditBs(draft) if !state.saving => {
                state.draft_bs = draft;
                state.saved = false;
                smallvec![Effect::None]
            },

            PriceAdminAction::EditUsd(draft) if !state.saving => {
                state.draft_usd = draft;
                state.saved = false;
                smallvec![Effect::None]
            },

            PriceAdminAction::Confirm if !state.saving && state.drafts_are_valid() => {
                state.confirming = true;
                smallvec![Effect::None]
            },

            PriceAdminAction::CancelConfirm => {
                state.confirming = false;
                smallvec![Effect::None]
            },

            PriceAdminAction::Save if state.confirming && !state.saving => {
                let (Some(monto_bs), Some(monto_usd)) =
                    (parse_price(&state.draft_bs), parse_price(&state.draft_usd))
                else {
                    state.confirming = false;
                    return smallvec![Effect::None];
                };

                state.confirming = false;
                state.saving = true;
                state.saved = false;
                state.error = None;

                let gateway = env.gateway.clone();
                let prices = Prices { monto_bs, monto_usd };

                smallvec![Effect::future(async move {
                    match gateway.update_prices(prices).await {
                        Ok(()) => Some(PriceAdminAction::Saved),
                        Err(ApiError::Unauthorized) => Some(PriceAdminAction::SessionExpired),
                        Err(error) => {
                            tracing::warn!(%error, "Price update failed");
                            Some(PriceAdminAction::SaveFailed {
                                message: PRICES_SAVE_FAILED_MESSAGE.to_string(),
                            })
                        },
                    }
                })]
            },

            PriceAdminAction::Saved if state.saving => {
                state.saving = false;
                state.saved = true;
                // Invalidate the cached prices and refetch.
                Self::start_load(state, env)
            },

            PriceAdminAction::SaveFailed { message } if state.saving => {
                state.saving = false;
                state.error = Some(message);
                smallvec![Effect::None]
            },

            PriceAdminAction::SessionExpired => {
                state.loading = false;
                state.saving = false;
                state.redirect_to_landing = true;
                smallvec![Effect::None]
            },

            _ => smallvec![Effect::None],
        }
    }
}
