//! The purchase wizard reducer.
//!
//! One reducer owns the whole linear machine:
//!
//! ```text
//! QUANTITY ──next──► PAYMENT ──next──► SUBMIT ──success──► overlay
//!     ▲                │  ▲               │
//!     └─────back───────┘  └─────back──────┘
//! ```
//!
//! Close from any step hides the wizard, resets the step pointer and clears
//! the payment selection; quantity, amounts and chosen numbers survive a
//! reopen. There is no QUANTITY → SUBMIT shortcut.
//!
//! Availability responses are guarded by a generation counter: each advance
//! attempt bumps it, and completions carrying an older generation are
//! discarded, so a check left in flight when the user navigates away can
//! never mutate a step it no longer belongs to.

use crate::actions::WizardAction;
use crate::environment::{PurchaseGateway, TicketsGateway, WizardEnvironment};
use crate::types::{
    MAX_PROOF_BYTES, MonetaryQuote, SlotError, SubmissionState, WizardState, WizardStep,
};
use crate::validate;
use rifa_api::SubmitPurchaseRequest;
use rifa_core::effect::Effect;
use rifa_core::reducer::Reducer;
use rifa_core::{SmallVec, smallvec};

/// General message when the availability check cannot complete
pub const AVAILABILITY_FAILED_MESSAGE: &str =
    "No se pudo verificar los números, intenta nuevamente";

/// Inline message when the submission is rejected
pub const SUBMIT_FAILED_MESSAGE: &str = "Error al enviar los datos, intenta nuevamente";

/// Transient notice for an oversized proof image
pub const PROOF_TOO_LARGE_NOTICE: &str = "El archivo no debe superar los 3 MB.";

/// Required-field message for the transaction reference
pub const REFERENCE_REQUIRED_MESSAGE: &str =
    "Por favor ingresa los últimos 6 dígitos de la transacción";

/// Required-field message for the payment proof
pub const PROOF_REQUIRED_MESSAGE: &str = "Por favor sube una captura del pago realizado";

/// Reducer for the purchase wizard
#[derive(Debug, Clone)]
pub struct WizardReducer<T, P> {
    _phantom: std::marker::PhantomData<(T, P)>,
}

impl<T, P> WizardReducer<T, P> {
    /// Create a new wizard reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T, P> Default for WizardReducer<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> WizardReducer<T, P> {
    /// Hide the wizard and reset to the first step
    ///
    /// Selection and quote survive; locally derived slot errors are
    /// recomputed so stale availability marks do not linger into a reopen.
    fn close_and_reset(state: &mut WizardState) {
        state.open = false;
        state.step = WizardStep::Quantity;
        state.payment = None;
        state.checking_availability = false;
        state.quantity_error = None;
        state.submission = SubmissionState::default();
        state.slot_errors = validate::validate_slots(&state.selection.numbers);
    }

    fn apply_quantity(state: &mut WizardState, quantity: u32) {
        state.selection.set_quantity(quantity, state.limits);
        state.quote = MonetaryQuote::compute(state.selection.quantity, state.prices);
        state.slot_errors = validate::validate_slots(&state.selection.numbers);
        state.quantity_error = None;
    }
}

impl<T, P> Reducer for WizardReducer<T, P>
where
    T: TicketsGateway + Clone + 'static,
    P: PurchaseGateway + Clone + 'static,
{
    type State = WizardState;
    type Action = WizardAction;
    type Environment = WizardEnvironment<T, P>;

    #[allow(clippy::too_many_lines)] // One arm per action keeps the machine in one place
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            WizardAction::Open { prices } => {
                state.open = true;
                state.prices = prices;
                state.quote = MonetaryQuote::compute(state.selection.quantity, prices);
                smallvec![Effect::None]
            },

            WizardAction::Close => {
                Self::close_and_reset(state);
                smallvec![Effect::None]
            },

            // ========== Quantity & ticket selection ==========
            WizardAction::IncrementQuantity
                if state.step == WizardStep::Quantity && !state.checking_availability =>
            {
                Self::apply_quantity(state, state.selection.quantity.saturating_add(1));
                smallvec![Effect::None]
            },

            WizardAction::DecrementQuantity
                if state.step == WizardStep::Quantity && !state.checking_availability =>
            {
                Self::apply_quantity(state, state.selection.quantity.saturating_sub(1));
                smallvec![Effect::None]
            },

            WizardAction::EditSlot { index, raw }
                if state.step == WizardStep::Quantity && !state.checking_availability =>
            {
                if let Some(slot) = state.selection.numbers.get_mut(index) {
                    *slot = validate::normalize_slot(&raw);
                    state.slot_errors = validate::validate_slots(&state.selection.numbers);
                    state.quantity_error = None;
                }
                smallvec![Effect::None]
            },

            WizardAction::QuantityNext
                if state.step == WizardStep::Quantity
                    && !state.checking_availability
                    && state.can_advance_quantity() =>
            {
                state.quantity_error = None;

                let chosen = state.selection.chosen_numbers();
                if chosen.is_empty() {
                    // An empty list means "assign randomly"; nothing to check.
                    state.step = WizardStep::Payment;
                    return smallvec![Effect::None];
                }

                state.checking_availability = true;
                state.availability_generation += 1;
                let generation = state.availability_generation;
                let tickets = env.tickets.clone();

                smallvec![Effect::future(async move {
                    match tickets.check_unavailable(chosen).await {
                        Ok(taken) => Some(WizardAction::AvailabilityChecked { generation, taken }),
                        Err(error) => {
                            tracing::warn!(%error, "Availability check failed");
                            Some(WizardAction::AvailabilityFailed {
                                generation,
                                message: AVAILABILITY_FAILED_MESSAGE.to_string(),
                            })
                        },
                    }
                })]
            },

            WizardAction::AvailabilityChecked { generation, taken }
                if state.step == WizardStep::Quantity
                    && state.checking_availability
                    && generation == state.availability_generation =>
            {
                state.checking_availability = false;

                if taken.is_empty() {
                    state.step = WizardStep::Payment;
                } else {
                    for (index, value) in state.selection.numbers.iter().enumerate() {
                        if !value.is_empty() && taken.contains(value) {
                            state.slot_errors[index] = Some(SlotError::Unavailable);
                        }
                    }
                }
                smallvec![Effect::None]
            },

            WizardAction::AvailabilityFailed {
                generation,
                message,
            } if state.step == WizardStep::Quantity
                && state.checking_availability
                && generation == state.availability_generation =>
            {
                state.checking_availability = false;
                state.quantity_error = Some(message);
                smallvec![Effect::None]
            },

            // ========== Payment method ==========
            WizardAction::SelectPayment(method) if state.step == WizardStep::Payment => {
                state.payment = if state.payment == Some(method) {
                    None
                } else {
                    Some(method)
                };
                smallvec![Effect::None]
            },

            WizardAction::PaymentBack if state.step == WizardStep::Payment => {
                state.step = WizardStep::Quantity;
                smallvec![Effect::None]
            },

            WizardAction::PaymentNext
                if state.step == WizardStep::Payment && state.payment.is_some() =>
            {
                state.step = WizardStep::Submit;
                state.submission = SubmissionState::default();
                smallvec![Effect::None]
            },

            // ========== Confirmation & submission ==========
            WizardAction::EditReference(raw)
                if state.step == WizardStep::Submit
                    && !state.submission.submitting
                    && !state.submission.succeeded =>
            {
                state.submission.transaction_digits = validate::normalize_reference(&raw, 6);
                state.submission.validation_error = None;
                smallvec![Effect::None]
            },

            WizardAction::AttachProof(image)
                if state.step == WizardStep::Submit
                    && !state.submission.submitting
                    && !state.submission.succeeded =>
            {
                if image.size() > MAX_PROOF_BYTES {
                    // The file is not retained; the notice is transient, not
                    // a field error.
                    state.submission.notice = Some(PROOF_TOO_LARGE_NOTICE.to_string());
                } else {
                    state.submission.screenshot = Some(image);
                    state.submission.notice = None;
                    state.submission.validation_error = None;
                }
                smallvec![Effect::None]
            },

            WizardAction::SubmitBack
                if state.step == WizardStep::Submit && !state.submission.submitting =>
            {
                state.step = WizardStep::Payment;
                state.submission = SubmissionState::default();
                smallvec![Effect::None]
            },

            WizardAction::Submit
                if state.step == WizardStep::Submit
                    && !state.submission.submitting
                    && !state.submission.succeeded =>
            {
                if state.submission.transaction_digits.len() != 6 {
                    state.submission.validation_error =
                        Some(REFERENCE_REQUIRED_MESSAGE.to_string());
                    return smallvec![Effect::None];
                }

                let Some(screenshot) = state.submission.screenshot.clone() else {
                    state.submission.validation_error = Some(PROOF_REQUIRED_MESSAGE.to_string());
                    return smallvec![Effect::None];
                };

                let Some(payment_method) = state.payment else {
                    // Unreachable through the machine; ignore rather than
                    // submit a half-built purchase.
                    return smallvec![Effect::None];
                };

                state.submission.submitting = true;
                state.submission.validation_error = None;
                state.submission.submit_error = None;

                let request = SubmitPurchaseRequest {
                    quantity: state.selection.quantity,
                    monto_bs: state.quote.amount_bs.clone(),
                    monto_usd: state.quote.amount_usd.clone(),
                    payment_method,
                    transaction_digits: state.submission.transaction_digits.clone(),
                    selected_numbers: state.selection.chosen_numbers(),
                    payment_screenshot: screenshot,
                };
                let purchases = env.purchases.clone();

                smallvec![Effect::future(async move {
                    match purchases.submit(request).await {
                        Ok(()) => Some(WizardAction::SubmitSucceeded),
                        Err(error) => {
                            tracing::warn!(%error, "Purchase submission rejected");
                            Some(WizardAction::SubmitFailed {
                                message: SUBMIT_FAILED_MESSAGE.to_string(),
                            })
                        },
                    }
                })]
            },

            WizardAction::SubmitSucceeded if state.submission.submitting => {
                state.submission.submitting = false;
                state.submission.succeeded = true;
                smallvec![Effect::None]
            },

            WizardAction::SubmitFailed { message } if state.submission.submitting => {
                state.submission.submitting = false;
                state.submission.submit_error = Some(message);
                smallvec![Effect::None]
            },

            WizardAction::CloseSuccess
                if state.step == WizardStep::Submit && state.submission.succeeded =>
            {
                Self::close_and_reset(state);
                smallvec![Effect::None]
            },

            // Anything else is inert in the current step: a click on a
            // disabled control, a stale completion, a repeated trigger while
            // a request is in flight.
            _ => smallvec![Effect::None],
        }
    }
}
