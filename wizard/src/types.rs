//! Domain types for the purchase wizard.

use crate::validate;
use rifa_api::{PaymentMethod, Prices, ProofImage};
use serde::{Deserialize, Serialize};

/// Largest accepted payment proof, in bytes (3 MiB)
pub const MAX_PROOF_BYTES: u64 = 3 * 1024 * 1024;

/// Inclusive bounds on how many tickets one purchase may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketLimits {
    /// Fewest tickets per purchase
    pub min: u32,
    /// Most tickets per purchase
    pub max: u32,
}

impl Default for TicketLimits {
    fn default() -> Self {
        Self { min: 2, max: 500 }
    }
}

impl TicketLimits {
    /// Clamp a candidate quantity into these bounds
    #[must_use]
    pub const fn clamp(&self, quantity: u32) -> u32 {
        if quantity < self.min {
            self.min
        } else if quantity > self.max {
            self.max
        } else {
            quantity
        }
    }
}

/// The three steps of the purchase flow
///
/// Linear: each step is reachable only from its immediate neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WizardStep {
    /// Pick quantity and, optionally, explicit ticket numbers
    #[default]
    Quantity,
    /// Pick the payment channel
    Payment,
    /// Confirm and submit proof of payment
    Submit,
}

/// Why a ticket-number slot is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotError {
    /// Not a number
    Invalid,
    /// Outside the 0-9999 ticket range
    OutOfRange,
    /// Equal to an earlier non-empty slot
    Repeated,
    /// Backend reports the number as already taken
    Unavailable,
}

impl SlotError {
    /// User-facing message for this error
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::OutOfRange => "0-9999",
            Self::Repeated => "repeated",
            Self::Unavailable => "not available",
        }
    }
}

/// Desired ticket count plus the optional explicit numbers
///
/// Invariant: `numbers.len() == quantity as usize`. Empty slots mean "assign
/// randomly"; a slot is either `""` or a zero-stripped decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSelection {
    /// How many tickets to buy
    pub quantity: u32,
    /// One slot per ticket
    pub numbers: Vec<String>,
}

impl TicketSelection {
    /// Fresh selection at the minimum quantity, all slots empty
    #[must_use]
    pub fn new(limits: TicketLimits) -> Self {
        Self {
            quantity: limits.min,
            numbers: vec![String::new(); limits.min as usize],
        }
    }

    /// Clamp to `limits` and resize the slot vector, truncating or padding
    /// with empty slots
    pub fn set_quantity(&mut self, quantity: u32, limits: TicketLimits) {
        self.quantity = limits.clamp(quantity);
        self.numbers.resize(self.quantity as usize, String::new());
    }

    /// The non-empty slot values, in slot order
    #[must_use]
    pub fn chosen_numbers(&self) -> Vec<String> {
        self.numbers.iter().filter(|n| !n.is_empty()).cloned().collect()
    }
}

impl Default for TicketSelection {
    fn default() -> Self {
        Self::new(TicketLimits::default())
    }
}

/// Monetary totals for the current selection, formatted for display
///
/// Pure function of (quantity, unit prices); recomputed on every change,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonetaryQuote {
    /// Total in bolívares, 2 decimal places
    pub amount_bs: String,
    /// Total in US dollars, 2 decimal places
    pub amount_usd: String,
}

impl MonetaryQuote {
    /// Compute the quote for `quantity` tickets at the given unit prices
    #[must_use]
    pub fn compute(quantity: u32, prices: Prices) -> Self {
        Self {
            amount_bs: validate::format_amount(quantity, prices.monto_bs),
            amount_usd: validate::format_amount(quantity, prices.monto_usd),
        }
    }
}

/// Fixed payment instructions shown on the confirmation step
///
/// Reference data keyed by channel; `(label, value)` pairs in display order.
#[must_use]
pub const fn payment_instructions(method: PaymentMethod) -> &'static [(&'static str, &'static str)] {
    match method {
        PaymentMethod::PagoMovil => &[
            ("Cuenta", "BANESCO 0134"),
            ("Cédula", "30606459"),
            ("Teléfono", "04141551801"),
        ],
        PaymentMethod::Zelle => &[("Teléfono", "3802389306"), ("Nombre", "Vicente Méndez")],
    }
}

/// Local state of the confirmation step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionState {
    /// Transaction reference, at most 6 digits
    pub transaction_digits: String,
    /// Payment proof, held in memory until submitted or replaced
    pub screenshot: Option<ProofImage>,
    /// Transient notice (oversized file), not a field error
    pub notice: Option<String>,
    /// Required-field validation message blocking submit
    pub validation_error: Option<String>,
    /// Inline error from a rejected submission
    pub submit_error: Option<String>,
    /// A submission request is in flight
    pub submitting: bool,
    /// The purchase was recorded; success overlay is showing
    pub succeeded: bool,
}

impl SubmissionState {
    /// Whether both required inputs are present and well-formed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.transaction_digits.len() == 6 && self.screenshot.is_some()
    }
}

/// The whole wizard: step pointer plus accumulated fields
///
/// Owned exclusively by the wizard store; every mutation goes through the
/// reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    /// Whether the wizard is showing
    pub open: bool,
    /// Current step
    pub step: WizardStep,
    /// Quantity bounds
    pub limits: TicketLimits,
    /// Unit prices used for the quote
    pub prices: Prices,
    /// Quantity and chosen numbers
    pub selection: TicketSelection,
    /// Display totals for the current selection
    pub quote: MonetaryQuote,
    /// Per-slot validation results, parallel to `selection.numbers`
    pub slot_errors: Vec<Option<SlotError>>,
    /// An availability check is in flight; all controls disabled
    pub checking_availability: bool,
    /// Generation counter guarding against stale availability responses
    pub availability_generation: u64,
    /// General error from a failed availability check
    pub quantity_error: Option<String>,
    /// Selected payment channel, if any
    pub payment: Option<PaymentMethod>,
    /// Confirmation step state
    pub submission: SubmissionState,
}

impl WizardState {
    /// Fresh, closed wizard with the given bounds and prices
    #[must_use]
    pub fn new(limits: TicketLimits, prices: Prices) -> Self {
        let selection = TicketSelection::new(limits);
        let quote = MonetaryQuote::compute(selection.quantity, prices);
        let slots = selection.numbers.len();
        Self {
            open: false,
            step: WizardStep::Quantity,
            limits,
            prices,
            selection,
            quote,
            slot_errors: vec![None; slots],
            checking_availability: false,
            availability_generation: 0,
            quantity_error: None,
            payment: None,
            submission: SubmissionState::default(),
        }
    }

    /// Whether the quantity step may advance: one slot per ticket and no
    /// slot errors
    #[must_use]
    pub fn can_advance_quantity(&self) -> bool {
        self.selection.numbers.len() == self.selection.quantity as usize
            && self.slot_errors.iter().all(Option::is_none)
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(
            TicketLimits::default(),
            Prices {
                monto_bs: 0.0,
                monto_usd: 0.0,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_clamp() {
        let limits = TicketLimits { min: 2, max: 500 };
        assert_eq!(limits.clamp(1), 2);
        assert_eq!(limits.clamp(2), 2);
        assert_eq!(limits.clamp(300), 300);
        assert_eq!(limits.clamp(501), 500);
    }

    #[test]
    fn selection_starts_at_min_with_empty_slots() {
        let selection = TicketSelection::new(TicketLimits::default());
        assert_eq!(selection.quantity, 2);
        assert_eq!(selection.numbers, vec![String::new(), String::new()]);
    }

    #[test]
    fn set_quantity_resizes_slots() {
        let limits = TicketLimits::default();
        let mut selection = TicketSelection::new(limits);
        selection.numbers[0] = "7".to_string();

        selection.set_quantity(4, limits);
        assert_eq!(selection.numbers.len(), 4);
        assert_eq!(selection.numbers[0], "7");

        selection.set_quantity(2, limits);
        assert_eq!(selection.numbers.len(), 2);
        assert_eq!(selection.numbers[0], "7");
    }

    #[test]
    fn chosen_numbers_skips_empty_slots() {
        let mut selection = TicketSelection::new(TicketLimits { min: 3, max: 10 });
        selection.numbers[1] = "42".to_string();
        assert_eq!(selection.chosen_numbers(), vec!["42".to_string()]);
    }

    #[test]
    fn quote_formats_two_decimals() {
        let quote = MonetaryQuote::compute(
            2,
            Prices {
                monto_bs: 100.0,
                monto_usd: 10.0,
            },
        );
        assert_eq!(quote.amount_bs, "200.00");
        assert_eq!(quote.amount_usd, "20.00");
    }

    #[test]
    fn instructions_cover_both_channels() {
        assert_eq!(payment_instructions(PaymentMethod::PagoMovil).len(), 3);
        assert_eq!(payment_instructions(PaymentMethod::Zelle).len(), 2);
    }

    #[test]
    fn submission_completeness() {
        let mut submission = SubmissionState::default();
        assert!(!submission.is_complete());

        submission.transaction_digits = "123456".to_string();
        assert!(!submission.is_complete());

        submission.screenshot = Some(ProofImage {
            file_name: "pago.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        });
        assert!(submission.is_complete());
    }
}
