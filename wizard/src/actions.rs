//! Actions for the purchase wizard.
//!
//! User intents and effect completions share one enum; the reducer decides
//! which are meaningful in the current step and ignores the rest.

use rifa_api::{PaymentMethod, Prices, ProofImage};

/// Every input the wizard reducer accepts
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Show the wizard with the given unit prices
    Open {
        /// Unit prices to quote with
        prices: Prices,
    },

    /// Hide the wizard and reset to the first step
    ///
    /// Payment selection is cleared; quantity, amounts and chosen numbers
    /// survive a reopen.
    Close,

    // ========== Quantity & ticket selection ==========
    /// Raise the quantity by one, clamped to the maximum
    IncrementQuantity,

    /// Lower the quantity by one, clamped to the minimum
    DecrementQuantity,

    /// Replace one slot's raw text
    EditSlot {
        /// Which slot
        index: usize,
        /// Raw input before normalization
        raw: String,
    },

    /// Try to advance past the quantity step
    ///
    /// With chosen numbers this starts an availability check; without any it
    /// advances immediately.
    QuantityNext,

    /// Availability check finished
    AvailabilityChecked {
        /// Which advance attempt this answers
        generation: u64,
        /// The unavailable subset of the submitted numbers
        taken: Vec<String>,
    },

    /// Availability check failed
    AvailabilityFailed {
        /// Which advance attempt this answers
        generation: u64,
        /// General error message to show
        message: String,
    },

    // ========== Payment method ==========
    /// Toggle a payment channel; selecting the current one clears it
    SelectPayment(PaymentMethod),

    /// Return to the quantity step, keeping its state
    PaymentBack,

    /// Advance to the confirmation step
    PaymentNext,

    // ========== Confirmation & submission ==========
    /// Replace the transaction reference's raw text
    EditReference(String),

    /// Attach a payment proof image
    AttachProof(ProofImage),

    /// Return to the payment step; drafts reset
    SubmitBack,

    /// Validate and send the purchase
    Submit,

    /// The backend recorded the purchase
    SubmitSucceeded,

    /// The backend rejected the purchase or the request failed
    SubmitFailed {
        /// Inline error message to show
        message: String,
    },

    /// Close action of the success overlay; closes and resets the wizard
    CloseSuccess,
}
