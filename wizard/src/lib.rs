//! # Rifa Wizard
//!
//! The purchase wizard: a linear three-step state machine for buying raffle
//! tickets.
//!
//! 1. **Quantity & ticket selection** - bounded ticket count, optional
//!    explicit numbers with per-slot validation, an asynchronous availability
//!    check before advancing
//! 2. **Payment method** - toggleable single-select between the two channels
//! 3. **Confirmation & submission** - channel-specific payment instructions,
//!    6-digit transaction reference, payment proof upload (3 MiB cap),
//!    multipart submission
//!
//! The machine is a [`Reducer`](rifa_core::reducer::Reducer); drive it with
//! a runtime `Store` in production or with `ReducerTest` in tests.
//!
//! ## Example
//!
//! ```ignore
//! use rifa_runtime::Store;
//! use rifa_wizard::{WizardAction, WizardReducer, WizardState, environment::live_environment};
//!
//! let store = Store::new(
//!     WizardState::new(limits, prices),
//!     WizardReducer::new(),
//!     live_environment(client),
//! );
//!
//! store.send(WizardAction::Open { prices }).await?;
//! ```

pub mod actions;
pub mod environment;
pub mod mocks;
pub mod reducer;
pub mod types;
pub mod validate;

pub use actions::WizardAction;
pub use reducer::WizardReducer;
pub use types::{
    MAX_PROOF_BYTES, MonetaryQuote, SlotError, SubmissionState, TicketLimits, TicketSelection,
    WizardState, WizardStep, payment_instructions,
};
