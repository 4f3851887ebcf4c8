//! # Rifa Testing
//!
//! Testing utilities and helpers for the rifa client architecture.
//!
//! This crate provides:
//! - A fluent Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effect lists
//! - A deterministic clock for reproducible tests
//!
//! Scripted gateway stubs live next to the gateway traits they implement, in
//! each feature crate's `mocks` module.
//!
//! ## Example
//!
//! ```ignore
//! use rifa_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(WizardReducer::new(limits))
//!     .with_env(test_environment())
//!     .given_state(WizardState::default())
//!     .when_action(WizardAction::IncrementQuantity)
//!     .then_state(|state| assert_eq!(state.selection.quantity, 3))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use rifa_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of core environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use rifa_testing::mocks::FixedClock;
    /// use rifa_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2026-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which should never
    /// happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

pub use mocks::test_clock;

#[cfg(test)]
mod tests {
    use super::mocks::test_clock;
    use rifa_core::environment::Clock;

    #[test]
    fn test_clock_is_deterministic() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }
}
