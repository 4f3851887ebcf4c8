//! Property tests for slot and reference normalization.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use proptest::prelude::*;
use rifa_wizard::validate::{normalize_reference, normalize_slot, validate_slots};

proptest! {
    /// Whatever the input, a stored slot is `""` or a canonical integer
    /// string in 0-9999 with no leading zeros (the literal "0" aside).
    #[test]
    fn normalized_slots_are_canonical(raw in ".{0,32}") {
        let normalized = normalize_slot(&raw);

        if !normalized.is_empty() {
            prop_assert!(normalized.len() <= 4);
            prop_assert!(normalized.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = normalized.parse().unwrap();
            prop_assert!(value <= 9999);

            if normalized.len() > 1 {
                prop_assert!(!normalized.starts_with('0'));
            }
        }
    }

    /// Normalization is idempotent.
    #[test]
    fn normalization_is_idempotent(raw in ".{0,32}") {
        let once = normalize_slot(&raw);
        prop_assert_eq!(normalize_slot(&once), once);
    }

    /// A normalized slot list never reports Invalid or OutOfRange.
    #[test]
    fn normalized_lists_only_flag_repeats(raws in proptest::collection::vec(".{0,16}", 0..6)) {
        let slots: Vec<String> = raws.iter().map(|r| normalize_slot(r)).collect();
        for error in validate_slots(&slots).into_iter().flatten() {
            prop_assert_eq!(error, rifa_wizard::SlotError::Repeated);
        }
    }

    /// The reference field never exceeds 6 characters nor holds a non-digit.
    #[test]
    fn references_are_capped_digits(raw in ".{0,32}") {
        let normalized = normalize_reference(&raw, 6);
        prop_assert!(normalized.len() <= 6);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_digit()));
    }
}
