//! Pure validation helpers for the wizard.
//!
//! Everything here is synchronous and allocation-light; reducers call these
//! on every relevant state change.

use crate::types::SlotError;

/// Ticket numbers run 0 through 9999
pub const TICKET_MAX: u32 = 9999;

/// Slot values never exceed 4 characters
const SLOT_MAX_LEN: usize = 4;

/// Normalize raw slot input
///
/// Keeps digits only, strips leading zeros (a lone `"0"` survives), and
/// truncates to 4 characters. The result is always `""` or a canonical
/// integer string within the ticket range.
#[must_use]
pub fn normalize_slot(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let stripped = digits.trim_start_matches('0');
    let canonical = if stripped.is_empty() { "0" } else { stripped };

    canonical.chars().take(SLOT_MAX_LEN).collect()
}

/// Normalize a transaction reference: digits only, truncated to `max_len`
#[must_use]
pub fn normalize_reference(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(max_len)
        .collect()
}

/// Validate every slot against the others
///
/// Returns one entry per slot: `Invalid` for non-numeric text, `OutOfRange`
/// outside 0-9999, `Repeated` when equal to an *earlier* non-empty slot,
/// `None` for empty or acceptable slots. Availability marks are not produced
/// here; they come from the backend response.
#[must_use]
pub fn validate_slots(numbers: &[String]) -> Vec<Option<SlotError>> {
    numbers
        .iter()
        .enumerate()
        .map(|(index, value)| validate_one(value, &numbers[..index]))
        .collect()
}

fn validate_one(value: &str, earlier: &[String]) -> Option<SlotError> {
    if value.is_empty() {
        return None;
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Some(SlotError::Invalid);
    }

    let Ok(parsed) = value.parse::<u32>() else {
        return Some(SlotError::Invalid);
    };

    if parsed > TICKET_MAX {
        return Some(SlotError::OutOfRange);
    }

    if earlier.iter().any(|other| other == value) {
        return Some(SlotError::Repeated);
    }

    None
}

/// Format `quantity × unit_price` with exactly 2 decimal places
#[must_use]
pub fn format_amount(quantity: u32, unit_price: f64) -> String {
    format!("{:.2}", f64::from(quantity) * unit_price)
}
