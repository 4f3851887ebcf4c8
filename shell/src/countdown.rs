//! Countdown to the draw date.
//!
//! Pure time arithmetic over an injected [`Clock`]; the presentation layer
//! re-renders it on its own tick.

use chrono::{DateTime, Utc};
use rifa_core::environment::Clock;

/// Time remaining until the draw, split for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    /// Whole days remaining
    pub days: i64,
    /// Hours remaining within the day
    pub hours: i64,
    /// Minutes remaining within the hour
    pub minutes: i64,
    /// Seconds remaining within the minute
    pub seconds: i64,
}

impl TimeLeft {
    /// Remaining time from `now` to `draw`, clamped at zero once past
    #[must_use]
    pub fn between(now: DateTime<Utc>, draw: DateTime<Utc>) -> Self {
        let difference = (draw - now).num_seconds();
        if difference <= 0 {
            return Self::default();
        }

        Self {
            days: difference / 86_400,
            hours: (difference / 3_600) % 24,
            minutes: (difference / 60) % 60,
            seconds: difference % 60,
        }
    }

    /// Whether the draw date has passed
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// Remaining time until `draw` as of the injected clock
#[must_use]
pub fn time_left<C: Clock>(clock: &C, draw: DateTime<Utc>) -> TimeLeft {
    TimeLeft::between(clock.now(), draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rifa_core::environment::Clock;
    use rifa_testing::test_clock;

    #[test]
    fn splits_the_remaining_time() {
        let clock = test_clock();
        let draw = clock.now() + Duration::days(2) + Duration::hours(7) + Duration::minutes(18)
            + Duration::seconds(26);

        let left = time_left(&clock, draw);
        assert_eq!(
            left,
            TimeLeft {
                days: 2,
                hours: 7,
                minutes: 18,
                seconds: 26
            }
        );
        assert!(!left.is_over());
    }

    #[test]
    fn clamps_at_zero_once_past() {
        let clock = test_clock();
        let draw = clock.now() - Duration::hours(1);

        let left = time_left(&clock, draw);
        assert_eq!(left, TimeLeft::default());
        assert!(left.is_over());
    }

    #[test]
    fn exact_deadline_is_over() {
        let clock = test_clock();
        assert!(time_left(&clock, clock.now()).is_over());
    }
}
