//! Business rules applied to every booking request.

use chrono::NaiveTime;
use thiserror::Error;

use crate::domain::FacilityZone;

/// Default shortest bookable duration, in minutes.
pub const DEFAULT_MIN_DURATION_MINUTES: u32 = 30;
/// Default longest bookable duration, in minutes.
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 180;
/// Default granularity of durations, in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 15;
/// Default first bookable hour shown in the slot grid.
pub const DEFAULT_OPENING_HOUR: u32 = 8;
/// Default hour at which the slot grid stops (exclusive).
pub const DEFAULT_CLOSING_HOUR: u32 = 21;

/// Rejected rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("duration step must be positive")]
    ZeroStep,
    #[error("minimum duration must be positive")]
    ZeroMinimum,
    #[error("minimum duration {min} exceeds maximum {max}")]
    InvertedBounds { min: u32, max: u32 },
    #[error("opening hour {opening} must be before closing hour {closing} (max 24)")]
    InvalidOpeningHours { opening: u32, closing: u32 },
}

/// Allowed booking durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    min_duration_minutes: u32,
    max_duration_minutes: u32,
    step_minutes: u32,
}

impl BookingRules {
    /// Validate and build a rule set.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::BookingRules;
    ///
    /// let rules = BookingRules::new(30, 180, 15).expect("valid rules");
    /// assert!(rules.accepts(45));
    /// assert!(!rules.accepts(50));
    /// assert!(BookingRules::new(60, 30, 15).is_err());
    /// ```
    pub fn new(min: u32, max: u32, step: u32) -> Result<Self, PolicyError> {
        if step == 0 {
            return Err(PolicyError::ZeroStep);
        }
        if min == 0 {
            return Err(PolicyError::ZeroMinimum);
        }
        if min > max {
            return Err(PolicyError::InvertedBounds { min, max });
        }
        Ok(Self {
            min_duration_minutes: min,
            max_duration_minutes: max,
            step_minutes: step,
        })
    }

    #[must_use]
    pub fn min_duration_minutes(&self) -> u32 {
        self.min_duration_minutes
    }

    #[must_use]
    pub fn max_duration_minutes(&self) -> u32 {
        self.max_duration_minutes
    }

    #[must_use]
    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    /// Whether a whole number of minutes is an allowed duration.
    #[must_use]
    pub fn accepts(&self, minutes: u32) -> bool {
        (self.min_duration_minutes..=self.max_duration_minutes).contains(&minutes)
            && minutes.checked_rem(self.step_minutes) == Some(0)
    }
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

/// Hours covered by the availability grid, `[opening, closing)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    opening_hour: u32,
    closing_hour: u32,
}

impl OpeningHours {
    pub fn new(opening_hour: u32, closing_hour: u32) -> Result<Self, PolicyError> {
        if opening_hour >= closing_hour || closing_hour > 24 {
            return Err(PolicyError::InvalidOpeningHours {
                opening: opening_hour,
                closing: closing_hour,
            });
        }
        Ok(Self {
            opening_hour,
            closing_hour,
        })
    }

    /// Local start times of each hourly slot.
    pub fn slot_starts(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        (self.opening_hour..self.closing_hour)
            .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            opening_hour: DEFAULT_OPENING_HOUR,
            closing_hour: DEFAULT_CLOSING_HOUR,
        }
    }
}

/// Everything the scheduling core needs to judge a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    pub zone: FacilityZone,
    pub rules: BookingRules,
    pub opening_hours: OpeningHours,
}

impl BookingPolicy {
    /// Policy with default rules and opening hours in `zone`.
    #[must_use]
    pub fn with_zone(zone: FacilityZone) -> Self {
        Self {
            zone,
            rules: BookingRules::default(),
            opening_hours: OpeningHours::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(30, true)]
    #[case(45, true)]
    #[case(180, true)]
    #[case(15, false)]
    #[case(50, false)]
    #[case(195, false)]
    fn default_rules_accept_expected_durations(#[case] minutes: u32, #[case] accepted: bool) {
        assert_eq!(BookingRules::default().accepts(minutes), accepted);
    }

    #[rstest]
    #[case(0, 60, 15, PolicyError::ZeroMinimum)]
    #[case(30, 60, 0, PolicyError::ZeroStep)]
    #[case(90, 60, 15, PolicyError::InvertedBounds { min: 90, max: 60 })]
    fn rejects_inconsistent_rules(
        #[case] min: u32,
        #[case] max: u32,
        #[case] step: u32,
        #[case] expected: PolicyError,
    ) {
        assert_eq!(BookingRules::new(min, max, step), Err(expected));
    }

    #[rstest]
    fn opening_hours_yield_hourly_starts() {
        let hours = OpeningHours::new(8, 11).expect("valid hours");
        let starts: Vec<String> = hours
            .slot_starts()
            .map(|t| t.format("%H:%M").to_string())
            .collect();
        assert_eq!(starts, ["08:00", "09:00", "10:00"]);
        assert!(OpeningHours::new(21, 8).is_err());
        assert!(OpeningHours::new(8, 25).is_err());
        assert_eq!(OpeningHours::default().slot_starts().count(), 13);
    }
}
