//! Time-of-day values used by the timer schedule.
//!
//! The device exchanges times as separate hour/minute integers while the
//! form shows them as `HH:MM` text. [`TimeOfDay`] bridges the two.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Accepts `H:MM`, `HH:MM` and `HH:MM:SS` (seconds are ignored).
static TIME_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})(?::\d{2})?\s*$").expect("time regex is valid")
});

// ============================================================================
// TimeOfDay
// ============================================================================

/// A wall-clock time with minute resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a time, validating `hour <= 23` and `minute <= 59`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either component is out of range.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            return Err(Error::invalid_argument(format!(
                "hour {hour} out of range 0-23"
            )));
        }
        if minute > 59 {
            return Err(Error::invalid_argument(format!(
                "minute {minute} out of range 0-59"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parses text from a time input field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the text is not a valid time.
    pub fn parse(input: &str) -> Result<Self> {
        let captures = TIME_INPUT
            .captures(input)
            .ok_or_else(|| Error::invalid_time(input))?;

        let hour = captures[1]
            .parse::<u8>()
            .map_err(|_| Error::invalid_time(input))?;
        let minute = captures[2]
            .parse::<u8>()
            .map_err(|_| Error::invalid_time(input))?;

        Self::new(hour, minute).map_err(|_| Error::invalid_time(input))
    }

    /// Returns the hour (0-23).
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// On/off times of the device timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Time the LEDs switch on.
    pub on: TimeOfDay,
    /// Time the LEDs switch off.
    pub off: TimeOfDay,
}

impl Schedule {
    /// Creates a schedule.
    #[inline]
    #[must_use]
    pub const fn new(on: TimeOfDay, off: TimeOfDay) -> Self {
        Self { on, off }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_parse_hh_mm() {
        let time = TimeOfDay::parse("07:30").unwrap();
        assert_eq!(time.hour(), 7);
        assert_eq!(time.minute(), 30);
    }

    #[test]
    fn test_parse_takes_minute_after_colon() {
        let time = TimeOfDay::parse("18:05").unwrap();
        assert_eq!((time.hour(), time.minute()), (18, 5));
    }

    #[test]
    fn test_parse_single_digit_hour_and_seconds() {
        assert_eq!(TimeOfDay::parse("7:05").unwrap(), TimeOfDay::new(7, 5).unwrap());
        assert_eq!(
            TimeOfDay::parse("23:59:30").unwrap(),
            TimeOfDay::new(23, 59).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "7", "7h30", "24:00", "12:60", "12:5", "-1:00"] {
            let err = TimeOfDay::parse(input).unwrap_err();
            assert!(matches!(err, Error::InvalidTime { .. }), "input {input:?}");
        }
    }

    #[test]
    fn test_new_validates_range() {
        assert!(TimeOfDay::new(23, 59).is_ok());
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(0, 60).is_err());
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(TimeOfDay::new(6, 0).unwrap().to_string(), "06:00");
        assert_eq!(TimeOfDay::new(18, 7).unwrap().to_string(), "18:07");
    }

    proptest! {
        #[test]
        fn test_display_parses_back(hour in 0u8..24, minute in 0u8..60) {
            let time = TimeOfDay::new(hour, minute).unwrap();
            let text = time.to_string();
            prop_assert_eq!(text.len(), 5);
            prop_assert_eq!(TimeOfDay::parse(&text).unwrap(), time);
        }
    }
}
