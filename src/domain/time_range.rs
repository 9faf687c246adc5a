use std::{fmt, str::FromStr};

use chrono::NaiveTime;

/// A half-open `[start, end)` window of clock time within a single day.
///
/// Parsed from the `"START - END"` strings carried on activities, where each
/// side is a 12-hour clock time such as `2:00 PM`. The range is a plain pair:
/// parsing does not require `end` to come after `start` — that stricter rule
/// is enforced only at the form boundary.
///
/// Examples: `10:00 AM - 11:30 AM`, `9:00 pm - 11:00 pm`, `14:00 - 16:00`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    /// Create a range from pre-parsed clock times.
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// The inclusive start of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// The exclusive end of the window.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether two half-open windows intersect.
    ///
    /// Strict inequalities on both sides: ranges that merely share an
    /// endpoint (one ends at 10:00, the other starts at 10:00) do not
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Errors that can occur when parsing a time range.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string has no `-` separating the start and end times.
    #[error("time range '{0}' is missing a '-' separator")]
    MissingSeparator(String),

    /// One side of the range is not a recognisable clock time.
    #[error("unrecognised clock time '{0}'")]
    Clock(String),
}

/// Parse one side of a range.
///
/// Accepts 12-hour times (`2:00 PM`, case-insensitive, flexible spacing)
/// and falls back to 24-hour `HH:MM`.
fn parse_clock(s: &str) -> Result<NaiveTime, Error> {
    let trimmed = s.trim();
    let upper = trimmed.to_uppercase();
    NaiveTime::parse_from_str(&upper, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(&upper, "%H:%M"))
        .map_err(|_| Error::Clock(trimmed.to_string()))
}

impl FromStr for TimeRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| Error::MissingSeparator(s.to_string()))?;

        Ok(Self {
            start: parse_clock(start)?,
            end: parse_clock(end)?,
        })
    }
}

impl TryFrom<&str> for TimeRange {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%-I:%M %p"),
            self.end.format("%-I:%M %p")
        )
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn range(s: &str) -> TimeRange {
        s.parse().unwrap()
    }

    #[test_case("10:00 AM - 11:00 AM", (10, 0), (11, 0); "plain morning range")]
    #[test_case("2:00 PM - 3:30 PM", (14, 0), (15, 30); "afternoon range")]
    #[test_case("12:00 AM - 12:30 PM", (0, 0), (12, 30); "midnight and noon")]
    #[test_case("9:00 pm-11:00 pm", (21, 0), (23, 0); "lowercase and tight spacing")]
    #[test_case("14:00 - 16:00", (14, 0), (16, 0); "24 hour fallback")]
    fn parses(s: &str, start: (u32, u32), end: (u32, u32)) {
        let parsed = range(s);
        assert_eq!(
            parsed.start(),
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap()
        );
        assert_eq!(
            parsed.end(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap()
        );
    }

    #[test]
    fn missing_separator_is_an_error() {
        let err = "10:00 AM".parse::<TimeRange>().unwrap_err();
        assert_eq!(err, Error::MissingSeparator("10:00 AM".to_string()));
    }

    #[test]
    fn unparseable_clock_is_an_error() {
        let err = "13:00 PM - 2:00 PM".parse::<TimeRange>().unwrap_err();
        assert_eq!(err, Error::Clock("13:00 PM".to_string()));
    }

    #[test_case("10:00 AM - 11:00 AM", "10:30 AM - 12:00 PM", true; "partial overlap")]
    #[test_case("10:00 AM - 11:00 AM", "10:15 AM - 10:45 AM", true; "containment")]
    #[test_case("9:00 AM - 10:00 AM", "10:00 AM - 11:00 AM", false; "shared boundary")]
    #[test_case("9:00 AM - 10:00 AM", "2:00 PM - 3:00 PM", false; "disjoint")]
    fn overlap(a: &str, b: &str, expected: bool) {
        assert_eq!(range(a).overlaps(&range(b)), expected);
        // Overlap is symmetric.
        assert_eq!(range(b).overlaps(&range(a)), expected);
    }

    #[test]
    fn display_round_trips_the_canonical_form() {
        let parsed = range("2:00 pm-3:30 pm");
        assert_eq!(parsed.to_string(), "2:00 PM - 3:30 PM");
        assert_eq!(range(&parsed.to_string()), parsed);
    }
}
