//! The create/edit dialog boundary.
//!
//! Dialog submissions arrive as an [`ActivityDraft`] and validate into an
//! [`Activity`]. This is the only place in the system where validation
//! failures surface user-visible messages — the [`Error`] display strings
//! are shown verbatim next to the offending field, and submission is
//! blocked until the input is corrected or cleared.
//!
//! The time check here is stricter than the lenient parse used for
//! conflict detection: the raw string must match the `HH:MM AM/PM - HH:MM
//! AM/PM` pattern, and the end must come after the start.

use std::sync::LazyLock;

use non_empty_string::NonEmptyString;
use regex::Regex;
use serde::Deserialize;

use crate::domain::{Activity, ActivityId, Category, Config, TimeRange};

/// The shape a time window must match at input time.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-1]?[0-9]|2[0-3]):[0-5][0-9]\s*(AM|PM)\s*-\s*([0-1]?[0-9]|2[0-3]):[0-5][0-9]\s*(AM|PM)$")
        .expect("the time pattern is valid")
});

/// A validation failure raised while submitting the activity dialog.
///
/// The `Display` strings are the exact messages shown to the user.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The title field was left empty.
    #[error("Title is required")]
    EmptyTitle,

    /// The time field does not match the required shape.
    #[error("Please use format: HH:MM AM/PM - HH:MM AM/PM")]
    TimeFormat,

    /// The window ends before (or exactly when) it starts.
    #[error("End time must be after start time")]
    EndBeforeStart,
}

/// The raw payload collected by the create/edit activity dialog.
///
/// Empty strings mean "left blank": a blank time is a valid unscheduled
/// activity, and a blank emoji falls back to the configured placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityDraft {
    /// Display title; required.
    pub title: String,
    /// Display glyph; blank falls back to the configured placeholder.
    pub emoji: String,
    /// Raw time window, e.g. `10:00 AM - 12:00 PM`.
    pub time: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Category selection.
    pub category: Option<Category>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Link to the activity's location on a map.
    pub map_link: Option<String>,
}

impl ActivityDraft {
    /// Validate the draft into a new activity with a freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns the blocking validation message when the title is empty or
    /// the time window fails the strict format check.
    pub fn create(self, config: &Config) -> Result<Activity, Error> {
        self.build(ActivityId::new(), config)
    }

    /// Validate the draft into a replacement for an existing activity,
    /// preserving its id.
    ///
    /// # Errors
    ///
    /// Returns the blocking validation message when the title is empty or
    /// the time window fails the strict format check.
    pub fn edit(self, id: ActivityId, config: &Config) -> Result<Activity, Error> {
        self.build(id, config)
    }

    fn build(self, id: ActivityId, config: &Config) -> Result<Activity, Error> {
        let title = NonEmptyString::new(self.title).map_err(|_| Error::EmptyTitle)?;

        let time = non_blank(self.time);
        if let Some(time) = &time {
            validate_time(time)?;
        }

        let emoji = if self.emoji.is_empty() {
            config.default_emoji().to_string()
        } else {
            self.emoji
        };

        let mut activity = Activity::new_with_id(id, title, emoji);
        if let Some(time) = time {
            activity = activity.with_time(time);
        }
        if let Some(location) = non_blank(self.location) {
            activity = activity.with_location(location);
        }
        if let Some(category) = self.category {
            activity = activity.with_category(category);
        }
        if let Some(notes) = non_blank(self.notes) {
            activity = activity.with_notes(notes);
        }
        if let Some(map_link) = non_blank(self.map_link) {
            activity = activity.with_map_link(map_link);
        }

        Ok(activity)
    }
}

/// Blank fields are treated as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// The strict input-time check for a non-blank time window.
///
/// A window that matches the pattern but fails the clock parse (hours past
/// twelve with an AM/PM suffix) skips the ordering check; such a value is
/// stored as-is and never participates in conflict detection.
fn validate_time(time: &str) -> Result<(), Error> {
    if !TIME_PATTERN.is_match(time) {
        return Err(Error::TimeFormat);
    }

    if let Ok(range) = time.parse::<TimeRange>() {
        if range.end() <= range.start() {
            return Err(Error::EndBeforeStart);
        }
    }

    Ok(())
}
