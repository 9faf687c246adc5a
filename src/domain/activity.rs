use std::{fmt, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::TimeRange;

/// The unique, stable identifier of an activity.
///
/// Assigned at creation and never reused; an activity keeps its id when
/// edited or moved between days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(Uuid);

impl ActivityId {
    /// Allocate a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActivityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// The category an activity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Meals, cafés, street food.
    Food,
    /// Hikes, tours, anything strenuous.
    Adventure,
    /// Beaches, parks, downtime.
    Chill,
    /// Museums, galleries, landmarks.
    Culture,
    /// Flights, trains, transfers between places.
    Transport,
}

/// A single schedulable item on a day.
///
/// The `time` window is stored as the raw string supplied at input time.
/// The strict format check lives at the form boundary; elsewhere the string
/// is parsed leniently on demand via [`Activity::time_range`], and a
/// malformed value simply behaves as if the activity were unscheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    id: ActivityId,
    title: NonEmptyString,
    emoji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    map_link: Option<String>,
}

impl Activity {
    /// Construct a new activity with a freshly allocated id.
    #[must_use]
    pub fn new(title: NonEmptyString, emoji: impl Into<String>) -> Self {
        Self::new_with_id(ActivityId::new(), title, emoji)
    }

    /// Construct an activity with an explicit id.
    ///
    /// Used when editing: the replacement keeps the original's id.
    #[must_use]
    pub fn new_with_id(id: ActivityId, title: NonEmptyString, emoji: impl Into<String>) -> Self {
        Self {
            id,
            title,
            emoji: emoji.into(),
            time: None,
            location: None,
            category: None,
            notes: None,
            map_link: None,
        }
    }

    /// Set the raw time window string, e.g. `10:00 AM - 11:00 AM`.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set the free-text location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the map link shown on the activity card.
    #[must_use]
    pub fn with_map_link(mut self, map_link: impl Into<String>) -> Self {
        self.map_link = Some(map_link.into());
        self
    }

    /// The unique, stable identifier of this activity.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// The display title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// The display glyph.
    #[must_use]
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// The raw time window string, if any.
    #[must_use]
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// The scheduled window, parsed leniently.
    ///
    /// `None` when the activity has no time or the stored string does not
    /// parse — in either case the activity takes no part in conflict
    /// detection.
    #[must_use]
    pub fn time_range(&self) -> Option<TimeRange> {
        self.time.as_deref().and_then(|s| s.parse().ok())
    }

    /// The free-text location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The category, if any.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// The free-text notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// The map link, if any.
    #[must_use]
    pub fn map_link(&self) -> Option<&str> {
        self.map_link.as_deref()
    }
}
