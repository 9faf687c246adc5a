use std::{fmt, num::NonZeroUsize, str::FromStr};

use chrono::NaiveDate;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::domain::{Activity, ActivityId, Category};

/// The derived identifier of a day within a trip.
///
/// Format: `day-<n>`, where `<n>` is the day's 1-based position in the
/// trip's day list. The matching display title is `Day <n>`.
///
/// A `DayId` is a pure function of position — it is recomputed whenever the
/// day list changes shape, and carries no identity of its own beyond the
/// slot it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayId(NonZeroUsize);

impl DayId {
    /// Create the id for the given 1-based position.
    #[must_use]
    pub const fn new(position: NonZeroUsize) -> Self {
        Self(position)
    }

    /// The id for a 0-based index into the day list.
    ///
    /// # Panics
    ///
    /// Panics if `index` is `usize::MAX`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(NonZeroUsize::new(index + 1).expect("day index overflow"))
    }

    /// The 1-based position this id names.
    #[must_use]
    pub const fn position(&self) -> NonZeroUsize {
        self.0
    }

    /// The 0-based index into the day list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0.get() - 1
    }

    /// The display title for this slot, e.g. `Day 3`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Day {}", self.0)
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "day-{}", self.0)
    }
}

/// Errors that can occur when parsing a day id.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Missing the `day-` prefix.
    #[error("invalid day id '{0}': expected 'day-<n>'")]
    Syntax(String),

    /// The position component is not a positive integer.
    #[error("invalid position in day id '{0}': expected a non-zero integer, got '{1}'")]
    Position(String, String),
}

impl FromStr for DayId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = s
            .strip_prefix("day-")
            .ok_or_else(|| Error::Syntax(s.to_string()))?;

        position
            .parse::<NonZeroUsize>()
            .map(Self)
            .map_err(|_| Error::Position(s.to_string(), position.to_string()))
    }
}

impl TryFrom<&str> for DayId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl Serialize for DayId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One calendar date within a trip, holding an ordered sequence of
/// activities.
///
/// The activity order is the schedule order for the day; it is independent
/// of the activities' own time windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    /// Derived slot id, kept in sync by the owning [`Trip`](crate::Trip).
    id: DayId,
    date: NaiveDate,
    activities: Vec<Activity>,
}

impl Day {
    /// Create an empty day for the given slot and date.
    #[must_use]
    pub const fn new(id: DayId, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            activities: Vec::new(),
        }
    }

    /// The day's current slot id.
    #[must_use]
    pub const fn id(&self) -> DayId {
        self.id
    }

    /// The day's display title, derived from its slot.
    #[must_use]
    pub fn title(&self) -> String {
        self.id.title()
    }

    /// The calendar date of this day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The day's schedule, in order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// The schedule filtered to one category, in order.
    ///
    /// With `None`, yields the full schedule (the "All Categories" view).
    #[must_use]
    pub fn activities_in(&self, category: Option<Category>) -> impl Iterator<Item = &Activity> {
        self.activities
            .iter()
            .filter(move |activity| category.is_none_or(|c| activity.category() == Some(c)))
    }

    /// Look up an activity on this day by id.
    #[must_use]
    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id() == id)
    }

    /// The position of an activity within this day's schedule.
    #[must_use]
    pub fn position_of(&self, id: ActivityId) -> Option<usize> {
        self.activities
            .iter()
            .position(|activity| activity.id() == id)
    }

    pub(crate) const fn set_id(&mut self, id: DayId) {
        self.id = id;
    }

    /// Append an activity to the end of the schedule.
    pub(crate) fn push_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// Replace the activity with the same id, if present.
    pub(crate) fn replace_activity(&mut self, activity: &Activity) -> bool {
        self.position_of(activity.id()).is_some_and(|position| {
            self.activities[position] = activity.clone();
            true
        })
    }

    /// Remove an activity by id, returning it if it was present.
    pub(crate) fn take_activity(&mut self, id: ActivityId) -> Option<Activity> {
        self.position_of(id).map(|position| self.activities.remove(position))
    }

    /// Relocate a single element within the schedule, shifting the
    /// activities in between by one slot. All other relative orderings are
    /// preserved.
    pub(crate) fn relocate(&mut self, from: usize, to: usize) {
        let activity = self.activities.remove(from);
        self.activities.insert(to, activity);
    }

    pub(crate) fn take_all_activities(&mut self) -> Vec<Activity> {
        std::mem::take(&mut self.activities)
    }

    pub(crate) fn set_activities(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // `title` is derived from the slot id rather than stored.
        let mut state = serializer.serialize_struct("Day", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("title", &self.title())?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("activities", &self.activities)?;
        state.end()
    }
}
