//! The top-level itinerary aggregate.
//!
//! The [`Trip`] owns the ordered day list and is the only way to change its
//! shape. Structural mutations renumber the day slots so that ids and titles
//! are always `day-1..day-n` / `Day 1..Day n` in date order, and keep the
//! stored date bounds in step with the first and last day.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{Activity, ActivityId, Config, Day, DayId};

/// Display-only theme metadata carried on a trip.
///
/// Has no behavioural effect on the model; the presentation layer reads it
/// back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripTheme {
    /// Light or dark rendering mode.
    pub mode: ThemeMode,
    /// Accent colour name.
    pub color: String,
    /// Free-text vibe label.
    pub vibe: String,
}

impl Default for TripTheme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            color: "blue".to_string(),
            vibe: "adventure".to_string(),
        }
    }
}

/// The rendering mode of a [`TripTheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light backgrounds.
    Light,
    /// Dark backgrounds.
    Dark,
}

/// Error returned when extending a trip whose day list is empty.
///
/// There is no "last day" to date the new day from.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("trip has no days to extend")]
pub struct EmptyTripError;

/// A travel itinerary: a date range, metadata, and an ordered list of days.
///
/// All mutations go through `&mut` methods; the caller owns the single
/// `Trip` value and may clone it when snapshot semantics are wanted.
/// Operations degrade to no-ops on unresolvable input rather than
/// returning errors — the boolean results report whether anything changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    id: Uuid,
    title: String,
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    days: Vec<Day>,
    theme: TripTheme,
}

impl Trip {
    /// Create a trip covering `[start_date, end_date]` inclusive, one empty
    /// day per calendar date.
    ///
    /// An inverted range yields a trip with no days; [`Trip::add_day`] will
    /// refuse to extend it.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of the supported calendar.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        theme: TripTheme,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            destination: destination.into(),
            start_date,
            end_date,
            days: Self::generate_days(start_date, end_date),
            theme,
        }
    }

    /// Create a trip starting on `start_date` with the configured default
    /// length.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of the supported calendar.
    #[must_use]
    pub fn with_default_length(
        title: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        config: &Config,
    ) -> Self {
        let end_date = start_date
            .checked_add_days(chrono::Days::new(config.default_trip_days()))
            .expect("calendar overflow");
        Self::new(title, destination, start_date, end_date, TripTheme::default())
    }

    /// One empty day per calendar date in `[start, end]`, already numbered.
    fn generate_days(start: NaiveDate, end: NaiveDate) -> Vec<Day> {
        let mut days = Vec::new();
        let mut date = start;
        while date <= end {
            days.push(Day::new(DayId::from_index(days.len()), date));
            date = date.succ_opt().expect("calendar overflow");
        }
        days
    }

    /// The trip's unique identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The trip title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The destination label.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The date of the first day.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The date of the last day.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The theme metadata.
    #[must_use]
    pub const fn theme(&self) -> &TripTheme {
        &self.theme
    }

    /// Replace the trip title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the destination label.
    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
    }

    /// Replace the theme metadata.
    pub fn set_theme(&mut self, theme: TripTheme) {
        self.theme = theme;
    }

    /// The ordered day list.
    #[must_use]
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Look up a day by its slot id.
    #[must_use]
    pub fn day(&self, id: DayId) -> Option<&Day> {
        self.days.iter().find(|day| day.id() == id)
    }

    /// Append a new day dated one calendar day after the current last day.
    ///
    /// Updates the stored end date to match.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTripError`] when the day list is empty — there is no
    /// last day to extend from.
    ///
    /// # Panics
    ///
    /// Panics if the new date runs past the end of the supported calendar.
    #[instrument(skip(self), fields(trip = %self.id))]
    pub fn add_day(&mut self) -> Result<DayId, EmptyTripError> {
        let last = self.days.last().ok_or(EmptyTripError)?;
        let date = last.date().succ_opt().expect("calendar overflow");
        let id = DayId::from_index(self.days.len());

        self.days.push(Day::new(id, date));
        self.end_date = date;
        tracing::debug!("Added {id} ({date})");
        Ok(id)
    }

    /// Remove the identified day, discarding its activities.
    ///
    /// This is destructive — there is no undo. Remaining days are renumbered
    /// to their new 1-based positions. The stored date bounds are recomputed
    /// only when the removed day sat on one: removing an interior day leaves
    /// them as they were, and removing the only remaining day empties the
    /// list and leaves them untouched.
    ///
    /// Returns `false` (a no-op) when the id does not resolve.
    #[instrument(skip(self), fields(trip = %self.id))]
    pub fn remove_day(&mut self, id: DayId) -> bool {
        let Some(index) = self.days.iter().position(|day| day.id() == id) else {
            tracing::debug!("Ignoring removal of unknown day {id}");
            return false;
        };

        let was_first = index == 0;
        let was_last = index + 1 == self.days.len();
        self.days.remove(index);
        self.renumber_days();

        if was_first {
            if let Some(first) = self.days.first() {
                self.start_date = first.date();
            }
        }
        if was_last {
            if let Some(last) = self.days.last() {
                self.end_date = last.date();
            }
        }

        tracing::debug!("Removed day {index} of the trip");
        true
    }

    /// Regenerate the day list to cover `[new_start, new_end]` inclusive.
    ///
    /// A generated day adopts the activities of any existing day sharing
    /// its calendar date — matched by date equality, not by id or position.
    /// Days whose dates fall outside the new range are dropped along with
    /// their activities. An inverted range yields an empty day list.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of the supported calendar.
    #[instrument(skip(self), fields(trip = %self.id))]
    pub fn set_date_range(&mut self, new_start: NaiveDate, new_end: NaiveDate) {
        let mut carried: HashMap<NaiveDate, Vec<Activity>> = self
            .days
            .iter_mut()
            .map(|day| (day.date(), day.take_all_activities()))
            .collect();

        let mut days = Self::generate_days(new_start, new_end);
        for day in &mut days {
            if let Some(activities) = carried.remove(&day.date()) {
                day.set_activities(activities);
            }
        }

        self.days = days;
        self.start_date = new_start;
        self.end_date = new_end;
    }

    /// Append an activity to the end of a day's schedule.
    ///
    /// Returns `false` (a no-op) when the day does not resolve, or when the
    /// activity's id is already present somewhere in the trip — ids are
    /// unique within a trip.
    pub fn add_activity(&mut self, day_id: DayId, activity: Activity) -> bool {
        if self.find_activity(activity.id()).is_some() {
            tracing::debug!("Ignoring duplicate activity id {}", activity.id());
            return false;
        }

        let Some(day) = self.day_mut(day_id) else {
            tracing::debug!("Ignoring activity for unknown day {day_id}");
            return false;
        };

        day.push_activity(activity);
        true
    }

    /// Replace the activity with the same id within one day's schedule.
    ///
    /// Returns `false` (a no-op) when the day does not resolve or the day
    /// holds no activity with that id. No cross-day effects.
    pub fn edit_activity(&mut self, day_id: DayId, activity: &Activity) -> bool {
        self.day_mut(day_id)
            .is_some_and(|day| day.replace_activity(activity))
    }

    /// Delete an activity from one day's schedule by id.
    ///
    /// Returns `false` (a no-op) when the day does not resolve or the day
    /// holds no activity with that id. No cross-day effects.
    pub fn remove_activity(&mut self, day_id: DayId, id: ActivityId) -> bool {
        self.day_mut(day_id)
            .is_some_and(|day| day.take_activity(id).is_some())
    }

    /// Locate an activity anywhere in the trip, together with its owning
    /// day's id.
    #[must_use]
    pub fn find_activity(&self, id: ActivityId) -> Option<(DayId, &Activity)> {
        self.days
            .iter()
            .find_map(|day| day.activity(id).map(|activity| (day.id(), activity)))
    }

    /// Render the trip as the JSON value consumed by the presentation
    /// layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be represented as JSON.
    pub fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn day_mut(&mut self, id: DayId) -> Option<&mut Day> {
        self.days.iter_mut().find(|day| day.id() == id)
    }

    /// The index of the day holding the given activity.
    pub(crate) fn day_index_of_activity(&self, id: ActivityId) -> Option<usize> {
        self.days
            .iter()
            .position(|day| day.position_of(id).is_some())
    }

    /// The index of the day with the given slot id.
    pub(crate) fn day_index(&self, id: DayId) -> Option<usize> {
        self.days.iter().position(|day| day.id() == id)
    }

    pub(crate) fn day_at_mut(&mut self, index: usize) -> &mut Day {
        &mut self.days[index]
    }

    /// Reset every day's slot id to its 1-based position.
    fn renumber_days(&mut self) {
        for (index, day) in self.days.iter_mut().enumerate() {
            day.set_id(DayId::from_index(index));
        }
    }
}
