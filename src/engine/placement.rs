use tracing::instrument;

use crate::domain::{Activity, ActivityId, DayId, Trip};

/// Where a dragged activity was released.
///
/// The drag-and-drop layer reports raw element ids; a drop lands either on
/// a day's surface or on another activity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Released over a day container.
    Day(DayId),
    /// Released over another activity card.
    Activity(ActivityId),
}

impl DropTarget {
    /// Resolve a raw element id against the current trip.
    ///
    /// Day ids (`day-<n>`) are tried first, then activity ids. Returns
    /// `None` when the id matches nothing in the trip — the caller discards
    /// the gesture.
    #[must_use]
    pub fn resolve(trip: &Trip, raw: &str) -> Option<Self> {
        if let Ok(day_id) = raw.parse::<DayId>() {
            if trip.day(day_id).is_some() {
                return Some(Self::Day(day_id));
            }
        }

        raw.parse::<ActivityId>()
            .ok()
            .filter(|id| trip.find_activity(*id).is_some())
            .map(Self::Activity)
    }
}

/// How a drop gesture resolved.
///
/// Rejections carry no error payload: the presentation layer re-renders
/// from the (unchanged) trip and the gesture simply ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The activity changed position within its own day.
    Reordered,
    /// The activity moved to a different day.
    Moved,
    /// A cross-day move was blocked by a time conflict in the target day.
    Rejected,
    /// The gesture resolved to no change (unknown ids, a drop on the
    /// activity's current position, or a same-day drop with no position).
    Ignored,
}

/// Realise a drop as a validated state transition on the trip.
///
/// Same-day drops relocate the activity to the target card's position,
/// preserving all other relative orderings. Cross-day drops pass through
/// the time-conflict gate and append to the end of the target day. Every
/// failure path leaves the trip untouched.
#[instrument(skip(trip))]
pub fn move_activity(trip: &mut Trip, dragged: ActivityId, target: &DropTarget) -> DropOutcome {
    let Some(source) = trip.day_index_of_activity(dragged) else {
        tracing::debug!("Discarding gesture: no day holds activity {dragged}");
        return DropOutcome::Ignored;
    };

    let (target_day, over) = match *target {
        DropTarget::Day(id) => {
            let Some(index) = trip.day_index(id) else {
                tracing::debug!("Discarding gesture: unknown target day {id}");
                return DropOutcome::Ignored;
            };
            (index, None)
        }
        DropTarget::Activity(id) => {
            let Some(index) = trip.day_index_of_activity(id) else {
                tracing::debug!("Discarding gesture: unknown target activity {id}");
                return DropOutcome::Ignored;
            };
            (index, Some(id))
        }
    };

    if source == target_day {
        reorder_within_day(trip, source, dragged, over)
    } else {
        move_across_days(trip, source, target_day, dragged)
    }
}

/// Single-element relocation within one day's schedule.
fn reorder_within_day(
    trip: &mut Trip,
    day_index: usize,
    dragged: ActivityId,
    over: Option<ActivityId>,
) -> DropOutcome {
    // A same-day drop on the day surface has no position to resolve.
    let Some(over) = over else {
        return DropOutcome::Ignored;
    };

    let day = &trip.days()[day_index];
    let (Some(from), Some(to)) = (day.position_of(dragged), day.position_of(over)) else {
        return DropOutcome::Ignored;
    };

    if from == to {
        return DropOutcome::Ignored;
    }

    trip.day_at_mut(day_index).relocate(from, to);
    DropOutcome::Reordered
}

/// Remove from the source day and append to the target day, unless the
/// moving activity's time window overlaps one already scheduled there.
///
/// This gate applies only to cross-day moves; same-day reorders and form
/// edits are never checked against it.
fn move_across_days(
    trip: &mut Trip,
    source: usize,
    target: usize,
    dragged: ActivityId,
) -> DropOutcome {
    let moving_range = trip.days()[source]
        .activity(dragged)
        .and_then(Activity::time_range);

    if let Some(range) = moving_range {
        let conflict = trip.days()[target]
            .activities()
            .iter()
            .filter(|activity| activity.id() != dragged)
            .any(|activity| {
                activity
                    .time_range()
                    .is_some_and(|other| other.overlaps(&range))
            });

        if conflict {
            tracing::debug!("Rejecting move of {dragged}: time conflict in target day");
            return DropOutcome::Rejected;
        }
    }

    let Some(activity) = trip.day_at_mut(source).take_activity(dragged) else {
        return DropOutcome::Ignored;
    };
    trip.day_at_mut(target).push_activity(activity);
    DropOutcome::Moved
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use non_empty_string::NonEmptyString;

    use super::*;
    use crate::domain::TripTheme;

    fn trip(days: u64) -> Trip {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = start + chrono::Days::new(days - 1);
        Trip::new("Test", "Testville", start, end, TripTheme::default())
    }

    fn activity(title: &str) -> Activity {
        Activity::new(NonEmptyString::new(title.to_string()).unwrap(), "🎯")
    }

    fn timed(title: &str, time: &str) -> Activity {
        activity(title).with_time(time)
    }

    fn day_id(position: usize) -> DayId {
        DayId::from_index(position - 1)
    }

    fn ids(trip: &Trip, day: usize) -> Vec<ActivityId> {
        trip.days()[day]
            .activities()
            .iter()
            .map(Activity::id)
            .collect()
    }

    #[test]
    fn same_day_reorder_is_a_permutation() {
        let mut trip = trip(1);
        let a = activity("A");
        let b = activity("B");
        let c = activity("C");
        for item in [&a, &b, &c] {
            assert!(trip.add_activity(day_id(1), item.clone()));
        }

        let before: BTreeSet<ActivityId> = ids(&trip, 0).into_iter().collect();
        let outcome = move_activity(&mut trip, a.id(), &DropTarget::Activity(c.id()));

        assert_eq!(outcome, DropOutcome::Reordered);
        assert_eq!(ids(&trip, 0), vec![b.id(), c.id(), a.id()]);
        let after: BTreeSet<ActivityId> = ids(&trip, 0).into_iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn same_day_drop_on_own_position_is_ignored() {
        let mut trip = trip(1);
        let a = activity("A");
        assert!(trip.add_activity(day_id(1), a.clone()));

        let outcome = move_activity(&mut trip, a.id(), &DropTarget::Activity(a.id()));

        assert_eq!(outcome, DropOutcome::Ignored);
    }

    #[test]
    fn same_day_drop_on_the_day_surface_is_ignored() {
        let mut trip = trip(1);
        let a = activity("A");
        let b = activity("B");
        assert!(trip.add_activity(day_id(1), a.clone()));
        assert!(trip.add_activity(day_id(1), b.clone()));

        let outcome = move_activity(&mut trip, a.id(), &DropTarget::Day(day_id(1)));

        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(ids(&trip, 0), vec![a.id(), b.id()]);
    }

    #[test]
    fn same_day_reorder_skips_the_conflict_gate() {
        // The overlap check applies to cross-day moves only; two activities
        // on the same day may overlap freely.
        let mut trip = trip(1);
        let a = timed("A", "10:00 AM - 12:00 PM");
        let b = timed("B", "10:30 AM - 11:30 AM");
        assert!(trip.add_activity(day_id(1), a.clone()));
        assert!(trip.add_activity(day_id(1), b.clone()));

        let outcome = move_activity(&mut trip, a.id(), &DropTarget::Activity(b.id()));

        assert_eq!(outcome, DropOutcome::Reordered);
        assert_eq!(ids(&trip, 0), vec![b.id(), a.id()]);
    }

    #[test]
    fn untimed_cross_day_move_always_succeeds() {
        let mut trip = trip(2);
        let a = activity("A");
        let busy = timed("Busy", "9:00 AM - 9:00 PM");
        assert!(trip.add_activity(day_id(1), a.clone()));
        assert!(trip.add_activity(day_id(2), busy.clone()));

        let outcome = move_activity(&mut trip, a.id(), &DropTarget::Day(day_id(2)));

        assert_eq!(outcome, DropOutcome::Moved);
        assert!(ids(&trip, 0).is_empty());
        assert_eq!(ids(&trip, 1), vec![busy.id(), a.id()]);
    }

    #[test]
    fn overlapping_cross_day_move_is_rejected() {
        let mut trip = trip(2);
        let moving = timed("Moving", "2:00 PM - 3:00 PM");
        let settled = timed("Settled", "2:30 PM - 4:00 PM");
        assert!(trip.add_activity(day_id(1), moving.clone()));
        assert!(trip.add_activity(day_id(2), settled.clone()));

        let outcome = move_activity(&mut trip, moving.id(), &DropTarget::Day(day_id(2)));

        assert_eq!(outcome, DropOutcome::Rejected);
        assert_eq!(ids(&trip, 0), vec![moving.id()]);
        assert_eq!(ids(&trip, 1), vec![settled.id()]);
    }

    #[test]
    fn shared_boundary_is_not_a_conflict() {
        let mut trip = trip(2);
        let moving = timed("Moving", "09:00 AM - 10:00 AM");
        let settled = timed("Settled", "10:00 AM - 11:00 AM");
        assert!(trip.add_activity(day_id(1), moving.clone()));
        assert!(trip.add_activity(day_id(2), settled.clone()));

        let outcome = move_activity(&mut trip, moving.id(), &DropTarget::Day(day_id(2)));

        assert_eq!(outcome, DropOutcome::Moved);
        assert_eq!(ids(&trip, 1), vec![settled.id(), moving.id()]);
    }

    #[test]
    fn malformed_times_disable_the_gate() {
        let mut trip = trip(2);
        let moving = timed("Moving", "sometime in the morning");
        let settled = timed("Settled", "12:00 AM - 11:59 PM");
        assert!(trip.add_activity(day_id(1), moving.clone()));
        assert!(trip.add_activity(day_id(2), settled.clone()));

        let outcome = move_activity(&mut trip, moving.id(), &DropTarget::Day(day_id(2)));

        assert_eq!(outcome, DropOutcome::Moved);
    }

    #[test]
    fn cross_day_move_appends_at_the_end_even_when_dropped_on_a_card() {
        let mut trip = trip(2);
        let moving = activity("Moving");
        let first = activity("First");
        let second = activity("Second");
        assert!(trip.add_activity(day_id(1), moving.clone()));
        assert!(trip.add_activity(day_id(2), first.clone()));
        assert!(trip.add_activity(day_id(2), second.clone()));

        // Dropped on the first card of day 2, but still lands at the end.
        let outcome = move_activity(&mut trip, moving.id(), &DropTarget::Activity(first.id()));

        assert_eq!(outcome, DropOutcome::Moved);
        assert_eq!(ids(&trip, 1), vec![first.id(), second.id(), moving.id()]);
    }

    #[test]
    fn unknown_dragged_activity_is_ignored() {
        let mut trip = trip(2);
        let before = trip.clone();

        let outcome = move_activity(&mut trip, ActivityId::new(), &DropTarget::Day(day_id(2)));

        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(trip, before);
    }

    #[test]
    fn resolve_prefers_day_ids_and_falls_back_to_activities() {
        let mut trip = trip(2);
        let a = activity("A");
        assert!(trip.add_activity(day_id(1), a.clone()));

        assert_eq!(
            DropTarget::resolve(&trip, "day-2"),
            Some(DropTarget::Day(day_id(2)))
        );
        assert_eq!(
            DropTarget::resolve(&trip, &a.id().to_string()),
            Some(DropTarget::Activity(a.id()))
        );
        assert_eq!(DropTarget::resolve(&trip, "day-9"), None);
        assert_eq!(DropTarget::resolve(&trip, "not-an-id"), None);
        assert_eq!(
            DropTarget::resolve(&trip, &ActivityId::new().to_string()),
            None
        );
    }
}
