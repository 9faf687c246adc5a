use tracing::instrument;

use crate::{
    domain::{ActivityId, Trip},
    engine::placement::{self, DropOutcome, DropTarget},
};

/// The lifecycle of a single drag interaction.
///
/// Exactly two states and three transitions: a gesture starts by lifting an
/// activity, and ends either by cancellation (no mutation) or by a drop,
/// which hands off to the placement logic. The host UI serialises gestures,
/// so at most one is ever in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No drag in flight.
    #[default]
    Idle,
    /// An activity has been lifted and not yet released.
    Dragging {
        /// The id of the lifted activity.
        activity: ActivityId,
    },
}

/// Tracks the in-flight gesture and applies drops to a trip.
///
/// The controller owns no trip state — it records only which activity is
/// currently lifted, and resets to idle on every drop or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragController {
    gesture: Gesture,
}

impl DragController {
    /// A controller with no gesture in flight.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    /// The id of the activity currently being dragged, if any.
    #[must_use]
    pub const fn active(&self) -> Option<ActivityId> {
        match self.gesture {
            Gesture::Dragging { activity } => Some(activity),
            Gesture::Idle => None,
        }
    }

    /// Record the start of a gesture: the given activity has been lifted.
    ///
    /// The host serialises gestures, so a start while another drag is in
    /// flight should not happen; if it does, the new gesture supersedes the
    /// old one.
    pub fn start(&mut self, activity: ActivityId) {
        if let Gesture::Dragging { activity: prior } = self.gesture {
            tracing::debug!("Superseding in-flight drag of {prior}");
        }
        self.gesture = Gesture::Dragging { activity };
    }

    /// Cancel the in-flight gesture, mutating nothing.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// End the gesture over a drop target, identified by the raw element id
    /// reported by the drag-and-drop layer.
    ///
    /// The controller returns to idle regardless of how the drop resolves.
    /// A drop with no drag in flight, or with an unresolvable target, is
    /// discarded without touching the trip.
    #[instrument(skip(self, trip))]
    pub fn drop_on(&mut self, trip: &mut Trip, target: &str) -> DropOutcome {
        let gesture = std::mem::take(&mut self.gesture);

        let Gesture::Dragging { activity } = gesture else {
            tracing::debug!("Ignoring drop with no drag in flight");
            return DropOutcome::Ignored;
        };

        let Some(target) = DropTarget::resolve(trip, target) else {
            tracing::debug!("Discarding gesture: unresolvable drop target '{target}'");
            return DropOutcome::Ignored;
        };

        placement::move_activity(trip, activity, &target)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use non_empty_string::NonEmptyString;

    use super::*;
    use crate::domain::{Activity, DayId, TripTheme};

    fn trip_with_activity() -> (Trip, ActivityId) {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut trip = Trip::new(
            "Test",
            "Testville",
            start,
            start + chrono::Days::new(1),
            TripTheme::default(),
        );
        let activity = Activity::new(NonEmptyString::new("Walk".to_string()).unwrap(), "🚶");
        let id = activity.id();
        assert!(trip.add_activity(DayId::from_index(0), activity));
        (trip, id)
    }

    #[test]
    fn start_records_the_lifted_activity() {
        let (_, id) = trip_with_activity();
        let mut controller = DragController::new();

        controller.start(id);

        assert_eq!(controller.active(), Some(id));
    }

    #[test]
    fn cancel_returns_to_idle_without_mutation() {
        let (trip, id) = trip_with_activity();
        let before = trip.clone();
        let mut controller = DragController::new();

        controller.start(id);
        controller.cancel();

        assert_eq!(controller.active(), None);
        assert_eq!(trip, before);
    }

    #[test]
    fn drop_without_a_drag_in_flight_is_ignored() {
        let (mut trip, _) = trip_with_activity();
        let before = trip.clone();
        let mut controller = DragController::new();

        let outcome = controller.drop_on(&mut trip, "day-2");

        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(trip, before);
    }

    #[test]
    fn drop_on_an_unresolvable_target_discards_the_gesture() {
        let (mut trip, id) = trip_with_activity();
        let before = trip.clone();
        let mut controller = DragController::new();

        controller.start(id);
        let outcome = controller.drop_on(&mut trip, "day-99");

        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(controller.active(), None);
        assert_eq!(trip, before);
    }

    #[test]
    fn drop_applies_the_move_and_resets_to_idle() {
        let (mut trip, id) = trip_with_activity();
        let mut controller = DragController::new();

        controller.start(id);
        let outcome = controller.drop_on(&mut trip, "day-2");

        assert_eq!(outcome, DropOutcome::Moved);
        assert_eq!(controller.active(), None);
        assert_eq!(
            trip.days()[1].activities().first().map(Activity::id),
            Some(id)
        );
    }

    #[test]
    fn starting_again_supersedes_the_in_flight_gesture() {
        let (_, id) = trip_with_activity();
        let other = ActivityId::new();
        let mut controller = DragController::new();

        controller.start(id);
        controller.start(other);

        assert_eq!(controller.active(), Some(other));
    }
}
