//! In-memory travel-itinerary planning
//!
//! A trip is an ordered list of days, each holding an ordered schedule of
//! activities. The presentation layer owns the single [`Trip`] value and
//! drives it through two surfaces: the structural operations on the trip
//! itself, and the drag-and-drop engine, which turns raw gesture
//! descriptors into validated moves.

pub mod domain;
pub use domain::{
    Activity, ActivityId, Category, Config, Day, DayId, EmptyTripError, ThemeMode, TimeRange,
    Trip, TripTheme,
};

/// Drag-gesture handling and activity placement.
pub mod engine;
pub use engine::{DragController, DropOutcome, DropTarget, Gesture};

/// Activity create/edit form validation.
pub mod form;
pub use form::{ActivityDraft, Error as FormError};
