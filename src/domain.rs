//! Domain models for itinerary planning.
//!
//! This module contains the core domain types: the trip aggregate, its
//! days and activities, clock-time windows, and configuration.

/// Activity entity and its identifier/category types.
pub mod activity;
pub use activity::{Activity, ActivityId, Category};

mod config;
pub use config::Config;

/// Day entity and the derived `day-<n>` slot identifier.
pub mod day;
pub use day::{Day, DayId, Error as DayIdError};

/// Clock-time window parsing and overlap testing.
pub mod time_range;
pub use time_range::{Error as TimeRangeError, TimeRange};

/// The trip aggregate and its structural operations.
pub mod trip;
pub use trip::{EmptyTripError, ThemeMode, Trip, TripTheme};
