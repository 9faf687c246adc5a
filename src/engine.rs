//! The reordering & placement engine.
//!
//! Realises drag gestures as validated state transitions on a
//! [`Trip`](crate::Trip). The [`gesture`] module tracks the per-gesture
//! state machine; the [`placement`] module resolves drop targets and
//! applies the move, including the cross-day time-conflict gate.

/// The per-gesture state machine.
pub mod gesture;
pub use gesture::{DragController, Gesture};

/// Drop-target resolution and move application.
pub mod placement;
pub use placement::{DropOutcome, DropTarget, move_activity};
