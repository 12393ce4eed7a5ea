//! Input event sources.
//!
//! Each source wraps a [`Dispatcher`](crate::observer::Dispatcher) and turns
//! raw input into listener invocations:
//! - [`KeyboardEvents`]: key press/release with detach semantics
//! - [`PointerEvents`]: raw pointer moves and primary-button transitions
//! - [`DragGesture`]: the single in-progress click-to-click gesture

mod gesture;
mod keyboard;
mod pointer;

pub use gesture::{ClickOutcome, DragGesture, GestureEvent, GesturePhase};
pub use keyboard::KeyboardEvents;
pub use pointer::{PointerEvent, PointerEvents};
