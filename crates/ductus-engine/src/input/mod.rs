//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates window events into [`InputEvent`]s (see `platform`)
//! and forwards them to the application synchronously, one at a time.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyAction,
    MouseButton,
    PointerButtonEvent,
    PointerMoveEvent,
};
