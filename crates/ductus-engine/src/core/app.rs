use crate::input::InputEvent;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called synchronously for every translated input event, before the
    /// runtime applies its own handling (resize, close).
    fn on_input(&mut self, event: &InputEvent, window: &WindowCtx<'_>) -> AppControl {
        let _ = (event, window);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
