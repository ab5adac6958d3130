use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// The app owns its GPU resources. The runtime drops it before the GL context,
/// so wrapper `Drop` impls always run against a live context.
pub trait App {
    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame. The runtime presents after this returns.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
