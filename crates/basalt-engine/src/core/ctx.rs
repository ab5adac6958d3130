use winit::window::Window;

use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::render::Renderer;
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: &'a Window,
    pub renderer: &'a Renderer,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
    pub(crate) clear_color: Color,
}

impl<'a> FrameCtx<'a> {
    /// Clears the framebuffer with `clear`, then calls `draw` with the renderer.
    ///
    /// Presenting is left to the runtime, after `on_frame` returns.
    #[inline]
    pub fn render<F>(&self, clear: Color, draw: F)
    where
        F: FnOnce(&Renderer),
    {
        self.renderer.frame(clear, draw);
    }

    /// Clear color configured in [`GlInit`](crate::device::GlInit).
    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}
