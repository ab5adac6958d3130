use crate::paint::Color;

/// Initialization parameters for the GL layer.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested core-profile version as `(major, minor)`.
    ///
    /// Shader sources must declare a `#version` the context supports.
    pub version: (u8, u8),

    /// Block `present` on vertical sync.
    ///
    /// Failing to enable it is logged and otherwise ignored.
    pub vsync: bool,

    /// Color apps get from `FrameCtx::clear_color`.
    pub clear_color: Color,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            vsync: true,
            clear_color: Color::BLACK,
        }
    }
}
