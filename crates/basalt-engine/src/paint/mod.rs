//! Colors and the per-frame color animation.

pub mod color;
pub mod cycle;

pub use color::Color;
pub use cycle::{
    next_channel, next_channel_scaled, next_color, Channel, ColorCycle, Rgb, STEPS_PER_SECOND,
};
