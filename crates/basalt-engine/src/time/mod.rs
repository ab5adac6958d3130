//! Frame timing.
//!
//! The runtime ticks one `FrameClock` per redraw and hands the resulting
//! `FrameTime` to the app.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
