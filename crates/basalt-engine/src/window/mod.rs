//! Window + runtime loop.
//!
//! Owns the `winit` event loop and drives one window with a current GL context.

mod runtime;
mod translate;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
