//! OpenGL seam.
//!
//! Wrappers talk to the driver exclusively through the [`Gl`] trait, wrapped in
//! [`gl_call!`](crate::gl_call) so that each call is checked for driver errors.
//! Production code uses the `glow::Context` implementation.

mod api;
mod debug;
mod glow_backend;

/// Enabled for this crate's tests, and for dependents through the `mock` feature.
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use api::{
    BufferTarget, Gl, Handle, ShaderStage, UniformLocation, INVALID_HANDLE, MISSING_UNIFORM,
};
pub use debug::{check_call, clear_errors, error_name, log_call};
