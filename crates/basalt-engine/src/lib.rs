//! Basalt engine crate.
//!
//! A small OpenGL harness: RAII wrappers for buffers, vertex arrays and shader
//! programs, a checked call discipline around every driver call, and a winit
//! runtime that owns the window and context.
//!
//! All GL traffic goes through the [`gl::Gl`] trait via [`gl_call!`].

pub mod gl;
pub mod render;
pub mod shader;

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod paint;
