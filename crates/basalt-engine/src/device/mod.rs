//! Window + OpenGL context management.
//!
//! This module is responsible for:
//! - choosing a framebuffer config and creating the window (`glutin-winit`)
//! - creating a core-profile context and window surface (`glutin`)
//! - loading the GL function table (`glow`), resizing and presenting

mod context;
mod init;

pub use context::GlDevice;
pub use init::GlInit;
