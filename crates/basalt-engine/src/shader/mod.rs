//! Shader programs built from combined `#shader vertex` / `#shader fragment` files.

mod error;
mod program;
mod source;

pub use error::ShaderError;
pub use program::{compile_stage, link_program, Shader, MAX_INFO_LOG};
pub use source::ShaderSource;
