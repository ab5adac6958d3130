//! GPU resource wrappers.
//!
//! Each wrapper owns exactly one driver object and releases it on drop. They
//! are move-only; sharing goes through references.
//!
//! Typical setup:
//! - upload vertices into a [`VertexBuffer`] and indices into an [`IndexBuffer`]
//! - describe one vertex with a [`VertexBufferLayout`]
//! - attach buffer + layout to a [`VertexArray`]
//! - draw with [`Renderer::draw`]

mod index_buffer;
mod layout;
mod renderer;
mod vertex_array;
mod vertex_buffer;

pub use index_buffer::IndexBuffer;
pub use layout::{ComponentInfo, ComponentType, VertexBufferElement, VertexBufferLayout};
pub use renderer::Renderer;
pub use vertex_array::VertexArray;
pub use vertex_buffer::VertexBuffer;
