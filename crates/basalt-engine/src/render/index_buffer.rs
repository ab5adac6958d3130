use std::rc::Rc;

use anyhow::{ensure, Result};

use crate::gl::{BufferTarget, Gl, Handle, INVALID_HANDLE};
use crate::gl_call;

// Indices are uploaded as raw bytes and drawn as GL_UNSIGNED_INT.
const _: () = assert!(std::mem::size_of::<u32>() == 4);

/// GPU buffer holding `u32` element indices.
///
/// Records the index count so draw calls never have to be told separately.
pub struct IndexBuffer {
    gl: Rc<dyn Gl>,
    id: Handle,
    count: usize,
}

impl IndexBuffer {
    /// Creates a buffer and uploads `indices`. Leaves the buffer bound.
    pub fn new(gl: &Rc<dyn Gl>, indices: &[u32]) -> Result<Self> {
        let gl = Rc::clone(gl);
        let id = gl_call!(gl => create_buffer());
        ensure!(id != INVALID_HANDLE, "failed to create index buffer");

        gl_call!(gl => bind_buffer(BufferTarget::Index, id));
        gl_call!(gl => buffer_data_static(BufferTarget::Index, bytemuck::cast_slice(indices)));

        log::debug!("index buffer {id}: uploaded {} indices", indices.len());

        Ok(Self {
            gl,
            id,
            count: indices.len(),
        })
    }

    pub fn bind(&self) {
        gl_call!(self.gl => bind_buffer(BufferTarget::Index, self.id));
    }

    pub fn unbind(&self) {
        gl_call!(self.gl => bind_buffer(BufferTarget::Index, INVALID_HANDLE));
    }

    /// Number of indices in the buffer.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn id(&self) -> Handle {
        self.id
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        gl_call!(self.gl => delete_buffer(self.id));
    }
}
