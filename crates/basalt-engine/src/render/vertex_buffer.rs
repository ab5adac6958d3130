use std::rc::Rc;

use anyhow::{ensure, Result};
use bytemuck::Pod;

use crate::gl::{BufferTarget, Gl, Handle, INVALID_HANDLE};
use crate::gl_call;

/// GPU buffer holding raw vertex bytes.
///
/// The payload is uploaded once at construction with static usage; there is no
/// update path. The buffer object is deleted when the wrapper is dropped.
pub struct VertexBuffer {
    gl: Rc<dyn Gl>,
    id: Handle,
    size: usize,
}

impl VertexBuffer {
    /// Creates a buffer and uploads `data`. Leaves the buffer bound.
    pub fn new(gl: &Rc<dyn Gl>, data: &[u8]) -> Result<Self> {
        let gl = Rc::clone(gl);
        let id = gl_call!(gl => create_buffer());
        ensure!(id != INVALID_HANDLE, "failed to create vertex buffer");

        gl_call!(gl => bind_buffer(BufferTarget::Vertex, id));
        gl_call!(gl => buffer_data_static(BufferTarget::Vertex, data));

        log::debug!("vertex buffer {id}: uploaded {} bytes", data.len());

        Ok(Self {
            gl,
            id,
            size: data.len(),
        })
    }

    /// Uploads a slice of plain-old-data vertices.
    pub fn from_slice<T: Pod>(gl: &Rc<dyn Gl>, vertices: &[T]) -> Result<Self> {
        Self::new(gl, bytemuck::cast_slice(vertices))
    }

    pub fn bind(&self) {
        gl_call!(self.gl => bind_buffer(BufferTarget::Vertex, self.id));
    }

    pub fn unbind(&self) {
        gl_call!(self.gl => bind_buffer(BufferTarget::Vertex, INVALID_HANDLE));
    }

    #[inline]
    pub fn id(&self) -> Handle {
        self.id
    }

    /// Size of the uploaded payload in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        gl_call!(self.gl => delete_buffer(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::mock::{shared as gl, Call};

    #[test]
    fn upload_binds_then_copies_bytes() {
        let (mock, gl) = gl();
        let positions = [-0.5f32, -0.5, 0.5, -0.5];

        let vb = VertexBuffer::from_slice(&gl, &positions).unwrap();

        assert_eq!(vb.size(), 16);
        assert_eq!(
            mock.calls(),
            vec![
                Call::CreateBuffer(vb.id()),
                Call::BindBuffer(BufferTarget::Vertex, vb.id()),
                Call::BufferData(BufferTarget::Vertex, bytemuck::cast_slice(&positions).to_vec()),
            ]
        );
    }

    #[test]
    fn unbind_restores_no_buffer() {
        let (mock, gl) = gl();
        let vb = VertexBuffer::new(&gl, &[1, 2, 3]).unwrap();
        mock.clear_calls();

        vb.bind();
        vb.unbind();

        assert_eq!(
            mock.calls(),
            vec![
                Call::BindBuffer(BufferTarget::Vertex, vb.id()),
                Call::BindBuffer(BufferTarget::Vertex, INVALID_HANDLE),
            ]
        );
    }

    #[test]
    fn drop_deletes_exactly_once() {
        let (mock, gl) = gl();
        let vb = VertexBuffer::new(&gl, &[0u8; 8]).unwrap();
        let id = vb.id();

        drop(vb);

        assert_eq!(mock.count(|c| *c == Call::DeleteBuffer(id)), 1);
    }

    #[test]
    fn allocation_failure_is_an_error() {
        let (mock, gl) = gl();
        mock.fail_alloc();

        assert!(VertexBuffer::new(&gl, &[0u8; 4]).is_err());
        assert_eq!(mock.count(|c| matches!(c, Call::DeleteBuffer(_))), 0);
    }
}
