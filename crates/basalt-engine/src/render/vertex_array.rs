use std::rc::Rc;

use anyhow::{ensure, Result};

use crate::gl::{Gl, Handle, INVALID_HANDLE};
use crate::gl_call;

use super::layout::VertexBufferLayout;
use super::vertex_buffer::VertexBuffer;

/// Vertex array object: records which buffer feeds which attribute slot.
///
/// The array stores the driver-side binding only. It does not keep the
/// `VertexBuffer` alive; callers keep the buffer around for as long as they
/// draw with this array.
pub struct VertexArray {
    gl: Rc<dyn Gl>,
    id: Handle,
    next_slot: u32,
}

impl VertexArray {
    pub fn new(gl: &Rc<dyn Gl>) -> Result<Self> {
        let gl = Rc::clone(gl);
        let id = gl_call!(gl => create_vertex_array());
        ensure!(id != INVALID_HANDLE, "failed to create vertex array");

        Ok(Self { gl, id, next_slot: 0 })
    }

    /// Attaches `buffer` using `layout`.
    ///
    /// Elements take consecutive attribute slots in layout order. A second call
    /// continues after the slots taken by the first; byte offsets restart at 0
    /// because they are relative to the new buffer.
    pub fn add_buffer(&mut self, buffer: &VertexBuffer, layout: &VertexBufferLayout) {
        self.bind();
        buffer.bind();

        let stride = layout.stride() as i32;

        for (element, offset) in layout.attributes() {
            let slot = self.next_slot;
            let info = element.ty.info();

            gl_call!(self.gl => enable_vertex_attrib_array(slot));
            gl_call!(self.gl => vertex_attrib_pointer(
                slot,
                element.count as i32,
                info.gl_enum,
                element.normalized,
                stride,
                offset as i32
            ));

            self.next_slot += 1;
        }

        log::debug!(
            "vertex array {}: buffer {} bound to {} attribute(s), stride {stride}",
            self.id,
            buffer.id(),
            layout.elements().len()
        );
    }

    pub fn bind(&self) {
        gl_call!(self.gl => bind_vertex_array(self.id));
    }

    pub fn unbind(&self) {
        gl_call!(self.gl => bind_vertex_array(INVALID_HANDLE));
    }

    /// Number of attribute slots described so far.
    #[inline]
    pub fn attribute_count(&self) -> u32 {
        self.next_slot
    }

    #[inline]
    pub fn id(&self) -> Handle {
        self.id
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        gl_call!(self.gl => delete_vertex_array(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::mock::{shared as gl, Call};
    use crate::gl::BufferTarget;

    fn pointers(calls: &[Call]) -> Vec<(u32, i32, u32, bool, i32, i32)> {
        calls
            .iter()
            .filter_map(|c| match *c {
                Call::VertexAttribPointer {
                    index,
                    count,
                    component_type,
                    normalized,
                    stride,
                    offset,
                } => Some((index, count, component_type, normalized, stride, offset)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn add_buffer_binds_array_then_buffer() {
        let (mock, gl) = gl();
        let vb = VertexBuffer::new(&gl, &[0u8; 32]).unwrap();
        let mut va = VertexArray::new(&gl).unwrap();
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2);
        mock.clear_calls();

        va.add_buffer(&vb, &layout);

        let calls = mock.calls();
        assert_eq!(calls[0], Call::BindVertexArray(va.id()));
        assert_eq!(calls[1], Call::BindBuffer(BufferTarget::Vertex, vb.id()));
        assert_eq!(calls[2], Call::EnableVertexAttribArray(0));
    }

    #[test]
    fn position_only_layout() {
        let (mock, gl) = gl();
        let vb = VertexBuffer::new(&gl, &[0u8; 32]).unwrap();
        let mut va = VertexArray::new(&gl).unwrap();
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2);

        va.add_buffer(&vb, &layout);

        assert_eq!(pointers(&mock.calls()), vec![(0, 2, glow::FLOAT, false, 8, 0)]);
    }

    #[test]
    fn offsets_are_prefix_sums() {
        let (mock, gl) = gl();
        let vb = VertexBuffer::new(&gl, &[0u8; 64]).unwrap();
        let mut va = VertexArray::new(&gl).unwrap();
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2).push_f32(3).push_u32(1);

        va.add_buffer(&vb, &layout);

        assert_eq!(
            pointers(&mock.calls()),
            vec![
                (0, 2, glow::FLOAT, false, 24, 0),
                (1, 3, glow::FLOAT, false, 24, 8),
                (2, 1, glow::UNSIGNED_INT, true, 24, 20),
            ]
        );
        assert_eq!(va.attribute_count(), 3);
    }

    #[test]
    fn second_buffer_continues_slot_numbering() {
        let (mock, gl) = gl();
        let positions = VertexBuffer::new(&gl, &[0u8; 32]).unwrap();
        let colors = VertexBuffer::new(&gl, &[0u8; 16]).unwrap();
        let mut va = VertexArray::new(&gl).unwrap();

        let mut pos_layout = VertexBufferLayout::new();
        pos_layout.push_f32(2);
        let mut color_layout = VertexBufferLayout::new();
        color_layout.push_u8(4);

        va.add_buffer(&positions, &pos_layout);
        va.add_buffer(&colors, &color_layout);

        assert_eq!(
            pointers(&mock.calls()),
            vec![
                (0, 2, glow::FLOAT, false, 8, 0),
                (1, 4, glow::UNSIGNED_BYTE, false, 4, 0),
            ]
        );
    }

    #[test]
    fn drop_deletes_array_but_not_buffer() {
        let (mock, gl) = gl();
        let vb = VertexBuffer::new(&gl, &[0u8; 8]).unwrap();
        let va = VertexArray::new(&gl).unwrap();
        let va_id = va.id();

        drop(va);

        assert_eq!(mock.count(|c| *c == Call::DeleteVertexArray(va_id)), 1);
        assert_eq!(mock.count(|c| matches!(c, Call::DeleteBuffer(_))), 0);
        drop(vb);
    }
}
