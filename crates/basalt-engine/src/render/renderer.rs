use std::rc::Rc;

use crate::gl::Gl;
use crate::gl_call;
use crate::paint::Color;
use crate::shader::Shader;

use super::index_buffer::IndexBuffer;
use super::vertex_array::VertexArray;

/// Frame-level draw helper.
///
/// Holds no GPU objects of its own; it only sequences the bind/draw calls.
#[derive(Clone)]
pub struct Renderer {
    gl: Rc<dyn Gl>,
}

impl Renderer {
    pub fn new(gl: &Rc<dyn Gl>) -> Self {
        Self { gl: Rc::clone(gl) }
    }

    /// Clears the color buffer to `color`.
    pub fn clear(&self, color: Color) {
        gl_call!(self.gl => clear_color(color.r, color.g, color.b, color.a));
        gl_call!(self.gl => clear());
    }

    /// Clears to `clear`, then hands the renderer to `draw`.
    pub fn frame<F>(&self, clear: Color, draw: F)
    where
        F: FnOnce(&Renderer),
    {
        self.clear(clear);
        draw(self);
    }

    /// Indexed triangle draw of every index in `ib`.
    ///
    /// Binds in program, array, index buffer order. The index buffer is bound
    /// explicitly even though the array already captured it.
    pub fn draw(&self, va: &VertexArray, ib: &IndexBuffer, shader: &Shader) {
        shader.bind();
        va.bind();
        ib.bind();

        let count = i32::try_from(ib.count()).unwrap_or(i32::MAX);
        gl_call!(self.gl => draw_elements_u32(count));
    }

    /// Maps clip space onto the whole `width` x `height` framebuffer.
    pub fn set_viewport(&self, width: u32, height: u32) {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        gl_call!(self.gl => viewport(0, 0, w, h));
    }

    #[inline]
    pub fn gl(&self) -> &Rc<dyn Gl> {
        &self.gl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::mock::{shared as gl, Call};
    use crate::gl::BufferTarget;
    use crate::render::{VertexBuffer, VertexBufferLayout};
    use crate::shader::ShaderSource;

    const SOURCE: &str = "#shader vertex\nvoid main() {}\n#shader fragment\nvoid main() {}\n";

    #[test]
    fn clear_sets_color_then_clears() {
        let (mock, gl) = gl();
        let renderer = Renderer::new(&gl);

        renderer.clear(Color::rgba(0.1, 0.2, 0.3, 1.0));

        assert_eq!(
            mock.calls(),
            vec![Call::ClearColor([0.1, 0.2, 0.3, 1.0]), Call::Clear]
        );
    }

    #[test]
    fn draw_binds_in_order_and_uses_index_count() {
        let (mock, gl) = gl();
        let renderer = Renderer::new(&gl);

        let vb = VertexBuffer::from_slice(&gl, &[0.0f32; 8]).unwrap();
        let ib = IndexBuffer::new(&gl, &[0, 1, 2, 2, 3, 0]).unwrap();
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2);
        let mut va = VertexArray::new(&gl).unwrap();
        va.add_buffer(&vb, &layout);
        let shader = Shader::from_source(&gl, "mem.shader", &ShaderSource::parse(SOURCE)).unwrap();
        mock.clear_calls();

        renderer.draw(&va, &ib, &shader);

        assert_eq!(
            mock.calls(),
            vec![
                Call::UseProgram(shader.id()),
                Call::BindVertexArray(va.id()),
                Call::BindBuffer(BufferTarget::Index, ib.id()),
                Call::DrawElements(6),
            ]
        );
    }

    #[test]
    fn frame_clears_before_the_draw_closure() {
        let (mock, gl) = gl();
        mock.add_uniform("u_Color", 4);

        let vb = VertexBuffer::from_slice(&gl, &[0.0f32; 8]).unwrap();
        let ib = IndexBuffer::new(&gl, &[0, 1, 2, 2, 3, 0]).unwrap();
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2);
        let mut va = VertexArray::new(&gl).unwrap();
        va.add_buffer(&vb, &layout);
        let shader = Shader::from_source(&gl, "mem.shader", &ShaderSource::parse(SOURCE)).unwrap();
        mock.clear_calls();

        let renderer = Renderer::new(&gl);
        renderer.frame(Color::BLACK, |r| {
            shader.bind();
            shader.set_uniform_4f("u_Color", 1.0, 0.5, 0.25, 1.0);
            r.draw(&va, &ib, &shader);
        });

        assert_eq!(
            mock.calls(),
            vec![
                Call::ClearColor([0.0, 0.0, 0.0, 1.0]),
                Call::Clear,
                Call::UseProgram(shader.id()),
                Call::UniformLocation(shader.id(), "u_Color".to_string()),
                Call::Uniform4f(4, [1.0, 0.5, 0.25, 1.0]),
                Call::UseProgram(shader.id()),
                Call::BindVertexArray(va.id()),
                Call::BindBuffer(BufferTarget::Index, ib.id()),
                Call::DrawElements(6),
            ]
        );
    }

    #[test]
    fn viewport_covers_framebuffer() {
        let (mock, gl) = gl();
        Renderer::new(&gl).set_viewport(1280, 720);
        assert_eq!(mock.calls(), vec![Call::Viewport(0, 0, 1280, 720)]);
    }
}
