//! `Gl` for a loaded `glow::Context`.
//!
//! Safety: the device makes its context current on the event-loop thread right
//! after creation and never releases it, so every call below runs with a
//! current context. Handles are only ever produced by this same context.

use std::num::NonZeroU32;

use glow::HasContext;

use super::api::{
    BufferTarget, Gl, Handle, ShaderStage, UniformLocation, INVALID_HANDLE, MISSING_UNIFORM,
};

#[inline]
fn buffer(id: Handle) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(id).map(glow::NativeBuffer)
}

#[inline]
fn vertex_array(id: Handle) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(id).map(glow::NativeVertexArray)
}

#[inline]
fn shader(id: Handle) -> Option<glow::NativeShader> {
    NonZeroU32::new(id).map(glow::NativeShader)
}

#[inline]
fn program(id: Handle) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id).map(glow::NativeProgram)
}

/// Converts a creation result into a handle, logging the driver's reason on failure.
fn created(kind: &str, result: Result<NonZeroU32, String>) -> Handle {
    match result {
        Ok(id) => id.get(),
        Err(e) => {
            log::error!("driver refused to create {kind}: {e}");
            INVALID_HANDLE
        }
    }
}

impl Gl for glow::Context {
    fn get_error(&self) -> u32 {
        unsafe { HasContext::get_error(self) }
    }

    fn create_buffer(&self) -> Handle {
        created("buffer", unsafe { HasContext::create_buffer(self) }.map(|b| b.0))
    }

    fn bind_buffer(&self, target: BufferTarget, id: Handle) {
        unsafe { HasContext::bind_buffer(self, target.gl_enum(), buffer(id)) }
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(target.gl_enum(), data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, id: Handle) {
        if let Some(b) = buffer(id) {
            unsafe { HasContext::delete_buffer(self, b) }
        }
    }

    fn create_vertex_array(&self) -> Handle {
        created("vertex array", unsafe { HasContext::create_vertex_array(self) }.map(|a| a.0))
    }

    fn bind_vertex_array(&self, id: Handle) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array(id)) }
    }

    fn delete_vertex_array(&self, id: Handle) {
        if let Some(a) = vertex_array(id) {
            unsafe { HasContext::delete_vertex_array(self, a) }
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.vertex_attrib_pointer_f32(index, count, component_type, normalized, stride, offset)
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> Handle {
        created(
            "shader",
            unsafe { HasContext::create_shader(self, stage.gl_enum()) }.map(|s| s.0),
        )
    }

    fn shader_source(&self, id: Handle, source: &str) {
        if let Some(s) = shader(id) {
            unsafe { HasContext::shader_source(self, s, source) }
        }
    }

    fn compile_shader(&self, id: Handle) {
        if let Some(s) = shader(id) {
            unsafe { HasContext::compile_shader(self, s) }
        }
    }

    fn shader_compile_status(&self, id: Handle) -> bool {
        shader(id).is_some_and(|s| unsafe { self.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, id: Handle) -> String {
        shader(id)
            .map(|s| unsafe { self.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, id: Handle) {
        if let Some(s) = shader(id) {
            unsafe { HasContext::delete_shader(self, s) }
        }
    }

    fn create_program(&self) -> Handle {
        created("program", unsafe { HasContext::create_program(self) }.map(|p| p.0))
    }

    fn attach_shader(&self, program_id: Handle, shader_id: Handle) {
        if let (Some(p), Some(s)) = (program(program_id), shader(shader_id)) {
            unsafe { HasContext::attach_shader(self, p, s) }
        }
    }

    fn detach_shader(&self, program_id: Handle, shader_id: Handle) {
        if let (Some(p), Some(s)) = (program(program_id), shader(shader_id)) {
            unsafe { HasContext::detach_shader(self, p, s) }
        }
    }

    fn link_program(&self, id: Handle) {
        if let Some(p) = program(id) {
            unsafe { HasContext::link_program(self, p) }
        }
    }

    fn program_link_status(&self, id: Handle) -> bool {
        program(id).is_some_and(|p| unsafe { self.get_program_link_status(p) })
    }

    fn validate_program(&self, id: Handle) {
        if let Some(p) = program(id) {
            unsafe { HasContext::validate_program(self, p) }
        }
    }

    fn program_validate_status(&self, id: Handle) -> bool {
        program(id).is_some_and(|p| unsafe {
            self.get_program_parameter_i32(p, glow::VALIDATE_STATUS) == glow::TRUE as i32
        })
    }

    fn program_info_log(&self, id: Handle) -> String {
        program(id)
            .map(|p| unsafe { self.get_program_info_log(p) })
            .unwrap_or_default()
    }

    fn use_program(&self, id: Handle) {
        unsafe { HasContext::use_program(self, program(id)) }
    }

    fn delete_program(&self, id: Handle) {
        if let Some(p) = program(id) {
            unsafe { HasContext::delete_program(self, p) }
        }
    }

    fn uniform_location(&self, id: Handle, name: &str) -> UniformLocation {
        let Some(p) = program(id) else {
            return MISSING_UNIFORM;
        };
        unsafe { self.get_uniform_location(p, name) }
            .map_or(MISSING_UNIFORM, |loc| loc.0 as UniformLocation)
    }

    fn uniform_4f(&self, location: UniformLocation, v0: f32, v1: f32, v2: f32, v3: f32) {
        if location < 0 {
            return;
        }
        let loc = glow::NativeUniformLocation(location as u32);
        unsafe { self.uniform_4_f32(Some(&loc), v0, v1, v2, v3) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn clear(&self) {
        unsafe { HasContext::clear(self, glow::COLOR_BUFFER_BIT) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn draw_elements_u32(&self, count: i32) {
        unsafe { self.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0) }
    }
}
