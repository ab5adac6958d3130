//! Recording `Gl` for tests that run without a context.
//!
//! Every call except `get_error` is appended to a log. Object creation hands out
//! increasing non-zero handles. Failures (allocation, compile, link, validate,
//! driver error flags) are injected through setters.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::api::{
    BufferTarget, Gl, Handle, ShaderStage, UniformLocation, INVALID_HANDLE, MISSING_UNIFORM,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(Handle),
    BindBuffer(BufferTarget, Handle),
    BufferData(BufferTarget, Vec<u8>),
    DeleteBuffer(Handle),
    CreateVertexArray(Handle),
    BindVertexArray(Handle),
    DeleteVertexArray(Handle),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        count: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    CreateShader(ShaderStage, Handle),
    ShaderSource(Handle, String),
    CompileShader(Handle),
    DeleteShader(Handle),
    CreateProgram(Handle),
    AttachShader(Handle, Handle),
    DetachShader(Handle, Handle),
    LinkProgram(Handle),
    ValidateProgram(Handle),
    UseProgram(Handle),
    DeleteProgram(Handle),
    UniformLocation(Handle, String),
    Uniform4f(UniformLocation, [f32; 4]),
    ClearColor([f32; 4]),
    Clear,
    Viewport(i32, i32, i32, i32),
    DrawElements(i32),
}

#[derive(Default)]
pub struct MockGl {
    next_handle: Cell<Handle>,
    calls: RefCell<Vec<Call>>,
    errors: RefCell<VecDeque<u32>>,
    error_after_next_call: Cell<Option<u32>>,
    shader_stages: RefCell<HashMap<Handle, ShaderStage>>,
    failing_stage: Cell<Option<ShaderStage>>,
    fail_link: Cell<bool>,
    fail_validate: Cell<bool>,
    fail_alloc: Cell<bool>,
    uniforms: RefCell<HashMap<String, UniformLocation>>,
    info_log: RefCell<String>,
}

/// A mock plus the type-erased handle wrappers expect; both point at the same log.
pub fn shared() -> (Rc<MockGl>, Rc<dyn Gl>) {
    let mock = Rc::new(MockGl::new());
    let gl: Rc<dyn Gl> = mock.clone();
    (mock, gl)
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Queues an error flag as if an earlier call had raised it.
    pub fn push_error(&self, code: u32) {
        self.errors.borrow_mut().push_back(code);
    }

    /// The next recorded call raises `code`.
    pub fn fail_next_call(&self, code: u32) {
        self.error_after_next_call.set(Some(code));
    }

    pub fn pending_errors(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn fail_compile(&self, stage: ShaderStage) {
        self.failing_stage.set(Some(stage));
    }

    pub fn fail_link(&self) {
        self.fail_link.set(true);
    }

    pub fn fail_validate(&self) {
        self.fail_validate.set(true);
    }

    pub fn fail_alloc(&self) {
        self.fail_alloc.set(true);
    }

    pub fn set_info_log(&self, log: &str) {
        *self.info_log.borrow_mut() = log.to_string();
    }

    pub fn add_uniform(&self, name: &str, location: UniformLocation) {
        self.uniforms.borrow_mut().insert(name.to_string(), location);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
        if let Some(code) = self.error_after_next_call.take() {
            self.push_error(code);
        }
    }

    fn allocate(&self) -> Handle {
        if self.fail_alloc.get() {
            return INVALID_HANDLE;
        }
        let id = self.next_handle.get() + 1;
        self.next_handle.set(id);
        id
    }
}

impl Gl for MockGl {
    fn get_error(&self) -> u32 {
        self.errors.borrow_mut().pop_front().unwrap_or(glow::NO_ERROR)
    }

    fn create_buffer(&self) -> Handle {
        let id = self.allocate();
        self.record(Call::CreateBuffer(id));
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Handle) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.to_vec()));
    }

    fn delete_buffer(&self, buffer: Handle) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Handle {
        let id = self.allocate();
        self.record(Call::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, array: Handle) {
        self.record(Call::BindVertexArray(array));
    }

    fn delete_vertex_array(&self, array: Handle) {
        self.record(Call::DeleteVertexArray(array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
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
        self.record(Call::VertexAttribPointer {
            index,
            count,
            component_type,
            normalized,
            stride,
            offset,
        });
    }

    fn create_shader(&self, stage: ShaderStage) -> Handle {
        let id = self.allocate();
        if id != INVALID_HANDLE {
            self.shader_stages.borrow_mut().insert(id, stage);
        }
        self.record(Call::CreateShader(stage, id));
        id
    }

    fn shader_source(&self, shader: Handle, source: &str) {
        self.record(Call::ShaderSource(shader, source.to_string()));
    }

    fn compile_shader(&self, shader: Handle) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: Handle) -> bool {
        let stage = self.shader_stages.borrow().get(&shader).copied();
        stage.is_some() && stage != self.failing_stage.get()
    }

    fn shader_info_log(&self, _shader: Handle) -> String {
        self.info_log.borrow().clone()
    }

    fn delete_shader(&self, shader: Handle) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Handle {
        let id = self.allocate();
        self.record(Call::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: Handle, shader: Handle) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: Handle, shader: Handle) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: Handle) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: Handle) -> bool {
        !self.fail_link.get()
    }

    fn validate_program(&self, program: Handle) {
        self.record(Call::ValidateProgram(program));
    }

    fn program_validate_status(&self, _program: Handle) -> bool {
        !self.fail_validate.get()
    }

    fn program_info_log(&self, _program: Handle) -> String {
        self.info_log.borrow().clone()
    }

    fn use_program(&self, program: Handle) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: Handle) {
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, program: Handle, name: &str) -> UniformLocation {
        self.record(Call::UniformLocation(program, name.to_string()));
        self.uniforms
            .borrow()
            .get(name)
            .copied()
            .unwrap_or(MISSING_UNIFORM)
    }

    fn uniform_4f(&self, location: UniformLocation, v0: f32, v1: f32, v2: f32, v3: f32) {
        self.record(Call::Uniform4f(location, [v0, v1, v2, v3]));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn draw_elements_u32(&self, count: i32) {
        self.record(Call::DrawElements(count));
    }
}
