use std::fmt;

/// Raw driver object name.
///
/// Only meaningful to the driver. `INVALID_HANDLE` never names a live object.
pub type Handle = u32;

/// Sentinel returned by object creation when the driver could not allocate.
pub const INVALID_HANDLE: Handle = 0;

/// Uniform location inside a linked program.
pub type UniformLocation = i32;

/// Location reported for names the linker did not keep.
pub const MISSING_UNIFORM: UniformLocation = -1;

/// Binding point a buffer object is attached to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute source (`GL_ARRAY_BUFFER`).
    Vertex,
    /// Element index source (`GL_ELEMENT_ARRAY_BUFFER`).
    Index,
}

impl BufferTarget {
    #[inline]
    pub const fn gl_enum(self) -> u32 {
        match self {
            BufferTarget::Vertex => glow::ARRAY_BUFFER,
            BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// One programmable stage of the pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    #[inline]
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    /// Name of the GL object a stage compiles into.
    #[inline]
    pub const fn object_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex shader",
            ShaderStage::Fragment => "fragment shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The subset of the OpenGL API used by the resource wrappers.
///
/// Every method maps onto a single driver entry point. Object names travel as
/// plain `u32` handles so that wrappers can store, compare and log them without
/// caring about the backend's handle types; `INVALID_HANDLE` stands for "none"
/// both as a creation result and as a bind argument.
///
/// Implementations must be called on the thread owning the current context.
pub trait Gl {
    /// Pops one error flag; `glow::NO_ERROR` when none is pending.
    fn get_error(&self) -> u32;

    fn create_buffer(&self) -> Handle;
    fn bind_buffer(&self, target: BufferTarget, buffer: Handle);
    /// Uploads `data` with `GL_STATIC_DRAW` usage into the buffer bound to `target`.
    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: Handle);

    fn create_vertex_array(&self) -> Handle;
    fn bind_vertex_array(&self, array: Handle);
    fn delete_vertex_array(&self, array: Handle);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    fn create_shader(&self, stage: ShaderStage) -> Handle;
    fn shader_source(&self, shader: Handle, source: &str);
    fn compile_shader(&self, shader: Handle);
    fn shader_compile_status(&self, shader: Handle) -> bool;
    fn shader_info_log(&self, shader: Handle) -> String;
    fn delete_shader(&self, shader: Handle);

    fn create_program(&self) -> Handle;
    fn attach_shader(&self, program: Handle, shader: Handle);
    fn detach_shader(&self, program: Handle, shader: Handle);
    fn link_program(&self, program: Handle);
    fn program_link_status(&self, program: Handle) -> bool;
    fn validate_program(&self, program: Handle);
    fn program_validate_status(&self, program: Handle) -> bool;
    fn program_info_log(&self, program: Handle) -> String;
    fn use_program(&self, program: Handle);
    fn delete_program(&self, program: Handle);

    /// Returns `MISSING_UNIFORM` when `name` is not an active uniform.
    fn uniform_location(&self, program: Handle, name: &str) -> UniformLocation;
    fn uniform_4f(&self, location: UniformLocation, v0: f32, v1: f32, v2: f32, v3: f32);

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    /// Clears the color buffer only.
    fn clear(&self);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Indexed triangle-list draw from the bound element buffer (`u32` indices, offset 0).
    fn draw_elements_u32(&self, count: i32);
}
