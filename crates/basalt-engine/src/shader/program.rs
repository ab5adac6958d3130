use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::gl::{Gl, Handle, ShaderStage, INVALID_HANDLE, MISSING_UNIFORM};
use crate::gl_call;

use super::error::ShaderError;
use super::source::ShaderSource;

/// Longest info log kept in errors and log lines, in bytes.
pub const MAX_INFO_LOG: usize = 1024;

/// A linked vertex + fragment program.
///
/// A `Shader` always holds a live, non-zero program; construction fails with a
/// [`ShaderError`] instead of producing an unusable value. Uniform locations are
/// looked up on every set call.
pub struct Shader {
    gl: Rc<dyn Gl>,
    id: Handle,
    path: PathBuf,
}

impl Shader {
    /// Loads, compiles and links the combined shader file at `path`.
    pub fn from_file(gl: &Rc<dyn Gl>, path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = ShaderSource::from_file(path)?;
        Self::from_source(gl, path, &source)
    }

    /// Compiles and links already-parsed sources. `path` is kept for diagnostics.
    pub fn from_source(
        gl: &Rc<dyn Gl>,
        path: impl AsRef<Path>,
        source: &ShaderSource,
    ) -> Result<Self, ShaderError> {
        let path = path.as_ref().to_path_buf();
        let gl = Rc::clone(gl);

        let vs = compile_stage(&*gl, ShaderStage::Vertex, &source.vertex)?;
        let fs = match compile_stage(&*gl, ShaderStage::Fragment, &source.fragment) {
            Ok(fs) => fs,
            Err(err) => {
                gl_call!(gl => delete_shader(vs));
                return Err(err);
            }
        };
        let id = link_program(&*gl, vs, fs)?;

        log::debug!("shader {id}: built from {}", path.display());

        Ok(Self { gl, id, path })
    }

    pub fn bind(&self) {
        gl_call!(self.gl => use_program(self.id));
    }

    pub fn unbind(&self) {
        gl_call!(self.gl => use_program(INVALID_HANDLE));
    }

    /// Sets a `vec4` uniform on this program.
    ///
    /// The program must be bound. An unknown name is logged and skipped.
    pub fn set_uniform_4f(&self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        let location = gl_call!(self.gl => uniform_location(self.id, name));
        if location == MISSING_UNIFORM {
            log::warn!("uniform `{name}` not found in {}", self.path.display());
            return;
        }
        gl_call!(self.gl => uniform_4f(location, v0, v1, v2, v3));
    }

    #[inline]
    pub fn id(&self) -> Handle {
        self.id
    }

    /// File the program was built from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        gl_call!(self.gl => delete_program(self.id));
    }
}

/// Compiles one stage and returns the live shader object.
///
/// On failure the object is deleted and the (bounded) info log is returned in
/// the error.
pub fn compile_stage(gl: &dyn Gl, stage: ShaderStage, source: &str) -> Result<Handle, ShaderError> {
    let id = gl_call!(gl => create_shader(stage));
    if id == INVALID_HANDLE {
        log::error!("failed to create {stage} shader object");
        return Err(ShaderError::Create { what: stage.object_name() });
    }

    gl_call!(gl => shader_source(id, source));
    gl_call!(gl => compile_shader(id));

    if gl_call!(gl => shader_compile_status(id)) {
        return Ok(id);
    }

    let log = bounded(gl_call!(gl => shader_info_log(id)));
    log::error!("failed to compile {stage} shader:\n{log}");
    gl_call!(gl => delete_shader(id));

    Err(ShaderError::Compile { stage, log })
}

/// Links `vs` + `fs` into a program and validates it.
///
/// Takes ownership of both stage objects: they are deleted on every path. On
/// success they are detached first so the driver can free them right away.
pub fn link_program(gl: &dyn Gl, vs: Handle, fs: Handle) -> Result<Handle, ShaderError> {
    let program = gl_call!(gl => create_program());
    if program == INVALID_HANDLE {
        log::error!("failed to create program object");
        gl_call!(gl => delete_shader(vs));
        gl_call!(gl => delete_shader(fs));
        return Err(ShaderError::Create { what: "program" });
    }

    gl_call!(gl => attach_shader(program, vs));
    gl_call!(gl => attach_shader(program, fs));
    gl_call!(gl => link_program(program));

    let failure = if !gl_call!(gl => program_link_status(program)) {
        Some(ShaderError::Link { log: bounded(gl_call!(gl => program_info_log(program))) })
    } else {
        gl_call!(gl => validate_program(program));
        if gl_call!(gl => program_validate_status(program)) {
            None
        } else {
            Some(ShaderError::Validate { log: bounded(gl_call!(gl => program_info_log(program))) })
        }
    };

    if let Some(err) = failure {
        log::error!("{err}");
        gl_call!(gl => delete_shader(vs));
        gl_call!(gl => delete_shader(fs));
        gl_call!(gl => delete_program(program));
        return Err(err);
    }

    gl_call!(gl => detach_shader(program, vs));
    gl_call!(gl => detach_shader(program, fs));
    gl_call!(gl => delete_shader(vs));
    gl_call!(gl => delete_shader(fs));

    Ok(program)
}

/// Cuts `log` to at most `MAX_INFO_LOG` bytes on a char boundary.
fn bounded(mut log: String) -> String {
    if log.len() > MAX_INFO_LOG {
        let mut end = MAX_INFO_LOG;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}
