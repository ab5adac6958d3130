use super::api::Gl;

/// Upper bound on flags popped per drain.
///
/// A lost context can keep reporting errors; the drain must still terminate.
const MAX_DRAINED_ERRORS: usize = 32;

/// Discards every pending error flag.
///
/// Must run before the checked call so a stale flag from an earlier, unchecked
/// call is not attributed to it.
pub fn clear_errors(gl: &dyn Gl) {
    for _ in 0..MAX_DRAINED_ERRORS {
        if gl.get_error() == glow::NO_ERROR {
            return;
        }
    }
    log::warn!("OpenGL error queue did not drain after {MAX_DRAINED_ERRORS} reads");
}

/// Logs every error raised by `call` and reports whether the call was clean.
pub fn log_call(gl: &dyn Gl, call: &str, file: &str, line: u32) -> bool {
    let mut clean = true;

    for _ in 0..MAX_DRAINED_ERRORS {
        let code = gl.get_error();
        if code == glow::NO_ERROR {
            break;
        }
        clean = false;
        log::error!(
            "[OpenGL error] {} (0x{code:04X}) in `{call}` at {file}:{line}",
            error_name(code)
        );
    }

    clean
}

/// Post-call check used by [`gl_call!`](crate::gl_call).
///
/// Driver errors are contract violations: debug builds stop right here,
/// release builds keep running with the error logged.
pub fn check_call(gl: &dyn Gl, call: &str, file: &str, line: u32) {
    let clean = log_call(gl, call, file, line);
    debug_assert!(clean, "OpenGL call `{call}` failed at {file}:{line}");
}

/// Symbolic name of a `glGetError` code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "unknown GL error",
    }
}

/// Issues one driver call with the drain-before / check-after discipline.
///
/// ```ignore
/// gl_call!(self.gl => bind_buffer(BufferTarget::Vertex, self.id));
/// ```
///
/// `*left` must be a [`Gl`] implementor or `dyn Gl` itself: an `Rc<dyn Gl>`,
/// a `&dyn Gl` or a `&impl Gl` all work. The call's value is returned unchanged.
#[macro_export]
macro_rules! gl_call {
    ($gl:expr => $method:ident ( $($arg:expr),* $(,)? )) => {{
        let gl: &dyn $crate::gl::Gl = &*$gl;
        $crate::gl::clear_errors(gl);
        let result = gl.$method($($arg),*);
        $crate::gl::check_call(
            gl,
            concat!(stringify!($method), "(", stringify!($($arg),*), ")"),
            file!(),
            line!(),
        );
        result
    }};
}
