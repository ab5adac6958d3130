use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::gl::ShaderStage;

/// Why a shader program could not be built.
///
/// Every variant has already been logged at the failure site; callers decide
/// whether to exit or keep running without the program.
#[derive(Debug)]
pub enum ShaderError {
    /// The combined source file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The driver refused to allocate a shader or program object.
    Create { what: &'static str },
    /// A stage failed to compile.
    Compile { stage: ShaderStage, log: String },
    /// The stages compiled but do not link together.
    Link { log: String },
    /// The linked program cannot execute in the current state.
    Validate { log: String },
}

impl ShaderError {
    /// Driver info log attached to the error, if any.
    pub fn info_log(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { log, .. }
            | ShaderError::Link { log }
            | ShaderError::Validate { log } => Some(log),
            ShaderError::Io { .. } | ShaderError::Create { .. } => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "failed to read shader file {}: {source}", path.display())
            }
            ShaderError::Create { what } => write!(f, "failed to create {what} object"),
            ShaderError::Compile { stage, log } => {
                write!(f, "failed to compile {stage} shader: {}", log.trim_end())
            }
            ShaderError::Link { log } => {
                write!(f, "failed to link shader program: {}", log.trim_end())
            }
            ShaderError::Validate { log } => {
                write!(f, "failed to validate shader program: {}", log.trim_end())
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error\n".into(),
        };
        assert_eq!(err.to_string(), "failed to compile fragment shader: 0:3: syntax error");
        assert_eq!(err.info_log(), Some("0:3: syntax error\n"));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = ShaderError::Io {
            path: PathBuf::from("missing.shader"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.shader"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.info_log(), None);
    }
}
