use std::fs;
use std::path::Path;

use crate::gl::ShaderStage;

use super::error::ShaderError;

const MARKER: &str = "#shader";

/// Vertex and fragment GLSL split out of one combined file.
///
/// File format:
///
/// ```text
/// #shader vertex
/// #version 330 core
/// ...
/// #shader fragment
/// #version 330 core
/// ...
/// ```
///
/// A line containing `#shader` switches sections: to vertex if it also contains
/// `vertex`, otherwise to fragment if it contains `fragment`. A marker naming
/// neither keeps the current section. Markers are never part of the output.
/// Lines before the first recognised marker are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Splits `text` into its two stages.
    ///
    /// Every kept line is re-terminated with `\n`: CRLF endings become LF and a
    /// missing final newline is added.
    pub fn parse(text: &str) -> Self {
        let mut out = Self::default();
        let mut active: Option<ShaderStage> = None;

        for line in text.lines() {
            if line.contains(MARKER) {
                if line.contains("vertex") {
                    active = Some(ShaderStage::Vertex);
                } else if line.contains("fragment") {
                    active = Some(ShaderStage::Fragment);
                }
                continue;
            }

            if let Some(stage) = active {
                let section = out.section_mut(stage);
                section.push_str(line);
                section.push('\n');
            }
        }

        out
    }

    /// Reads and parses a combined shader file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = Self::parse(&text);
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if parsed.section(stage).is_empty() {
                log::warn!("{}: no {stage} section", path.display());
            }
        }

        Ok(parsed)
    }

    #[inline]
    pub fn section(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn section_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "\
#shader vertex
#version 330 core
layout(location = 0) in vec4 position;
void main() { gl_Position = position; }

#shader fragment
#version 330 core
layout(location = 0) out vec4 color;
uniform vec4 u_Color;
void main() { color = u_Color; }
";

    // ── sections ──────────────────────────────────────────────────────────

    #[test]
    fn splits_both_sections_in_file_order() {
        let src = ShaderSource::parse(BASIC);

        assert!(src.vertex.starts_with("#version 330 core\nlayout(location = 0) in vec4"));
        assert!(src.vertex.ends_with("void main() { gl_Position = position; }\n\n"));
        assert!(src.fragment.starts_with("#version 330 core\nlayout(location = 0) out vec4"));
        assert!(src.fragment.contains("uniform vec4 u_Color;\n"));
    }

    #[test]
    fn markers_are_not_emitted() {
        let src = ShaderSource::parse(BASIC);
        assert!(!src.vertex.contains(MARKER));
        assert!(!src.fragment.contains(MARKER));
    }

    #[test]
    fn fragment_first_is_fine() {
        let src = ShaderSource::parse("#shader fragment\nF\n#shader vertex\nV\n");
        assert_eq!(src.vertex, "V\n");
        assert_eq!(src.fragment, "F\n");
    }

    #[test]
    fn repeated_marker_appends_to_same_section() {
        let src =
            ShaderSource::parse("#shader vertex\na\n#shader fragment\nb\n#shader vertex\nc\n");
        assert_eq!(src.vertex, "a\nc\n");
        assert_eq!(src.fragment, "b\n");
    }

    // ── edge cases ────────────────────────────────────────────────────────

    #[test]
    fn no_markers_gives_empty_sources() {
        let src = ShaderSource::parse("void main() {}\nvoid other() {}\n");
        assert_eq!(src, ShaderSource::default());
    }

    #[test]
    fn empty_input() {
        assert_eq!(ShaderSource::parse(""), ShaderSource::default());
    }

    #[test]
    fn lines_before_first_marker_are_dropped() {
        let src = ShaderSource::parse("// header\n#shader vertex\nV\n");
        assert_eq!(src.vertex, "V\n");
    }

    #[test]
    fn unknown_marker_keeps_current_section() {
        let src = ShaderSource::parse("#shader vertex\na\n#shader geometry\nb\n");
        assert_eq!(src.vertex, "a\nb\n");
        assert!(src.fragment.is_empty());
    }

    #[test]
    fn unknown_marker_before_any_section_is_ignored() {
        let src = ShaderSource::parse("#shader compute\nx\n#shader fragment\ny\n");
        assert!(src.vertex.is_empty());
        assert_eq!(src.fragment, "y\n");
    }

    #[test]
    fn vertex_wins_when_marker_names_both() {
        let src = ShaderSource::parse("#shader vertex fragment\nx\n");
        assert_eq!(src.vertex, "x\n");
    }

    #[test]
    fn missing_final_newline_is_added() {
        let src = ShaderSource::parse("#shader vertex\nlast");
        assert_eq!(src.vertex, "last\n");
    }

    #[test]
    fn parsing_is_stateless() {
        let a = ShaderSource::parse(BASIC);
        let b = ShaderSource::parse(BASIC);
        assert_eq!(a, b);
    }

    // ── files ─────────────────────────────────────────────────────────────

    #[test]
    fn from_file_missing_path_is_io_error() {
        let err = ShaderSource::from_file("/definitely/not/here.shader").unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
    }

    #[test]
    fn from_file_reads_and_parses() {
        let name = format!("basalt-source-{}.shader", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, BASIC).unwrap();

        let src = ShaderSource::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(src, ShaderSource::parse(BASIC));
    }
}
