use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;

use basalt_engine::core::{App, AppControl, FrameCtx};
use basalt_engine::device::GlInit;
use basalt_engine::gl::Gl;
use basalt_engine::input::Key;
use basalt_engine::logging::{init_logging, LoggingConfig};
use basalt_engine::paint::{Color, ColorCycle, Rgb};
use basalt_engine::render::{
    IndexBuffer, Renderer, VertexArray, VertexBuffer, VertexBufferLayout,
};
use basalt_engine::shader::Shader;
use basalt_engine::window::{Runtime, RuntimeConfig};

const BUNDLED_SHADER: &str = "res/shaders/basic.shader";
const COLOR_UNIFORM: &str = "u_Color";
const NUDGE: f32 = 0.05;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 2],
}

const QUAD: [Vertex; 4] = [
    Vertex { position: [-0.5, -0.5] },
    Vertex { position: [0.5, -0.5] },
    Vertex { position: [0.5, 0.5] },
    Vertex { position: [-0.5, 0.5] },
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let shader_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_shader_path);

    let config = RuntimeConfig {
        title: "basalt sandbox".to_string(),
        initial_size: LogicalSize::new(960.0, 540.0),
    };
    let gl_init = GlInit {
        clear_color: Color::rgb(0.07, 0.07, 0.09),
        ..GlInit::default()
    };

    Runtime::run(config, gl_init, |gl| QuadScene::new(gl, &shader_path))
}

/// Locates the bundled shader: the working directory first, then next to the
/// executable, then the source tree the binary was built from.
fn default_shader_path() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUNDLED_SHADER)));
    let built_from = Path::new(env!("CARGO_MANIFEST_DIR")).join(BUNDLED_SHADER);

    first_existing([Some(PathBuf::from(BUNDLED_SHADER)), beside_exe], built_from)
}

fn first_existing<I>(candidates: I, fallback: PathBuf) -> PathBuf
where
    I: IntoIterator<Item = Option<PathBuf>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|path| path.is_file())
        .unwrap_or(fallback)
}

// ── QuadScene ─────────────────────────────────────────────────────────────

/// One indexed quad filled with an animated uniform color.
///
/// Keys:
/// - `R` / `G` / `B` step that channel (hold Shift to step down)
/// - `Space` pauses the animation
/// - `Escape` quits
///
/// A shader that fails to load leaves `shader` empty; frames are still cleared
/// and presented, only the quad is skipped.
struct QuadScene {
    va: VertexArray,
    // Feeds `va`; kept alive for as long as the array is drawn.
    _vb: VertexBuffer,
    ib: IndexBuffer,
    shader: Option<Shader>,

    cycle: ColorCycle,
    paused: bool,
}

impl QuadScene {
    fn new(gl: &Rc<dyn Gl>, shader_path: &Path) -> Result<Self> {
        let mut va = VertexArray::new(gl)?;
        let vb = VertexBuffer::from_slice(gl, &QUAD)?;

        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2);
        va.add_buffer(&vb, &layout);

        // Created while `va` is bound, so the array records it as its element buffer.
        let ib = IndexBuffer::new(gl, &QUAD_INDICES)?;

        let shader = match Shader::from_file(gl, shader_path) {
            Ok(shader) => Some(shader),
            Err(err) => {
                log::error!("{}: {err}; drawing without the quad", shader_path.display());
                None
            }
        };

        // Leave nothing bound; every draw rebinds what it needs.
        va.unbind();
        vb.unbind();
        ib.unbind();
        if let Some(shader) = &shader {
            shader.unbind();
        }

        Ok(Self {
            va,
            _vb: vb,
            ib,
            shader,
            cycle: ColorCycle::default(),
            paused: false,
        })
    }

    fn handle_keys(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if ctx.input_frame.pressed(Key::Space) {
            self.paused = !self.paused;
            let title = if self.paused { "basalt sandbox (paused)" } else { "basalt sandbox" };
            ctx.runtime.set_title(title);
        }

        let amount = if ctx.input.modifiers.shift { -NUDGE } else { NUDGE };
        for (key, channel) in [(Key::R, Rgb::R), (Key::G, Rgb::G), (Key::B, Rgb::B)] {
            if ctx.input_frame.pressed(key) {
                self.cycle.nudge(channel, amount);
                log::info!("{channel:?} = {:.3}", self.cycle.channel(channel).value);
            }
        }

        AppControl::Continue
    }

    /// Sets the current color and draws the quad.
    fn draw_scene(&self, renderer: &Renderer) {
        let Some(shader) = &self.shader else {
            return;
        };

        let color = self.cycle.color();
        shader.bind();
        shader.set_uniform_4f(COLOR_UNIFORM, color.r, color.g, color.b, color.a);
        renderer.draw(&self.va, &self.ib, shader);
    }
}

impl App for QuadScene {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::Resized(size) = event {
            log::debug!("resized to {}x{}", size.width, size.height);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if self.handle_keys(ctx) == AppControl::Exit {
            return AppControl::Exit;
        }

        ctx.render(ctx.clear_color(), |renderer| self.draw_scene(renderer));

        if !self.paused {
            self.cycle.advance_by(ctx.time.dt);
        }

        AppControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_engine::gl::mock::{shared, Call};
    use basalt_engine::gl::{BufferTarget, ShaderStage};
    use basalt_engine::shader::ShaderSource;

    const BUNDLED: &str = include_str!("../res/shaders/basic.shader");

    fn render_frame(scene: &QuadScene, gl: &Rc<dyn Gl>, clear: Color) {
        Renderer::new(gl).frame(clear, |renderer| scene.draw_scene(renderer));
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn frame_clears_binds_sets_color_then_draws() {
        let (mock, gl) = shared();
        mock.add_uniform(COLOR_UNIFORM, 0);
        let scene = QuadScene::new(&gl, &default_shader_path()).unwrap();
        let program = scene.shader.as_ref().map(Shader::id).unwrap();
        mock.clear_calls();

        render_frame(&scene, &gl, Color::BLACK);

        assert_eq!(
            mock.calls(),
            vec![
                Call::ClearColor([0.0, 0.0, 0.0, 1.0]),
                Call::Clear,
                Call::UseProgram(program),
                Call::UniformLocation(program, COLOR_UNIFORM.to_string()),
                Call::Uniform4f(0, [0.1, 0.8, 1.0, 1.0]),
                Call::UseProgram(program),
                Call::BindVertexArray(scene.va.id()),
                Call::BindBuffer(BufferTarget::Index, scene.ib.id()),
                Call::DrawElements(QUAD_INDICES.len() as i32),
            ]
        );
    }

    #[test]
    fn broken_shader_still_builds_and_clears() {
        let (mock, gl) = shared();
        mock.fail_compile(ShaderStage::Fragment);

        let scene = QuadScene::new(&gl, &default_shader_path()).unwrap();
        assert!(scene.shader.is_none());

        mock.clear_calls();
        render_frame(&scene, &gl, Color::BLACK);

        assert_eq!(
            mock.calls(),
            vec![Call::ClearColor([0.0, 0.0, 0.0, 1.0]), Call::Clear]
        );
    }

    #[test]
    fn missing_shader_file_still_builds() {
        let (_mock, gl) = shared();
        let scene = QuadScene::new(&gl, Path::new("res/shaders/missing.shader")).unwrap();
        assert!(scene.shader.is_none());
    }

    // ── shader path ───────────────────────────────────────────────────────

    #[test]
    fn default_path_finds_bundled_shader() {
        assert!(default_shader_path().is_file());
    }

    #[test]
    fn first_existing_skips_missing_candidates() {
        let dir = std::env::temp_dir();
        let present = dir.join(format!("basalt-sandbox-{}.shader", std::process::id()));
        std::fs::write(&present, BUNDLED).unwrap();

        let picked = first_existing(
            [None, Some(dir.join("basalt-sandbox-absent.shader")), Some(present.clone())],
            PathBuf::from("fallback.shader"),
        );
        std::fs::remove_file(&present).unwrap();

        assert_eq!(picked, present);
    }

    #[test]
    fn first_existing_falls_back() {
        let picked = first_existing([None], PathBuf::from("fallback.shader"));
        assert_eq!(picked, PathBuf::from("fallback.shader"));
    }

    // ── data ──────────────────────────────────────────────────────────────

    #[test]
    fn bundled_shader_has_both_stages() {
        let src = ShaderSource::parse(BUNDLED);

        assert!(src.vertex.starts_with("#version 330 core\n"));
        assert!(src.fragment.starts_with("#version 330 core\n"));
        assert!(src.fragment.contains(COLOR_UNIFORM));
    }

    #[test]
    fn quad_indices_stay_in_range() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD.len()));
    }

    #[test]
    fn vertex_matches_layout_stride() {
        let mut layout = VertexBufferLayout::new();
        layout.push_f32(2);
        assert_eq!(std::mem::size_of::<Vertex>() as u32, layout.stride());
    }
}
