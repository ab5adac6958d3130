use std::rc::Rc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{GlDevice, GlInit};
use crate::gl::Gl;
use crate::input::{InputFrame, InputState};
use crate::render::Renderer;
use crate::time::{FrameClock, FrameTime};

use super::translate::translate_input_event;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "basalt".to_string(),
            initial_size: LogicalSize::new(960.0, 540.0),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    SetTitle(String),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the app with `factory` once a context is
    /// current, and drives frames until exit.
    ///
    /// Setup failures (window, context, or `factory` itself) end the loop and
    /// are returned here.
    pub fn run<A, F>(config: RuntimeConfig, gl_init: GlInit, factory: F) -> Result<()>
    where
        A: CoreApp + 'static,
        F: FnOnce(&Rc<dyn Gl>) -> Result<A>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gl_init, factory);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Everything that lives between `resumed` and exit.
///
/// Fields drop in declaration order: the app (and every GPU wrapper it owns)
/// is released while the context in `device` is still current.
struct Session<A> {
    app: A,
    renderer: Renderer,
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    device: GlDevice,
}

struct AppState<A, F> {
    config: RuntimeConfig,
    gl_init: GlInit,
    factory: Option<F>,

    session: Option<Session<A>>,
    error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A, F> AppState<A, F>
where
    A: CoreApp + 'static,
    F: FnOnce(&Rc<dyn Gl>) -> Result<A>,
{
    fn new(config: RuntimeConfig, gl_init: GlInit, factory: F) -> Self {
        Self {
            config,
            gl_init,
            factory: Some(factory),
            session: None,
            error: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.shutdown(event_loop);
    }

    /// Drops the session (app first, then the context) and stops the loop.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.session = None;
        self.request_exit();
        event_loop.exit();
    }

    fn start_session(&mut self, event_loop: &ActiveEventLoop) -> Result<Session<A>> {
        let factory = self
            .factory
            .take()
            .context("application factory already consumed")?;

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let device = GlDevice::new(event_loop, attrs, self.gl_init.clone())?;

        let renderer = Renderer::new(device.gl());
        let size = device.size();
        renderer.set_viewport(size.width, size.height);

        let app = factory(device.gl()).context("failed to initialize application")?;

        log::info!("window ready: {}x{}", size.width, size.height);

        Ok(Session {
            app,
            renderer,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            device,
        })
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, commands: Vec<Command>) {
        for cmd in commands {
            match cmd {
                Command::SetTitle(title) => {
                    if let Some(session) = &self.session {
                        session.device.window().set_title(&title);
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            self.shutdown(event_loop);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let mut runtime_ctx = RuntimeCtx::default();
        let ft: FrameTime = session.clock.tick();

        let control = {
            let mut ctx = FrameCtx {
                window: session.device.window(),
                renderer: &session.renderer,
                input: &session.input_state,
                input_frame: &session.input_frame,
                time: ft,
                runtime: &mut runtime_ctx,
                clear_color: session.device.clear_color(),
            };

            session.app.on_frame(&mut ctx)
        };

        // Per-frame deltas are consumed.
        session.input_frame.clear();

        if let Err(err) = session.device.present() {
            self.fail(event_loop, err);
            return;
        }

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }

        let commands = runtime_ctx.take();
        self.apply_commands(event_loop, commands);
    }
}

impl<A, F> ApplicationHandler for AppState<A, F>
where
    A: CoreApp + 'static,
    F: FnOnce(&Rc<dyn Gl>) -> Result<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() || self.exit_requested {
            return;
        }

        match self.start_session(event_loop) {
            Ok(session) => {
                session.device.window().request_redraw();
                self.session = Some(session);
            }
            Err(err) => self.fail(event_loop, err.context("failed to start")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; vsync in `present` paces the loop.
        if let Some(session) = &self.session {
            session.device.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(ev) = translate_input_event(&session.input_state, &event) {
            session.input_state.apply_event(&mut session.input_frame, ev);
        }

        if session.app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                session.device.resize(*new_size);
                session.renderer.set_viewport(new_size.width, new_size.height);
                session.device.window().request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = session.device.window().inner_size();
                session.device.resize(new_size);
                session.renderer.set_viewport(new_size.width, new_size.height);
            }

            // Frames stop while hidden; restart timing instead of reporting the gap.
            WindowEvent::Occluded(false) => session.clock.reset(),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_buffered_in_order() {
        let mut ctx = RuntimeCtx::default();
        ctx.set_title("paused");
        ctx.exit();

        assert_eq!(
            ctx.take(),
            vec![Command::SetTitle("paused".into()), Command::Exit]
        );
        assert!(ctx.take().is_empty());
    }

    #[test]
    fn default_config_has_title_and_size() {
        let config = RuntimeConfig::default();
        assert_eq!(config.title, "basalt");
        assert!(config.initial_size.width > 0.0 && config.initial_size.height > 0.0);
    }
}
