use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::gl::Gl;
use crate::paint::Color;

use super::GlInit;

/// Owns the window, its GL surface and the current GL context.
///
/// Field order is drop order: the function table goes first, the window last.
/// Every GPU wrapper built from [`GlDevice::gl`] must be dropped before this.
pub struct GlDevice {
    gl: Rc<dyn Gl>,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,

    size: PhysicalSize<u32>,
    clear_color: Color,
}

impl GlDevice {
    /// Creates the window and a current core-profile context for it.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attrs: WindowAttributes,
        init: GlInit,
    ) -> Result<Self> {
        let GlInit { version, vsync, clear_color } = init;

        // No alpha or sample requirement; `pick_config` ranks those instead.
        let template = ConfigTemplateBuilder::new();
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;
        let window = window.context("GL display was created without a window")?;

        log::debug!(
            "GL config: {} sample(s), alpha {}",
            gl_config.num_samples(),
            gl_config.alpha_size()
        );

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let gl_display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(version.0, version.1))))
            .build(Some(raw_window_handle));

        // SAFETY: the raw handle belongs to `window`, which outlives the context.
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .with_context(|| {
                format!("failed to create OpenGL {}.{} core context", version.0, version.1)
            })?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;

        // SAFETY: as above; the surface is dropped before the window.
        let gl_surface =
            unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
                .context("failed to create window surface")?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .context("failed to make GL context current")?;

        let interval = if vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            log::warn!("failed to set swap interval {interval:?}: {e}");
        }

        // SAFETY: the context is current on this thread for the device's lifetime.
        let glow = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };
        log_context_info(&glow);

        let size = window.inner_size();

        Ok(Self {
            gl: Rc::new(glow),
            gl_surface,
            gl_context,
            window,
            size,
            clear_color,
        })
    }

    /// Shared GL function table for resource wrappers.
    #[inline]
    pub fn gl(&self) -> &Rc<dyn Gl> {
        &self.gl
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Resizes the surface. Zero-sized (minimized) windows are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            return;
        };

        self.gl_surface.resize(&self.gl_context, w, h);
        self.size = new_size;
    }

    /// Swaps the back buffer onto the window.
    pub fn present(&self) -> Result<()> {
        self.window.pre_present_notify();
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("failed to swap buffers")
    }
}

/// Prefers a config with an 8-bit alpha channel, then the most samples.
///
/// The template is the builder default, so the set is empty only when the
/// display has no config that can render to a window at all.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .max_by_key(config_rank)
        .expect("display offered no window-compatible GL config")
}

fn config_rank(config: &Config) -> (bool, u8) {
    (config.alpha_size() >= 8, config.num_samples())
}

fn log_context_info(gl: &glow::Context) {
    use glow::HasContext;

    // SAFETY: plain string queries on the current context.
    let (version, renderer) = unsafe {
        (
            gl.get_parameter_string(glow::VERSION),
            gl.get_parameter_string(glow::RENDERER),
        )
    };
    log::info!("OpenGL {version} on {renderer}");
}
