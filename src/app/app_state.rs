//! Per-window application state.
//!
//! [`AppState`] holds everything that only exists once the window does: the
//! GPU renderer, the text layer, frame pacing, and the tracked cursor
//! position (winit reports clicks without coordinates, so the latest
//! `CursorMoved` position is what a click dispatches with).

use glyphon::Resolution;
use wgpu;

use crate::engine::timing::{FrameClock, FrameLimiter};
use crate::renderer::text::TextRenderer;
use crate::renderer::wgpu_lib::WgpuRenderer;

/// State created alongside the window.
pub struct AppState {
    /// The WGPU renderer for the shape pass.
    pub wgpu_renderer: WgpuRenderer,
    /// The text layer (score overlay).
    pub text_renderer: TextRenderer,
    /// Sleeps each frame to the configured FPS target.
    pub limiter: FrameLimiter,
    /// Delta-time and FPS bookkeeping.
    pub clock: FrameClock,
    /// Latest cursor position in pixels, for click dispatch.
    pub cursor_position: (f64, f64),
}

impl AppState {
    /// Initializes the renderers and frame pacing for a fresh surface.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        fps: f32,
    ) -> Self {
        let wgpu_renderer = WgpuRenderer::new(instance, surface, width, height).await;
        let mut text_renderer = TextRenderer::new(
            &wgpu_renderer.device,
            &wgpu_renderer.queue,
            wgpu_renderer.surface_config.format,
        );
        text_renderer.resize(&wgpu_renderer.queue, Resolution { width, height });

        Self {
            wgpu_renderer,
            text_renderer,
            limiter: FrameLimiter::new(fps),
            clock: FrameClock::new(),
            cursor_position: (0.0, 0.0),
        }
    }

    /// Propagates a window resize to the surface and both render layers.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize_surface(width, height);
        self.text_renderer
            .resize(&self.wgpu_renderer.queue, Resolution { width, height });
    }
}
