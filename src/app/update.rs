//! The per-frame redraw cycle.
//!
//! Contains the advance/render orchestration for [`App`]: sleep to the frame
//! tick, advance game logic, collect the frame's shapes, apply context
//! requests, and record/submit/present the GPU work.

use wgpu;

use crate::engine::GameHooks;
use crate::renderer::shapes::ShapeBatch;

use super::event_handler::App;

impl<G: GameHooks> App<G> {
    /// Runs one frame of the loop.
    ///
    /// The frame limiter blocks first; this is the loop's only suspension
    /// point and it paces the whole process. The game then advances and
    /// renders unconditionally; the pause flag is the game's business, not
    /// the loop's. Surface acquisition failures skip the frame with a
    /// diagnostic and the next redraw retries.
    pub fn handle_redraw(&mut self) {
        let window = match &self.window {
            Some(window) => window.clone(),
            None => return,
        };
        if window.is_minimized().unwrap_or(false) {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            eprintln!("Cannot redraw without state initialized!");
            return;
        };

        // Frame pacing: sleep until the next tick, then record it.
        let now = state.limiter.tick();
        let tick = state.clock.frame(now);

        self.game.advance(&mut self.ctx, tick);

        let mut scene = ShapeBatch::new();
        self.game.render(&mut scene, &mut self.ctx, tick);

        // Apply whatever the game queued on the context this frame.
        if let Some(title) = self.ctx.take_title_request() {
            window.set_title(&title);
        }
        if let Some(fps) = self.ctx.take_fps_request() {
            state.limiter.set_fps(fps);
        }
        match self.ctx.take_score_overlay() {
            Some(overlay) => state.text_renderer.show_score(
                self.ctx.score(),
                overlay,
                state.wgpu_renderer.surface_config.width,
                state.wgpu_renderer.surface_config.height,
            ),
            None => state.text_renderer.hide_score(),
        }

        let (surface_texture, surface_view) = match state.wgpu_renderer.acquire_frame() {
            Ok(result) => result,
            Err(err) => {
                eprintln!("Failed to acquire frame: {}", err);
                return;
            }
        };

        let mut encoder = state
            .wgpu_renderer
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        state
            .wgpu_renderer
            .draw_shapes(&mut encoder, &surface_view, &scene);

        if let Err(err) = state.text_renderer.prepare(
            &state.wgpu_renderer.device,
            &state.wgpu_renderer.queue,
            &state.wgpu_renderer.surface_config,
        ) {
            println!("Failed to prepare text renderer: {}", err);
        }
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                label: Some("text render pass"),
                occlusion_query_set: None,
            });
            if let Err(err) = state.text_renderer.render(&mut render_pass) {
                println!("Failed to render text: {}", err);
            }
        }

        state.wgpu_renderer.queue.submit(Some(encoder.finish()));
        surface_texture.present();

        // Keep the device servicing resource cleanup between frames.
        state.wgpu_renderer.device.poll(wgpu::Maintain::Poll);

        window.request_redraw();
    }
}
