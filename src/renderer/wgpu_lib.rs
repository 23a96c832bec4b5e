//! WGPU surface and device management.
//!
//! [`WgpuRenderer`] owns the surface, device, queue, and the shape pipeline,
//! and exposes the per-frame sequence the redraw handler drives: acquire the
//! surface texture, record the shape pass (clearing to the batch's
//! background color), submit, present.

use wgpu::{self, SurfaceTexture, TextureView};

use crate::renderer::shapes::{ShapeBatch, ShapeRenderer};

/// GPU state for the application window.
pub struct WgpuRenderer {
    /// The surface frames are presented to.
    pub surface: wgpu::Surface<'static>,
    /// Surface format, size, and present mode.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Device for resource creation.
    pub device: wgpu::Device,
    /// Queue for command submission.
    pub queue: wgpu::Queue,
    /// Batched 2D shape pipeline.
    pub shape_renderer: ShapeRenderer,
}

impl WgpuRenderer {
    /// Initializes the adapter, device, surface configuration, and shape
    /// pipeline for a `width` × `height` surface.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Self {
        let adapter = Self::create_adapter(instance, &surface).await;
        let (device, queue) = Self::create_device(&adapter).await;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height);

        surface.configure(&device, &surface_config);

        let shape_renderer = ShapeRenderer::new(&device, surface_config.format, width, height);

        Self {
            surface,
            surface_config,
            device,
            queue,
            shape_renderer,
        }
    }

    /// Reconfigures the surface and the shape pipeline for a new size.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.shape_renderer.resize(width, height);
    }

    /// Acquires this frame's surface texture and view.
    ///
    /// An outdated or lost surface is reported as an error string; the
    /// caller skips the frame and tries again on the next redraw.
    pub fn acquire_frame(&self) -> Result<(SurfaceTexture, TextureView), String> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Outdated) => {
                return Err(String::from("WGPU surface outdated"));
            }
            Err(err) => {
                return Err(format!("Failed to acquire surface texture: {err:?}"));
            }
        };

        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok((surface_texture, surface_view))
    }

    /// Records the shape pass: clears to the batch's background color and
    /// draws every queued shape.
    pub fn draw_shapes(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &TextureView,
        batch: &ShapeBatch,
    ) {
        let [r, g, b, a] = batch.clear_color();
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            label: Some("shape render pass"),
            occlusion_query_set: None,
        });

        self.shape_renderer
            .render(&self.device, &mut render_pass, batch);
    }

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> wgpu::Adapter {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .expect("Failed to find an appropriate adapter")
    }

    async fn create_device(adapter: &wgpu::Adapter) -> (wgpu::Device, wgpu::Queue) {
        adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .expect("Failed to create device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|&&f| f == wgpu::TextureFormat::Bgra8UnormSrgb)
            .copied()
            .unwrap_or(capabilities.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
        }
    }
}
