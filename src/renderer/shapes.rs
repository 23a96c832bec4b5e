//! Batched 2D shape rendering.
//!
//! Everything the game draws (grid lines, stones, the center dot) is a
//! [`Shape`]: an axis-aligned rectangle with an optional corner radius,
//! rendered by a single pipeline in one indexed draw call per frame. A
//! circle is simply a square shape whose corner radius is half its edge; the
//! fragment shader evaluates a rounded-rectangle distance field, so one
//! shader covers lines, discs, and anything in between.
//!
//! The CPU side is split so game logic stays GPU-free: hooks fill a plain
//! [`ShapeBatch`], and the [`ShapeRenderer`] turns the batch into vertex data
//! at draw time.

use std::mem;

use wgpu::{
    self, BlendState, BufferUsages, ColorTargetState, ColorWrites, Device, FragmentState,
    MultisampleState, PrimitiveState, RenderPass, RenderPipeline, VertexAttribute,
    VertexBufferLayout, VertexFormat, VertexState, util::DeviceExt,
};

/// Per-vertex data handed to the shape shader.
///
/// `#[repr(C)]` keeps the layout stable for the GPU buffer; the trailing
/// padding rounds the stride to 16-byte alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    /// Corner position in normalized device coordinates.
    position: [f32; 2],
    /// RGBA fill color.
    color: [f32; 4],
    /// Pixel offset of this corner within the shape, for the SDF.
    uv: [f32; 2],
    /// Shape size in pixels.
    rect_size: [f32; 2],
    /// Corner radius in pixels; half the size renders a disc.
    corner_radius: f32,
    _padding: f32,
}

impl Vertex {
    fn desc<'a>() -> VertexBufferLayout<'a> {
        VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x4,
                },
                VertexAttribute {
                    offset: (mem::size_of::<[f32; 2]>() + mem::size_of::<[f32; 4]>())
                        as wgpu::BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: (mem::size_of::<[f32; 2]>()
                        + mem::size_of::<[f32; 4]>()
                        + mem::size_of::<[f32; 2]>())
                        as wgpu::BufferAddress,
                    shader_location: 3,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: (mem::size_of::<[f32; 2]>()
                        + mem::size_of::<[f32; 4]>()
                        + mem::size_of::<[f32; 2]>()
                        + mem::size_of::<[f32; 2]>())
                        as wgpu::BufferAddress,
                    shader_location: 4,
                    format: VertexFormat::Float32,
                },
            ],
        }
    }
}

/// One drawable primitive in pixel coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// RGBA fill color.
    pub color: [f32; 4],
    /// Corner radius in pixels; 0 is a sharp rectangle.
    pub corner_radius: f32,
}

impl Shape {
    /// A sharp-cornered rectangle.
    pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
            corner_radius: 0.0,
        }
    }

    /// A filled disc centered at `(cx, cy)`.
    pub fn circle(cx: f32, cy: f32, radius: f32, color: [f32; 4]) -> Self {
        Self {
            x: cx - radius,
            y: cy - radius,
            width: radius * 2.0,
            height: radius * 2.0,
            color,
            corner_radius: radius,
        }
    }
}

/// The shapes one frame draws, plus the surface clear color.
///
/// Plain data: building a batch needs no GPU handle, which keeps the game
/// hooks and their tests free of device setup.
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    clear_color: [f32; 4],
    shapes: Vec<Shape>,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBatch {
    /// An empty batch clearing to black.
    pub fn new() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            shapes: Vec::new(),
        }
    }

    /// Sets the color the surface is cleared to before shapes draw.
    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    /// The frame's clear color.
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Appends one shape; later shapes draw on top of earlier ones.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Appends a slice of prebuilt shapes.
    pub fn extend_from_slice(&mut self, shapes: &[Shape]) {
        self.shapes.extend_from_slice(shapes);
    }

    /// The queued shapes in draw order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Drops all queued shapes, keeping the clear color.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

/// Builds the four corner vertices for `shape` on a `window_width` ×
/// `window_height` surface.
///
/// Converts from screen space (top-left origin, Y down) to normalized device
/// coordinates (center origin, Y up); the UV channel carries pixel offsets so
/// the fragment shader can evaluate the corner-radius distance field.
fn corner_vertices(shape: &Shape, window_width: f32, window_height: f32) -> [Vertex; 4] {
    let x = (shape.x / window_width) * 2.0 - 1.0;
    let y = 1.0 - (shape.y / window_height) * 2.0;
    let width = (shape.width / window_width) * 2.0;
    let height = -(shape.height / window_height) * 2.0;

    let corner = |position: [f32; 2], uv: [f32; 2]| Vertex {
        position,
        color: shape.color,
        uv,
        rect_size: [shape.width, shape.height],
        corner_radius: shape.corner_radius,
        _padding: 0.0,
    };

    [
        corner([x, y], [0.0, 0.0]),
        corner([x + width, y], [shape.width, 0.0]),
        corner([x + width, y + height], [shape.width, shape.height]),
        corner([x, y + height], [0.0, shape.height]),
    ]
}

/// GPU pipeline that draws a [`ShapeBatch`] in one indexed call.
pub struct ShapeRenderer {
    render_pipeline: RenderPipeline,
    window_width: f32,
    window_height: f32,
}

impl ShapeRenderer {
    /// Creates the pipeline for the given surface format.
    pub fn new(
        device: &Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shape Pipeline Layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            window_width: width as f32,
            window_height: height as f32,
        }
    }

    /// Updates the surface size used for the screen-space → NDC conversion.
    /// Must track window resizes or shapes land at the wrong positions.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_width = width as f32;
        self.window_height = height as f32;
    }

    /// Draws every shape in `batch` with a single indexed draw call.
    ///
    /// Vertex and index buffers are rebuilt from the batch each frame; at a
    /// few hundred shapes that upload is trivial.
    pub fn render(&self, device: &Device, render_pass: &mut RenderPass, batch: &ShapeBatch) {
        if batch.shapes().is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);

        let mut all_vertices = Vec::with_capacity(batch.shapes().len() * 4);
        let mut all_indices: Vec<u16> = Vec::with_capacity(batch.shapes().len() * 6);

        for (shape_index, shape) in batch.shapes().iter().enumerate() {
            all_vertices.extend_from_slice(&corner_vertices(
                shape,
                self.window_width,
                self.window_height,
            ));

            let base = (shape_index * 4) as u16;
            all_indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Vertex Buffer"),
            contents: bytemuck::cast_slice(&all_vertices),
            usage: BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Index Buffer"),
            contents: bytemuck::cast_slice(&all_indices),
            usage: BufferUsages::INDEX,
        });

        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..all_indices.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_is_a_square_with_half_size_radius() {
        let circle = Shape::circle(100.0, 50.0, 13.0, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!((circle.x, circle.y), (87.0, 37.0));
        assert_eq!((circle.width, circle.height), (26.0, 26.0));
        assert_eq!(circle.corner_radius, 13.0);
    }

    #[test]
    fn batch_preserves_draw_order() {
        let mut batch = ShapeBatch::new();
        batch.push(Shape::rect(0.0, 0.0, 10.0, 10.0, [0.0; 4]));
        batch.extend_from_slice(&[
            Shape::rect(1.0, 0.0, 10.0, 10.0, [0.0; 4]),
            Shape::rect(2.0, 0.0, 10.0, 10.0, [0.0; 4]),
        ]);
        let xs: Vec<f32> = batch.shapes().iter().map(|shape| shape.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);

        batch.clear();
        assert!(batch.shapes().is_empty());
    }

    #[test]
    fn corner_vertices_cover_the_ndc_quad() {
        // A shape filling the whole 100×100 surface maps to the full NDC
        // square with Y flipped.
        let shape = Shape::rect(0.0, 0.0, 100.0, 100.0, [0.5, 0.5, 0.5, 1.0]);
        let [tl, tr, br, bl] = corner_vertices(&shape, 100.0, 100.0);
        assert_eq!(tl.position, [-1.0, 1.0]);
        assert_eq!(tr.position, [1.0, 1.0]);
        assert_eq!(br.position, [1.0, -1.0]);
        assert_eq!(bl.position, [-1.0, -1.0]);
        // UVs carry pixel offsets for the fragment SDF.
        assert_eq!(tl.uv, [0.0, 0.0]);
        assert_eq!(br.uv, [100.0, 100.0]);
    }

    #[test]
    fn corner_vertices_place_an_offset_shape() {
        let shape = Shape::rect(50.0, 25.0, 50.0, 25.0, [0.0; 4]);
        let [tl, _, br, _] = corner_vertices(&shape, 100.0, 100.0);
        assert_eq!(tl.position, [0.0, 0.5]);
        assert_eq!(br.position, [1.0, 0.0]);
        assert_eq!(tl.rect_size, [50.0, 25.0]);
    }
}
