//! Text rendering on glyphon.
//!
//! Named text buffers with a style and a position, prepared and drawn once
//! per frame. The only text this game shows is the score overlay, but the
//! buffer map is generic; any caller can park a labeled string on screen.

use std::collections::HashMap;

use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, Style,
    SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer, Viewport,
    Weight,
};
use wgpu::{Device, Queue, RenderPass, SurfaceConfiguration};

use crate::engine::context::{Rect, ScoreOverlay};

/// Buffer id of the score overlay.
const SCORE_ID: &str = "score";

/// Point size of the score overlay, matching the original's display.
const SCORE_FONT_SIZE: f32 = 130.0;

/// Visual style for one text buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family name; falls back to whatever the system provides.
    pub font_family: String,
    /// Point size.
    pub font_size: f32,
    /// Line height in pixels.
    pub line_height: f32,
    /// Text color.
    pub color: Color,
    /// Font weight.
    pub weight: Weight,
    /// Normal or italic.
    pub style: Style,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::from("DejaVu Sans"),
            font_size: 16.0,
            line_height: 20.0,
            color: Color::rgb(255, 255, 255),
            weight: Weight::NORMAL,
            style: Style::Normal,
        }
    }
}

/// Placement of one text buffer, top-left origin.
#[derive(Debug, Clone, Default)]
pub struct TextPosition {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Wrap width; unbounded when `None`.
    pub max_width: Option<f32>,
    /// Clip height; unbounded when `None`.
    pub max_height: Option<f32>,
}

/// One shaped text entry in the buffer map.
#[derive(Debug)]
pub struct TextBuffer {
    buffer: Buffer,
    style: TextStyle,
    position: TextPosition,
    visible: bool,
}

/// Owns the glyphon plumbing and the named buffer map.
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    text_renderer: GlyphonTextRenderer,
    text_buffers: HashMap<String, TextBuffer>,
}

impl TextRenderer {
    /// Sets up the font system, atlas, and glyph renderer for the surface
    /// format. Fonts come from the system database.
    pub fn new(device: &Device, queue: &Queue, surface_format: wgpu::TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, surface_format);
        let text_renderer =
            GlyphonTextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            text_buffers: HashMap::new(),
        }
    }

    /// Creates or replaces the buffer `id` with `text`, shaped under `style`
    /// at `position`.
    pub fn create_text_buffer(
        &mut self,
        id: &str,
        text: &str,
        style: Option<TextStyle>,
        position: Option<TextPosition>,
    ) {
        let style = style.unwrap_or_default();
        let position = position.unwrap_or_default();

        let metrics = Metrics::new(style.font_size, style.line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, position.max_width, position.max_height);

        let attrs = Attrs::new()
            .family(Family::Name(&style.font_family))
            .weight(style.weight)
            .style(style.style);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        self.text_buffers.insert(
            id.to_string(),
            TextBuffer {
                buffer,
                style,
                position,
                visible: true,
            },
        );
    }

    /// Replaces the text of an existing buffer, keeping style and position.
    pub fn update_text(&mut self, id: &str, text: &str) -> Result<(), String> {
        let text_buffer = self
            .text_buffers
            .get_mut(id)
            .ok_or_else(|| format!("Text buffer '{}' not found", id))?;

        let attrs = Attrs::new()
            .family(Family::Name(&text_buffer.style.font_family))
            .weight(text_buffer.style.weight)
            .style(text_buffer.style.style);
        text_buffer
            .buffer
            .set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        text_buffer
            .buffer
            .shape_until_scroll(&mut self.font_system, false);
        Ok(())
    }

    /// Shows or hides a buffer without dropping it.
    pub fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(text_buffer) = self.text_buffers.get_mut(id) {
            text_buffer.visible = visible;
        }
    }

    /// Renders the score centered in the overlay's rectangle (or the whole
    /// surface when it has none), in a large bold face.
    pub fn show_score(
        &mut self,
        score: u32,
        overlay: ScoreOverlay,
        surface_width: u32,
        surface_height: u32,
    ) {
        let [r, g, b, _] = overlay.color;
        let style = TextStyle {
            font_size: SCORE_FONT_SIZE,
            line_height: SCORE_FONT_SIZE,
            color: Color::rgb(
                (r * 255.0).round() as u8,
                (g * 255.0).round() as u8,
                (b * 255.0).round() as u8,
            ),
            weight: Weight::BOLD,
            ..TextStyle::default()
        };

        // Reshape in place when only the number changed; rebuild the buffer
        // when the style (color, usually) did.
        let same_style = self
            .text_buffers
            .get(SCORE_ID)
            .is_some_and(|existing| existing.style == style);
        if same_style {
            if let Err(err) = self.update_text(SCORE_ID, &score.to_string()) {
                println!("Failed to update score text: {}", err);
            }
            self.set_visible(SCORE_ID, true);
        } else {
            self.create_text_buffer(SCORE_ID, &score.to_string(), Some(style), None);
        }

        // Measure the shaped text, then center it in the target rectangle.
        let target = overlay.rect.unwrap_or(Rect::new(
            0.0,
            0.0,
            surface_width as f32,
            surface_height as f32,
        ));
        if let Some(text_buffer) = self.text_buffers.get_mut(SCORE_ID) {
            let (text_width, text_height) = measure(&text_buffer.buffer);
            let (x, y) = target.centered_origin(text_width, text_height);
            text_buffer.position = TextPosition {
                x,
                y,
                max_width: None,
                max_height: None,
            };
        }
    }

    /// Hides the score overlay until the next `show_score`.
    pub fn hide_score(&mut self) {
        self.set_visible(SCORE_ID, false);
    }

    /// Updates the glyphon viewport after a surface resize.
    pub fn resize(&mut self, queue: &Queue, resolution: Resolution) {
        self.viewport.update(queue, resolution);
    }

    /// Shapes and uploads every visible buffer for this frame.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        surface_config: &SurfaceConfiguration,
    ) -> Result<(), glyphon::PrepareError> {
        let text_areas: Vec<TextArea> = self
            .text_buffers
            .values()
            .filter(|text_buffer| text_buffer.visible)
            .map(|text_buffer| TextArea {
                buffer: &text_buffer.buffer,
                left: text_buffer.position.x,
                top: text_buffer.position.y,
                scale: 1.0,
                bounds: TextBounds {
                    left: text_buffer.position.x as i32,
                    top: text_buffer.position.y as i32,
                    right: (text_buffer.position.x
                        + text_buffer
                            .position
                            .max_width
                            .unwrap_or(surface_config.width as f32)) as i32,
                    bottom: (text_buffer.position.y
                        + text_buffer
                            .position
                            .max_height
                            .unwrap_or(surface_config.height as f32)) as i32,
                },
                default_color: text_buffer.style.color,
                custom_glyphs: &[],
            })
            .collect();

        self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            text_areas,
            &mut self.swash_cache,
        )?;

        Ok(())
    }

    /// Draws every buffer prepared this frame.
    pub fn render(&mut self, render_pass: &mut RenderPass) -> Result<(), glyphon::RenderError> {
        self.text_renderer
            .render(&self.atlas, &self.viewport, render_pass)?;
        Ok(())
    }
}

/// Pixel extents of a shaped buffer: widest layout run by run count times
/// line height.
fn measure(buffer: &Buffer) -> (f32, f32) {
    let mut width = 0.0f32;
    let mut lines = 0usize;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        lines += 1;
    }
    (width, lines as f32 * buffer.metrics().line_height)
}
