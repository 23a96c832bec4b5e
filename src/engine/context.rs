//! The loop-owned state handed to every game hook.
//!
//! [`LoopContext`] replaces what the loop would otherwise keep as ambient
//! globals: the pause and end-of-game flags, the score, and the requests a
//! game raises against the window (title change, FPS retarget, score
//! overlay). Requests are queued here and applied by the application driver
//! once per frame, so hooks never need a window handle.

/// An axis-aligned rectangle in pixel coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left origin at which content of `content_width` ×
    /// `content_height` sits centered inside this rectangle.
    pub fn centered_origin(&self, content_width: f32, content_height: f32) -> (f32, f32) {
        (
            self.x + (self.width - content_width) / 2.0,
            self.y + (self.height - content_height) / 2.0,
        )
    }
}

/// A request to render the score this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOverlay {
    /// Text color.
    pub color: [f32; 4],
    /// Placement rectangle; `None` centers on the whole screen.
    pub rect: Option<Rect>,
}

/// Converts a `0xRRGGBB` color to normalized RGBA.
pub const fn hex_rgb(color: u32) -> [f32; 4] {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    [r, g, b, 1.0]
}

/// Loop-owned state passed into every hook invocation.
#[derive(Debug, Default)]
pub struct LoopContext {
    paused: bool,
    ended: bool,
    score: u32,
    title_request: Option<String>,
    fps_request: Option<f32>,
    score_overlay: Option<ScoreOverlay>,
}

impl LoopContext {
    /// Creates a context with nothing paused, nothing ended, score zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the pause flag.
    ///
    /// The loop itself never consults the flag: advancing and rendering
    /// continue either way, and honoring the pause is up to the game.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Current pause flag.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Marks the game as finished; input handlers use this to go quiet.
    pub fn mark_ended(&mut self) {
        self.ended = true;
    }

    /// True once the game has finished.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Current score value.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Replaces the score value.
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Requests a new window title; applied after the current dispatch.
    pub fn request_title(&mut self, title: impl Into<String>) {
        self.title_request = Some(title.into());
    }

    /// Takes the pending title request, if any.
    pub fn take_title_request(&mut self) -> Option<String> {
        self.title_request.take()
    }

    /// Retargets the frame limiter to `fps`.
    pub fn set_fps(&mut self, fps: f32) {
        self.fps_request = Some(fps);
    }

    /// Takes the pending FPS retarget, if any.
    pub fn take_fps_request(&mut self) -> Option<f32> {
        self.fps_request.take()
    }

    /// Requests the score rendered centered in `rect`, or centered on the
    /// screen when `rect` is `None`. The request covers one frame; a game
    /// that wants a persistent score calls this from its render hook.
    pub fn draw_score(&mut self, color: [f32; 4], rect: Option<Rect>) {
        self.score_overlay = Some(ScoreOverlay { color, rect });
    }

    /// Takes this frame's score-overlay request, if any.
    pub fn take_score_overlay(&mut self) -> Option<ScoreOverlay> {
        self.score_overlay.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rgb_splits_channels() {
        assert_eq!(hex_rgb(0x000000), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex_rgb(0xFFFFFF), [1.0, 1.0, 1.0, 1.0]);
        let [r, g, b, a] = hex_rgb(0x8B5742);
        assert!((r - 139.0 / 255.0).abs() < 1e-6);
        assert!((g - 87.0 / 255.0).abs() < 1e-6);
        assert!((b - 66.0 / 255.0).abs() < 1e-6);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn toggle_pause_flips_back_and_forth() {
        let mut ctx = LoopContext::new();
        assert!(!ctx.is_paused());
        ctx.toggle_pause();
        assert!(ctx.is_paused());
        ctx.toggle_pause();
        assert!(!ctx.is_paused());
    }

    #[test]
    fn title_and_fps_requests_are_taken_once() {
        let mut ctx = LoopContext::new();
        ctx.request_title("Done");
        ctx.set_fps(15.0);
        assert_eq!(ctx.take_title_request().as_deref(), Some("Done"));
        assert_eq!(ctx.take_title_request(), None);
        assert_eq!(ctx.take_fps_request(), Some(15.0));
        assert_eq!(ctx.take_fps_request(), None);
    }

    #[test]
    fn score_overlay_request_covers_one_frame() {
        let mut ctx = LoopContext::new();
        ctx.set_score(42);
        ctx.draw_score([1.0, 0.0, 0.0, 1.0], None);
        let overlay = ctx.take_score_overlay().expect("overlay was requested");
        assert_eq!(overlay.rect, None);
        assert_eq!(ctx.take_score_overlay(), None);
        assert_eq!(ctx.score(), 42);
    }

    #[test]
    fn centered_origin_centers_content_in_a_rect() {
        let rect = Rect::new(100.0, 50.0, 200.0, 80.0);
        assert_eq!(rect.centered_origin(60.0, 20.0), (170.0, 80.0));
        // Content larger than the rect overflows symmetrically.
        let (x, _) = rect.centered_origin(300.0, 20.0);
        assert_eq!(x, 50.0);
    }
}
