//! Loop and window configuration.

/// Startup configuration for the loop scaffold.
///
/// The window is created non-resizable at the given logical size; F11 toggles
/// borderless fullscreen at runtime without changing the logical layout.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Initial window title.
    pub title: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Target frames per second for the update/draw cycle.
    pub fps: f32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            title: String::from("Game"),
            width: 640,
            height: 480,
            fps: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_a_small_30_fps_window() {
        let config = LoopConfig::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.fps, 30.0);
    }
}
