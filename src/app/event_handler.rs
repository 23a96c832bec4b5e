//! Event handling and input dispatch.
//!
//! Contains the [`App`] struct and its `ApplicationHandler` implementation.

use std::sync::Arc;

use wgpu;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

use crate::app::app_state::AppState;
use crate::engine::GameHooks;
use crate::engine::config::LoopConfig;
use crate::engine::context::LoopContext;
use crate::engine::input::InputBindings;

/// Key reserved by the loop for the fullscreen toggle; it is consumed before
/// the binding maps are consulted.
const FULLSCREEN_KEY: KeyCode = KeyCode::F11;

/// The windowed application: a game plugged into the loop scaffold.
///
/// Owns the winit/WGPU lifecycle and everything the loop carries across
/// frames: the binding maps, the [`LoopContext`], and the game itself. The
/// window and [`AppState`] stay `None` until winit resumes the application.
pub struct App<G: GameHooks> {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// The current application state, `None` until the window exists.
    pub state: Option<AppState>,
    /// The application window, `None` until winit creates it.
    pub window: Option<Arc<Window>>,
    config: LoopConfig,
    pub(super) game: G,
    bindings: InputBindings<G::Action>,
    pub(super) ctx: LoopContext,
}

impl<G: GameHooks> App<G> {
    /// Creates the application shell around `game`.
    ///
    /// Input starts unbound; wire keys and buttons with [`App::bind_key`]
    /// and friends before running the event loop.
    pub fn new(config: LoopConfig, game: G) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
            config,
            game,
            bindings: InputBindings::new(),
            ctx: LoopContext::new(),
        }
    }

    /// Binds a key press to a game action. Last binding for a key wins.
    pub fn bind_key(&mut self, key: KeyCode, action: G::Action) {
        self.bindings.bind_key(key, action);
    }

    /// Binds several keys to the same press action.
    pub fn bind_keys(&mut self, keys: &[KeyCode], action: G::Action) {
        self.bindings.bind_keys(keys, action);
    }

    /// Binds a key release to a game action.
    pub fn bind_key_up(&mut self, key: KeyCode, action: G::Action) {
        self.bindings.bind_key_up(key, action);
    }

    /// Binds a mouse button press to a game action; the hook receives the
    /// click position.
    pub fn bind_click(&mut self, button: winit::event::MouseButton, action: G::Action) {
        self.bindings.bind_click(button, action);
    }

    /// Creates the surface and application state for a freshly created
    /// window.
    pub async fn set_window(&mut self, window: Window) {
        let window = Arc::new(window);

        let surface = self
            .instance
            .create_surface(window.clone())
            .expect("Failed to create surface!");

        let state = AppState::new(
            &self.instance,
            surface,
            self.config.width,
            self.config.height,
            self.config.fps,
        )
        .await;

        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
    }

    /// Handles window resize events and updates the rendering layers.
    ///
    /// The window itself is non-resizable, but fullscreen toggles and
    /// initial surface configuration still arrive as resize events.
    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            let state = match &mut self.state {
                Some(state) => state,
                None => {
                    eprintln!("Cannot resize surface without state initialized!");
                    return;
                }
            };
            state.resize_surface(width, height);
        }
    }

    /// Switches between windowed and borderless fullscreen. The board keeps
    /// its pixel layout; fullscreen just grows the surface around it.
    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }

    /// Applies requests the game queued on the context during a dispatch:
    /// window title changes and frame-rate retargets.
    fn apply_context_requests(&mut self) {
        if let Some(title) = self.ctx.take_title_request() {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
        }
        if let Some(fps) = self.ctx.take_fps_request() {
            if let Some(state) = &mut self.state {
                state.limiter.set_fps(fps);
            }
        }
    }
}

impl<G: GameHooks> ApplicationHandler for App<G> {
    /// Creates the window on resume and initializes the application state.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                panic!("Failed to create window: {}", err);
            }
        };
        pollster::block_on(self.set_window(window));

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Routes window events: close, resize, keyboard and mouse dispatch,
    /// and the per-frame redraw.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                println!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.handle_resized(new_size.width, new_size.height);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => match key_state {
                ElementState::Pressed => {
                    if key_code == FULLSCREEN_KEY {
                        self.toggle_fullscreen();
                    } else if let Some(action) = self.bindings.key_down_action(key_code) {
                        self.game.key_down(&mut self.ctx, action, key_code);
                        self.apply_context_requests();
                    }
                }
                ElementState::Released => {
                    if let Some(action) = self.bindings.key_up_action(key_code) {
                        self.game.key_up(&mut self.ctx, action, key_code);
                        self.apply_context_requests();
                    }
                }
            },

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(state) = self.state.as_mut() {
                    state.cursor_position = (position.x, position.y);
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let cursor = self.state.as_ref().map(|state| state.cursor_position);
                if let (Some((x, y)), Some(action)) = (cursor, self.bindings.click_action(button))
                {
                    self.game.click(&mut self.ctx, action, x, y);
                    self.apply_context_requests();
                }
            }

            WindowEvent::RedrawRequested => {
                self.handle_redraw();
            }

            _ => {}
        }
    }
}
