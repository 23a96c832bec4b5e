//! Application driver.
//!
//! This module wires the loop scaffold to winit: the [`App`] implements
//! `ApplicationHandler`, routes window events through the input bindings,
//! and runs the frame-limited advance/render cycle on every redraw.
//!
//! # Event Flow
//!
//! 1. winit delivers window events to [`App::window_event`]
//! 2. Bound inputs are translated to the game's tagged actions and
//!    dispatched through the [`crate::engine::GameHooks`] hooks
//! 3. `RedrawRequested` sleeps to the frame tick, advances the game,
//!    collects its shapes, and presents the frame

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
