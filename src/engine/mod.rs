//! Reusable game-loop scaffold.
//!
//! This module is the generic half of the application: it knows nothing about
//! Gomoku. It provides window/loop configuration, the tagged-action input
//! binding maps, the frame limiter and clock, and the [`LoopContext`] that
//! carries the loop-owned flags (pause, end-of-game, score) into every hook
//! invocation.
//!
//! # Architecture
//!
//! A game plugs into the loop by implementing [`GameHooks`] and is selected
//! via composition; the winit application driver in [`crate::app`] is
//! generic over the hooks type. Input reaches the game only through the
//! binding maps: each key or mouse button is bound to a game-defined tagged
//! action value, and dispatch is a plain map lookup.

pub mod config;
pub mod context;
pub mod input;
pub mod timing;

use std::time::Duration;

use winit::keyboard::KeyCode;

use crate::engine::context::LoopContext;
use crate::renderer::shapes::ShapeBatch;

/// Capability interface the loop drives once per frame tick.
///
/// `advance` then `render` run on every iteration regardless of the pause
/// flag. Honoring the flag is the game's decision, not the loop's. The
/// input hooks fire only for inputs that were bound to an action; unbound
/// inputs never reach the game.
pub trait GameHooks {
    /// The tagged action values keys and buttons are bound to.
    type Action: Copy + 'static;

    /// Advances game logic. `tick` is the time since the loop started.
    fn advance(&mut self, ctx: &mut LoopContext, tick: Duration);

    /// Contributes this frame's shapes to the batch.
    fn render(&mut self, scene: &mut ShapeBatch, ctx: &mut LoopContext, tick: Duration);

    /// A bound key was pressed.
    fn key_down(&mut self, _ctx: &mut LoopContext, _action: Self::Action, _key: KeyCode) {}

    /// A bound key was released.
    fn key_up(&mut self, _ctx: &mut LoopContext, _action: Self::Action, _key: KeyCode) {}

    /// A bound mouse button was pressed at pixel position `(x, y)`.
    fn click(&mut self, _ctx: &mut LoopContext, _action: Self::Action, _x: f64, _y: f64) {}
}
