//! Gomoku, five in a row.
//!
//! This is the main entry point for the Gomoku application: a two-player,
//! mouse-driven five-in-a-row game on a 17×17 board, built on a small
//! reusable game-loop scaffold.
//!
//! # Architecture
//! The application follows a modular architecture:
//! - `engine/`: the generic loop scaffold: configuration, tagged-action
//!   input bindings, frame pacing, and the loop context
//! - `app/`: the winit application driver and per-frame redraw cycle
//! - `game/`: the Gomoku rules: board state, win detection, highlight
//!   playback
//! - `renderer/`: WGPU surface management, the batched shape pipeline, and
//!   the glyphon text layer
//!
//! # Usage
//! Run with `cargo run`. Left-click places a stone for the player to move;
//! `P` toggles the (cosmetic) pause flag and F11 toggles fullscreen.

#![warn(missing_docs)]
pub mod app;
pub mod engine;
pub mod game;
pub mod renderer;

use winit::event::MouseButton;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::KeyCode;

use crate::engine::config::LoopConfig;
use crate::game::board::{ROWS, SIDE};
use crate::game::{Gomoku, GomokuAction};

/// Frame-rate target; the original game runs its board at a gentle 15 FPS.
const FPS: f32 = 15.0;

/// Main entry point for the Gomoku application.
///
/// Prints the welcome line, then hands control to the windowed event loop,
/// which runs until the window is closed.
fn main() {
    println!("\nWelcome to the ultimate Gomoku match!!!");
    println!("Left-click any point on the board to begin.\n");

    pollster::block_on(run());
}

/// Builds the application, wires the input bindings, and runs the event
/// loop.
///
/// # Errors
/// - Returns early if event loop creation fails
/// - Exits the process if the application fails to run
async fn run() {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            eprintln!("Error creating event loop: {}", err);
            return;
        }
    };

    event_loop.set_control_flow(ControlFlow::Poll);

    let board_pixels = ROWS as u32 * SIDE;
    let config = LoopConfig {
        title: String::from("Gomoku"),
        width: board_pixels,
        height: board_pixels,
        fps: FPS,
    };

    let mut app = app::App::new(config, Gomoku::new());
    app.bind_click(MouseButton::Left, GomokuAction::PlaceStone);
    app.bind_key(KeyCode::KeyP, GomokuAction::TogglePause);

    event_loop.run_app(&mut app).expect("Failed to run app");
}
