//! Gomoku rules engine.
//!
//! This module owns the playing state (the board, whose turn it is, and the
//! game outcome) and drives it entirely from the input actions dispatched by
//! the loop scaffold. Rendering contributes shapes to the frame's batch; the
//! scaffold owns the window and the GPU.
//!
//! # Module Structure
//!
//! - [`board`]: the 17×17 grid and the directional win scan
//! - [`flourish`]: the win-line highlight playback

pub mod board;
pub mod flourish;

use std::time::Duration;

use winit::keyboard::KeyCode;

use crate::engine::GameHooks;
use crate::engine::context::{LoopContext, hex_rgb};
use crate::game::board::{Board, Coord, ROWS, SIDE, Stone, cell_at};
use crate::game::flourish::WinFlourish;
use crate::renderer::shapes::{Shape, ShapeBatch};

/// Board background, a warm wood brown.
pub const BACKGROUND: [f32; 4] = hex_rgb(0x8B5742);
/// Grid line and black stone color.
const BLACK: [f32; 4] = hex_rgb(0x000000);
/// White stone color.
const WHITE: [f32; 4] = hex_rgb(0xFFFFFF);
/// Highlight color for the winning line.
const HIGHLIGHT: [f32; 4] = hex_rgb(0x64FFFF);

/// Stone radius in pixels, slightly inset from the cell edge.
const STONE_RADIUS: f32 = SIDE as f32 / 2.0 - 2.0;
/// Radius of the center-point marker.
const CENTER_DOT_RADIUS: f32 = 4.0;

/// Input actions the game binds to keys and mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GomokuAction {
    /// Place the current player's stone at the clicked cell.
    PlaceStone,
    /// Flip the scaffold's pause flag.
    TogglePause,
}

/// Where the game stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stones are still being placed.
    InProgress,
    /// `winner` completed `line`; no further placements are accepted.
    Won { winner: Stone, line: Vec<Coord> },
}

/// The Gomoku application driven by the loop scaffold.
pub struct Gomoku {
    board: Board,
    black_to_move: bool,
    outcome: Outcome,
    flourish: Option<WinFlourish>,
    /// Grid lines and center dot, built once at startup.
    grid_shapes: Vec<Shape>,
}

impl Default for Gomoku {
    fn default() -> Self {
        Self::new()
    }
}

impl Gomoku {
    /// Creates a fresh game with an empty board; Black moves first.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            black_to_move: true,
            outcome: Outcome::InProgress,
            flourish: None,
            grid_shapes: build_grid_shapes(),
        }
    }

    /// Current outcome of the game.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The board, for inspection.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True when Black places the next stone.
    pub fn black_to_move(&self) -> bool {
        self.black_to_move
    }

    /// Handles a board click at pixel position `(x, y)`.
    ///
    /// Silently ignored when the game has ended, the click misses the board,
    /// or the cell is occupied. Otherwise places the current player's stone,
    /// toggles the turn, and scans the whole board for a win.
    fn handle_click(&mut self, ctx: &mut LoopContext, x: f64, y: f64) {
        if ctx.is_ended() {
            return;
        }
        let Some((row, col)) = cell_at(x, y) else {
            return;
        };
        let stone = if self.black_to_move {
            Stone::Black
        } else {
            Stone::White
        };
        if !self.board.place(row, col, stone) {
            return;
        }
        self.black_to_move = !self.black_to_move;

        if let Some(line) = self.board.check_win() {
            // The winner is read from the first cell of the line; the scan
            // only ever starts a run on an occupied cell.
            let (first_row, first_col) = line[0];
            if let Some(winner) = self.board.stone_at(first_row, first_col) {
                ctx.mark_ended();
                ctx.request_title(format!("Gomoku ---- {} wins!", winner.name()));
                self.flourish = Some(WinFlourish::new(line.clone()));
                self.outcome = Outcome::Won { winner, line };
            }
        }
    }
}

impl GameHooks for Gomoku {
    type Action = GomokuAction;

    fn advance(&mut self, _ctx: &mut LoopContext, tick: Duration) {
        if let Some(flourish) = &mut self.flourish {
            flourish.advance(tick);
        }
    }

    fn render(&mut self, scene: &mut ShapeBatch, _ctx: &mut LoopContext, _tick: Duration) {
        scene.set_clear_color(BACKGROUND);
        scene.extend_from_slice(&self.grid_shapes);

        for ((row, col), stone) in self.board.stones() {
            let color = match stone {
                Stone::Black => BLACK,
                Stone::White => WHITE,
            };
            let (cx, cy) = cell_center(row, col);
            scene.push(Shape::circle(cx, cy, STONE_RADIUS, color));
        }

        if let Some(flourish) = &self.flourish {
            for &(row, col) in flourish.revealed() {
                let (cx, cy) = cell_center(row, col);
                scene.push(Shape::circle(cx, cy, STONE_RADIUS, HIGHLIGHT));
            }
        }
    }

    fn key_down(&mut self, ctx: &mut LoopContext, action: GomokuAction, _key: KeyCode) {
        match action {
            GomokuAction::TogglePause => ctx.toggle_pause(),
            GomokuAction::PlaceStone => {}
        }
    }

    fn click(&mut self, ctx: &mut LoopContext, action: GomokuAction, x: f64, y: f64) {
        match action {
            GomokuAction::PlaceStone => self.handle_click(ctx, x, y),
            GomokuAction::TogglePause => ctx.toggle_pause(),
        }
    }
}

/// Pixel center of the cell at `(row, col)`.
fn cell_center(row: usize, col: usize) -> (f32, f32) {
    (
        (col as u32 * SIDE + SIDE / 2) as f32,
        (row as u32 * SIDE + SIDE / 2) as f32,
    )
}

/// Builds the static board geometry: one grid line through each row and
/// column of cell centers, plus the center-point dot.
fn build_grid_shapes() -> Vec<Shape> {
    let half = (SIDE / 2) as f32;
    let span = (ROWS as u32 * SIDE) as f32 - SIDE as f32;
    let mut shapes = Vec::with_capacity(ROWS * 2 + 1);
    for i in 0..ROWS {
        let offset = (i as u32 * SIDE) as f32 + half;
        // Vertical, then horizontal, both one pixel wide.
        shapes.push(Shape::rect(offset, half, 1.0, span, BLACK));
        shapes.push(Shape::rect(half, offset, span, 1.0, BLACK));
    }
    let center = ((ROWS / 2) as u32 * SIDE + SIDE / 2) as f32;
    shapes.push(Shape::circle(center, center, CENTER_DOT_RADIUS, BLACK));
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pixel coordinates hitting the center of `(row, col)`.
    fn pixel(row: usize, col: usize) -> (f64, f64) {
        (
            (col as u32 * SIDE + SIDE / 2) as f64,
            (row as u32 * SIDE + SIDE / 2) as f64,
        )
    }

    fn click(game: &mut Gomoku, ctx: &mut LoopContext, row: usize, col: usize) {
        let (x, y) = pixel(row, col);
        game.click(ctx, GomokuAction::PlaceStone, x, y);
    }

    /// Black takes (0,0)..(0,4) while White answers far away on row 10.
    fn play_black_win(game: &mut Gomoku, ctx: &mut LoopContext) {
        for col in 0..5 {
            click(game, ctx, 0, col);
            if col < 4 {
                click(game, ctx, 10, col);
            }
        }
    }

    #[test]
    fn placements_alternate_starting_with_black() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();

        click(&mut game, &mut ctx, 3, 3);
        click(&mut game, &mut ctx, 3, 4);
        click(&mut game, &mut ctx, 3, 5);

        assert_eq!(game.board().stone_at(3, 3), Some(Stone::Black));
        assert_eq!(game.board().stone_at(3, 4), Some(Stone::White));
        assert_eq!(game.board().stone_at(3, 5), Some(Stone::Black));
        assert!(!game.black_to_move());
    }

    #[test]
    fn ignored_clicks_do_not_toggle_the_turn() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();

        click(&mut game, &mut ctx, 0, 0);
        assert!(!game.black_to_move());

        // Occupied cell and off-board click: both no-ops.
        click(&mut game, &mut ctx, 0, 0);
        game.click(&mut ctx, GomokuAction::PlaceStone, -5.0, 40.0);
        assert!(!game.black_to_move());
        assert_eq!(game.board().stones().count(), 1);
    }

    #[test]
    fn black_five_across_the_top_ends_the_game() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();

        play_black_win(&mut game, &mut ctx);

        assert!(ctx.is_ended());
        match game.outcome() {
            Outcome::Won { winner, line } => {
                assert_eq!(*winner, Stone::Black);
                assert_eq!(line, &vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
            }
            Outcome::InProgress => panic!("expected a finished game"),
        }
        assert_eq!(
            ctx.take_title_request().as_deref(),
            Some("Gomoku ---- Black wins!")
        );
    }

    #[test]
    fn four_in_a_row_leaves_the_game_open() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();

        for col in 0..4 {
            click(&mut game, &mut ctx, 0, col);
            click(&mut game, &mut ctx, 10, col);
        }

        assert!(!ctx.is_ended());
        assert_eq!(*game.outcome(), Outcome::InProgress);
        assert_eq!(game.board().check_win(), None);
    }

    #[test]
    fn clicks_after_the_end_change_nothing() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();

        play_black_win(&mut game, &mut ctx);
        assert!(ctx.is_ended());
        let stones_before = game.board().stones().count();

        click(&mut game, &mut ctx, 12, 12);
        click(&mut game, &mut ctx, 13, 13);
        assert_eq!(game.board().stones().count(), stones_before);
        assert_eq!(game.board().stone_at(12, 12), None);
    }

    #[test]
    fn win_starts_the_highlight_playback() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();

        play_black_win(&mut game, &mut ctx);

        game.advance(&mut ctx, Duration::from_secs(1));
        let mut scene = ShapeBatch::new();
        game.render(&mut scene, &mut ctx, Duration::from_secs(1));
        let highlighted = scene
            .shapes()
            .iter()
            .filter(|shape| shape.color == HIGHLIGHT)
            .count();
        assert_eq!(highlighted, 1);

        // After a second of playback every winning cell is recolored.
        game.advance(&mut ctx, Duration::from_secs(2));
        let mut scene = ShapeBatch::new();
        game.render(&mut scene, &mut ctx, Duration::from_secs(2));
        let highlighted = scene
            .shapes()
            .iter()
            .filter(|shape| shape.color == HIGHLIGHT)
            .count();
        assert_eq!(highlighted, 5);
    }

    #[test]
    fn render_draws_grid_stones_and_background() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();
        click(&mut game, &mut ctx, 8, 8);

        let mut scene = ShapeBatch::new();
        game.render(&mut scene, &mut ctx, Duration::ZERO);

        assert_eq!(scene.clear_color(), BACKGROUND);
        // 17 vertical + 17 horizontal lines + center dot + one stone.
        assert_eq!(scene.shapes().len(), ROWS * 2 + 2);
        let stone = scene.shapes().last().unwrap();
        assert_eq!(stone.color, BLACK);
    }

    #[test]
    fn pause_binding_flips_the_flag_without_blocking_play() {
        let mut game = Gomoku::new();
        let mut ctx = LoopContext::new();

        game.key_down(&mut ctx, GomokuAction::TogglePause, KeyCode::KeyP);
        assert!(ctx.is_paused());

        // The pause flag is cosmetic: clicks still place stones.
        click(&mut game, &mut ctx, 4, 4);
        assert_eq!(game.board().stone_at(4, 4), Some(Stone::Black));

        game.key_down(&mut ctx, GomokuAction::TogglePause, KeyCode::KeyP);
        assert!(!ctx.is_paused());
    }
}
