//! Win-line highlight playback.
//!
//! When a game ends, the winning cells are recolored one at a time at a fixed
//! rate instead of all at once. The playback is purely visual: it reads the
//! frame tick and never touches board state.

use std::time::Duration;

use crate::game::board::Coord;

/// Interval between successive highlight reveals (5 cells per second).
const STEP: Duration = Duration::from_millis(200);

/// Progressive reveal of a winning line.
#[derive(Debug, Clone)]
pub struct WinFlourish {
    line: Vec<Coord>,
    revealed: usize,
    next_step: Option<Duration>,
}

impl WinFlourish {
    /// Starts a playback over `line`; the first cell lights up on the next
    /// frame advance.
    pub fn new(line: Vec<Coord>) -> Self {
        Self {
            line,
            revealed: 0,
            next_step: None,
        }
    }

    /// Advances the playback to `tick` (time since loop start), revealing at
    /// most one cell per elapsed step.
    pub fn advance(&mut self, tick: Duration) {
        let mut next = match self.next_step {
            Some(next) => next,
            None => tick, // first advance after the win reveals immediately
        };
        while tick >= next && self.revealed < self.line.len() {
            self.revealed += 1;
            next += STEP;
        }
        self.next_step = Some(next);
    }

    /// The cells highlighted so far, in reveal order.
    pub fn revealed(&self) -> &[Coord] {
        &self.line[..self.revealed]
    }

    /// True once every cell of the line is highlighted.
    pub fn is_complete(&self) -> bool {
        self.revealed == self.line.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(n: usize) -> Vec<Coord> {
        (0..n).map(|col| (0, col)).collect()
    }

    #[test]
    fn first_advance_reveals_one_cell() {
        let mut flourish = WinFlourish::new(line_of(5));
        flourish.advance(Duration::from_secs(3));
        assert_eq!(flourish.revealed(), &[(0, 0)]);
    }

    #[test]
    fn reveals_one_cell_per_step() {
        let mut flourish = WinFlourish::new(line_of(5));
        let start = Duration::from_secs(1);
        flourish.advance(start);
        assert_eq!(flourish.revealed().len(), 1);

        // Not yet time for the second cell.
        flourish.advance(start + Duration::from_millis(100));
        assert_eq!(flourish.revealed().len(), 1);

        flourish.advance(start + Duration::from_millis(200));
        assert_eq!(flourish.revealed().len(), 2);

        flourish.advance(start + Duration::from_millis(800));
        assert_eq!(flourish.revealed().len(), 5);
        assert!(flourish.is_complete());
    }

    #[test]
    fn full_line_revealed_after_line_len_steps() {
        let mut flourish = WinFlourish::new(line_of(6));
        flourish.advance(Duration::ZERO);
        // A large jump reveals everything that is due, and no more.
        flourish.advance(Duration::from_secs(60));
        assert_eq!(flourish.revealed().len(), 6);
        assert_eq!(flourish.revealed()[5], (0, 5));
    }

    #[test]
    fn advance_past_completion_is_harmless() {
        let mut flourish = WinFlourish::new(line_of(5));
        flourish.advance(Duration::ZERO);
        flourish.advance(Duration::from_secs(10));
        assert!(flourish.is_complete());
        flourish.advance(Duration::from_secs(20));
        assert_eq!(flourish.revealed().len(), 5);
    }
}
