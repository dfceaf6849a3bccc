use crate::PlayerId;

use super::blast::Blast;
use super::grid::Grid;
use super::types::{Direction, PlayerCommand, Point};

/// A player-controlled avatar. Bounded by the grid extents, never wraps;
/// an out-of-bounds request is silently refused. Holds at most one pending
/// command between ticks (last write wins) and keeps drifting in its
/// current direction when no move is pending.
#[derive(Clone, Debug)]
pub struct Blaster {
    pos: Point,
    direction: Direction,
    score: u32,
    pending: Option<PlayerCommand>,
}

impl Blaster {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            direction: Direction::East,
            score: 0,
            pending: None,
        }
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn set_pending(&mut self, command: PlayerCommand) {
        self.pending = Some(command);
    }

    pub fn take_pending(&mut self) -> Option<PlayerCommand> {
        self.pending.take()
    }

    pub fn advance(&mut self, grid: &Grid, direction: Direction) {
        self.pos = match direction {
            Direction::North if self.pos.row > 0 => Point::new(self.pos.row - 1, self.pos.col),
            Direction::South if self.pos.row + 1 < grid.height() => {
                Point::new(self.pos.row + 1, self.pos.col)
            }
            Direction::West if self.pos.col > 0 => Point::new(self.pos.row, self.pos.col - 1),
            Direction::East if self.pos.col + 1 < grid.width() => {
                Point::new(self.pos.row, self.pos.col + 1)
            }
            _ => self.pos,
        };
        self.direction = direction;
    }

    pub fn fire(&self, owner: PlayerId) -> Blast {
        Blast::new(self.pos, owner)
    }
}
