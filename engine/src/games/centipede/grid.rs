use std::fmt;

use crate::defaults::SPAWN_LANE_ROWS;
use crate::games::SessionRng;
use crate::log;

use super::types::{Direction, Point, TileKind};

#[derive(Debug, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, col } => {
                write!(f, "Position ({}, {}) is outside the grid", row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The tile array. Shape is fixed at construction; the only mutation after
/// generation is the `Food -> Passage` reversion when a mushroom dies.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<TileKind>>,
    level: u32,
}

impl Grid {
    /// Generates a level: all-Passage fill, then `width * height * density`
    /// placement attempts each converting a still-Passage cell to `Food`
    /// (occupied picks are skipped, not resampled), then the bottom spawn
    /// lane is swept clear. Returns the surviving mushroom positions.
    pub fn generate(
        width: usize,
        height: usize,
        density: f32,
        level: u32,
        rng: &mut SessionRng,
    ) -> (Grid, Vec<Point>) {
        let mut tiles = vec![vec![TileKind::Passage; width]; height];
        let mut mushrooms = Vec::new();

        let attempts = (width as f32 * height as f32 * density) as usize;
        for _ in 0..attempts {
            let row = rng.random_range(0..height);
            let col = rng.random_range(0..width);
            if tiles[row][col] == TileKind::Passage {
                tiles[row][col] = TileKind::Food;
                mushrooms.push(Point::new(row, col));
            }
        }

        let lane_start = height.saturating_sub(SPAWN_LANE_ROWS);
        for row in lane_start..height {
            for col in 0..width {
                tiles[row][col] = TileKind::Passage;
            }
        }
        mushrooms.retain(|pos| pos.row < lane_start);

        log!(
            "Generated {}x{} grid (level {}) with {} mushrooms",
            width,
            height,
            level,
            mushrooms.len()
        );

        let grid = Grid {
            width,
            height,
            tiles,
            level,
        };
        (grid, mushrooms)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tiles(&self) -> &Vec<Vec<TileKind>> {
        &self.tiles
    }

    pub fn contains(&self, pos: Point) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn tile_at(&self, pos: Point) -> Result<TileKind, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(self.tiles[pos.row][pos.col])
    }

    pub(crate) fn set_tile(&mut self, pos: Point, kind: TileKind) {
        if self.contains(pos) {
            self.tiles[pos.row][pos.col] = kind;
        }
    }

    /// Whether `pos` refuses entry. The boundary blocks unless `traverse`,
    /// in which case the position wraps to the opposite edge before the
    /// tile is examined. Stone blocks unless `traverse`; Passage, Food and
    /// Super never block.
    pub fn is_blocked(&self, pos: Point, traverse: bool) -> bool {
        let pos = if self.contains(pos) {
            pos
        } else if traverse {
            Point::new(pos.row % self.height, pos.col % self.width)
        } else {
            return true;
        };

        match self.tiles[pos.row][pos.col] {
            TileKind::Passage | TileKind::Food | TileKind::Super => false,
            TileKind::Stone => !traverse,
            TileKind::Snake => unreachable!("snake tiles are never placed on the grid"),
        }
    }

    /// One-cell move from `current`. A request that would leave the grid
    /// without `traverse`, or enter a blocking tile, returns `current`
    /// unchanged; callers detect refusal by comparing positions.
    pub fn resolve_move(&self, current: Point, direction: Direction, traverse: bool) -> Point {
        let candidate = match direction {
            Direction::North => {
                if current.row == 0 {
                    if !traverse {
                        return current;
                    }
                    Point::new(self.height - 1, current.col)
                } else {
                    Point::new(current.row - 1, current.col)
                }
            }
            Direction::South => {
                if current.row + 1 >= self.height {
                    if !traverse {
                        return current;
                    }
                    Point::new(0, current.col)
                } else {
                    Point::new(current.row + 1, current.col)
                }
            }
            Direction::West => {
                if current.col == 0 {
                    if !traverse {
                        return current;
                    }
                    Point::new(current.row, self.width - 1)
                } else {
                    Point::new(current.row, current.col - 1)
                }
            }
            Direction::East => {
                if current.col + 1 >= self.width {
                    if !traverse {
                        return current;
                    }
                    Point::new(current.row, 0)
                } else {
                    Point::new(current.row, current.col + 1)
                }
            }
        };

        if self.is_blocked(candidate, traverse) {
            current
        } else {
            candidate
        }
    }

    /// Initial centipede body, tail-to-head along the top row.
    pub fn spawn_centipede(&self, length: usize) -> Vec<Point> {
        (0..length.min(self.width))
            .map(|col| Point::new(0, col))
            .collect()
    }

    /// Blaster spawn point inside the cleared bottom lane, spaced out per
    /// player so multiple blasters do not stack.
    pub fn spawn_blaster(&self, index: usize, total: usize) -> Point {
        let col = if total <= 1 {
            self.width / 2
        } else {
            ((index + 1) * self.width / (total + 1)).min(self.width - 1)
        };
        Point::new(self.height - 1, col)
    }
}
