use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::defaults::HISTORY_LEN;
use crate::log;

use super::grid::Grid;
use super::types::{Direction, Point};

/// A segmented body on the grid, stored tail-to-head: the head is the last
/// element. Cells of one body never repeat; an advance into the own body is
/// fatal rather than geometrically prevented.
#[derive(Clone, Debug)]
pub struct Centipede {
    name: String,
    body: Vec<Point>,
    direction: Direction,
    to_grow: i32,
    alive: bool,
    traverse: bool,
    /// Preferred horizontal travel, flipped by the steering layer whenever
    /// the path ahead is obstructed.
    pub(crate) heading: Direction,
    /// Vertical bias of the steering layer: South while descending, North
    /// while climbing back up.
    pub(crate) descent: Direction,
    history: AllocRingBuffer<Point>,
}

impl Centipede {
    pub fn new(name: String, body: Vec<Point>, direction: Direction, traverse: bool) -> Self {
        assert!(!body.is_empty(), "centipede body must not be empty");
        let heading = match direction {
            Direction::East | Direction::West => direction,
            Direction::North | Direction::South => Direction::East,
        };
        Self {
            name,
            body,
            direction,
            to_grow: 0,
            alive: true,
            traverse,
            heading,
            descent: Direction::South,
            history: AllocRingBuffer::new(HISTORY_LEN),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &[Point] {
        &self.body
    }

    pub fn head(&self) -> Point {
        *self
            .body
            .last()
            .expect("centipede body should never be empty")
    }

    pub fn tail(&self) -> &[Point] {
        &self.body[..self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn traverse(&self) -> bool {
        self.traverse
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Recent head positions, oldest first. Diagnostics only; dropping this
    /// buffer does not change any simulation outcome.
    pub fn history(&self) -> Vec<Point> {
        self.history.iter().copied().collect()
    }

    /// Queues `amount` segments to add (positive) or remove (negative).
    /// The floor clamp keeps the body from ever shrinking below one cell.
    pub fn grow(&mut self, amount: i32) {
        self.to_grow = (self.to_grow + amount).max(-(self.body.len() as i32 - 1));
    }

    /// One movement step. A move refused by the grid (wall, stone,
    /// boundary) stalls the body in place; only an advance into the own
    /// body kills. On success the growth counter decides whether the tail
    /// is kept (+1), trimmed twice (-1) or dropped once (steady state).
    pub fn advance(&mut self, grid: &Grid, direction: Option<Direction>) {
        let Some(direction) = direction else {
            return;
        };

        let candidate = grid.resolve_move(self.head(), direction, self.traverse);
        if candidate == self.head() {
            return;
        }
        if self.body.contains(&candidate) {
            log!(
                "Centipede <{}> ran into itself at ({}, {})",
                self.name,
                candidate.row,
                candidate.col
            );
            self.kill();
            return;
        }

        self.body.push(candidate);
        if self.to_grow > 0 {
            self.to_grow -= 1;
        } else if self.to_grow < 0 && self.body.len() > 3 {
            self.to_grow += 1;
            self.body.remove(0);
            self.body.remove(0);
        } else {
            self.body.remove(0);
        }

        self.direction = direction;
        self.history.enqueue(candidate);
    }

    pub fn collides_with(&self, pos: Point) -> bool {
        self.body.contains(&pos)
    }

    /// Splits the body at a struck cell. The struck segment is destroyed,
    /// everything behind it stays with this instance, everything ahead of
    /// it becomes a fresh centipede with no inherited growth or history.
    /// An emptied original dies. Returns the spawned remnant, if any.
    pub fn take_hit(&mut self, pos: Point) -> Option<Centipede> {
        let Some(index) = self.body.iter().position(|&cell| cell == pos) else {
            log!(
                "Centipede <{}> asked to take a hit at ({}, {}) which is not part of its body",
                self.name,
                pos.row,
                pos.col
            );
            return None;
        };

        let remainder = self.body.split_off(index + 1);
        self.body.pop();
        if self.body.is_empty() {
            self.kill();
        }

        if remainder.is_empty() {
            return None;
        }
        let direction = if remainder.len() >= 2 {
            Direction::between(remainder[remainder.len() - 2], remainder[remainder.len() - 1])
                .unwrap_or(self.direction)
        } else {
            self.direction
        };
        Some(Centipede::new(
            self.name.clone(),
            remainder,
            direction,
            self.traverse,
        ))
    }

    /// Collision response: the tail becomes the head and travel flips to
    /// the opposite direction, so the body walks back out the way it came.
    pub fn reverse(&mut self) {
        self.body.reverse();
        self.direction = self.direction.opposite();
        self.heading = self.heading.opposite();
    }

    #[cfg(test)]
    pub(crate) fn growth_pending(&self) -> i32 {
        self.to_grow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;

    fn empty_grid(width: usize, height: usize) -> Grid {
        let (grid, _) = Grid::generate(width, height, 0.0, 1, &mut SessionRng::new(1));
        grid
    }

    fn row_body(row: usize, cols: std::ops::Range<usize>) -> Vec<Point> {
        cols.map(|col| Point::new(row, col)).collect()
    }

    #[test]
    fn test_east_wall_stalls_without_killing() {
        // 10x10 grid, length 4 on the top row heading East, no obstacles.
        let grid = empty_grid(10, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(0, 0..4), Direction::East, false);

        for _ in 0..9 {
            centipede.advance(&grid, Some(Direction::East));
        }
        assert_eq!(centipede.head(), Point::new(0, 9));
        assert!(centipede.alive());
        assert_eq!(centipede.direction(), Direction::East);
        assert_eq!(centipede.len(), 4);

        // Further East requests keep being refused without side effects.
        centipede.advance(&grid, Some(Direction::East));
        assert_eq!(centipede.head(), Point::new(0, 9));
        assert!(centipede.alive());
        assert_eq!(centipede.direction(), Direction::East);
    }

    #[test]
    fn test_east_wall_wraps_with_traverse() {
        let grid = empty_grid(10, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(0, 0..4), Direction::East, true);

        for _ in 0..7 {
            centipede.advance(&grid, Some(Direction::East));
        }
        // Six moves reach column 9, the seventh wraps to column 0.
        assert_eq!(centipede.head(), Point::new(0, 0));
        assert!(centipede.alive());
        let unique: std::collections::HashSet<_> = centipede.body().iter().collect();
        assert_eq!(unique.len(), centipede.len());
    }

    #[test]
    fn test_advance_without_direction_is_a_no_op() {
        let grid = empty_grid(10, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 2..5), Direction::East, false);
        centipede.advance(&grid, None);
        assert_eq!(centipede.head(), Point::new(5, 4));
        assert_eq!(centipede.len(), 3);
    }

    #[test]
    fn test_self_collision_is_fatal() {
        let grid = empty_grid(10, 10);
        // Hook shape: advancing South from (4, 5) lands on (5, 5).
        let body = vec![
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(4, 6),
            Point::new(4, 5),
        ];
        let mut centipede = Centipede::new("c".to_string(), body, Direction::West, false);
        centipede.advance(&grid, Some(Direction::South));
        assert!(!centipede.alive());
    }

    #[test]
    fn test_grow_adds_exactly_n_segments() {
        let grid = empty_grid(20, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        centipede.grow(3);
        for _ in 0..6 {
            centipede.advance(&grid, Some(Direction::East));
        }
        assert_eq!(centipede.len(), 7);
        assert_eq!(centipede.growth_pending(), 0);
    }

    #[test]
    fn test_shrink_drops_two_tail_cells_per_tick() {
        let grid = empty_grid(20, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..6), Direction::East, false);
        centipede.grow(-2);
        centipede.advance(&grid, Some(Direction::East));
        assert_eq!(centipede.len(), 5);
        assert_eq!(centipede.growth_pending(), -1);
        centipede.advance(&grid, Some(Direction::East));
        assert_eq!(centipede.len(), 4);
        assert_eq!(centipede.growth_pending(), 0);
    }

    #[test]
    fn test_grow_clamp_keeps_at_least_one_segment() {
        let grid = empty_grid(30, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        centipede.grow(-10);
        assert_eq!(centipede.growth_pending(), -3);
        for _ in 0..20 {
            centipede.advance(&grid, Some(Direction::East));
            assert!(centipede.len() >= 1);
        }
    }

    #[test]
    fn test_take_hit_splits_at_the_worked_example() {
        // Tail-to-head: (5,5) (4,5) (3,5) (2,5); the head is (2,5).
        let body = vec![
            Point::new(5, 5),
            Point::new(4, 5),
            Point::new(3, 5),
            Point::new(2, 5),
        ];
        let mut centipede = Centipede::new("c".to_string(), body, Direction::North, false);

        let remnant = centipede.take_hit(Point::new(4, 5)).unwrap();
        assert_eq!(centipede.body(), &[Point::new(5, 5)]);
        assert!(centipede.alive());
        assert_eq!(remnant.body(), &[Point::new(3, 5), Point::new(2, 5)]);
        assert_eq!(remnant.direction(), Direction::North);
        assert!(remnant.history().is_empty());
        assert_eq!(centipede.len() + remnant.len(), 3);
    }

    #[test]
    fn test_take_hit_on_the_head_shortens_without_split() {
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        let remnant = centipede.take_hit(Point::new(5, 3));
        assert!(remnant.is_none());
        assert_eq!(centipede.len(), 3);
        assert!(centipede.alive());
    }

    #[test]
    fn test_take_hit_on_a_lone_segment_kills() {
        let mut centipede = Centipede::new(
            "c".to_string(),
            vec![Point::new(5, 5)],
            Direction::East,
            false,
        );
        let remnant = centipede.take_hit(Point::new(5, 5));
        assert!(remnant.is_none());
        assert!(!centipede.alive());
    }

    #[test]
    fn test_take_hit_on_the_tail_tip_kills_original_and_spawns_remnant() {
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        let remnant = centipede.take_hit(Point::new(5, 0)).unwrap();
        assert!(!centipede.alive());
        assert!(centipede.is_empty());
        assert_eq!(remnant.len(), 3);
        assert_eq!(remnant.head(), Point::new(5, 3));
    }

    #[test]
    fn test_take_hit_outside_the_body_is_rejected() {
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        let remnant = centipede.take_hit(Point::new(9, 9));
        assert!(remnant.is_none());
        assert_eq!(centipede.len(), 4);
        assert!(centipede.alive());
    }

    #[test]
    fn test_reverse_flips_body_order_and_direction() {
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        centipede.reverse();
        assert_eq!(centipede.head(), Point::new(5, 0));
        assert_eq!(centipede.direction(), Direction::West);
        assert_eq!(centipede.heading, Direction::West);
    }

    #[test]
    fn test_history_is_bounded() {
        let grid = empty_grid(30, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..3), Direction::East, false);
        for _ in 0..15 {
            centipede.advance(&grid, Some(Direction::East));
        }
        let history = centipede.history();
        assert_eq!(history.len(), HISTORY_LEN);
        assert_eq!(*history.last().unwrap(), centipede.head());
    }
}
