use super::centipede::Centipede;
use super::grid::Grid;
use super::types::{Direction, TileKind};

/// Autonomous per-tick direction choice: keep the current horizontal
/// heading while the path ahead is open; when obstructed, take one step
/// along the vertical bias and walk back the other way, zigzagging down
/// (or up) through the mushroom field. A fully boxed-in body keeps
/// requesting its heading and stalls harmlessly.
pub(crate) fn choose_direction(centipede: &mut Centipede, grid: &Grid) -> Option<Direction> {
    if !centipede.alive() {
        return None;
    }

    let head = centipede.head();
    if centipede.descent == Direction::South && head.row + 1 >= grid.height() {
        centipede.descent = Direction::North;
    } else if centipede.descent == Direction::North && head.row == 0 {
        centipede.descent = Direction::South;
    }

    let heading = centipede.heading;
    if is_open(centipede, grid, heading) {
        return Some(heading);
    }

    centipede.heading = heading.opposite();
    if is_open(centipede, grid, centipede.descent) {
        return Some(centipede.descent);
    }
    if is_open(centipede, grid, centipede.heading) {
        return Some(centipede.heading);
    }
    Some(heading)
}

fn is_open(centipede: &Centipede, grid: &Grid, direction: Direction) -> bool {
    let head = centipede.head();
    let candidate = grid.resolve_move(head, direction, centipede.traverse());
    if candidate == head {
        return false;
    }
    if centipede.collides_with(candidate) {
        return false;
    }
    // Mushrooms never block grid movement, but the steering routes around
    // them so the body descends instead of ping-ponging via reversals.
    !matches!(
        grid.tile_at(candidate),
        Ok(TileKind::Food) | Ok(TileKind::Super)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::centipede::types::Point;

    fn empty_grid(width: usize, height: usize) -> Grid {
        let (grid, _) = Grid::generate(width, height, 0.0, 1, &mut SessionRng::new(1));
        grid
    }

    fn row_body(row: usize, cols: std::ops::Range<usize>) -> Vec<Point> {
        cols.map(|col| Point::new(row, col)).collect()
    }

    #[test]
    fn test_open_path_keeps_the_heading() {
        let grid = empty_grid(10, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        assert_eq!(choose_direction(&mut centipede, &grid), Some(Direction::East));
        assert_eq!(centipede.heading, Direction::East);
    }

    #[test]
    fn test_mushroom_ahead_descends_and_flips_heading() {
        let mut grid = empty_grid(10, 10);
        grid.set_tile(Point::new(5, 4), TileKind::Food);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 0..4), Direction::East, false);
        assert_eq!(
            choose_direction(&mut centipede, &grid),
            Some(Direction::South)
        );
        assert_eq!(centipede.heading, Direction::West);
    }

    #[test]
    fn test_east_wall_descends_and_flips_heading() {
        let grid = empty_grid(10, 10);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(5, 6..10), Direction::East, false);
        assert_eq!(
            choose_direction(&mut centipede, &grid),
            Some(Direction::South)
        );
        assert_eq!(centipede.heading, Direction::West);
    }

    #[test]
    fn test_descent_flips_to_north_at_the_bottom_row() {
        let mut grid = empty_grid(10, 10);
        grid.set_tile(Point::new(9, 6), TileKind::Stone);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(9, 2..6), Direction::East, false);
        assert_eq!(
            choose_direction(&mut centipede, &grid),
            Some(Direction::North)
        );
        assert_eq!(centipede.descent, Direction::North);
    }

    #[test]
    fn test_boxed_in_body_requests_a_stalling_move() {
        let mut grid = empty_grid(10, 10);
        for pos in [
            Point::new(5, 4),
            Point::new(5, 6),
            Point::new(4, 5),
            Point::new(6, 5),
        ] {
            grid.set_tile(pos, TileKind::Stone);
        }
        let mut centipede = Centipede::new(
            "c".to_string(),
            vec![Point::new(5, 5)],
            Direction::East,
            false,
        );
        let direction = choose_direction(&mut centipede, &grid);
        assert_eq!(direction, Some(Direction::East));
        centipede.advance(&grid, direction);
        assert!(centipede.alive());
        assert_eq!(centipede.head(), Point::new(5, 5));
    }

    #[test]
    fn test_escapes_a_mushroom_trap_vertically() {
        // Mushrooms hem the row in on both sides; after a handful of ticks
        // the body must have left its starting row.
        let mut grid = empty_grid(20, 20);
        grid.set_tile(Point::new(10, 14), TileKind::Food);
        grid.set_tile(Point::new(10, 2), TileKind::Food);
        let mut centipede =
            Centipede::new("c".to_string(), row_body(10, 6..10), Direction::East, false);
        let start_row = centipede.head().row;
        for _ in 0..30 {
            let direction = choose_direction(&mut centipede, &grid);
            centipede.advance(&grid, direction);
            assert!(centipede.alive());
        }
        assert_ne!(centipede.head().row, start_row);
    }
}
