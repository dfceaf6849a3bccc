use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Direction of travel from one cell to an adjacent one. `None` when the
    /// cells coincide or are not axis-adjacent (wrapped pairs resolve to the
    /// visually opposite direction, which is acceptable for orientation).
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        if to.row < from.row {
            Some(Direction::North)
        } else if to.row > from.row {
            Some(Direction::South)
        } else if to.col > from.col {
            Some(Direction::East)
        } else if to.col < from.col {
            Some(Direction::West)
        } else {
            None
        }
    }
}

/// Closed set of tile kinds. `Snake` is a legacy kind that never appears in
/// a generated grid; movement checks treat observing it as an invariant
/// violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Passage,
    Stone,
    Food,
    Super,
    Snake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Move(Direction),
    Fire,
}

impl PlayerCommand {
    /// Keyboard mapping: `w`/`a`/`s`/`d` move, `p` fires. Anything else is
    /// rejected upstream with a logged warning.
    pub fn parse_key(key: char) -> Option<PlayerCommand> {
        match key {
            'w' => Some(PlayerCommand::Move(Direction::North)),
            'a' => Some(PlayerCommand::Move(Direction::West)),
            's' => Some(PlayerCommand::Move(Direction::South)),
            'd' => Some(PlayerCommand::Move(Direction::East)),
            'p' => Some(PlayerCommand::Fire),
            _ => None,
        }
    }
}
