//! Session-wide defaults. Settings and config structs start from these;
//! tests override them per scenario.

pub const FIELD_WIDTH: usize = 48;
pub const FIELD_HEIGHT: usize = 24;
pub const MUSHROOM_DENSITY: f32 = 0.10;

/// Rows at the bottom of the grid kept clear of obstacles so blasters
/// always spawn into open space.
pub const SPAWN_LANE_ROWS: usize = 5;

pub const CENTIPEDE_LENGTH: usize = 10;
pub const MUSHROOM_HEALTH: u32 = 4;

/// Capacity of the per-centipede move history ring buffer.
pub const HISTORY_LEN: usize = 10;

pub const KILL_CENTIPEDE_BODY_POINTS: u32 = 10;
pub const KILL_CENTIPEDE_HEAD_POINTS: u32 = 100;

/// Ticks per second of the session loop.
pub const GAME_SPEED: u32 = 10;

/// Tick count after which a session ends on its own.
pub const TIMEOUT: u64 = 3000;
