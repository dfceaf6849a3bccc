use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{Direction, Point, TileKind};

/// Immutable copy of the live world, emitted once per tick. Owns all of
/// its data; the simulator's internal state is never aliased, so a
/// broadcaster may serialize it while the next tick is already mutating.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub centipedes: Vec<CentipedeView>,
    pub blasters: BTreeMap<String, BlasterView>,
    pub mushrooms: Vec<MushroomView>,
    pub blasts: Vec<BlastView>,
    pub tick: u64,
    pub timeout: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct CentipedeView {
    pub name: String,
    /// Tail-to-head, matching the simulation order.
    pub body: Vec<Point>,
    pub direction: Direction,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlasterView {
    pub pos: Point,
    pub direction: Direction,
}

#[derive(Clone, Debug, Serialize)]
pub struct MushroomView {
    pub pos: Point,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlastView {
    pub pos: Point,
}

/// Static session metadata, sent once to every new viewer.
#[derive(Clone, Debug, Serialize)]
pub struct GameInfo {
    /// (width, height) in tiles.
    pub size: (usize, usize),
    pub map: Vec<Vec<TileKind>>,
    pub fps: u32,
    pub timeout: u64,
    pub level: u32,
}
