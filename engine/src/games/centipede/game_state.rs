use std::collections::{BTreeMap, HashMap};

use crate::PlayerId;
use crate::defaults::{KILL_CENTIPEDE_BODY_POINTS, KILL_CENTIPEDE_HEAD_POINTS};
use crate::games::{GameEndReason, ScoreEntry, SessionRng};
use crate::log;

use super::blast::Blast;
use super::blaster::Blaster;
use super::centipede::Centipede;
use super::grid::Grid;
use super::mushroom::Mushroom;
use super::settings::CentipedeSessionSettings;
use super::snapshot::{BlastView, BlasterView, CentipedeView, GameInfo, MushroomView, Snapshot};
use super::steering;
use super::types::{Direction, PlayerCommand, TileKind};

/// The whole world, advanced one tick at a time by a single writer. Every
/// mutation happens inside `update`; the emitted snapshot is a deep copy,
/// so readers never observe a half-advanced tick.
pub struct CentipedeGameState {
    grid: Grid,
    centipedes: Vec<Centipede>,
    blasters: HashMap<PlayerId, Blaster>,
    player_order: Vec<PlayerId>,
    mushrooms: Vec<Mushroom>,
    blasts: Vec<Blast>,
    step: u64,
    timeout: u64,
    fps: u32,
    running: bool,
    end_reason: Option<GameEndReason>,
    last_snapshot: Snapshot,
}

impl CentipedeGameState {
    pub fn new(
        settings: &CentipedeSessionSettings,
        players: &[PlayerId],
        rng: &mut SessionRng,
    ) -> Self {
        let (grid, mushroom_positions) = Grid::generate(
            settings.field_width,
            settings.field_height,
            settings.mushroom_density,
            settings.level,
            rng,
        );
        let mushrooms = mushroom_positions.into_iter().map(Mushroom::new).collect();

        let body = grid.spawn_centipede(settings.centipede_length);
        let centipedes = vec![Centipede::new(
            "centipede".to_string(),
            body,
            Direction::East,
            settings.traverse,
        )];

        let mut player_order: Vec<PlayerId> = players.to_vec();
        player_order.sort();
        let blasters: HashMap<PlayerId, Blaster> = player_order
            .iter()
            .enumerate()
            .map(|(index, player_id)| {
                (
                    player_id.clone(),
                    Blaster::new(grid.spawn_blaster(index, player_order.len())),
                )
            })
            .collect();

        let mut state = Self {
            grid,
            centipedes,
            blasters,
            player_order,
            mushrooms,
            blasts: Vec::new(),
            step: 0,
            timeout: settings.timeout,
            fps: settings.fps(),
            running: true,
            end_reason: None,
            last_snapshot: Snapshot {
                centipedes: Vec::new(),
                blasters: BTreeMap::new(),
                mushrooms: Vec::new(),
                blasts: Vec::new(),
                tick: 0,
                timeout: settings.timeout,
            },
        };
        state.last_snapshot = state.build_snapshot();
        state
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        self.end_reason
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn centipedes(&self) -> &[Centipede] {
        &self.centipedes
    }

    pub fn mushrooms(&self) -> &[Mushroom] {
        &self.mushrooms
    }

    pub fn snapshot(&self) -> Snapshot {
        self.last_snapshot.clone()
    }

    /// Buffers one command for the player's blaster, last write wins.
    /// Rejections carry the reason and leave the world untouched.
    pub fn submit_input(&mut self, player_id: &PlayerId, key: char) -> Result<(), String> {
        if !self.running {
            return Err("session is over".to_string());
        }
        let Some(command) = PlayerCommand::parse_key(key) else {
            return Err(format!("Invalid key <{}> pressed. Valid keys: w,a,s,d,p", key));
        };
        let Some(blaster) = self.blasters.get_mut(player_id) else {
            return Err(format!("Unknown player <{}>", player_id));
        };
        blaster.set_pending(command);
        Ok(())
    }

    /// Stops the session. Safe to call at any point between ticks; no
    /// later `update` will mutate the world again.
    pub fn stop(&mut self) {
        self.finish(GameEndReason::Stopped);
    }

    /// One tick. The phase order is fixed: input, blasters, centipedes,
    /// blasts, collisions, pruning, terminal checks, snapshot.
    pub fn update(&mut self) -> Snapshot {
        if !self.running {
            return self.last_snapshot.clone();
        }

        self.step += 1;

        for player_id in self.player_order.clone() {
            let Some(blaster) = self.blasters.get_mut(&player_id) else {
                continue;
            };
            let pending = blaster.take_pending();
            let direction = match pending {
                Some(PlayerCommand::Move(direction)) => direction,
                _ => blaster.direction(),
            };
            blaster.advance(&self.grid, direction);
            if pending == Some(PlayerCommand::Fire) {
                let blast = blaster.fire(player_id.clone());
                log!(
                    "BugBlaster <{}> fired a blast at ({}, {})",
                    player_id,
                    blast.pos().row,
                    blast.pos().col
                );
                self.blasts.push(blast);
            }
        }

        for centipede in self.centipedes.iter_mut() {
            if centipede.alive() {
                let direction = steering::choose_direction(centipede, &self.grid);
                centipede.advance(&self.grid, direction);
            }
        }

        self.blasts.retain_mut(|blast| blast.advance());

        self.resolve_collisions();

        self.centipedes.retain(|centipede| centipede.alive());
        for mushroom in &self.mushrooms {
            if !mushroom.exists() {
                self.grid.set_tile(mushroom.pos(), TileKind::Passage);
            }
        }
        self.mushrooms.retain(|mushroom| mushroom.exists());

        if self.centipedes.is_empty() {
            self.finish(GameEndReason::AllCentipedesDead);
        } else if self.step >= self.timeout {
            self.finish(GameEndReason::Timeout);
        }

        self.last_snapshot = self.build_snapshot();
        self.last_snapshot.clone()
    }

    fn resolve_collisions(&mut self) {
        // Heads against other bodies: both parties turn around. Applied
        // sequentially in index order so the outcome is reproducible.
        let count = self.centipedes.len();
        for i in 0..count {
            for j in 0..count {
                if i == j || !self.centipedes[i].alive() || !self.centipedes[j].alive() {
                    continue;
                }
                let head = self.centipedes[i].head();
                if self.centipedes[j].collides_with(head) {
                    log!(
                        "Centipede <{}> collided with centipede <{}> at ({}, {})",
                        self.centipedes[i].name(),
                        self.centipedes[j].name(),
                        head.row,
                        head.col
                    );
                    self.centipedes[i].reverse();
                    self.centipedes[j].reverse();
                }
            }
        }

        // Heads against mushrooms: the centipede turns around, the
        // mushroom is unharmed.
        for i in 0..count {
            if !self.centipedes[i].alive() {
                continue;
            }
            let head = self.centipedes[i].head();
            if self
                .mushrooms
                .iter()
                .any(|mushroom| mushroom.exists() && mushroom.collides_with(head))
            {
                log!(
                    "Centipede <{}> bumped into a mushroom at ({}, {})",
                    self.centipedes[i].name(),
                    head.row,
                    head.col
                );
                self.centipedes[i].reverse();
            }
        }

        // Blast impacts. A mushroom on the blast cell takes damage, and
        // independently a struck centipede splits; remnants join the live
        // set at the end so they are not re-examined this tick.
        let mut spawned: Vec<Centipede> = Vec::new();
        let mut spent = vec![false; self.blasts.len()];
        for blast_index in 0..self.blasts.len() {
            let pos = self.blasts[blast_index].pos();

            if let Some(mushroom) = self
                .mushrooms
                .iter_mut()
                .find(|mushroom| mushroom.exists() && mushroom.collides_with(pos))
            {
                mushroom.take_damage();
                spent[blast_index] = true;
                log!("Blast hit a mushroom at ({}, {})", pos.row, pos.col);
            }

            for i in 0..self.centipedes.len() {
                if !self.centipedes[i].alive() || !self.centipedes[i].collides_with(pos) {
                    continue;
                }
                let head_hit = self.centipedes[i].head() == pos;
                if let Some(remnant) = self.centipedes[i].take_hit(pos) {
                    spawned.push(remnant);
                }
                let points = if head_hit {
                    KILL_CENTIPEDE_HEAD_POINTS
                } else {
                    KILL_CENTIPEDE_BODY_POINTS
                };
                let owner = self.blasts[blast_index].owner().clone();
                if let Some(blaster) = self.blasters.get_mut(&owner) {
                    blaster.add_score(points);
                }
                spent[blast_index] = true;
                log!(
                    "Centipede <{}> was hit by a blast at ({}, {})",
                    self.centipedes[i].name(),
                    pos.row,
                    pos.col
                );
                break;
            }
        }
        self.centipedes.extend(spawned);

        let mut index = 0;
        self.blasts.retain(|_| {
            let keep = !spent[index];
            index += 1;
            keep
        });
    }

    fn finish(&mut self, reason: GameEndReason) {
        if self.running {
            self.running = false;
            self.end_reason = Some(reason);
            log!("GAME OVER ({:?}) after {} ticks", reason, self.step);
        }
    }

    fn build_snapshot(&self) -> Snapshot {
        Snapshot {
            centipedes: self
                .centipedes
                .iter()
                .filter(|centipede| centipede.alive())
                .map(|centipede| CentipedeView {
                    name: centipede.name().to_string(),
                    body: centipede.body().to_vec(),
                    direction: centipede.direction(),
                })
                .collect(),
            blasters: self
                .player_order
                .iter()
                .filter_map(|player_id| {
                    self.blasters.get(player_id).map(|blaster| {
                        (
                            player_id.to_string(),
                            BlasterView {
                                pos: blaster.pos(),
                                direction: blaster.direction(),
                            },
                        )
                    })
                })
                .collect(),
            mushrooms: self
                .mushrooms
                .iter()
                .filter(|mushroom| mushroom.exists())
                .map(|mushroom| MushroomView {
                    pos: mushroom.pos(),
                })
                .collect(),
            blasts: self
                .blasts
                .iter()
                .map(|blast| BlastView { pos: blast.pos() })
                .collect(),
            tick: self.step,
            timeout: self.timeout,
        }
    }

    pub fn info(&self) -> GameInfo {
        GameInfo {
            size: (self.grid.width(), self.grid.height()),
            map: self.grid.tiles().clone(),
            fps: self.fps,
            timeout: self.timeout,
            level: self.grid.level(),
        }
    }

    pub fn scores(&self) -> Vec<ScoreEntry> {
        self.player_order
            .iter()
            .filter_map(|player_id| {
                self.blasters.get(player_id).map(|blaster| ScoreEntry {
                    player_id: player_id.to_string(),
                    score: blaster.score(),
                })
            })
            .collect()
    }

    #[cfg(test)]
    fn set_centipedes(&mut self, centipedes: Vec<Centipede>) {
        self.centipedes = centipedes;
    }

    #[cfg(test)]
    fn set_mushrooms(&mut self, mushrooms: Vec<Mushroom>) {
        for mushroom in &mushrooms {
            self.grid.set_tile(mushroom.pos(), TileKind::Food);
        }
        self.mushrooms = mushrooms;
    }

    #[cfg(test)]
    fn push_blast(&mut self, blast: Blast) {
        self.blasts.push(blast);
    }

    #[cfg(test)]
    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
