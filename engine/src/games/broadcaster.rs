use std::future::Future;

use serde::Serialize;

use crate::PlayerId;
use crate::games::centipede::Snapshot;

/// Transport boundary: the session loop hands every per-tick snapshot and
/// the final notification to an implementation of this trait. Network
/// transports live outside this crate.
pub trait SnapshotBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_snapshot(
        &self,
        snapshot: Snapshot,
        recipients: Vec<PlayerId>,
    ) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(
        &self,
        notification: GameOverNotification,
        recipients: Vec<PlayerId>,
    ) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEndReason {
    AllCentipedesDead,
    Timeout,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub player_id: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameOverNotification {
    pub reason: GameEndReason,
    pub scores: Vec<ScoreEntry>,
}
