mod broadcaster;
mod session_config;
mod session_rng;

pub mod centipede;

pub use broadcaster::{GameEndReason, GameOverNotification, ScoreEntry, SnapshotBroadcaster};
pub use session_config::GameSessionConfig;
pub use session_rng::SessionRng;
