use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::interval;

use crate::PlayerId;
use crate::games::{
    GameEndReason, GameOverNotification, GameSessionConfig, SessionRng, SnapshotBroadcaster,
};
use crate::log;

use super::game_state::CentipedeGameState;
use super::settings::CentipedeSessionSettings;
use super::snapshot::GameInfo;

/// Shared handle to one running session. Input submission and stopping are
/// safe from any task; the mutex guarantees they land on a tick boundary.
#[derive(Clone)]
pub struct CentipedeSessionState {
    pub session_id: String,
    pub game_state: Arc<Mutex<CentipedeGameState>>,
    pub tick_interval: Duration,
}

impl CentipedeSessionState {
    pub fn create(
        config: &GameSessionConfig,
        settings: &CentipedeSessionSettings,
        seed: u64,
    ) -> Result<Self, String> {
        settings.validate()?;
        let mut rng = SessionRng::new(seed);
        let game_state = CentipedeGameState::new(settings, &config.players, &mut rng);
        log!(
            "[session:{}] created for {} players with seed {}",
            config.session_id,
            config.players.len(),
            seed
        );
        Ok(Self {
            session_id: config.session_id.clone(),
            game_state: Arc::new(Mutex::new(game_state)),
            tick_interval: settings.tick_interval,
        })
    }

    pub async fn submit_input(&self, player_id: &PlayerId, key: char) {
        let mut game_state = self.game_state.lock().await;
        if let Err(reason) = game_state.submit_input(player_id, key) {
            log!(
                "[session:{}] rejected input from {}: {}",
                self.session_id,
                player_id,
                reason
            );
        }
    }

    pub async fn stop(&self) {
        self.game_state.lock().await.stop();
    }

    pub async fn info(&self) -> GameInfo {
        self.game_state.lock().await.info()
    }

    pub async fn current_step(&self) -> u64 {
        self.game_state.lock().await.step()
    }
}

pub struct CentipedeSession;

impl CentipedeSession {
    /// Drives the tick loop until the game ends or someone stops the
    /// session. Each tick fully commits under the lock before the snapshot
    /// is handed to the broadcaster, so readers never see a torn world.
    pub async fn run(
        config: GameSessionConfig,
        session_state: CentipedeSessionState,
        broadcaster: impl SnapshotBroadcaster,
    ) -> GameOverNotification {
        let recipients = config.all_recipients();
        let mut ticker = interval(session_state.tick_interval);

        loop {
            ticker.tick().await;

            let (snapshot, finished) = {
                let mut game_state = session_state.game_state.lock().await;
                let snapshot = game_state.update();
                (snapshot, !game_state.running())
            };

            broadcaster
                .broadcast_snapshot(snapshot, recipients.clone())
                .await;

            if finished {
                break;
            }
        }

        let notification = {
            let game_state = session_state.game_state.lock().await;
            GameOverNotification {
                reason: game_state.end_reason().unwrap_or(GameEndReason::Stopped),
                scores: game_state.scores(),
            }
        };
        log!(
            "[session:{}] finished: {:?}",
            session_state.session_id,
            notification.reason
        );
        broadcaster
            .broadcast_game_over(notification.clone(), recipients)
            .await;
        notification
    }
}
