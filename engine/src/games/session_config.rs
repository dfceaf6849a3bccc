use std::collections::HashSet;

use crate::PlayerId;

#[derive(Debug, Clone)]
pub struct GameSessionConfig {
    pub session_id: String,
    pub players: Vec<PlayerId>,
    pub observers: HashSet<PlayerId>,
}

impl GameSessionConfig {
    pub fn new(session_id: String, players: Vec<PlayerId>) -> Self {
        Self {
            session_id,
            players,
            observers: HashSet::new(),
        }
    }

    pub fn all_recipients(&self) -> Vec<PlayerId> {
        let mut recipients = self.players.clone();
        recipients.extend(self.observers.iter().cloned());
        recipients
    }
}
