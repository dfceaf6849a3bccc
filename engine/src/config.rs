use serde::{Deserialize, Serialize};

use crate::defaults;

/// Engine configuration as loaded from a YAML file. Every field has a
/// default so a partial file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub field_width: usize,
    pub field_height: usize,
    pub mushroom_density: f32,
    /// Ticks per second of the session loop.
    pub game_speed: u32,
    /// Tick count after which the session ends on its own.
    pub timeout: u64,
    pub level: u32,
    /// Movement mode of the centipedes: pass through stones and wrap at
    /// the grid boundary.
    pub traverse: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            field_width: defaults::FIELD_WIDTH,
            field_height: defaults::FIELD_HEIGHT,
            mushroom_density: defaults::MUSHROOM_DENSITY,
            game_speed: defaults::GAME_SPEED,
            timeout: defaults::TIMEOUT,
            level: 1,
            traverse: false,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, String> {
        let config: Self = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Config parse error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.field_width < 10 || self.field_width > 100 {
            return Err("Field width must be between 10 and 100".to_string());
        }
        if self.field_height < 10 || self.field_height > 100 {
            return Err("Field height must be between 10 and 100".to_string());
        }
        if !(0.0..=0.5).contains(&self.mushroom_density) {
            return Err("Mushroom density must be between 0.0 and 0.5".to_string());
        }
        if self.game_speed < 1 || self.game_speed > 60 {
            return Err("Game speed must be between 1 and 60 ticks per second".to_string());
        }
        if self.timeout < 100 || self.timeout > 100_000 {
            return Err("Timeout must be between 100 and 100000 ticks".to_string());
        }
        if self.field_height <= defaults::SPAWN_LANE_ROWS {
            return Err("Field height must exceed the blaster spawn lane".to_string());
        }
        Ok(())
    }
}
