use std::time::Duration;

use crate::config::EngineConfig;
use crate::defaults;

#[derive(Clone, Debug)]
pub struct CentipedeSessionSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub mushroom_density: f32,
    pub centipede_length: usize,
    pub tick_interval: Duration,
    pub timeout: u64,
    pub level: u32,
    pub traverse: bool,
}

impl Default for CentipedeSessionSettings {
    fn default() -> Self {
        Self {
            field_width: defaults::FIELD_WIDTH,
            field_height: defaults::FIELD_HEIGHT,
            mushroom_density: defaults::MUSHROOM_DENSITY,
            centipede_length: defaults::CENTIPEDE_LENGTH,
            tick_interval: Duration::from_millis(1000 / defaults::GAME_SPEED as u64),
            timeout: defaults::TIMEOUT,
            level: 1,
            traverse: false,
        }
    }
}

impl From<&EngineConfig> for CentipedeSessionSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            field_width: config.field_width,
            field_height: config.field_height,
            mushroom_density: config.mushroom_density,
            centipede_length: defaults::CENTIPEDE_LENGTH,
            tick_interval: Duration::from_millis(1000 / config.game_speed.max(1) as u64),
            timeout: config.timeout,
            level: config.level,
            traverse: config.traverse,
        }
    }
}

impl CentipedeSessionSettings {
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
        if self.centipede_length < 1 || self.centipede_length > self.field_width {
            return Err("Centipede length must fit in the top row".to_string());
        }
        if self.tick_interval < Duration::from_millis(16)
            || self.tick_interval > Duration::from_millis(5000)
        {
            return Err("Tick interval must be between 16ms and 5000ms".to_string());
        }
        if self.timeout == 0 {
            return Err("Timeout must be positive".to_string());
        }
        Ok(())
    }

    pub fn fps(&self) -> u32 {
        (1000 / self.tick_interval.as_millis().max(1)) as u32
    }
}
