use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AquariumLevel, CreatureType};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Validation(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for TankConfig {
    fn default() -> Self {
        TankConfig {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: u32,
    pub lives: u32,
    pub power: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            speed: 5,
            lives: 3,
            power: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Frames of invulnerability after losing a life.
    pub damage_debounce_frames: u32,
    /// Power goes up by one whenever the score lands on a multiple of this.
    pub power_milestone: u32,
    /// Collisions and repopulation run once every this many frames.
    pub tick_period: u32,
    pub frame_rate: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            damage_debounce_frames: 3 * 60,
            power_milestone: 25,
            tick_period: 2,
            frame_rate: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_speed: u32,
    pub max_speed: u32,
    /// Body segments between a predator's head and tail.
    pub predator_segments: usize,
    pub segment_rest_length: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            min_speed: 1,
            max_speed: 25,
            predator_segments: 4,
            segment_rest_length: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub creature: CreatureType,
    pub quota: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub target_score: u32,
    pub population: Vec<PopulationConfig>,
}

impl LevelConfig {
    fn new(target_score: u32, population: &[(CreatureType, u32)]) -> Self {
        LevelConfig {
            target_score,
            population: population
                .iter()
                .map(|&(creature, quota)| PopulationConfig { creature, quota })
                .collect(),
        }
    }

    pub fn build(&self, number: usize) -> AquariumLevel {
        let mut level = AquariumLevel::new(number, self.target_score);
        for entry in &self.population {
            level.add_population(entry.creature, entry.quota);
        }
        level
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tank: TankConfig,
    pub player: PlayerConfig,
    pub rules: RulesConfig,
    pub spawn: SpawnConfig,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        use CreatureType::*;

        GameConfig {
            tank: TankConfig::default(),
            player: PlayerConfig::default(),
            rules: RulesConfig::default(),
            spawn: SpawnConfig::default(),
            levels: vec![
                LevelConfig::new(10, &[(NPCreature, 10)]),
                LevelConfig::new(30, &[(NPCreature, 12), (BiggerFish, 4), (Crab, 2)]),
                LevelConfig::new(
                    60,
                    &[(NPCreature, 10), (BiggerFish, 5), (Crab, 3), (Predator, 1)],
                ),
            ],
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<GameConfig, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if self.tank.width == 0 || self.tank.height == 0 {
            return invalid(format!(
                "tank must not be empty, got {}x{}",
                self.tank.width, self.tank.height
            ));
        }
        if self.levels.is_empty() {
            return invalid("at least one level is required".to_string());
        }
        if self.rules.tick_period == 0 {
            return invalid("tick_period must be at least 1".to_string());
        }
        if self.rules.power_milestone == 0 {
            return invalid("power_milestone must be at least 1".to_string());
        }
        if self.spawn.min_speed > self.spawn.max_speed {
            return invalid(format!(
                "min_speed {} is above max_speed {}",
                self.spawn.min_speed, self.spawn.max_speed
            ));
        }
        if self.spawn.predator_segments == 0 {
            return invalid("predator_segments must be at least 1".to_string());
        }
        if self.spawn.segment_rest_length <= 0.0 {
            return invalid("segment_rest_length must be positive".to_string());
        }

        for (number, level) in self.levels.iter().enumerate() {
            let mut seen = HashSet::new();
            for entry in &level.population {
                if !seen.insert(entry.creature) {
                    return invalid(format!(
                        "level {} lists {} more than once",
                        number, entry.creature
                    ));
                }
            }
        }

        Ok(())
    }
}
