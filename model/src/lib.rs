mod sprite;
pub use sprite::{RenderSink, SpriteHandle, SpriteKind, SpriteManager};

mod creature;
pub use creature::{
    Behaviour, Body, Creature, CreatureId, CreatureType, Direction, Entity, MoveContext,
    PlayerCreature, Segment, SegmentChain, UnknownCreatureType,
};

mod level;
pub use level::{refill_quotas, AquariumLevel, LevelStrategy, PopulationNode, QuotaRefill};

mod aquarium;
pub use aquarium::Aquarium;

mod collision;
pub use collision::detect_collision;

pub mod config;
pub use config::{
    ConfigError, GameConfig, LevelConfig, PlayerConfig, PopulationConfig, RulesConfig,
    SpawnConfig, TankConfig,
};

mod scene;
pub use scene::{Clock, FrameGate, GameScene, InputSource, SceneRules, TickGate};

/// An event produced by the game scene during a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The player touched this creature.
    Collision { creature: CreatureId },
    /// The player ran out of lives. Terminal.
    GameOver { final_score: u32 },
    /// The aquarium finished a level and moved on to `level` (an index into the level cycle).
    LevelUp { level: usize },
}
