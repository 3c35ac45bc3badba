use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::CreatureType;

/// Every image the game knows how to draw. The kind doubles as the key into whatever
/// image pool the frontend loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    BaseFish,
    BiggerFish,
    Crab,
    PredatorHead,
    PredatorBody,
    PredatorTail,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 7] = [
        SpriteKind::Player,
        SpriteKind::BaseFish,
        SpriteKind::BiggerFish,
        SpriteKind::Crab,
        SpriteKind::PredatorHead,
        SpriteKind::PredatorBody,
        SpriteKind::PredatorTail,
    ];

    /// Resource path of the image backing this sprite.
    pub fn file_name(&self) -> &'static str {
        use SpriteKind::*;

        match self {
            Player => "/player-fish.png",
            BaseFish => "/base-fish.png",
            BiggerFish => "/bigger-fish.png",
            Crab => "/crab.png",
            PredatorHead => "/predator-head.png",
            PredatorBody => "/predator-body.png",
            PredatorTail => "/predator-tail.png",
        }
    }

    /// The creature type drawn with this sprite, if any. Predator body and tail pieces and the
    /// player have no creature type of their own.
    pub fn creature_type(&self) -> Option<CreatureType> {
        match self {
            SpriteKind::BaseFish => Some(CreatureType::NPCreature),
            SpriteKind::BiggerFish => Some(CreatureType::BiggerFish),
            SpriteKind::Crab => Some(CreatureType::Crab),
            SpriteKind::PredatorHead => Some(CreatureType::Predator),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        self.creature_type()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

impl From<CreatureType> for SpriteKind {
    fn from(creature_type: CreatureType) -> Self {
        match creature_type {
            CreatureType::NPCreature => SpriteKind::BaseFish,
            CreatureType::BiggerFish => SpriteKind::BiggerFish,
            CreatureType::Crab => SpriteKind::Crab,
            CreatureType::Predator => SpriteKind::PredatorHead,
        }
    }
}

/// A per-creature copy of a sprite prototype. Flipping one handle never affects another.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteHandle {
    kind: SpriteKind,
    size: Vec2,
    flipped: bool,
}

impl SpriteHandle {
    pub fn new(kind: SpriteKind, width: f32, height: f32) -> Self {
        SpriteHandle {
            kind,
            size: Vec2::new(width, height),
            flipped: false,
        }
    }

    pub fn kind(&self) -> SpriteKind {
        self.kind
    }

    /// Nominal on-screen size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }
}

/// Where creatures end up when they draw themselves. The frontend implements this on top of
/// its canvas, tests implement it to record calls.
pub trait RenderSink {
    fn draw(&mut self, sprite: &SpriteHandle, position: Vec2);

    fn draw_rotated(&mut self, sprite: &SpriteHandle, position: Vec2, angle_degrees: f32);

    /// Toggles the red tint used while the player is recovering from damage.
    fn set_damage_flash(&mut self, _flash: bool) {}
}

/// Holds one prototype per sprite kind and hands out independent copies.
#[derive(Clone, Debug, Default)]
pub struct SpriteManager {
    prototypes: HashMap<SpriteKind, SpriteHandle>,
}

impl SpriteManager {
    /// A manager with nothing registered, every lookup will miss.
    pub fn new() -> Self {
        SpriteManager {
            prototypes: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut manager = Self::new();
        manager.register(SpriteKind::Player, 60.0, 60.0);
        manager.register(SpriteKind::BaseFish, 70.0, 70.0);
        manager.register(SpriteKind::BiggerFish, 120.0, 120.0);
        manager.register(SpriteKind::Crab, 50.0, 50.0);
        manager.register(SpriteKind::PredatorHead, 50.0, 50.0);
        manager.register(SpriteKind::PredatorBody, 50.0, 50.0);
        manager.register(SpriteKind::PredatorTail, 50.0, 50.0);
        manager
    }

    pub fn register(&mut self, kind: SpriteKind, width: f32, height: f32) {
        self.prototypes
            .insert(kind, SpriteHandle::new(kind, width, height));
    }

    /// Returns a fresh copy of the prototype, or None (logged) if the kind was never registered.
    pub fn sprite(&self, kind: SpriteKind) -> Option<SpriteHandle> {
        let sprite = self.prototypes.get(&kind).cloned();
        if sprite.is_none() {
            log::warn!("No sprite registered for {:?}", kind);
        }
        sprite
    }

    pub fn creature_sprite(&self, creature_type: CreatureType) -> Option<SpriteHandle> {
        self.sprite(creature_type.into())
    }
}
