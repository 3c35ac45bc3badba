use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{RenderSink, SpriteHandle};

mod player;
pub use player::PlayerCreature;

mod npc;
pub use npc::{Behaviour, Creature};

mod predator;
pub use predator::{Segment, SegmentChain};

/// The four keys the player steers with, in screen space (y grows downwards).
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn to_vector(&self) -> Vec2 {
        use Direction::*;

        match &self {
            North => Vec2::new(0.0, -1.0),
            East => Vec2::new(1.0, 0.0),
            South => Vec2::new(0.0, 1.0),
            West => Vec2::new(-1.0, 0.0),
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CreatureType {
    NPCreature,
    BiggerFish,
    Crab,
    Predator,
}

impl CreatureType {
    pub const ALL: [CreatureType; 4] = [
        CreatureType::NPCreature,
        CreatureType::BiggerFish,
        CreatureType::Crab,
        CreatureType::Predator,
    ];
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CreatureType::NPCreature => "BaseFish",
            CreatureType::BiggerFish => "BiggerFish",
            CreatureType::Crab => "Crab",
            CreatureType::Predator => "Predator",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown creature type: {0:?}")]
pub struct UnknownCreatureType(pub String);

impl FromStr for CreatureType {
    type Err = UnknownCreatureType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CreatureType::ALL
            .iter()
            .copied()
            .find(|t| t.to_string() == s)
            .ok_or_else(|| UnknownCreatureType(s.to_string()))
    }
}

impl TryFrom<String> for CreatureType {
    type Error = UnknownCreatureType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CreatureType> for String {
    fn from(creature_type: CreatureType) -> Self {
        creature_type.to_string()
    }
}

/// Identity of a creature living in an aquarium. Ids are handed out by the aquarium and never
/// reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub(crate) u64);

impl CreatureId {
    pub(crate) const UNASSIGNED: CreatureId = CreatureId(0);

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// What a creature needs to know about the world while it moves.
#[derive(Clone, Debug, Default)]
pub struct MoveContext {
    player: Option<Vec2>,
    elapsed: f32,
}

impl MoveContext {
    pub fn new(player: Option<Vec2>, elapsed: f32) -> Self {
        MoveContext { player, elapsed }
    }

    /// The player's position, or the origin (logged) if there is no player to chase.
    pub fn player_position(&self) -> Vec2 {
        match self.player {
            Some(position) => position,
            None => {
                log::error!("Player not set yet!");
                Vec2::ZERO
            }
        }
    }

    /// Seconds since the game started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// The state every creature shares: where it is, where it is heading and how big it is.
#[derive(Clone, Debug)]
pub struct Body {
    pos: Vec2,
    direction: Vec2,
    speed: u32,
    collision_radius: f32,
    value: u32,
    bounds: Vec2,
    sprite: Option<SpriteHandle>,
}

impl Body {
    pub fn new(
        pos: Vec2,
        speed: u32,
        collision_radius: f32,
        value: u32,
        sprite: Option<SpriteHandle>,
    ) -> Self {
        Body {
            pos,
            direction: Vec2::ZERO,
            speed,
            collision_radius,
            value,
            bounds: Vec2::splat(f32::MAX),
            sprite,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Always either zero or unit length.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Sets the heading from a raw input vector, normalised so diagonals are not faster.
    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        self.direction = Vec2::new(dx, dy).normalize_or_zero();
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
    }

    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    pub fn set_collision_radius(&mut self, radius: f32) {
        self.collision_radius = radius;
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value;
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn set_bounds(&mut self, max_x: f32, max_y: f32) {
        self.bounds = Vec2::new(max_x.max(0.0), max_y.max(0.0));
    }

    pub fn sprite(&self) -> Option<&SpriteHandle> {
        self.sprite.as_ref()
    }

    /// Moves along the heading by `speed * factor`.
    pub fn translate(&mut self, factor: f32) {
        self.pos += self.direction * (self.speed as f32 * factor);
    }

    /// Reflects the heading on any axis where the position left `[0, bounds]` and pulls the
    /// position back inside.
    pub fn bounce(&mut self) {
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.direction.x = self.direction.x.abs();
        } else if self.pos.x > self.bounds.x {
            self.pos.x = self.bounds.x;
            self.direction.x = -self.direction.x.abs();
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.direction.y = self.direction.y.abs();
        } else if self.pos.y > self.bounds.y {
            self.pos.y = self.bounds.y;
            self.direction.y = -self.direction.y.abs();
        }
    }

    pub fn clamp_to_bounds(&mut self) {
        self.pos = self.pos.clamp(Vec2::ZERO, self.bounds);
    }

    /// Sprites face left while moving left.
    pub fn face(&mut self, dx: f32) {
        if let Some(sprite) = &mut self.sprite {
            sprite.set_flipped(dx < 0.0);
        }
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        if let Some(sprite) = &self.sprite {
            sink.draw(sprite, self.pos);
        }
    }
}

pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// One movement step.
    fn advance(&mut self, ctx: &MoveContext);

    fn draw(&self, sink: &mut dyn RenderSink);

    fn position(&self) -> Vec2 {
        self.body().position()
    }

    fn collision_radius(&self) -> f32 {
        self.body().collision_radius()
    }

    fn value(&self) -> u32 {
        self.body().value()
    }

    /// Circle-circle overlap using both collision radii.
    fn collides_with(&self, other: &dyn Entity) -> bool {
        let reach = self.collision_radius() + other.collision_radius();
        self.position().distance_squared(other.position()) < reach * reach
    }
}
