use glam::Vec2;
use rand::Rng;

use crate::{
    Body, CreatureId, CreatureType, Entity, MoveContext, RenderSink, SegmentChain, SpriteHandle,
};

/// How a non-player creature moves.
#[derive(Clone, Debug)]
pub enum Behaviour {
    /// Straight line at full speed in a direction picked at spawn.
    Wander,
    /// Like `Wander` but at half speed.
    Cruise,
    /// Walks the tank floor left and right.
    Crawl,
    /// Chases the player, dragging a segmented body.
    Hunt(SegmentChain),
}

/// A non-player creature living in the aquarium.
#[derive(Clone, Debug)]
pub struct Creature {
    id: CreatureId,
    creature_type: CreatureType,
    body: Body,
    behaviour: Behaviour,
}

/// A random heading drawn from {-1, 0, 1} on both axes. The zero vector is a valid outcome and
/// leaves the creature stationary.
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> (f32, f32) {
    (
        rng.gen_range(-1i32..=1) as f32,
        rng.gen_range(-1i32..=1) as f32,
    )
}

impl Creature {
    fn with_behaviour(creature_type: CreatureType, body: Body, behaviour: Behaviour) -> Self {
        Creature {
            id: CreatureId::UNASSIGNED,
            creature_type,
            body,
            behaviour,
        }
    }

    pub fn fish<R: Rng + ?Sized>(
        pos: Vec2,
        speed: u32,
        sprite: Option<SpriteHandle>,
        rng: &mut R,
    ) -> Self {
        let mut body = Body::new(pos, speed, 30.0, 1, sprite);
        let (dx, dy) = random_direction(rng);
        body.set_direction(dx, dy);

        Self::with_behaviour(CreatureType::NPCreature, body, Behaviour::Wander)
    }

    pub fn bigger_fish<R: Rng + ?Sized>(
        pos: Vec2,
        speed: u32,
        sprite: Option<SpriteHandle>,
        rng: &mut R,
    ) -> Self {
        let mut body = Body::new(pos, speed, 60.0, 5, sprite);
        let (dx, dy) = random_direction(rng);
        body.set_direction(dx, dy);

        Self::with_behaviour(CreatureType::BiggerFish, body, Behaviour::Cruise)
    }

    /// A crab standing on the floor at `floor_y`, walking left or right.
    pub fn crab<R: Rng + ?Sized>(
        x: f32,
        floor_y: f32,
        speed: u32,
        sprite: Option<SpriteHandle>,
        rng: &mut R,
    ) -> Self {
        let mut body = Body::new(Vec2::new(x, floor_y), speed, 60.0, 10, sprite);
        let dx = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        body.set_direction(dx, 0.0);

        Self::with_behaviour(CreatureType::Crab, body, Behaviour::Crawl)
    }

    pub fn predator<R: Rng + ?Sized>(
        pos: Vec2,
        speed: u32,
        sprites: [Option<SpriteHandle>; 3],
        body_count: usize,
        rest_length: f32,
        rng: &mut R,
    ) -> Self {
        let [head_sprite, body_sprite, tail_sprite] = sprites;

        let mut body = Body::new(pos, speed, 40.0, 10, head_sprite);
        let (dx, dy) = random_direction(rng);
        body.set_direction(dx, dy);

        let chain = SegmentChain::new(pos, body_count, rest_length, body_sprite, tail_sprite);
        Self::with_behaviour(CreatureType::Predator, body, Behaviour::Hunt(chain))
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: CreatureId) {
        self.id = id;
    }

    pub fn creature_type(&self) -> CreatureType {
        self.creature_type
    }

    pub fn behaviour(&self) -> &Behaviour {
        &self.behaviour
    }

    /// The predator's segments, if this creature is one.
    pub fn segments(&self) -> Option<&SegmentChain> {
        match &self.behaviour {
            Behaviour::Hunt(chain) => Some(chain),
            _ => None,
        }
    }

    /// -1, 0 or 1 depending on which side of this creature the player is on horizontally.
    pub fn player_direction(&self, ctx: &MoveContext) -> i32 {
        let player_x = ctx.player_position().x;
        let x = self.body.position().x;

        if player_x > x {
            1
        } else if player_x < x {
            -1
        } else {
            0
        }
    }
}

impl Entity for Creature {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, ctx: &MoveContext) {
        let Creature {
            body, behaviour, ..
        } = self;

        match behaviour {
            Behaviour::Wander | Behaviour::Crawl | Behaviour::Cruise => {
                let factor = if let Behaviour::Cruise = behaviour { 0.5 } else { 1.0 };
                body.translate(factor);
                let dx = body.direction().x;
                body.face(dx);
                body.bounce();
            }
            Behaviour::Hunt(chain) => {
                let head_speed = body.speed() as f32 * 2.0;
                let heading = chain.steer(ctx.player_position(), ctx.elapsed(), head_speed);

                // Bounds and collisions work off the head.
                body.set_position(chain.head());
                body.bounce();
                chain.set_head(body.position());
                chain.follow();
                body.face(heading.x);
            }
        }
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        log::trace!(
            "{} at ({}, {}) with speed {}",
            self.creature_type,
            self.body.position().x,
            self.body.position().y,
            self.body.speed()
        );

        match &self.behaviour {
            Behaviour::Hunt(chain) => chain.draw(self.body.sprite(), sink),
            _ => self.body.draw(sink),
        }
    }
}
