use glam::Vec2;

use crate::{Body, Entity, MoveContext, RenderSink, SpriteHandle};

#[derive(Clone, Debug)]
pub struct PlayerCreature {
    body: Body,
    lives: u32,
    power: u32,
    damage_debounce: u32,
    score: u32,
}

impl PlayerCreature {
    pub fn new(pos: Vec2, speed: u32, lives: u32, power: u32, sprite: Option<SpriteHandle>) -> Self {
        PlayerCreature {
            body: Body::new(pos, speed, 10.0, 1, sprite),
            lives,
            power,
            damage_debounce: 0,
            score: 0,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Frames of invulnerability left.
    pub fn damage_debounce(&self) -> u32 {
        self.damage_debounce
    }

    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        self.body.set_direction(dx, dy);
    }

    pub fn change_speed(&mut self, speed: u32) {
        self.body.set_speed(speed);
    }

    pub fn reduce_damage_debounce(&mut self) {
        self.damage_debounce = self.damage_debounce.saturating_sub(1);
    }

    /// Ticks down the damage debounce and moves one step.
    pub fn update(&mut self) {
        self.reduce_damage_debounce();
        self.advance(&MoveContext::default());
    }

    /// Takes a life and starts `debounce` frames of invulnerability. Ignored while the player is
    /// still invulnerable from a previous hit.
    pub fn lose_life(&mut self, debounce: u32) {
        if self.damage_debounce > 0 {
            log::debug!(
                "Player is in damage debounce period. Frames left: {}",
                self.damage_debounce
            );
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.damage_debounce = debounce;
        log::info!("Player lost a life! Lives remaining: {}", self.lives);
    }

    pub fn add_to_score(&mut self, amount: u32) {
        self.score += amount;
    }

    pub fn increase_power(&mut self, amount: u32) {
        self.power += amount;
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

impl Entity for PlayerCreature {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, _ctx: &MoveContext) {
        self.body.bounce();
        self.body.translate(1.0);
        // Bounce runs before the step, clamp after it.
        self.body.clamp_to_bounds();
        let dx = self.body.direction().x;
        self.body.face(dx);
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        log::trace!(
            "PlayerCreature at ({}, {}) with speed {}",
            self.body.position().x,
            self.body.position().y,
            self.body.speed()
        );

        let flash = self.damage_debounce > 0;
        if flash {
            sink.set_damage_flash(true);
        }
        self.body.draw(sink);
        if flash {
            sink.set_damage_flash(false);
        }
    }
}
