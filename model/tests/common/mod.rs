#![allow(dead_code)]

use std::collections::HashSet;

use aquarium_model::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
pub struct Keys(pub HashSet<Direction>);

impl Keys {
    pub fn none() -> Keys {
        Keys::default()
    }

    pub fn pressed(directions: &[Direction]) -> Keys {
        Keys(directions.iter().copied().collect())
    }
}

impl InputSource for Keys {
    fn is_pressed(&self, direction: Direction) -> bool {
        self.0.contains(&direction)
    }
}

pub struct FixedClock(pub f32);

impl Clock for FixedClock {
    fn elapsed_secs(&self) -> f32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Plain(SpriteKind, Vec2, bool),
    Rotated(SpriteKind, Vec2, f32),
    Flash(bool),
}

#[derive(Default)]
pub struct RecordingSink(pub Vec<DrawCall>);

impl RenderSink for RecordingSink {
    fn draw(&mut self, sprite: &SpriteHandle, position: Vec2) {
        self.0
            .push(DrawCall::Plain(sprite.kind(), position, sprite.flipped()));
    }

    fn draw_rotated(&mut self, sprite: &SpriteHandle, position: Vec2, angle_degrees: f32) {
        self.0
            .push(DrawCall::Rotated(sprite.kind(), position, angle_degrees));
    }

    fn set_damage_flash(&mut self, flash: bool) {
        self.0.push(DrawCall::Flash(flash));
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A tank whose only level never asks for anything, so tests control every creature.
pub fn empty_tank(width: u32, height: u32) -> Aquarium {
    let mut tank = Aquarium::new(width, height, SpriteManager::with_defaults(), rng(5));
    tank.add_level(AquariumLevel::new(0, 1_000));
    tank
}

pub fn always() -> impl FnMut() -> bool {
    || true
}
