use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    AquariumLevel, Creature, CreatureId, CreatureType, Entity, GameConfig, MoveContext,
    RenderSink, SpawnConfig, SpriteKind, SpriteManager,
};

/// Creatures are kept this far away from the right and bottom edges of the tank.
const TANK_MARGIN: f32 = 20.0;

/// The tank: every live non-player creature plus the cycle of levels deciding what lives in it.
pub struct Aquarium {
    width: u32,
    height: u32,
    creatures: Vec<Creature>,
    levels: Vec<AquariumLevel>,
    /// Never reset, the level in play is `current_level % levels.len()`.
    current_level: usize,
    sprites: SpriteManager,
    spawn: SpawnConfig,
    next_id: u64,
    rng: StdRng,
}

impl Aquarium {
    pub fn new(width: u32, height: u32, sprites: SpriteManager, rng: StdRng) -> Aquarium {
        Aquarium {
            width,
            height,
            creatures: Vec::new(),
            levels: Vec::new(),
            current_level: 0,
            sprites,
            spawn: SpawnConfig::default(),
            next_id: 1,
            rng,
        }
    }

    /// Builds the tank and its level cycle from `config`. The tank starts empty, the first
    /// `update` fills it.
    pub fn from_config(config: &GameConfig, sprites: SpriteManager, seed: Option<u64>) -> Aquarium {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut aquarium = Aquarium::new(config.tank.width, config.tank.height, sprites, rng);
        aquarium.set_spawn_config(config.spawn.clone());
        for (number, level) in config.levels.iter().enumerate() {
            aquarium.add_level(level.build(number));
        }
        aquarium
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_spawn_config(&mut self, spawn: SpawnConfig) {
        self.spawn = spawn;
    }

    pub fn add_level(&mut self, level: AquariumLevel) {
        self.levels.push(level);
    }

    pub fn levels(&self) -> &[AquariumLevel] {
        &self.levels
    }

    /// How many levels have been completed since the game started.
    pub fn current_level_index(&self) -> usize {
        self.current_level
    }

    fn selected_level(&self) -> Option<usize> {
        if self.levels.is_empty() {
            None
        } else {
            Some(self.current_level % self.levels.len())
        }
    }

    pub fn current_level(&self) -> Option<&AquariumLevel> {
        self.selected_level().map(|i| &self.levels[i])
    }

    /// Puts `creature` in the tank, keeping it clear of the right and bottom edges.
    pub fn add_creature(&mut self, mut creature: Creature) -> CreatureId {
        creature.body_mut().set_bounds(
            self.width as f32 - TANK_MARGIN,
            self.height as f32 - TANK_MARGIN,
        );

        let id = CreatureId(self.next_id);
        self.next_id += 1;
        creature.assign_id(id);

        self.creatures.push(creature);
        id
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn creature_at(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id() == id)
    }

    pub fn clear_creatures(&mut self) {
        self.creatures.clear();
    }

    /// Takes the creature out of the tank and reports it as eaten to the current level.
    /// Unknown ids are ignored.
    pub fn remove_creature(&mut self, id: CreatureId) -> Option<Creature> {
        let index = self.creatures.iter().position(|c| c.id() == id)?;
        log::debug!("removing creature {:?}", id);

        let creature = self.creatures.remove(index);
        if let Some(level) = self.selected_level() {
            self.levels[level].consume_population(creature.creature_type(), creature.value());
        }
        Some(creature)
    }

    /// Creates a creature of `creature_type` at a random spot with a random speed. Crabs start
    /// on the floor, predators at the surface.
    pub fn spawn_creature(&mut self, creature_type: CreatureType) -> CreatureId {
        let x = self.rng.gen_range(0..self.width.max(1)) as f32;
        let y = self.rng.gen_range(0..self.height.max(1)) as f32;
        let speed = self
            .rng
            .gen_range(self.spawn.min_speed..=self.spawn.max_speed.max(self.spawn.min_speed));

        let sprite = self.sprites.creature_sprite(creature_type);
        let creature = match creature_type {
            CreatureType::NPCreature => {
                Creature::fish(Vec2::new(x, y), speed, sprite, &mut self.rng)
            }
            CreatureType::BiggerFish => {
                Creature::bigger_fish(Vec2::new(x, y), speed, sprite, &mut self.rng)
            }
            CreatureType::Crab => {
                Creature::crab(x, self.height as f32, speed, sprite, &mut self.rng)
            }
            CreatureType::Predator => Creature::predator(
                Vec2::new(x, 0.0),
                speed,
                [
                    sprite,
                    self.sprites.sprite(SpriteKind::PredatorBody),
                    self.sprites.sprite(SpriteKind::PredatorTail),
                ],
                self.spawn.predator_segments,
                self.spawn.segment_rest_length,
                &mut self.rng,
            ),
        };

        log::trace!("spawning {} at ({}, {})", creature_type, x, y);
        self.add_creature(creature)
    }

    /// Moves every creature, then tops the tank up. Returns the new level number if the level
    /// changed.
    pub fn update(&mut self, ctx: &MoveContext) -> Option<usize> {
        for creature in self.creatures.iter_mut() {
            creature.advance(ctx);
        }
        self.repopulate()
    }

    /// Advances to the next level if the current one is complete (emptying the tank), then
    /// spawns whatever the level is missing. Returns the new level number on a level change.
    pub fn repopulate(&mut self) -> Option<usize> {
        let mut selected = match self.selected_level() {
            Some(selected) => selected,
            None => {
                log::warn!("Aquarium has no levels, nothing to repopulate");
                return None;
            }
        };
        log::trace!("repopulating level {}", selected);

        let mut level_change = None;
        if self.levels[selected].is_completed() {
            self.levels[selected].level_reset();
            self.current_level += 1;
            selected = self.current_level % self.levels.len();
            log::info!("new level reached: {}", selected);
            self.clear_creatures();
            level_change = Some(selected);
        }

        let to_spawn = self.levels[selected].repopulate();
        log::trace!("amount to repopulate: {}", to_spawn.len());
        for creature_type in to_spawn {
            self.spawn_creature(creature_type);
        }

        level_change
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for creature in &self.creatures {
            creature.draw(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aquarium() -> Aquarium {
        Aquarium::new(
            800,
            600,
            SpriteManager::with_defaults(),
            StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn add_creature_sets_margin_bounds() {
        let mut tank = aquarium();
        let fish = Creature::fish(Vec2::new(10.0, 10.0), 4, None, &mut StdRng::seed_from_u64(1));
        let id = tank.add_creature(fish);

        let fish = tank.creature(id).unwrap();
        assert_eq!(fish.body().bounds(), Vec2::new(780.0, 580.0));
    }

    #[test]
    fn crab_spawns_on_floor_and_predator_at_surface() {
        let mut tank = aquarium();
        let crab = tank.spawn_creature(CreatureType::Crab);
        let predator = tank.spawn_creature(CreatureType::Predator);

        // Each spawn request produces exactly one creature.
        assert_eq!(tank.creature_count(), 2);
        assert_eq!(tank.creature(crab).unwrap().position().y, 600.0);
        assert_eq!(tank.creature(predator).unwrap().position().y, 0.0);
        assert_eq!(
            tank.creature(predator).unwrap().creature_type(),
            CreatureType::Predator
        );
    }

    #[test]
    fn spawned_speed_in_range() {
        let mut tank = aquarium();
        for _ in 0..100 {
            tank.spawn_creature(CreatureType::NPCreature);
        }
        assert!(tank
            .creatures()
            .iter()
            .all(|c| (1..=25).contains(&c.body().speed())));
        assert!(tank.creatures().iter().all(|c| c.position().x < 800.0));
    }

    #[test]
    fn spawn_config_controls_speed_and_predator_length() {
        let mut tank = aquarium();
        tank.set_spawn_config(SpawnConfig {
            min_speed: 7,
            max_speed: 7,
            predator_segments: 2,
            segment_rest_length: 12.0,
        });

        let fish = tank.spawn_creature(CreatureType::NPCreature);
        let predator = tank.spawn_creature(CreatureType::Predator);

        assert_eq!(tank.creature(fish).unwrap().body().speed(), 7);
        let chain = tank.creature(predator).unwrap().segments().unwrap();
        assert_eq!(chain.segments().len(), 4);
        assert_eq!(chain.rest_length(), 12.0);
    }

    #[test]
    fn creature_at_out_of_range_is_none() {
        let mut tank = aquarium();
        tank.spawn_creature(CreatureType::BiggerFish);
        assert!(tank.creature_at(0).is_some());
        assert!(tank.creature_at(1).is_none());
    }

    #[test]
    fn removing_unknown_creature_is_a_no_op() {
        let mut tank = aquarium();
        let id = tank.spawn_creature(CreatureType::NPCreature);
        assert!(tank.remove_creature(id).is_some());
        assert!(tank.remove_creature(id).is_none());
        assert_eq!(tank.creature_count(), 0);
    }

    #[test]
    fn no_levels_means_no_repopulation() {
        let mut tank = aquarium();
        assert_eq!(tank.update(&MoveContext::default()), None);
        assert_eq!(tank.creature_count(), 0);
        assert!(tank.current_level().is_none());
    }
}
