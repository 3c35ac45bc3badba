use glam::Vec2;

use crate::{
    detect_collision, Aquarium, Direction, Entity, GameConfig, GameEvent, MoveContext,
    PlayerCreature, RenderSink, SpriteKind, SpriteManager,
};

/// Read-only view of the keyboard for one frame.
pub trait InputSource {
    fn is_pressed(&self, direction: Direction) -> bool;
}

/// Seconds elapsed since the game started.
pub trait Clock {
    fn elapsed_secs(&self) -> f32;
}

/// Decides whether the gated part of the scene update runs this frame.
pub trait TickGate {
    fn tick(&mut self) -> bool;
}

impl<F: FnMut() -> bool> TickGate for F {
    fn tick(&mut self) -> bool {
        self()
    }
}

/// Opens once every `period` frames.
#[derive(Clone, Debug)]
pub struct FrameGate {
    period: u32,
    frames: u32,
}

impl FrameGate {
    pub fn new(period: u32) -> Self {
        FrameGate {
            period: period.max(1),
            frames: 0,
        }
    }
}

impl TickGate for FrameGate {
    fn tick(&mut self) -> bool {
        self.frames += 1;
        if self.frames >= self.period {
            self.frames = 0;
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneRules {
    pub damage_debounce_frames: u32,
    pub power_milestone: u32,
}

impl Default for SceneRules {
    fn default() -> Self {
        let rules = GameConfig::default().rules;
        SceneRules {
            damage_debounce_frames: rules.damage_debounce_frames,
            power_milestone: rules.power_milestone,
        }
    }
}

/// Glues the player, the aquarium and the frame's input together.
pub struct GameScene<G> {
    player: PlayerCreature,
    aquarium: Aquarium,
    gate: G,
    rules: SceneRules,
    last_event: Option<GameEvent>,
}

impl GameScene<FrameGate> {
    /// A scene with the player centred in a freshly built aquarium.
    pub fn from_config(config: &GameConfig, sprites: SpriteManager, seed: Option<u64>) -> Self {
        let player = PlayerCreature::new(
            Vec2::new(config.tank.width as f32 / 2.0, config.tank.height as f32 / 2.0),
            config.player.speed,
            config.player.lives,
            config.player.power,
            sprites.sprite(SpriteKind::Player),
        );
        let aquarium = Aquarium::from_config(config, sprites, seed);
        let rules = SceneRules {
            damage_debounce_frames: config.rules.damage_debounce_frames,
            power_milestone: config.rules.power_milestone,
        };

        GameScene::new(player, aquarium, FrameGate::new(config.rules.tick_period), rules)
    }
}

impl<G: TickGate> GameScene<G> {
    pub fn new(
        mut player: PlayerCreature,
        aquarium: Aquarium,
        gate: G,
        rules: SceneRules,
    ) -> Self {
        player
            .body_mut()
            .set_bounds(aquarium.width() as f32, aquarium.height() as f32);

        GameScene {
            player,
            aquarium,
            gate,
            rules,
            last_event: None,
        }
    }

    pub fn player(&self) -> &PlayerCreature {
        &self.player
    }

    pub fn aquarium(&self) -> &Aquarium {
        &self.aquarium
    }

    pub fn last_event(&self) -> Option<&GameEvent> {
        self.last_event.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.last_event, Some(GameEvent::GameOver { .. }))
    }

    /// Runs one frame: steer and move the player, then (when the gate is open) resolve at most
    /// one collision and advance the aquarium. Returns what happened this frame. Once the game is
    /// over nothing moves any more.
    pub fn update<I: InputSource, C: Clock>(&mut self, input: &I, clock: &C) -> Option<&GameEvent> {
        if self.is_game_over() {
            return self.last_event.as_ref();
        }
        self.last_event = None;

        let steer: Vec2 = Direction::ALL
            .iter()
            .filter(|d| input.is_pressed(**d))
            .map(|d| d.to_vector())
            .sum();
        self.player.set_direction(steer.x, steer.y);
        self.player.update();

        if !self.gate.tick() {
            return None;
        }

        if let Some(event) = detect_collision(&self.aquarium, &self.player) {
            log::debug!("Collision detected between player and NPC: {:?}", event);
            if !self.resolve_collision(&event) {
                return self.last_event.as_ref();
            }
            self.last_event = Some(event);
        }

        let ctx = MoveContext::new(Some(self.player.position()), clock.elapsed_secs());
        if let Some(level) = self.aquarium.update(&ctx) {
            self.last_event = Some(GameEvent::LevelUp { level });
        }

        self.last_event.as_ref()
    }

    /// Applies a collision to the player and the tank. Returns false when it ended the game.
    fn resolve_collision(&mut self, event: &GameEvent) -> bool {
        let id = match event {
            GameEvent::Collision { creature } => *creature,
            _ => return true,
        };

        let value = match self.aquarium.creature(id) {
            Some(creature) => creature.value(),
            None => {
                log::error!("Collision with creature {:?} which is not in the tank", id);
                return true;
            }
        };

        if self.player.power() < value {
            log::info!("Player is too weak to eat the creature!");
            self.player.lose_life(self.rules.damage_debounce_frames);
            if self.player.is_dead() {
                self.last_event = Some(GameEvent::GameOver {
                    final_score: self.player.score(),
                });
                return false;
            }
        } else {
            self.aquarium.remove_creature(id);
            self.player.add_to_score(value);
            if self.player.score() % self.rules.power_milestone.max(1) == 0 {
                self.player.increase_power(1);
                log::info!("Player power increased to {}!", self.player.power());
            }
        }

        true
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        self.player.draw(sink);
        self.aquarium.draw(sink);
    }
}
