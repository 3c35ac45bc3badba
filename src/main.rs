use std::path::PathBuf;

use clap::Parser;
use ggez::{
    conf::{WindowMode, WindowSetup},
    event::{self, EventHandler},
    input::keyboard::KeyCode,
    Context, GameError, GameResult,
};

use model::{
    Clock, Direction, FrameGate, GameConfig, GameEvent, GameScene, InputSource, SpriteManager,
};

mod view;
use view::View;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON game config, the built-in levels are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for creature spawning, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

/// The arrow keys and the game clock for the current frame.
struct FrameInput<'a>(&'a Context);

impl InputSource for FrameInput<'_> {
    fn is_pressed(&self, direction: Direction) -> bool {
        let key = match direction {
            Direction::North => KeyCode::Up,
            Direction::East => KeyCode::Right,
            Direction::South => KeyCode::Down,
            Direction::West => KeyCode::Left,
        };
        self.0.keyboard.is_key_pressed(key)
    }
}

impl Clock for FrameInput<'_> {
    fn elapsed_secs(&self) -> f32 {
        self.0.time.time_since_start().as_secs_f32()
    }
}

struct Game {
    scene: GameScene<FrameGate>,
    view: View,
    frame_rate: u32,
}

impl Game {
    fn new(ctx: &mut Context, config: &GameConfig, seed: u64) -> GameResult<Game> {
        let sprites = SpriteManager::with_defaults();
        let view = View::new(
            ctx,
            &sprites,
            config.tank.width as f32,
            config.tank.height as f32,
        )?;

        Ok(Game {
            scene: GameScene::from_config(config, sprites, Some(seed)),
            view,
            frame_rate: config.rules.frame_rate,
        })
    }
}

impl EventHandler for Game {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        while ctx.time.check_update_time(self.frame_rate) {
            if self.scene.is_game_over() {
                continue;
            }

            let frame = FrameInput(ctx);
            match self.scene.update(&frame, &frame) {
                Some(GameEvent::GameOver { final_score }) => {
                    log::info!("Game over! Final score: {}", final_score);
                }
                Some(GameEvent::LevelUp { level }) => {
                    log::info!("Level up! Now playing level {}", level + 1);
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        self.view.draw(ctx, &self.scene)
    }
}

fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path).map_err(|e| {
            GameError::ResourceLoadError(format!("{}: {}", path.display(), e))
        })?,
        None => GameConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Using seed {}", seed);

    let mut cb = ggez::ContextBuilder::new("Aquarium", "Louis de Wardt")
        .window_setup(WindowSetup::default().title("Aquarium").vsync(true))
        .window_mode(
            WindowMode::default()
                .dimensions(config.tank.width as f32, config.tank.height as f32),
        );

    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        log::info!(
            "Using cargo manifest dir ({}) resources folder (if it exists)",
            manifest_dir
        );
        let mut path = PathBuf::from(manifest_dir);
        path.push("resources");
        cb = cb.add_resource_path(path);
    } else {
        cb = cb.add_resource_path("./resources");
    }

    let (mut ctx, event_loop) = cb.build()?;
    let game = Game::new(&mut ctx, &config, seed)?;
    event::run(ctx, event_loop, game)
}
