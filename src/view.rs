use std::collections::HashMap;

use ggez::{
    graphics::{self, Canvas, Color, DrawMode, DrawParam, Image, Mesh, Text, TextLayout},
    Context, GameResult,
};
use glam::Vec2;

use model::{GameScene, RenderSink, SpriteHandle, SpriteKind, SpriteManager, TickGate};

const BACKGROUND: Color = Color::new(0.05, 0.25, 0.45, 1.0);

fn placeholder_color(kind: SpriteKind) -> Color {
    match kind {
        SpriteKind::Player => Color::from_rgb(255, 200, 40),
        SpriteKind::BaseFish => Color::from_rgb(120, 200, 255),
        SpriteKind::BiggerFish => Color::from_rgb(60, 120, 220),
        SpriteKind::Crab => Color::from_rgb(230, 90, 60),
        SpriteKind::PredatorHead => Color::from_rgb(70, 70, 70),
        SpriteKind::PredatorBody => Color::from_rgb(100, 100, 100),
        SpriteKind::PredatorTail => Color::from_rgb(130, 130, 130),
    }
}

enum Art {
    Image(Image),
    /// A unit circle, used when the image is missing from the resources folder.
    Placeholder(Mesh),
}

impl Art {
    fn load(ctx: &Context, kind: SpriteKind) -> GameResult<Art> {
        match Image::from_path(ctx, kind.file_name()) {
            Ok(image) => Ok(Art::Image(image)),
            Err(e) => {
                log::warn!(
                    "Couldn't load {} ({}), drawing {} as a circle",
                    kind.file_name(),
                    e,
                    kind.label()
                );
                let mesh = Mesh::new_circle(
                    ctx,
                    DrawMode::fill(),
                    [0.0, 0.0],
                    0.5,
                    0.01,
                    Color::WHITE,
                )?;
                Ok(Art::Placeholder(mesh))
            }
        }
    }

    fn native_size(&self) -> Vec2 {
        match self {
            Art::Image(image) => Vec2::new(image.width() as f32, image.height() as f32),
            Art::Placeholder(_) => Vec2::ONE,
        }
    }
}

/// Draws the model's sprites onto a ggez canvas.
struct CanvasSink<'a> {
    canvas: &'a mut Canvas,
    art: &'a HashMap<SpriteKind, Art>,
    flash: bool,
}

impl CanvasSink<'_> {
    fn draw_art(&mut self, sprite: &SpriteHandle, position: Vec2, rotation: f32) {
        let art = match self.art.get(&sprite.kind()) {
            Some(art) => art,
            None => {
                log::warn!("No art loaded for {:?}", sprite.kind());
                return;
            }
        };

        let scale = sprite.size() / art.native_size();
        let flip = if sprite.flipped() { -1.0 } else { 1.0 };
        let param = DrawParam::new()
            .dest([position.x, position.y])
            .scale([scale.x * flip, scale.y])
            .rotation(rotation);

        match art {
            Art::Image(image) => {
                let param = param.offset([0.5, 0.5]);
                if self.flash {
                    self.canvas.draw(image, param.color(Color::RED));
                } else {
                    self.canvas.draw(image, param);
                }
            }
            Art::Placeholder(mesh) => {
                let color = if self.flash {
                    Color::RED
                } else {
                    placeholder_color(sprite.kind())
                };
                self.canvas.draw(mesh, param.color(color));
            }
        }
    }
}

impl RenderSink for CanvasSink<'_> {
    fn draw(&mut self, sprite: &SpriteHandle, position: Vec2) {
        self.draw_art(sprite, position, 0.0);
    }

    fn draw_rotated(&mut self, sprite: &SpriteHandle, position: Vec2, angle_degrees: f32) {
        self.draw_art(sprite, position, angle_degrees.to_radians());
    }

    fn set_damage_flash(&mut self, flash: bool) {
        self.flash = flash;
    }
}

pub struct View {
    art: HashMap<SpriteKind, Art>,
    width: f32,
    height: f32,
}

impl View {
    pub fn new(ctx: &mut Context, sprites: &SpriteManager, width: f32, height: f32) -> GameResult<View> {
        let mut art = HashMap::new();
        for kind in SpriteKind::ALL.iter().copied() {
            if sprites.sprite(kind).is_some() {
                art.insert(kind, Art::load(ctx, kind)?);
            }
        }

        Ok(View { art, width, height })
    }

    fn draw_hud<G: TickGate>(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        scene: &GameScene<G>,
    ) -> GameResult {
        let player = scene.player();
        let level = scene
            .aquarium()
            .current_level()
            .map(|level| level.number() + 1)
            .unwrap_or(0);

        let lines = [
            format!("Score: {}", player.score()),
            format!("Power: {}", player.power()),
            format!("Lives: {}", player.lives()),
            format!("Level: {}", level),
        ];
        for (i, line) in lines.iter().enumerate() {
            canvas.draw(
                &Text::new(line.as_str()),
                DrawParam::default()
                    .dest([10.0, 10.0 + i as f32 * 20.0])
                    .color(Color::WHITE),
            );
        }

        for i in 0..player.lives() {
            let life = Mesh::new_circle(
                ctx,
                DrawMode::fill(),
                [20.0 + i as f32 * 25.0, 100.0],
                8.0,
                0.1,
                Color::RED,
            )?;
            canvas.draw(&life, DrawParam::default());
        }

        if scene.is_game_over() {
            let mut banner = Text::new("GAME OVER");
            banner.set_scale(64.0);
            banner.set_layout(TextLayout::center());
            canvas.draw(
                &banner,
                DrawParam::default()
                    .dest([self.width / 2.0, self.height / 2.0])
                    .color(Color::RED),
            );
        }

        Ok(())
    }

    pub fn draw<G: TickGate>(&mut self, ctx: &mut Context, scene: &GameScene<G>) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, BACKGROUND);

        {
            let mut sink = CanvasSink {
                canvas: &mut canvas,
                art: &self.art,
                flash: false,
            };
            scene.draw(&mut sink);
        }

        self.draw_hud(ctx, &mut canvas, scene)?;

        canvas.finish(ctx)
    }
}
