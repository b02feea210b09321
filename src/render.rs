use crate::StringToAnyhow;
use gridcast::Game;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum GameState {
    Playing,
    Minimap,
    Paused,
    Exit,
}

/// Draws the numbers a [`Game`] produces onto an SDL canvas.
pub(crate) struct View {
    pub canvas: Canvas<Window>,
    pub state: GameState,
}

impl View {
    pub fn new(canvas: Canvas<Window>) -> Self {
        Self {
            canvas,
            state: GameState::Minimap,
        }
    }

    /// handle key presses that toggle state rather than steer
    pub fn key_once(&mut self, key: Keycode) {
        self.state = match (self.state, key) {
            (_, Keycode::Q) => GameState::Exit,
            (GameState::Paused, _) => GameState::Minimap,
            (_, Keycode::Escape) => GameState::Paused,
            (GameState::Minimap, Keycode::M) => GameState::Playing,
            (GameState::Playing, Keycode::M) => GameState::Minimap,
            (state, _) => state,
        };
    }

    pub fn draw(&mut self, game: &Game) -> anyhow::Result<()> {
        let config = game.config();

        self.canvas.set_draw_color(Color::RGB(0x21, 0x21, 0x21));
        self.canvas.clear();

        // DRAW WALLS
        self.canvas.set_blend_mode(BlendMode::Blend);
        for column in game.columns() {
            let shade = column.shade();
            // walls hit on vertical grid lines are drawn a little darker
            let shade = if column.vertical {
                shade.saturating_sub(0x22)
            } else {
                shade
            };
            self.canvas.set_draw_color(Color::RGBA(0xff, 0xff, 0xff, shade));
            self.canvas
                .fill_rect(Rect::new(
                    column.x as i32,
                    column.top as i32,
                    column.width,
                    column.height as u32,
                ))
                .ah()?;
        }
        self.canvas.set_blend_mode(BlendMode::None);

        if self.state == GameState::Minimap || self.state == GameState::Paused {
            self.draw_minimap(game, config.minimap_scale)?;
        }

        if self.state == GameState::Paused {
            self.canvas.set_blend_mode(BlendMode::Blend);
            self.canvas.set_draw_color(Color::RGBA(0, 0, 0, 0xDD));
            self.canvas.fill_rect(None).ah()?;
            self.canvas.set_blend_mode(BlendMode::None);
        }

        Ok(())
    }

    fn draw_minimap(&mut self, game: &Game, scale: f32) -> anyhow::Result<()> {
        let map = game.map();
        let tile = (map.tile_size * scale).max(1.) as u32;

        for (coord, wall) in map.cells() {
            let rect = Rect::new(
                (coord.x * scale) as i32,
                (coord.y * scale) as i32,
                tile,
                tile,
            );
            self.canvas.set_draw_color(if wall {
                Color::RGB(0x22, 0x22, 0x22)
            } else {
                Color::WHITE
            });
            self.canvas.fill_rect(rect).ah()?;
            self.canvas.set_draw_color(Color::RGB(0x22, 0x22, 0x22));
            self.canvas.draw_rect(rect).ah()?;
        }

        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(Color::RGBA(0xff, 0, 0, 200));
        for ray in game.rays() {
            self.canvas
                .draw_line(
                    Point::new((ray.origin.x * scale) as i32, (ray.origin.y * scale) as i32),
                    Point::new((ray.hit.x * scale) as i32, (ray.hit.y * scale) as i32),
                )
                .ah()?;
        }
        self.canvas.set_blend_mode(BlendMode::None);

        let player = game.player();
        let size = (player.radius * scale).max(2.) as u32;
        self.canvas.set_draw_color(Color::RED);
        self.canvas
            .fill_rect(Rect::from_center(
                Point::new((player.pos.x * scale) as i32, (player.pos.y * scale) as i32),
                size,
                size,
            ))
            .ah()?;

        Ok(())
    }
}
