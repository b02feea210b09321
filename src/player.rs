use crate::config::Config;
use crate::geometry::normalize_angle;
use crate::map::Map;
use glam::Vec2;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Player {
    pub pos: Vec2,
    /// radians, clockwise from +x
    pub direction: f32,
    /// -1 turns left, +1 turns right
    pub turn: i8,
    /// -1 walks back, +1 walks forward
    pub walk: i8,
    pub speed: f32,
    pub turn_speed: f32,
    /// only drawn on the minimap, collisions test the centre point
    pub radius: f32,
}

impl Player {
    pub fn new(pos: Vec2, config: &Config) -> Self {
        Self {
            pos,
            direction: std::f32::consts::FRAC_PI_2,
            turn: 0,
            walk: 0,
            speed: config.move_speed,
            turn_speed: config.rotation_speed,
            radius: config.player_radius,
        }
    }

    /// Set the control signals for the coming frames, clamped to -1..=1.
    pub fn set_intent(&mut self, turn: i32, walk: i32) {
        self.turn = turn.clamp(-1, 1) as i8;
        self.walk = walk.clamp(-1, 1) as i8;
    }

    fn step(&self) -> Vec2 {
        Vec2::from_angle(self.direction) * self.speed * self.walk as f32
    }

    /// Turn, then try to move. A move whose destination is inside a wall is
    /// dropped as a whole; there is no sliding along walls.
    pub fn update(&mut self, map: &Map) {
        if self.turn != 0 {
            self.direction = normalize_angle(self.direction + self.turn as f32 * self.turn_speed);
        }

        if self.walk == 0 {
            return;
        }

        let candidate = self.pos + self.step();
        if map.has_wall_at(candidate) {
            log::trace!("move from {} to {candidate} blocked by wall", self.pos);
        } else {
            self.pos = candidate;
        }
    }
}
