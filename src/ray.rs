use crate::config::Config;
use crate::geometry::{normalize_angle, signed_step, Facing, AXIS_EPSILON};
use crate::map::Map;
use glam::Vec2;

/// How far past a grid line to sample when the ray travels up or left, so
/// the cell on the far side of the line is tested instead of the line's own.
const NUDGE: f32 = 1.;

/// Which face of a wall tile a ray hit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

/// One cast ray: where it started, where it stopped and how it got there.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ray {
    /// always in `[0, 2π)`
    pub angle: f32,
    pub facing: Facing,
    pub origin: Vec2,
    pub hit: Vec2,
    pub distance: f32,
    /// true if the hit lies on a vertical grid line
    pub vertical: bool,
}

impl Ray {
    /// Find the nearest wall from `origin` along `angle`.
    ///
    /// Grid-line crossings are searched twice, once along horizontal lines
    /// and once along vertical ones, jumping a whole tile per step. The
    /// closer of the two hits wins. The world edge is solid, so every search
    /// that starts inside the world ends on a wall.
    pub fn cast(map: &Map, origin: Vec2, angle: f32) -> Self {
        let angle = normalize_angle(angle);
        let facing = Facing::from_angle(angle);
        let (sin, cos) = angle.sin_cos();

        let horizontal = horizontal_hit(map, origin, facing, sin, cos)
            .map(|hit| (hit, origin.distance(hit)));
        let vertical = vertical_hit(map, origin, facing, sin, cos)
            .map(|hit| (hit, origin.distance(hit)));

        // ties go to the vertical hit
        let (hit, distance, vertical) = match (horizontal, vertical) {
            (Some((h, h_dist)), Some((v, v_dist))) => {
                if h_dist < v_dist {
                    (h, h_dist, false)
                } else {
                    (v, v_dist, true)
                }
            }
            (Some((h, h_dist)), None) => (h, h_dist, false),
            (None, Some((v, v_dist))) => (v, v_dist, true),
            (None, None) => {
                // only reachable from an origin outside the world
                log::trace!("ray from {origin} at {angle} found no wall");
                (origin, 0., false)
            }
        };

        Self {
            angle,
            facing,
            origin,
            hit,
            distance,
            vertical,
        }
    }

    /// The face of the wall tile that was hit.
    pub fn face_direction(&self) -> Cardinal {
        match (self.vertical, self.facing.right, self.facing.down) {
            (true, true, _) => Cardinal::West,
            (true, false, _) => Cardinal::East,
            (false, _, true) => Cardinal::North,
            (false, _, false) => Cardinal::South,
        }
    }
}

/// Cast one ray per strip across the field of view, left to right.
pub fn cast_all(map: &Map, origin: Vec2, direction: f32, config: &Config) -> Vec<Ray> {
    let start = direction - config.fov / 2.;
    let delta = config.ray_delta();

    (0..config.num_rays())
        .map(|column| Ray::cast(map, origin, start + column as f32 * delta))
        .collect()
}

/// First wall crossing on a line `y = k * tile_size`.
fn horizontal_hit(map: &Map, origin: Vec2, facing: Facing, sin: f32, cos: f32) -> Option<Vec2> {
    // parallel to the lines, never crosses one
    if sin.abs() < AXIS_EPSILON {
        return None;
    }
    let tile = map.tile_size;
    let straight = cos.abs() < AXIS_EPSILON;
    let tan = sin / cos;

    let mut y = (origin.y / tile).floor() * tile;
    if facing.down {
        y += tile;
    }
    let x = if straight {
        origin.x
    } else {
        origin.x + (y - origin.y) / tan
    };

    let step = Vec2::new(
        if straight {
            0.
        } else {
            signed_step(tile / tan, facing.right)
        },
        signed_step(tile, facing.down),
    );
    let nudge = Vec2::new(0., if facing.up() { -NUDGE } else { 0. });

    march(map, Vec2::new(x, y), step, nudge)
}

/// First wall crossing on a line `x = k * tile_size`.
fn vertical_hit(map: &Map, origin: Vec2, facing: Facing, sin: f32, cos: f32) -> Option<Vec2> {
    if cos.abs() < AXIS_EPSILON {
        return None;
    }
    let tile = map.tile_size;
    let flat = sin.abs() < AXIS_EPSILON;
    let tan = sin / cos;

    let mut x = (origin.x / tile).floor() * tile;
    if facing.right {
        x += tile;
    }
    let y = if flat {
        origin.y
    } else {
        origin.y + (x - origin.x) * tan
    };

    let step = Vec2::new(
        signed_step(tile, facing.right),
        if flat {
            0.
        } else {
            signed_step(tile * tan, facing.down)
        },
    );
    let nudge = Vec2::new(if facing.left() { -NUDGE } else { 0. }, 0.);

    march(map, Vec2::new(x, y), step, nudge)
}

/// Step from grid line to grid line until a wall is sampled or the touch
/// point leaves the world.
fn march(map: &Map, mut touch: Vec2, step: Vec2, nudge: Vec2) -> Option<Vec2> {
    let width = 0.0..=map.world_width();
    let height = 0.0..=map.world_height();

    while width.contains(&touch.x) && height.contains(&touch.y) {
        if map.has_wall_at(touch + nudge) {
            return Some(touch);
        }
        touch += step;
    }

    None
}
