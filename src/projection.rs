use crate::config::{Config, MIN_PROJECTION_DISTANCE};
use crate::ray::Ray;

/// One screen column of the first-person view.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Column {
    /// left edge in pixels
    pub x: u32,
    pub width: u32,
    /// may exceed the screen height when the wall is close
    pub height: f32,
    /// top edge in pixels, negative when the strip overflows the screen
    pub top: f32,
    /// fisheye-corrected distance
    pub distance: f32,
    pub vertical: bool,
}

impl Column {
    /// Opacity used for flat shading, nearer walls are brighter.
    pub fn shade(&self) -> u8 {
        (self.height / 2.).clamp(0., 255.) as u8
    }
}

/// Turns ray distances into wall strip heights.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Projector {
    tile_size: f32,
    plane_distance: f32,
    strip_width: u32,
    screen_height: f32,
}

impl Projector {
    pub fn new(config: &Config) -> Self {
        Self {
            tile_size: config.tile_size,
            plane_distance: config.projection_plane_distance(),
            strip_width: config.strip_width,
            screen_height: config.screen_height as f32,
        }
    }

    pub fn plane_distance(&self) -> f32 {
        self.plane_distance
    }

    /// Distance measured perpendicular to the view plane instead of along
    /// the ray, which keeps straight walls straight.
    pub fn corrected_distance(ray: &Ray, direction: f32) -> f32 {
        ray.distance * (ray.angle - direction).cos()
    }

    pub fn strip_height(&self, distance: f32) -> f32 {
        (self.tile_size / distance.max(MIN_PROJECTION_DISTANCE)) * self.plane_distance
    }

    pub fn project(&self, ray: &Ray, direction: f32, column: usize) -> Column {
        let distance = Self::corrected_distance(ray, direction);
        let height = self.strip_height(distance);

        Column {
            x: column as u32 * self.strip_width,
            width: self.strip_width,
            height,
            top: (self.screen_height - height) / 2.,
            distance,
            vertical: ray.vertical,
        }
    }
}
