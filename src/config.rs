use std::f32::consts::PI;

/// Rays closer than this are projected as if they were this far away.
pub const MIN_PROJECTION_DISTANCE: f32 = 0.5;

/// Engine constants. `Default` is the reference setup: a 15x11 tile world
/// viewed through a 60 degree window the same size as the world.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Config {
    pub tile_size: f32,
    /// field of view in radians
    pub fov: f32,
    pub screen_width: u32,
    pub screen_height: u32,
    /// screen columns covered by one ray
    pub strip_width: u32,
    pub move_speed: f32,
    /// radians per frame
    pub rotation_speed: f32,
    pub player_radius: f32,
    pub minimap_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        let tile_size = 64.;
        Self {
            tile_size,
            fov: 60f32.to_radians(),
            screen_width: 15 * tile_size as u32,
            screen_height: 11 * tile_size as u32,
            strip_width: 1,
            move_speed: 4.,
            rotation_speed: 4f32.to_radians(),
            player_radius: 6.,
            minimap_scale: 0.2,
        }
    }
}

impl Config {
    pub fn num_rays(&self) -> usize {
        (self.screen_width / self.strip_width.max(1)) as usize
    }

    /// distance from the eye to the plane the walls are projected onto
    pub fn projection_plane_distance(&self) -> f32 {
        (self.screen_width as f32 / 2.) / (self.fov / 2.).tan()
    }

    /// angle between two neighbouring rays
    pub fn ray_delta(&self) -> f32 {
        self.fov / self.num_rays().max(1) as f32
    }

    pub(crate) fn check(&self) -> anyhow::Result<()> {
        if !(self.tile_size > 0.) {
            anyhow::bail!("tile size must be positive, got {}", self.tile_size);
        }
        if !(self.fov > 0. && self.fov < PI) {
            anyhow::bail!("field of view must be between 0 and 180 degrees");
        }
        if self.strip_width == 0 || self.strip_width > self.screen_width {
            anyhow::bail!(
                "strip width {} does not fit screen width {}",
                self.strip_width,
                self.screen_width
            );
        }
        Ok(())
    }
}
