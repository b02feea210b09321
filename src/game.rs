use crate::config::Config;
use crate::map::Map;
use crate::player::Player;
use crate::projection::{Column, Projector};
use crate::ray::{cast_all, Ray};

/// Everything one frame needs: the map, the player and the latest view.
pub struct Game {
    config: Config,
    map: Map,
    player: Player,
    projector: Projector,
    rays: Vec<Ray>,
    columns: Vec<Column>,
}

impl Game {
    /// initialize game
    pub fn new(map: Map, config: Config) -> anyhow::Result<Self> {
        config.check()?;
        if map.tile_size != config.tile_size {
            anyhow::bail!(
                "map tile size {} does not match config tile size {}",
                map.tile_size,
                config.tile_size
            );
        }

        let spawn = map.get_spawn();
        if map.has_wall_at(spawn) {
            anyhow::bail!("spawn {spawn} is inside a wall, mark an open cell with `*`");
        }

        log::info!(
            "{}x{} map, spawning at {spawn}, {} rays per frame",
            map.width,
            map.height,
            config.num_rays()
        );
        log::debug!("{config:?}");

        let mut this = Self {
            player: Player::new(spawn, &config),
            projector: Projector::new(&config),
            rays: Vec::with_capacity(config.num_rays()),
            columns: Vec::with_capacity(config.num_rays()),
            config,
            map,
        };
        this.cast_rays();

        Ok(this)
    }

    /// Move the player, then rebuild the view from scratch.
    pub fn tick(&mut self) {
        self.player.update(&self.map);
        self.cast_rays();
    }

    /// raycasting
    fn cast_rays(&mut self) {
        self.rays = cast_all(&self.map, self.player.pos, self.player.direction, &self.config);
        self.columns = self
            .rays
            .iter()
            .enumerate()
            .map(|(i, ray)| self.projector.project(ray, self.player.direction, i))
            .collect();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// where the input layer writes intents
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn first_frame_is_ready() {
        let game = Game::new(Map::reference(64.), Config::default()).unwrap();
        assert_eq!(game.rays().len(), 960);
        assert_eq!(game.columns().len(), 960);
        assert_eq!(game.player().pos, Vec2::new(480., 352.));
    }

    #[test]
    fn rejects_spawn_in_wall() {
        let mut config = Config::default();
        let map = Map::parse("!!!!MAIN\n111\n111\n111\n", &mut config).unwrap();
        assert!(Game::new(map, config).is_err());
    }

    #[test]
    fn rejects_mismatched_tile_size() {
        assert!(Game::new(Map::reference(32.), Config::default()).is_err());
    }

    #[test]
    fn tick_moves_and_recasts() {
        let mut game = Game::new(Map::reference(64.), Config::default()).unwrap();
        let before = game.rays()[480];

        game.player_mut().set_intent(0, 1);
        game.tick();

        // facing down, so the player moves toward the wall below
        assert!((game.player().pos - Vec2::new(480., 356.)).length() < 1e-3);
        let after = game.rays()[480];
        assert!(after.distance < before.distance);
        assert_eq!(after.origin, game.player().pos);
    }
}
