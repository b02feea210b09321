use glam::Vec2;
use gridcast::{Cardinal, Config, Game, Map, Projector, Ray};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::Path;

fn reference_game() -> Game {
    let config = Config::default();
    Game::new(Map::reference(config.tile_size), config).unwrap()
}

#[test]
fn bundled_map_matches_reference() {
    let mut config = Config::default();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("map/reference.map");
    let map = Map::load(&path, &mut config).unwrap();

    assert_eq!(map, Map::reference(64.));
    assert_eq!(config, Config::default());
}

#[test]
fn missing_map_file_is_an_error() {
    let mut config = Config::default();
    assert!(Map::load(Path::new("does/not/exist.map"), &mut config).is_err());
}

#[test]
fn looking_east_from_the_centre() {
    let mut game = reference_game();
    let player = game.player_mut();
    player.direction = 0.;
    game.tick();

    let config = *game.config();
    let centre = config.num_rays() / 2;
    let ray = game.rays()[centre];

    assert!(ray.vertical);
    assert_eq!(ray.face_direction(), Cardinal::West);
    assert!((ray.hit - Vec2::new(704., 352.)).length() < 1e-2);
    assert!((ray.distance - 224.).abs() < 1e-2);

    let column = game.columns()[centre];
    let projector = Projector::new(&config);
    assert!((column.height - projector.strip_height(224.)).abs() < 1e-1);
}

#[test]
fn columns_span_the_screen() {
    let game = reference_game();
    let columns = game.columns();
    let config = game.config();

    assert_eq!(columns.len(), config.num_rays());
    for (i, column) in columns.iter().enumerate() {
        assert_eq!(column.x, i as u32 * config.strip_width);
        assert!(column.height.is_finite() && column.height > 0.);
        assert!(column.distance <= game.rays()[i].distance + 1e-3);
    }
}

#[test]
fn random_walk_stays_in_open_space() {
    let mut game = reference_game();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..300 {
        let (turn, walk) = (rng.gen_range(-1..=1), rng.gen_range(-1..=1));
        game.player_mut().set_intent(turn, walk);
        game.tick();

        let player = *game.player();
        assert!(!game.map().has_wall_at(player.pos));
        for ray in game.rays() {
            assert_eq!(ray.origin, player.pos);
            assert!(ray.distance.is_finite() && ray.distance >= 0.);
            assert!(game.map().has_wall_at(ray.hit + ray_probe(ray)));
        }
    }
}

/// A point just past the hit, on the wall's side of the grid line.
fn ray_probe(ray: &Ray) -> Vec2 {
    if ray.vertical {
        Vec2::new(if ray.facing.right { 0.5 } else { -0.5 }, 0.)
    } else {
        Vec2::new(0., if ray.facing.down { 0.5 } else { -0.5 })
    }
}
