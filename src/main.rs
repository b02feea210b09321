use gridcast::{Config, Game, Map};
use render::{GameState, View};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

mod render;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

const TARGET_FPS: u64 = 30;

/// -1, 0 or +1 depending on which of the two keys is held
fn axis(keys: &HashSet<Keycode>, negative: Keycode, positive: Keycode) -> i32 {
    keys.contains(&positive) as i32 - keys.contains(&negative) as i32
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("GRIDCAST_LOG");

    let mut config = Config::default();
    let map = match std::env::args_os().nth(1) {
        Some(path) => Map::load(Path::new(&path), &mut config)?,
        None => {
            log::info!("no map given, using the reference map");
            Map::reference(config.tile_size)
        }
    };
    let mut game = Game::new(map, config)?;

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window("gridcast", config.screen_width, config.screen_height)
        .position_centered()
        .build()?;
    window.set_resizable(false);
    log::info!("creating canvas");
    let canvas = window.into_canvas().build()?;
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut view = View::new(canvas);
    let mut keys = HashSet::new();
    let delta = Duration::from_millis(1_000 / TARGET_FPS);

    'main_loop: loop {
        let prev = Instant::now();

        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => {
                    keys.insert(k);
                    if !repeat {
                        view.key_once(k);
                    }
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    keys.remove(&k);
                }
                _ => {}
            }
        }

        if view.state == GameState::Exit {
            break;
        }

        if view.state != GameState::Paused {
            game.player_mut().set_intent(
                axis(&keys, Keycode::Left, Keycode::Right),
                axis(&keys, Keycode::Down, Keycode::Up),
            );
            game.tick();
        }

        if let Err(err) = view.draw(&game) {
            log::error!("error while drawing frame: {err}");
            Err(err)?;
        }
        view.canvas.present();

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    Ok(())
}
