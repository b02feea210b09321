use crate::config::Config;
use anyhow::Context;
use glam::Vec2;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

const REFERENCE: [[u8; 15]; 11] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Occupancy grid. Cells are `0` for open space and non-zero for walls,
/// stored row-major. Read-only once built.
#[derive(Clone, PartialEq, Debug)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    cells: Vec<u8>,
    spawn: Option<usize>,
}

impl Map {
    /// Build a map from rows of cell values. All rows must be the same length.
    pub fn new<R: AsRef<[u8]>>(rows: &[R], tile_size: f32) -> anyhow::Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if width == 0 {
            anyhow::bail!("map has no cells");
        }
        if !(tile_size > 0.) {
            anyhow::bail!("tile size must be positive, got {tile_size}");
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                anyhow::bail!("row {y} has {} cells, expected {width}", row.len());
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            width,
            height,
            tile_size,
            cells,
            spawn: None,
        })
    }

    /// The built-in 15x11 layout with a solid border.
    pub fn reference(tile_size: f32) -> Self {
        Self {
            width: 15,
            height: 11,
            tile_size,
            cells: REFERENCE.iter().flatten().copied().collect(),
            spawn: None,
        }
    }

    /// Load a map file, applying its meta directives to `config`.
    pub fn load(name: &Path, config: &mut Config) -> anyhow::Result<Self> {
        log::info!("loading map at {}", name.display());
        let file =
            read_to_string(name).with_context(|| format!("reading {}", name.display()))?;
        Self::parse(&file, config)
    }

    pub fn parse(src: &str, config: &mut Config) -> anyhow::Result<Self> {
        let mut lines = src.lines();
        let mut this = None;

        while let Some(line) = lines.by_ref().next() {
            match line.trim_end() {
                "" => continue,
                "!!!!META" => parse_meta(&mut lines, config)?,
                "!!!!MAIN" => {
                    if this.is_some() {
                        anyhow::bail!("map has more than one main section");
                    }
                    this = Some(parse_main(&mut lines, config.tile_size)?);
                }
                other => anyhow::bail!("unrecognized directive: {other}"),
            }
        }

        config.check()?;
        let mut this = this.context("map has no main section")?;
        // meta may come after main
        this.tile_size = config.tile_size;
        log::debug!(
            "parsed {}x{} map, tile size {}",
            this.width,
            this.height,
            this.tile_size
        );
        Ok(this)
    }

    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    /// Whether the cell at `(col, row)` is a wall, `None` outside the grid.
    pub fn cell(&self, col: usize, row: usize) -> Option<bool> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col).map(|cell| *cell != 0)
    }

    /// Every cell with the world position of its top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (Vec2, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (self.idx_to_vec(idx), *cell != 0))
    }

    pub fn idx_to_vec(&self, idx: usize) -> Vec2 {
        let x = idx % self.width;
        let y = (idx - x) / self.width;
        Vec2::new(x as f32 * self.tile_size, y as f32 * self.tile_size)
    }

    /// Anything outside the world counts as solid, so rays always stop and
    /// the player can never walk off the edge.
    pub fn has_wall_at(&self, pos: Vec2) -> bool {
        if !(0.0..=self.world_width()).contains(&pos.x)
            || !(0.0..=self.world_height()).contains(&pos.y)
        {
            return true;
        }
        let col = (pos.x / self.tile_size).floor() as usize;
        let row = (pos.y / self.tile_size).floor() as usize;
        // the far edges are in bounds but have no cell behind them
        self.cell(col, row).unwrap_or(true)
    }

    /// Centre of the spawn cell, or of the world if the map has none.
    pub fn get_spawn(&self) -> Vec2 {
        match self.spawn {
            Some(idx) => self.idx_to_vec(idx) + Vec2::splat(self.tile_size / 2.),
            None => Vec2::new(self.world_width() / 2., self.world_height() / 2.),
        }
    }
}

fn parse_meta<'lines>(
    mut lines: impl Iterator<Item = &'lines str>,
    config: &mut Config,
) -> anyhow::Result<()> {
    for line in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let mut chunks = line.split(',');
        let directive = chunks.by_ref().next().unwrap_or_default();
        let params = chunks
            .map(|param| param.split_once('='))
            .collect::<Option<HashMap<_, _>>>()
            .context("incorrectly formatted meta")?;
        let get = |key: &str| -> anyhow::Result<Option<f32>> {
            params
                .get(key)
                .map(|value| value.trim().parse::<f32>())
                .transpose()
                .with_context(|| format!("bad value for {directive}.{key}"))
        };

        match directive {
            "tile" => {
                if let Some(size) = get("size")? {
                    config.tile_size = size;
                }
            }
            "view" => {
                if let Some(fov) = get("fov")? {
                    config.fov = fov.to_radians();
                }
                if let Some(strip) = get("strip")? {
                    config.strip_width = strip as u32;
                }
                if let Some(width) = get("width")? {
                    config.screen_width = width as u32;
                }
                if let Some(height) = get("height")? {
                    config.screen_height = height as u32;
                }
            }
            "player" => {
                if let Some(speed) = get("speed")? {
                    config.move_speed = speed;
                }
                if let Some(turn) = get("turn")? {
                    config.rotation_speed = turn.to_radians();
                }
                if let Some(radius) = get("radius")? {
                    config.player_radius = radius;
                }
            }
            other => anyhow::bail!("unrecognized meta directive: {other}"),
        }
    }

    Ok(())
}

fn parse_main<'lines>(
    mut lines: impl Iterator<Item = &'lines str>,
    tile_size: f32,
) -> anyhow::Result<Map> {
    let mut rows = vec![];
    let mut spawn = None;

    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        let mut row = Vec::with_capacity(line.len());
        for tile in line.chars() {
            row.push(match tile {
                '0' | ' ' => 0,
                '1' => 1,
                '*' => {
                    if spawn.is_some() {
                        anyhow::bail!("map has more than one spawn");
                    }
                    spawn = Some((row.len(), rows.len()));
                    0
                }
                other => anyhow::bail!("invalid tile in map: {other:?}"),
            });
        }
        rows.push(row);
    }

    let mut map = Map::new(&rows, tile_size)?;
    map.spawn = spawn.map(|(x, y)| y * map.width + x);
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn outside_world_is_solid() {
        let map = Map::new(&[[0u8; 4]; 4], 64.).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let x = rng.gen_range(-1000f32..1000.);
            let y = rng.gen_range(-1000f32..1000.);
            let outside = !(0. ..=256.).contains(&x) || !(0. ..=256.).contains(&y);
            if outside {
                assert!(map.has_wall_at(Vec2::new(x, y)), "({x}, {y})");
            } else if x < 256. && y < 256. {
                assert!(!map.has_wall_at(Vec2::new(x, y)), "({x}, {y})");
            }
        }

        assert!(map.has_wall_at(Vec2::new(-0.01, 10.)));
        assert!(map.has_wall_at(Vec2::new(10., 256.01)));
        assert!(map.has_wall_at(Vec2::new(256., 10.)));
        assert!(map.has_wall_at(Vec2::new(f32::NAN, 10.)));
    }

    #[test]
    fn matches_cell_values() {
        let map = Map::reference(64.);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..2000 {
            let x = rng.gen_range(0f32..map.world_width());
            let y = rng.gen_range(0f32..map.world_height());
            let expected = REFERENCE[(y / 64.).floor() as usize][(x / 64.).floor() as usize] != 0;
            assert_eq!(map.has_wall_at(Vec2::new(x, y)), expected, "({x}, {y})");
        }
    }

    #[test]
    fn reference_layout() {
        let map = Map::reference(64.);
        assert_eq!((map.width, map.height), (15, 11));
        assert_eq!(map.world_width(), 960.);
        assert_eq!(map.world_height(), 704.);
        assert_eq!(map.cell(0, 0), Some(true));
        assert_eq!(map.cell(6, 2), Some(true));
        assert_eq!(map.cell(7, 5), Some(false));
        assert_eq!(map.cell(15, 0), None);
        assert_eq!(map.get_spawn(), Vec2::new(480., 352.));
        let walls = REFERENCE.iter().flatten().filter(|cell| **cell != 0).count();
        assert_eq!(map.cells().filter(|(_, wall)| *wall).count(), walls);
    }

    #[test]
    fn parse_file() {
        let src = "!!!!META\n\
                   tile,size=32\n\
                   view,fov=90,strip=2\n\
                   player,speed=3,turn=5\n\
                   \n\
                   !!!!MAIN\n\
                   11111\n\
                   1 *01\n\
                   11111\n";
        let mut config = Config::default();
        let map = Map::parse(src, &mut config).unwrap();

        assert_eq!((map.width, map.height), (5, 3));
        assert_eq!(map.tile_size, 32.);
        assert_eq!(config.strip_width, 2);
        assert_eq!(config.move_speed, 3.);
        assert!((config.fov - 90f32.to_radians()).abs() < 1e-6);
        assert_eq!(map.get_spawn(), Vec2::new(2.5 * 32., 1.5 * 32.));
        assert_eq!(map.cell(1, 1), Some(false));
        assert_eq!(map.cell(4, 1), Some(true));
    }

    #[test]
    fn parse_errors() {
        let mut config = Config::default();
        assert!(Map::parse("!!!!MAIN\n111\n11\n", &mut config).is_err());
        assert!(Map::parse("!!!!MAIN\n1x1\n", &mut config).is_err());
        assert!(Map::parse("!!!!MAIN\n*1*\n", &mut config).is_err());
        assert!(Map::parse("!!!!META\nfog,dof=4\n", &mut config).is_err());
        assert!(Map::parse("!!!!META\ntile,size\n", &mut config).is_err());
        assert!(Map::parse("!!!!META\ntile,size=big\n", &mut config).is_err());
        assert!(Map::parse("!!!!META\ntile,size=64\n", &mut config).is_err());
        assert!(Map::parse("hello\n", &mut config).is_err());
        assert!(Map::new::<[u8; 0]>(&[], 64.).is_err());
    }
}
