//! Procedural scene generators that fill a [`Grid`] without a source image.
//!
//! Each [`Scene`] paints a small landscape (or a cat) sized to the grid:
//! layer bands are fractions of the edge length, and shapes like the sun or tree crowns
//! are discs measured in whole cells. All randomness comes from the caller's [`Rng`],
//! so a seeded generator always reproduces the same grid.
//!
//! Generated grids are always `N×N`, but not every scene paints every cell.
//! The mountain, cityscape, and nature scenes leave empty gaps between their layers,
//! which an editor shows as unpainted canvas.

use crate::{Cell, Grid, GridSize};
use palette::Srgb;
use rand::{
    distributions::{Distribution, Standard},
    seq::SliceRandom,
    Rng,
};
use std::{fmt::Display, ops::Range};

/// Creates a color from a `0xRRGGBB` literal.
#[allow(clippy::cast_possible_truncation)]
const fn hex(rgb: u32) -> Srgb<u8> {
    Srgb::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

const SKY: [Srgb<u8>; 4] = [hex(0x87CEEB), hex(0xB0E0E6), hex(0xE0F6FF), hex(0xF0F8FF)];
const MOUNTAIN: [Srgb<u8>; 4] = [hex(0x8B7355), hex(0xA0522D), hex(0xCD853F), hex(0xD2B48C)];
const SNOW: [Srgb<u8>; 3] = [hex(0xFFFFFF), hex(0xF8F8FF), hex(0xFFFAFA)];
const MEADOW: [Srgb<u8>; 3] = [hex(0x228B22), hex(0x32CD32), hex(0x90EE90)];

const SUNSET_BANDS: [[Srgb<u8>; 3]; 4] = [
    [hex(0xFF6B35), hex(0xF7931E), hex(0xFFD23F)],
    [hex(0xFF8C42), hex(0xFF6B35), hex(0xC73E1D)],
    [hex(0xA8E6CF), hex(0x7FCDCD), hex(0x81C784)],
    [hex(0x3D5A80), hex(0x293241), hex(0x1A1A2E)],
];
const SUN: Srgb<u8> = hex(0xFFFF00);
const SUN_GLOW: Srgb<u8> = hex(0xFFA500);
const SILHOUETTE: Srgb<u8> = hex(0x2C3E50);

const CAT_BACKGROUND: [Srgb<u8>; 3] = [hex(0xE8F4FD), hex(0xF0F8FF), hex(0xF5F5DC)];
const CAT_FUR: [Srgb<u8>; 5] =
    [hex(0x8B4513), hex(0xD2691E), hex(0x000000), hex(0x696969), hex(0xFFA500)];
const CAT_EYE: Srgb<u8> = hex(0x000000);

const CITY_SKY: [Srgb<u8>; 3] = [hex(0x87CEEB), hex(0xB0C4DE), hex(0xE6E6FA)];
const BUILDING: [Srgb<u8>; 5] =
    [hex(0x696969), hex(0x2F4F4F), hex(0x708090), hex(0x4682B4), hex(0x5F9EA0)];
const WINDOW: [Srgb<u8>; 3] = [hex(0xFFFF00), hex(0xFFA500), hex(0x87CEEB)];

const NATURE_SKY: [Srgb<u8>; 3] = [hex(0x87CEEB), hex(0xB0E0E6), hex(0xE0F6FF)];
const GRASS: [Srgb<u8>; 4] = [hex(0x228B22), hex(0x32CD32), hex(0x90EE90), hex(0x9ACD32)];
const BARK: [Srgb<u8>; 3] = [hex(0x8B4513), hex(0xA0522D), hex(0xCD853F)];
const LEAVES: [Srgb<u8>; 4] = [hex(0x228B22), hex(0x32CD32), hex(0x006400), hex(0x90EE90)];

/// A procedurally generated scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Sky over randomly placed mountain peaks with snow caps and a grassy foreground.
    Mountain,
    /// A banded sunset sky with a sun disc and a dark ground silhouette.
    Sunset,
    /// A single-colored cat with ears and eyes on a light background.
    Cat,
    /// A row of buildings with lit windows under a pale sky.
    Cityscape,
    /// Sky and grass with a few trees in between.
    Nature,
}

impl Scene {
    /// Every scene, in the order the editor lists them.
    pub const ALL: [Self; 5] =
        [Self::Mountain, Self::Sunset, Self::Cat, Self::Cityscape, Self::Nature];

    /// The display name of the scene.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mountain => "Mountain Landscape",
            Self::Sunset => "Sunset View",
            Self::Cat => "Cute Cat",
            Self::Cityscape => "City Skyline",
            Self::Nature => "Nature Scene",
        }
    }
}

impl Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks one of [`Scene::ALL`] uniformly, so `rng.gen::<Scene>()` chooses a random scene.
impl Distribution<Scene> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Scene {
        Scene::ALL[rng.gen_range(0..Scene::ALL.len())]
    }
}

/// Generates `scene` on a new `size×size` grid.
///
/// # Examples
/// ```
/// # use pixelette::{generate, GridSize, Scene, Error};
/// # use rand::{rngs::StdRng, SeedableRng};
/// # fn main() -> Result<(), Error> {
/// let size = GridSize::try_from(32u16)?;
/// let grid = generate(Scene::Sunset, size, &mut StdRng::seed_from_u64(7));
/// assert_eq!(grid.size(), size);
/// assert_eq!(grid.painted(), 32 * 32);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn generate(scene: Scene, size: GridSize, rng: &mut impl Rng) -> Grid {
    let mut canvas = Canvas::new(size);
    match scene {
        Scene::Mountain => mountain(&mut canvas, rng),
        Scene::Sunset => sunset(&mut canvas, rng),
        Scene::Cat => cat(&mut canvas, rng),
        Scene::Cityscape => cityscape(&mut canvas, rng),
        Scene::Nature => nature(&mut canvas, rng),
    }
    log::debug!("generated {scene} on a {0}x{0} grid", size);
    Grid::from_cells_unchecked(size, canvas.cells)
}

/// Generates a randomly chosen scene and returns it together with the grid.
#[must_use]
pub fn generate_random(size: GridSize, rng: &mut impl Rng) -> (Scene, Grid) {
    let scene = rng.gen();
    (scene, generate(scene, size, rng))
}

/// Rounds down to a whole cell coordinate.
#[allow(clippy::cast_possible_truncation)]
fn floor(x: f64) -> i64 {
    x.floor() as i64
}

/// The euclidean distance between two cell positions.
fn distance(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    ((x0 - x1).powi(2) + (y0 - y1).powi(2)).sqrt()
}

/// A random color from `colors`.
fn pick(rng: &mut impl Rng, colors: &[Srgb<u8>]) -> Cell {
    Cell::from(colors.choose(rng).copied())
}

/// Row-major cells addressed with signed coordinates. Writes outside the grid are dropped.
struct Canvas {
    /// The edge length.
    n: i64,
    /// The `n²` cells.
    cells: Vec<Cell>,
}

impl Canvas {
    /// An empty canvas of the given size.
    fn new(size: GridSize) -> Self {
        Self { n: i64::from(size.get()), cells: vec![Cell::Empty; size.num_cells()] }
    }

    /// `fraction` of the edge length, rounded down.
    #[allow(clippy::cast_precision_loss)]
    fn part(&self, fraction: f64) -> i64 {
        floor(self.n as f64 * fraction)
    }

    /// Paints a single cell if it lies on the canvas.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn set(&mut self, row: i64, col: i64, cell: Cell) {
        if (0..self.n).contains(&row) && (0..self.n).contains(&col) {
            self.cells[(row * self.n + col) as usize] = cell;
        }
    }

    /// Paints every cell of the given rows with colors from `cell`.
    fn fill_rows(&mut self, rows: Range<i64>, mut cell: impl FnMut() -> Cell) {
        for row in rows {
            for col in 0..self.n {
                self.set(row, col, cell());
            }
        }
    }

    /// Paints every cell within `radius` of (`x`, `y`) with colors from `cell`.
    #[allow(clippy::cast_precision_loss)]
    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, mut cell: impl FnMut() -> Cell) {
        for row in 0..self.n {
            for col in 0..self.n {
                if distance(col as f64, row as f64, x, y) <= radius {
                    self.set(row, col, cell());
                }
            }
        }
    }
}

/// Sky over peaks whose slopes fall off by half a cell per column.
#[allow(clippy::cast_precision_loss)]
fn mountain(canvas: &mut Canvas, rng: &mut impl Rng) {
    let n = canvas.n;
    let nf = n as f64;
    canvas.fill_rows(0..canvas.part(0.4), || pick(rng, &SKY));

    let peaks = (0..(n / 16).max(2))
        .map(|_| {
            let x = rng.gen_range(0..n);
            let height = canvas.part(0.3) + floor(rng.gen::<f64>() * nf * 0.2);
            (x, height as f64)
        })
        .collect::<Vec<_>>();

    for col in 0..n {
        let top = peaks.iter().fold(nf, |top, &(x, height)| {
            let height = (height - (col - x).abs() as f64 * 0.5).max(0.0);
            top.min(nf - height)
        });

        for row in floor(top)..n {
            let cell = if (row as f64) < nf * 0.8 {
                let rock = pick(rng, &MOUNTAIN);
                if (row as f64) < top + 2.0 && rng.gen_bool(0.5) {
                    pick(rng, &SNOW)
                } else {
                    rock
                }
            } else {
                pick(rng, &MEADOW)
            };
            canvas.set(row, col, cell);
        }
    }
}

/// Four color bands from top to bottom, a sun with a one-cell glow, and dark ground.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sunset(canvas: &mut Canvas, rng: &mut impl Rng) {
    let n = canvas.n;
    for row in 0..n {
        let band = ((row as f64 / n as f64) * SUNSET_BANDS.len() as f64).floor() as usize;
        let colors = &SUNSET_BANDS[band.min(SUNSET_BANDS.len() - 1)];
        canvas.fill_rows(row..row + 1, || pick(rng, colors));
    }

    let (x, y) = (canvas.part(0.7) as f64, canvas.part(0.3) as f64);
    let radius = (n / 8).max(2) as f64;
    canvas.fill_disc(x, y, radius + 1.0, || Cell::Color(SUN_GLOW));
    canvas.fill_disc(x, y, radius, || Cell::Color(SUN));

    let ground = canvas.part(0.2);
    canvas.fill_rows(n - ground..n, || Cell::Color(SILHOUETTE));
}

/// A round body, a round head with square ears, and two eyes on larger grids.
#[allow(clippy::cast_precision_loss)]
fn cat(canvas: &mut Canvas, rng: &mut impl Rng) {
    let n = canvas.n;
    canvas.fill_rows(0..n, || pick(rng, &CAT_BACKGROUND));
    let fur = pick(rng, &CAT_FUR);

    let width = canvas.part(0.4).max(6);
    let height = canvas.part(0.5).max(8);
    let x0 = (n - width).div_euclid(2);
    let y0 = (n - height).div_euclid(2);

    let body_width = floor(width as f64 * 0.8);
    let body_height = floor(height as f64 * 0.6);
    let body_x = x0 + (width - body_width) / 2;
    let body_y = y0 + floor(height as f64 * 0.3);
    let center_x = body_x as f64 + body_width as f64 / 2.0;
    let center_y = body_y as f64 + body_height as f64 / 2.0;
    let body_radius = body_width.min(body_height) as f64 / 2.0;
    for row in body_y..body_y + body_height {
        for col in body_x..body_x + body_width {
            if distance(col as f64, row as f64, center_x, center_y) <= body_radius {
                canvas.set(row, col, fur);
            }
        }
    }

    let head_radius = floor(width as f64 * 0.3).max(2);
    let head_x = x0 + width / 2;
    let head_y = y0 + head_radius;
    canvas.fill_disc(head_x as f64, head_y as f64, head_radius as f64, || fur);

    let ear = floor(head_radius as f64 * 0.6).max(1);
    let ear_offset = floor(head_radius as f64 * 0.7);
    for i in 0..ear {
        for j in 0..ear {
            let row = head_y - head_radius + i;
            canvas.set(row, head_x - ear_offset + j, fur);
            canvas.set(row, head_x + ear_offset - ear + j, fur);
        }
    }

    if head_radius >= 3 {
        let eye_y = head_y - floor(head_radius as f64 * 0.2);
        canvas.set(eye_y, head_x - 1, Cell::Color(CAT_EYE));
        canvas.set(eye_y, head_x + 1, Cell::Color(CAT_EYE));
    }
}

/// Equal-width buildings of random height with a grid of randomly lit windows.
#[allow(clippy::cast_precision_loss)]
fn cityscape(canvas: &mut Canvas, rng: &mut impl Rng) {
    let n = canvas.n;
    canvas.fill_rows(0..canvas.part(0.3), || pick(rng, &CITY_SKY));

    let buildings = (n / 8).max(3);
    let width = n / buildings;
    for i in 0..buildings {
        let (start, end) = (i * width, (i * width + width).min(n));
        let height = canvas.part(0.4) + floor(rng.gen::<f64>() * n as f64 * 0.4);
        let top = n - height;
        let wall = pick(rng, &BUILDING);
        for row in top..n {
            for col in start..end {
                canvas.set(row, col, wall);
            }
        }

        if width >= 3 && height >= 4 {
            for row in (top + 2..n - 1).step_by(3) {
                for col in (start + 1..end - 1).step_by(2) {
                    if rng.gen_bool(0.7) {
                        canvas.set(row, col, pick(rng, &WINDOW));
                    }
                }
            }
        }
    }
}

/// Sky on top, grass at the bottom, and trees with a trunk and a round crown.
#[allow(clippy::cast_precision_loss)]
fn nature(canvas: &mut Canvas, rng: &mut impl Rng) {
    let n = canvas.n;
    let horizon = canvas.part(0.8);
    canvas.fill_rows(0..canvas.part(0.4), || pick(rng, &NATURE_SKY));
    canvas.fill_rows(horizon..n, || pick(rng, &GRASS));

    for _ in 0..(n / 12).max(2) {
        let x = rng.gen_range(0..n);
        let height = canvas.part(0.3).max(4);
        let trunk_height = floor(height as f64 * 0.4);
        let crown_radius = floor(height as f64 * 0.4).max(2);

        let half_trunk = floor(crown_radius as f64 * 0.3).max(1) / 2;
        let trunk_top = horizon - trunk_height;
        for row in trunk_top..horizon {
            for col in x - half_trunk..=x + half_trunk {
                canvas.set(row, col, pick(rng, &BARK));
            }
        }

        let crown_y = trunk_top - floor(crown_radius as f64 * 0.5);
        canvas.fill_disc(x as f64, crown_y as f64, crown_radius as f64, || pick(rng, &LEAVES));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoroshiro128PlusPlus;

    fn grid_size(n: u16) -> GridSize {
        GridSize::try_from(n).unwrap()
    }

    fn rng(seed: u64) -> Xoroshiro128PlusPlus {
        Xoroshiro128PlusPlus::seed_from_u64(seed)
    }

    /// Every color a scene may paint.
    fn scene_colors(scene: Scene) -> Vec<Srgb<u8>> {
        match scene {
            Scene::Mountain => [&SKY[..], &MOUNTAIN[..], &SNOW[..], &MEADOW[..]].concat(),
            Scene::Sunset => {
                let mut colors = SUNSET_BANDS.concat();
                colors.extend([SUN, SUN_GLOW, SILHOUETTE]);
                colors
            }
            Scene::Cat => [&CAT_BACKGROUND[..], &CAT_FUR[..], &[CAT_EYE][..]].concat(),
            Scene::Cityscape => [&CITY_SKY[..], &BUILDING[..], &WINDOW[..]].concat(),
            Scene::Nature => [&NATURE_SKY[..], &GRASS[..], &BARK[..], &LEAVES[..]].concat(),
        }
    }

    #[test]
    fn hex_literals() {
        assert_eq!(hex(0x87CEEB), Srgb::new(0x87, 0xce, 0xeb));
        assert_eq!(hex(0x000000), Srgb::new(0, 0, 0));
    }

    #[test]
    fn every_preset_gives_a_full_grid() {
        let mut rng = rng(3);
        for scene in Scene::ALL {
            for size in GridSize::PRESETS {
                let grid = generate(scene, size, &mut rng);
                assert_eq!(grid.size(), size, "{scene}");
                assert_eq!(grid.cells().len(), size.num_cells(), "{scene}");
                assert_eq!(grid.rows().len(), size.len(), "{scene}");
                assert!(grid.painted() > 0, "{scene} at {size}");

                let colors = scene_colors(scene);
                for color in grid.cells().iter().filter_map(Cell::color) {
                    assert!(colors.contains(&color), "{scene} at {size}: {color:?}");
                }
            }
        }
    }

    #[test]
    fn tiny_grids_do_not_panic() {
        let mut rng = rng(5);
        for scene in Scene::ALL {
            for n in 1..8 {
                let size = grid_size(n);
                assert_eq!(generate(scene, size, &mut rng).size(), size);
            }
        }
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        for scene in Scene::ALL {
            let size = grid_size(32);
            let a = generate(scene, size, &mut rng(11));
            let b = generate(scene, size, &mut rng(11));
            assert_eq!(a, b, "{scene}");
        }
        assert_eq!(
            generate_random(grid_size(24), &mut rng(9)),
            generate_random(grid_size(24), &mut rng(9))
        );
    }

    #[test]
    fn sunset_and_cat_paint_every_cell() {
        for scene in [Scene::Sunset, Scene::Cat] {
            for size in GridSize::PRESETS {
                let grid = generate(scene, size, &mut rng(1));
                assert_eq!(grid.painted(), size.num_cells(), "{scene} at {size}");
            }
        }
    }

    #[test]
    fn sunset_layers() {
        let grid = generate(Scene::Sunset, grid_size(16), &mut rng(2));
        // ground is the bottom 3 rows
        for row in grid.rows().skip(13) {
            assert!(row.iter().all(|&cell| cell == Cell::Color(SILHOUETTE)));
        }
        // sun center at (11, 4) with radius 2
        assert_eq!(grid.get(4, 11), Some(Cell::Color(SUN)));
        assert_eq!(grid.get(4, 14), Some(Cell::Color(SUN_GLOW)));
        assert!(SUNSET_BANDS[0].contains(&grid.get(0, 0).unwrap().color().unwrap()));
    }

    #[test]
    fn mountain_sky_and_meadow() {
        // peaks are at most 15 cells high, so the sky band is never covered
        let grid = generate(Scene::Mountain, grid_size(32), &mut rng(4));
        for cell in grid.rows().next().unwrap() {
            assert!(SKY.contains(&cell.color().unwrap()));
        }
        // below the tree line only meadow, except where no slope reaches the ground
        for row in grid.rows().skip(26) {
            for color in row.iter().filter_map(Cell::color) {
                assert!(MEADOW.contains(&color));
            }
        }
        assert!(grid.rows().last().unwrap().iter().any(|cell| !cell.is_empty()));
    }

    #[test]
    fn cityscape_buildings_reach_the_ground() {
        // 4 buildings of width 8
        let grid = generate(Scene::Cityscape, grid_size(32), &mut rng(6));
        let bottom = grid.rows().last().unwrap();
        for block in bottom.chunks_exact(8) {
            assert!(BUILDING.contains(&block[0].color().unwrap()));
            assert!(block.iter().all(|&cell| cell == block[0]));
        }
    }

    #[test]
    fn cat_has_one_fur_color_and_eyes() {
        let grid = generate(Scene::Cat, grid_size(32), &mut rng(8));
        let fur = grid
            .distinct_colors()
            .into_iter()
            .filter(|c| CAT_FUR.contains(c) && *c != CAT_EYE)
            .collect::<Vec<_>>();
        assert!(fur.len() <= 1);

        // width 12, head radius 3 centered at (16, 11), eyes on the center row
        assert_eq!(grid.get(11, 15), Some(Cell::Color(CAT_EYE)));
        assert_eq!(grid.get(11, 17), Some(Cell::Color(CAT_EYE)));
    }

    #[test]
    fn random_scene_covers_all_scenes() {
        let mut rng = rng(10);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let scene: Scene = rng.gen();
            if !seen.contains(&scene) {
                seen.push(scene);
            }
        }
        assert_eq!(seen.len(), Scene::ALL.len());
    }
}
