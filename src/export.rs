//! Rasterizing a [`Grid`] into a full-resolution image for export.
//!
//! Each cell becomes a `scale×scale` block of pixels on top of an optional background.
//! Optional 1-pixel grid lines are drawn on top of every cell boundary.
//! The last boundary at the far edge lies outside the image,
//! so it is drawn on the last pixel row and column instead.

use crate::{Cell, CellScale, Grid, GridSize};
use palette::{Srgb, Srgba};
#[cfg(feature = "threads")]
use rayon::prelude::*;
#[cfg(feature = "image")]
use {
    crate::{Error, Result},
    image::RgbaImage,
    palette::cast::IntoComponents,
    std::path::Path,
};

/// The color of the optional grid lines (`#E5E7EB`).
pub const GRID_LINE_COLOR: Srgb<u8> = Srgb::new(0xe5, 0xe7, 0xeb);

/// The default export background (white).
pub const DEFAULT_BACKGROUND: Srgb<u8> = Srgb::new(u8::MAX, u8::MAX, u8::MAX);

/// A fully transparent pixel.
const TRANSPARENT: Srgba<u8> = Srgba::new(0, 0, 0, 0);

/// Options for [`rasterize`].
///
/// # Examples
/// ```
/// # use pixelette::{export::{self, ExportOptions}, Grid, GridSize, Error};
/// # fn main() -> Result<(), Error> {
/// let size = GridSize::try_from(8u16)?;
/// let options = ExportOptions::for_grid(size).background(None).grid_lines(true);
/// let (width, height, pixels) = export::rasterize(&Grid::empty(size), &options);
/// assert_eq!((width, height), (640, 640));
/// assert_eq!(pixels.len(), 640 * 640);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// The edge length in pixels of one cell.
    pub scale: CellScale,
    /// The color behind empty cells, or `None` for a transparent background.
    pub background: Option<Srgb<u8>>,
    /// Whether to draw grid lines on the cell boundaries.
    pub grid_lines: bool,
}

impl ExportOptions {
    /// The default options: a scale of `20`, a white background, and no grid lines.
    pub const DEFAULT: Self = Self {
        scale: CellScale::DEFAULT,
        background: Some(DEFAULT_BACKGROUND),
        grid_lines: false,
    };

    /// The default options with the suggested scale for a grid of the given size.
    #[must_use]
    pub fn for_grid(size: GridSize) -> Self {
        Self { scale: CellScale::suggested_for(size), ..Self::DEFAULT }
    }

    /// Sets the scale of each cell.
    #[must_use]
    pub const fn scale(mut self, scale: CellScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the background color, or `None` for a transparent background.
    #[must_use]
    pub const fn background(mut self, background: Option<Srgb<u8>>) -> Self {
        self.background = background;
        self
    }

    /// Sets whether to draw grid lines.
    #[must_use]
    pub const fn grid_lines(mut self, grid_lines: bool) -> Self {
        self.grid_lines = grid_lines;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The edge length in pixels of the exported image.
fn side_length(size: GridSize, scale: CellScale) -> u32 {
    u32::from(size.get()) * scale.get()
}

/// Fills row `y` of the raster.
fn fill_row(grid: &Grid, options: &ExportOptions, y: u32, row: &mut [Srgba<u8>]) {
    let scale = options.scale.get();
    let side = side_length(grid.size(), options.scale);
    let background = options
        .background
        .map_or(TRANSPARENT, |c| Srgba::new(c.red, c.green, c.blue, u8::MAX));
    let Srgb { red, green, blue, .. } = GRID_LINE_COLOR;
    let line = Srgba::new(red, green, blue, u8::MAX);
    let is_line = |v: u32| options.grid_lines && (v % scale == 0 || v == side - 1);

    if is_line(y) {
        row.fill(line);
        return;
    }

    let cells = &grid.cells()[(y / scale) as usize * grid.size().len()..][..grid.size().len()];
    for (block, &cell) in row.chunks_exact_mut(scale as usize).zip(cells) {
        block.fill(match cell {
            Cell::Empty => background,
            Cell::Color(c) => Srgba::new(c.red, c.green, c.blue, u8::MAX),
        });
    }

    if options.grid_lines {
        for x in (0..side).step_by(scale as usize) {
            row[x as usize] = line;
        }
        row[(side - 1) as usize] = line;
    }
}

/// Rasterizes `grid` into a square image with an edge length of `N * scale` pixels.
///
/// Returns the width, the height, and the pixels of the image in row-major order.
///
/// # Panics
/// Panics if `N * scale` overflows a `u32`.
#[must_use]
pub fn rasterize(grid: &Grid, options: &ExportOptions) -> (u32, u32, Vec<Srgba<u8>>) {
    let side = side_length(grid.size(), options.scale);
    let mut pixels = vec![TRANSPARENT; side as usize * side as usize];

    for (y, row) in (0..side).zip(pixels.chunks_exact_mut(side as usize)) {
        fill_row(grid, options, y, row);
    }

    (side, side, pixels)
}

/// Like [`rasterize`], but fills the rows in parallel.
///
/// # Panics
/// Panics if `N * scale` overflows a `u32`.
#[cfg(feature = "threads")]
#[must_use]
pub fn rasterize_par(grid: &Grid, options: &ExportOptions) -> (u32, u32, Vec<Srgba<u8>>) {
    let side = side_length(grid.size(), options.scale);
    let mut pixels = vec![TRANSPARENT; side as usize * side as usize];

    pixels
        .par_chunks_exact_mut(side as usize)
        .enumerate()
        .for_each(|(y, row)| {
            #[allow(clippy::cast_possible_truncation)]
            fill_row(grid, options, y as u32, row);
        });

    (side, side, pixels)
}

/// Rasterizes `grid` into an [`RgbaImage`].
#[cfg(feature = "image")]
#[must_use]
pub fn rasterize_rgbaimage(grid: &Grid, options: &ExportOptions) -> RgbaImage {
    let (width, height, pixels) = rasterize(grid, options);
    let buf: Vec<u8> = pixels.into_components();

    #[allow(clippy::expect_used)]
    {
        // the raster always holds exactly width * height pixels
        RgbaImage::from_vec(width, height, buf).expect("large enough buffer")
    }
}

/// Rasterizes `grid` and writes it to `path` (as a PNG for a `.png` extension).
///
/// # Errors
/// Returns [`Error::Encode`] if the image cannot be encoded or written.
#[cfg(feature = "image")]
pub fn save_png(grid: &Grid, options: &ExportOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    rasterize_rgbaimage(grid, options)
        .save(path)
        .map_err(Error::Encode)?;
    log::debug!("exported {0}x{0} grid to {1}", grid.size(), path.display());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn grid_size(n: u16) -> GridSize {
        GridSize::try_from(n).unwrap()
    }

    fn scale(s: u32) -> CellScale {
        CellScale::try_from(s).unwrap()
    }

    fn checker() -> Grid {
        let mut grid = Grid::empty(grid_size(2));
        grid.paint(0, 0, Cell::rgb(255, 0, 0)).unwrap();
        grid.paint(1, 1, Cell::rgb(0, 0, 255)).unwrap();
        grid
    }

    fn at(pixels: &[Srgba<u8>], side: u32, x: u32, y: u32) -> Srgba<u8> {
        pixels[(y * side + x) as usize]
    }

    #[test]
    fn defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.scale.get(), 20);
        assert_eq!(options.background, Some(rgb(255, 255, 255)));
        assert!(!options.grid_lines);
        assert_eq!(ExportOptions::for_grid(grid_size(16)).scale.get(), 40);
    }

    #[test]
    fn cells_become_blocks() {
        let options = ExportOptions::default().scale(scale(4));
        let (width, height, pixels) = rasterize(&checker(), &options);
        assert_eq!((width, height), (8, 8));
        assert_eq!(pixels.len(), 64);

        let white = opaque(255, 255, 255);
        for y in 0..8 {
            for x in 0..8 {
                let expected = match (y / 4, x / 4) {
                    (0, 0) => opaque(255, 0, 0),
                    (1, 1) => opaque(0, 0, 255),
                    _ => white,
                };
                assert_eq!(at(&pixels, 8, x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn transparent_background() {
        let options = ExportOptions::default().scale(scale(3)).background(None);
        let (_, _, pixels) = rasterize(&checker(), &options);
        assert_eq!(at(&pixels, 6, 4, 1), Srgba::new(0, 0, 0, 0));
        assert_eq!(at(&pixels, 6, 1, 1), opaque(255, 0, 0));
    }

    #[test]
    fn grid_lines_on_every_boundary() {
        let options = ExportOptions::default().scale(scale(4)).grid_lines(true);
        let (_, _, pixels) = rasterize(&checker(), &options);
        let line = opaque(0xe5, 0xe7, 0xeb);

        for i in 0..8 {
            for boundary in [0, 4, 7] {
                assert_eq!(at(&pixels, 8, boundary, i), line);
                assert_eq!(at(&pixels, 8, i, boundary), line);
            }
        }
        assert_eq!(at(&pixels, 8, 1, 1), opaque(255, 0, 0));
        assert_eq!(at(&pixels, 8, 5, 5), opaque(0, 0, 255));
        assert_eq!(at(&pixels, 8, 5, 1), opaque(255, 255, 255));
    }

    #[test]
    fn scale_of_one() {
        let options = ExportOptions::default().scale(scale(1)).background(None);
        let (width, _, pixels) = rasterize(&checker(), &options);
        assert_eq!(width, 2);
        assert_eq!(
            pixels,
            [opaque(255, 0, 0), Srgba::new(0, 0, 0, 0), Srgba::new(0, 0, 0, 0), opaque(0, 0, 255)]
        );
    }

    #[test]
    #[cfg(feature = "image")]
    fn rgbaimage_matches_raster() {
        let options = ExportOptions::for_grid(grid_size(2)).grid_lines(true);
        let image = rasterize_rgbaimage(&checker(), &options);
        assert_eq!(image.dimensions(), (640, 640));
        assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 10).0, [0xe5, 0xe7, 0xeb, 255]);
    }

    #[test]
    #[cfg(feature = "threads")]
    fn single_and_parallel_match() {
        let mut grid = Grid::empty(grid_size(16));
        for (i, color) in test_data(64).into_iter().enumerate() {
            grid.paint(i % 16, (i * 7) % 16, Cell::from(color.color)).unwrap();
        }

        for options in [
            ExportOptions::default(),
            ExportOptions::default().scale(scale(3)).grid_lines(true),
            ExportOptions::default().background(None).grid_lines(true),
        ] {
            assert_eq!(rasterize(&grid, &options), rasterize_par(&grid, &options));
        }
    }
}
