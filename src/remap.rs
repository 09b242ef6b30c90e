//! Contains the nearest-color mapping from resampled pixels onto a [`Palette`].

use crate::{is_opaque, Cell, Grid, GridSize, Palette, PaletteEntry};
use palette::{Srgb, Srgba};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// The squared Euclidean distance between two colors in RGB space.
///
/// The square root is never needed for comparisons, and the result fits comfortably in a `u32`
/// (at most `3 * 255²`).
#[inline]
#[must_use]
pub fn squared_distance(a: Srgb<u8>, b: Srgb<u8>) -> u32 {
    let dr = u32::from(a.red.abs_diff(b.red));
    let dg = u32::from(a.green.abs_diff(b.green));
    let db = u32::from(a.blue.abs_diff(b.blue));
    dr * dr + dg * dg + db * db
}

/// Returns the index of the palette entry closest to `color`,
/// or `None` if `palette` is empty.
///
/// Ties are resolved in favor of the earliest entry.
#[must_use]
pub fn nearest_index(color: Srgb<u8>, palette: &[PaletteEntry]) -> Option<usize> {
    let mut best = None;
    let mut best_distance = u32::MAX;
    for (i, entry) in palette.iter().enumerate() {
        let distance = squared_distance(color, entry.color);
        if best.is_none() || distance < best_distance {
            best = Some(i);
            best_distance = distance;
        }
    }
    best
}

impl Palette {
    /// Returns the palette color closest to `color`, or `None` for an empty palette.
    ///
    /// # Examples
    /// ```
    /// # use pixelette::{Palette, PaletteEntry};
    /// # use palette::Srgb;
    /// let palette = Palette::new(vec![
    ///     PaletteEntry::new(Srgb::new(0, 0, 0), 1),
    ///     PaletteEntry::new(Srgb::new(255, 255, 255), 1),
    /// ]);
    /// assert_eq!(palette.nearest(Srgb::new(200, 180, 190)), Some(Srgb::new(255, 255, 255)));
    /// ```
    #[must_use]
    pub fn nearest(&self, color: Srgb<u8>) -> Option<Srgb<u8>> {
        nearest_index(color, self).map(|i| self[i].color)
    }
}

/// Maps a single resampled pixel to a grid cell.
///
/// Transparent pixels, and every pixel when the palette is empty, become [`Cell::Empty`].
#[inline]
#[must_use]
pub fn map_pixel(pixel: Srgba<u8>, palette: &Palette) -> Cell {
    if is_opaque(pixel.alpha) {
        palette.nearest(pixel.color).into()
    } else {
        Cell::Empty
    }
}

/// Maps each pixel of a resampled `size×size` buffer onto its nearest palette color.
///
/// Every opaque pixel is replaced by the palette color closest to it (its original color,
/// not its bucketed one, is compared), so every painted cell holds a palette color.
/// Mapping is deterministic and idempotent: mapping the colors of the result again
/// yields the same grid.
///
/// # Panics
/// Panics if `pixels.len() != size²`.
///
/// # Examples
/// ```
/// # use pixelette::{map_to_grid, Cell, GridSize, Palette, PaletteEntry, Error};
/// # use palette::{Srgb, Srgba};
/// # fn main() -> Result<(), Error> {
/// let palette = Palette::new(vec![PaletteEntry::new(Srgb::new(200, 0, 0), 1)]);
/// let pixels = [Srgba::new(250, 10, 10, 255), Srgba::new(0, 0, 0, 0)];
/// let size = GridSize::try_from(1u16)?;
/// let grid = map_to_grid(&pixels[..1], &palette, size);
/// assert_eq!(grid.get(0, 0), Some(Cell::rgb(200, 0, 0)));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn map_to_grid(pixels: &[Srgba<u8>], palette: &Palette, size: GridSize) -> Grid {
    assert_eq!(pixels.len(), size.num_cells(), "pixel buffer must be size²");
    let cells = pixels.iter().map(|&pixel| map_pixel(pixel, palette)).collect();
    Grid::from_cells_unchecked(size, cells)
}

/// Like [`map_to_grid`], but maps the pixels in parallel.
///
/// # Panics
/// Panics if `pixels.len() != size²`.
#[cfg(feature = "threads")]
#[must_use]
pub fn map_to_grid_par(pixels: &[Srgba<u8>], palette: &Palette, size: GridSize) -> Grid {
    assert_eq!(pixels.len(), size.num_cells(), "pixel buffer must be size²");
    let cells = pixels
        .par_iter()
        .with_min_len(size.len())
        .map(|&pixel| map_pixel(pixel, palette))
        .collect();
    Grid::from_cells_unchecked(size, cells)
}
