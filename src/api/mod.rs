//! Contains the types and functions for the high level conversion API.

mod pipeline;

pub use pipeline::PixelArtPipeline;

use crate::{AspectPolicy, Bitmap, BitmapSource, Grid, GridSize, Palette, PaletteSize, Result};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// The options for converting an image into a pixel-art grid.
///
/// Every field has a valid value by construction:
/// the grid size and color count are non-zero new types.
///
/// # Examples
/// ```
/// # use pixelette::{AspectPolicy, ConversionOptions, GridSize, PaletteSize, Error};
/// # fn main() -> Result<(), Error> {
/// let options = ConversionOptions::new(GridSize::try_from(32u16)?)
///     .color_count(PaletteSize::try_from(8u16)?)
///     .crop_to_fit(false);
/// assert_eq!(options.aspect_policy(), AspectPolicy::Letterbox);
///
/// assert!(ConversionOptions::try_new(32, 0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// The edge length of the output grid.
    pub grid_size: GridSize,
    /// The maximum number of colors in the palette.
    pub color_count: PaletteSize,
    /// Whether to keep the aspect ratio of the source (otherwise it is stretched).
    pub maintain_aspect_ratio: bool,
    /// Whether to crop the source to a square (otherwise it is letterboxed).
    /// Only has an effect if `maintain_aspect_ratio` is `true`.
    pub crop_to_fit: bool,
}

impl ConversionOptions {
    /// Creates [`ConversionOptions`] for the given grid size with default values:
    /// up to 16 colors, keeping the aspect ratio by cropping to fit.
    #[must_use]
    pub const fn new(grid_size: GridSize) -> Self {
        Self {
            grid_size,
            color_count: PaletteSize::DEFAULT,
            maintain_aspect_ratio: true,
            crop_to_fit: true,
        }
    }

    /// Creates [`ConversionOptions`] from raw integers, with the remaining options at their defaults.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGridSize`](crate::Error::InvalidGridSize) or
    /// [`Error::InvalidColorCount`](crate::Error::InvalidColorCount) if the respective value
    /// is zero or too large.
    pub fn try_new(grid_size: u32, color_count: u32) -> Result<Self> {
        Ok(Self::new(grid_size.try_into()?).color_count(color_count.try_into()?))
    }

    /// Sets the grid size.
    #[must_use]
    pub const fn grid_size(mut self, grid_size: GridSize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Sets the maximum number of colors in the palette.
    ///
    /// The default is [`PaletteSize::DEFAULT`] (16 colors).
    #[must_use]
    pub const fn color_count(mut self, color_count: PaletteSize) -> Self {
        self.color_count = color_count;
        self
    }

    /// Sets whether to keep the aspect ratio of the source.
    ///
    /// The default is `true`.
    #[must_use]
    pub const fn maintain_aspect_ratio(mut self, maintain_aspect_ratio: bool) -> Self {
        self.maintain_aspect_ratio = maintain_aspect_ratio;
        self
    }

    /// Sets whether to crop the source to a square or to letterbox it.
    ///
    /// The default is `true`.
    #[must_use]
    pub const fn crop_to_fit(mut self, crop_to_fit: bool) -> Self {
        self.crop_to_fit = crop_to_fit;
        self
    }

    /// The resampling policy chosen by `maintain_aspect_ratio` and `crop_to_fit`.
    #[must_use]
    pub const fn aspect_policy(&self) -> AspectPolicy {
        AspectPolicy::from_flags(self.maintain_aspect_ratio, self.crop_to_fit)
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self::new(GridSize::DEFAULT)
    }
}

impl From<GridSize> for ConversionOptions {
    fn from(grid_size: GridSize) -> Self {
        Self::new(grid_size)
    }
}

/// The result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The palette in selection order.
    ///
    /// Empty if and only if the resampled image had no opaque pixels.
    pub palette: Palette,
    /// The complete output grid. Every painted cell holds a palette color.
    pub grid: Grid,
}

/// Converts `bitmap` into a pixel-art grid.
///
/// A shorthand for [`PixelArtPipeline::convert`].
#[must_use]
pub fn convert(bitmap: &Bitmap, options: &ConversionOptions) -> Conversion {
    PixelArtPipeline::new(bitmap, *options).convert()
}

/// Loads a bitmap from `source` and converts it into a pixel-art grid.
///
/// # Errors
/// Returns the error of [`BitmapSource::load_bitmap`] if the source is unavailable or corrupt.
/// No partial grid is produced in that case.
pub fn convert_from(source: &impl BitmapSource, options: &ConversionOptions) -> Result<Conversion> {
    let bitmap = source.load_bitmap()?;
    Ok(convert(&bitmap, options))
}

/// Runs several independent conversions of the same bitmap in parallel,
/// e.g., to preview multiple grid sizes.
///
/// The results are in the same order as `options`.
#[cfg(feature = "threads")]
#[must_use]
pub fn convert_batch_par(bitmap: &Bitmap, options: &[ConversionOptions]) -> Vec<Conversion> {
    options.par_iter().map(|options| convert(bitmap, options)).collect()
}
