//! Contains the [`PixelArtPipeline`] builder struct for the high level API.

use crate::{
    map_to_grid, palette_from_counts, resample, Bitmap, BucketCounts, Conversion, ConversionOptions,
    GridSize, Palette, PaletteSize,
};
#[cfg(feature = "threads")]
use crate::map_to_grid_par;
use palette::Srgba;

/// A builder struct to convert a [`Bitmap`] into a pixel-art [`Grid`](crate::Grid).
///
/// The conversion runs in three stages:
/// the bitmap is [`resample`]d onto the grid, a palette is [`quantize`](crate::quantize())d
/// from the resampled pixels, and each pixel is then mapped to its nearest palette color.
/// Each stage only depends on the bitmap and the options,
/// so the same pipeline always produces the same result.
///
/// # Examples
/// To start, create a [`PixelArtPipeline`] from a [`Bitmap`]:
/// ```
/// # use pixelette::{Bitmap, ConversionOptions, PixelArtPipeline};
/// # fn main() -> Result<(), pixelette::Error> {
/// let bitmap = Bitmap::from_rgba_bytes(2, 1, &[255, 0, 0, 255, 0, 0, 255, 255])?;
/// let mut pipeline = PixelArtPipeline::new(&bitmap, ConversionOptions::default());
/// # Ok(())
/// # }
/// ```
///
/// Then, you can change the options like the grid size or the number of colors in the palette:
/// ```
/// # use pixelette::{Bitmap, ConversionOptions, GridSize, PaletteSize, PixelArtPipeline};
/// # fn main() -> Result<(), pixelette::Error> {
/// # let bitmap = Bitmap::from_rgba_bytes(2, 1, &[255, 0, 0, 255, 0, 0, 255, 255])?;
/// # let mut pipeline = PixelArtPipeline::new(&bitmap, ConversionOptions::default());
/// let pipeline = pipeline
///     .grid_size(GridSize::try_from(8u16)?)
///     .color_count(PaletteSize::try_from(4u16)?)
///     .crop_to_fit(false);
/// # Ok(())
/// # }
/// ```
///
/// Finally, run the pipeline:
/// ```
/// # use pixelette::{Bitmap, ConversionOptions, PixelArtPipeline};
/// # fn main() -> Result<(), pixelette::Error> {
/// # let bitmap = Bitmap::from_rgba_bytes(2, 1, &[255, 0, 0, 255, 0, 0, 255, 255])?;
/// # let pipeline = PixelArtPipeline::new(&bitmap, ConversionOptions::default());
/// let conversion = pipeline.convert();
/// assert_eq!(conversion.grid.size().get(), 16);
/// # Ok(())
/// # }
/// ```
///
/// Or, with the pixels mapped in parallel (needs the `threads` feature):
/// ```no_run
/// # use pixelette::{Bitmap, ConversionOptions, PixelArtPipeline};
/// # fn main() -> Result<(), pixelette::Error> {
/// # let bitmap = Bitmap::from_rgba_bytes(2, 1, &[255, 0, 0, 255, 0, 0, 255, 255])?;
/// # let pipeline = PixelArtPipeline::new(&bitmap, ConversionOptions::default());
/// let conversion = pipeline.convert_par();
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct PixelArtPipeline<'a> {
    /// The source image.
    bitmap: &'a Bitmap,
    /// The conversion options.
    options: ConversionOptions,
}

impl<'a> PixelArtPipeline<'a> {
    /// Creates a new [`PixelArtPipeline`] for `bitmap` with the given options.
    pub fn new(bitmap: &'a Bitmap, options: ConversionOptions) -> Self {
        Self { bitmap, options }
    }

    /// The current options of the pipeline.
    #[must_use]
    pub const fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Sets the edge length of the output grid.
    pub fn grid_size(&mut self, grid_size: GridSize) -> &mut Self {
        self.options.grid_size = grid_size;
        self
    }

    /// Sets the maximum number of colors in the palette.
    ///
    /// The default palette size is [`PaletteSize::DEFAULT`].
    pub fn color_count(&mut self, color_count: impl Into<PaletteSize>) -> &mut Self {
        self.options.color_count = color_count.into();
        self
    }

    /// Sets whether to keep the aspect ratio of the source.
    ///
    /// The default is `true`.
    pub fn maintain_aspect_ratio(&mut self, maintain_aspect_ratio: bool) -> &mut Self {
        self.options.maintain_aspect_ratio = maintain_aspect_ratio;
        self
    }

    /// Sets whether to crop the source to a square (`true`) or to letterbox it (`false`).
    ///
    /// The default is `true`.
    pub fn crop_to_fit(&mut self, crop_to_fit: bool) -> &mut Self {
        self.options.crop_to_fit = crop_to_fit;
        self
    }
}

impl<'a> PixelArtPipeline<'a> {
    /// Runs only the resampling stage and returns the `N²` resampled pixels.
    #[must_use]
    pub fn resampled(&self) -> Vec<Srgba<u8>> {
        resample(self.bitmap, self.options.grid_size, self.options.aspect_policy())
    }

    /// Computes the palette of the resampled image.
    #[must_use]
    pub fn palette(&self) -> Palette {
        self.palette_of(&self.resampled())
    }

    /// Quantizes the given resampled pixels.
    fn palette_of(&self, pixels: &[Srgba<u8>]) -> Palette {
        let counts = BucketCounts::new(pixels);
        let palette = palette_from_counts(&counts, self.options.color_count);
        log::debug!(
            "{} opaque pixels in {} buckets reduced to {} of at most {} colors",
            counts.total_count(),
            counts.num_colors(),
            palette.len(),
            self.options.color_count,
        );
        palette
    }

    /// Logs the start of a conversion.
    fn log_start(&self) {
        log::debug!(
            "converting {}x{} bitmap to a {2}x{2} grid ({3:?})",
            self.bitmap.width(),
            self.bitmap.height(),
            self.options.grid_size,
            self.options.aspect_policy(),
        );
    }

    /// Runs the pipeline and returns the palette and the output grid.
    #[must_use]
    pub fn convert(&self) -> Conversion {
        self.log_start();
        let pixels = self.resampled();
        let palette = self.palette_of(&pixels);
        let grid = map_to_grid(&pixels, &palette, self.options.grid_size);
        Conversion { palette, grid }
    }
}

#[cfg(feature = "threads")]
impl<'a> PixelArtPipeline<'a> {
    /// Runs the pipeline, mapping the pixels in parallel.
    ///
    /// The result is identical to [`PixelArtPipeline::convert`].
    #[must_use]
    pub fn convert_par(&self) -> Conversion {
        self.log_start();
        let pixels = self.resampled();
        let palette = self.palette_of(&pixels);
        let grid = map_to_grid_par(&pixels, &palette, self.options.grid_size);
        Conversion { palette, grid }
    }
}
