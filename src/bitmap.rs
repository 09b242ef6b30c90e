//! Contains the decoded source [`Bitmap`] and the [`BitmapSource`] seam.

use crate::{Error, Result};
use palette::{cast::ComponentsAs, Srgba};
#[cfg(feature = "image")]
use {
    image::{DynamicImage, RgbaImage},
    std::path::{Path, PathBuf},
};

/// A decoded, immutable, row-major RGBA source image.
///
/// # Examples
/// From raw bytes:
/// ```
/// # use pixelette::{Bitmap, Error};
/// # fn main() -> Result<(), Error> {
/// let bytes = [255, 0, 0, 255, 0, 0, 255, 255];
/// let bitmap = Bitmap::from_rgba_bytes(2, 1, &bytes)?;
/// assert_eq!(bitmap.pixel(1, 0).map(|p| p.blue), Some(255));
/// # Ok(())
/// # }
/// ```
///
/// From an image file (needs the `image` feature to be enabled):
/// ```no_run
/// # use pixelette::Bitmap;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bitmap = Bitmap::open("some image")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// The width of the image in pixels.
    width: u32,
    /// The height of the image in pixels.
    height: u32,
    /// The `width * height` pixels of the image.
    pixels: Vec<Srgba<u8>>,
}

impl Bitmap {
    /// Creates a new [`Bitmap`] from its dimensions and pixels.
    ///
    /// # Errors
    /// Returns [`Error::ZeroDimension`] if `width` or `height` is zero,
    /// and [`Error::DimensionMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Srgba<u8>>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroDimension);
        }

        if pixels.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(Error::DimensionMismatch { len: pixels.len(), width, height });
        }

        Ok(Self { width, height, pixels })
    }

    /// Creates a new [`Bitmap`] from a tightly packed `RGBA` byte buffer.
    ///
    /// # Errors
    /// Returns [`Error::ZeroDimension`] if `width` or `height` is zero,
    /// and [`Error::DimensionMismatch`] if `bytes.len() != width * height * 4`.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(Error::DimensionMismatch { len: bytes.len(), width, height });
        }

        let pixels: &[Srgba<u8>] = bytes.components_as();
        Self::new(width, height, pixels.to_vec())
    }

    /// The width of the bitmap in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// The height of the bitmap in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The pixels of the bitmap in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Srgba<u8>] {
        &self.pixels
    }

    /// Returns the pixel at column `x` and row `y`, if it is inside the bitmap.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Srgba<u8>> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// The aspect ratio `width / height`.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

#[cfg(feature = "image")]
impl Bitmap {
    /// Decodes the image file at `path` into a [`Bitmap`].
    ///
    /// # Errors
    /// Returns [`Error::Decode`] if the file cannot be read or decoded,
    /// and [`Error::ZeroDimension`] for an empty image.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path)?;
        Self::try_from(&image.into_rgba8())
    }

    /// Decodes an in-memory encoded image (e.g., the body of a fetched PNG) into a [`Bitmap`].
    ///
    /// # Errors
    /// Returns [`Error::Decode`] if the bytes cannot be decoded,
    /// and [`Error::ZeroDimension`] for an empty image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Self::try_from(&image.into_rgba8())
    }
}

#[cfg(feature = "image")]
impl TryFrom<&RgbaImage> for Bitmap {
    type Error = Error;

    fn try_from(image: &RgbaImage) -> Result<Self, Self::Error> {
        Self::from_rgba_bytes(image.width(), image.height(), image.as_raw())
    }
}

#[cfg(feature = "image")]
impl TryFrom<&DynamicImage> for Bitmap {
    type Error = Error;

    fn try_from(image: &DynamicImage) -> Result<Self, Self::Error> {
        Self::try_from(&image.to_rgba8())
    }
}

/// Anything that can supply a decoded [`Bitmap`] for a conversion request.
///
/// Acquiring the bitmap is the only fallible, potentially slow step of a conversion.
/// A remote image fetcher would implement this trait; retries belong to the implementor.
pub trait BitmapSource {
    /// Loads and decodes the bitmap.
    ///
    /// # Errors
    /// Returns an error if the bitmap is unavailable or corrupt.
    fn load_bitmap(&self) -> Result<Bitmap>;
}

impl BitmapSource for Bitmap {
    fn load_bitmap(&self) -> Result<Bitmap> {
        Ok(self.clone())
    }
}

impl<T: BitmapSource + ?Sized> BitmapSource for &T {
    fn load_bitmap(&self) -> Result<Bitmap> {
        (**self).load_bitmap()
    }
}

#[cfg(feature = "image")]
impl BitmapSource for Path {
    fn load_bitmap(&self) -> Result<Bitmap> {
        Bitmap::open(self)
    }
}

#[cfg(feature = "image")]
impl BitmapSource for PathBuf {
    fn load_bitmap(&self) -> Result<Bitmap> {
        Bitmap::open(self)
    }
}

#[cfg(feature = "image")]
impl BitmapSource for RgbaImage {
    fn load_bitmap(&self) -> Result<Bitmap> {
        Bitmap::try_from(self)
    }
}

#[cfg(feature = "image")]
impl BitmapSource for DynamicImage {
    fn load_bitmap(&self) -> Result<Bitmap> {
        Bitmap::try_from(self)
    }
}
