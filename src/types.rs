//! Contains various types needed across the crate.

use crate::Error;
use palette::Srgb;
use std::{
    fmt::Display,
    num::{NonZeroU16, NonZeroU32},
    ops::Deref,
};

/// The edge length `N` of a square `N×N` pixel-art grid.
///
/// This is a simple new type wrapper around `u16` with the invariant that it is never zero.
/// Practical bounds (the editor offers [`GridSize::PRESETS`]) are left to the caller.
///
/// # Examples
/// ```
/// # use pixelette::{GridSize, Error};
/// # fn main() -> Result<(), Error> {
/// let size = GridSize::try_from(32u16)?;
/// assert_eq!(size.num_cells(), 1024);
/// assert!(GridSize::try_from(0u16).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct GridSize(NonZeroU16);

impl GridSize {
    /// The default canvas size of the editor (`16×16`).
    pub const DEFAULT: Self = Self::new_unchecked(16);

    /// The grid sizes offered by the editor, from "tiny" to "ultra".
    pub const PRESETS: [Self; 8] = [
        Self::new_unchecked(8),
        Self::new_unchecked(16),
        Self::new_unchecked(24),
        Self::new_unchecked(32),
        Self::new_unchecked(48),
        Self::new_unchecked(64),
        Self::new_unchecked(96),
        Self::new_unchecked(128),
    ];

    /// Creates a [`GridSize`] from a non-zero constant.
    const fn new_unchecked(value: u16) -> Self {
        match NonZeroU16::new(value) {
            Some(value) => Self(value),
            None => panic!("grid size must be non-zero"),
        }
    }

    /// Gets the inner `u16` value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// The grid edge length as a `usize` for indexing.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.get() as usize
    }

    /// The total number of cells in the grid (`N²`).
    #[must_use]
    pub const fn num_cells(self) -> usize {
        self.len() * self.len()
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<NonZeroU16> for GridSize {
    fn from(value: NonZeroU16) -> Self {
        Self(value)
    }
}

impl TryFrom<u16> for GridSize {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        NonZeroU16::new(value)
            .map(Self)
            .ok_or(Error::InvalidGridSize(value.into()))
    }
}

impl TryFrom<u32> for GridSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(Error::InvalidGridSize(value))
    }
}

impl TryFrom<usize> for GridSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| Error::InvalidGridSize(u32::MAX))
            .and_then(Self::try_from)
    }
}

impl From<GridSize> for u16 {
    fn from(val: GridSize) -> Self {
        val.get()
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// This type is used to specify the maximum number of colors to include in a palette.
///
/// This is a simple new type wrapper around `u16` with the invariant that it is never zero.
/// A palette size of zero is a degenerate option and is rejected instead of clamped.
///
/// # Examples
/// ```
/// # use pixelette::{PaletteSize, Error};
/// # fn main() -> Result<(), Error> {
/// let size = PaletteSize::try_from(8u16)?;
/// assert_eq!(size.get(), 8);
/// assert_eq!(PaletteSize::default().get(), 16);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(NonZeroU16);

impl PaletteSize {
    /// The default palette size of `16` colors.
    pub const DEFAULT: Self = match NonZeroU16::new(16) {
        Some(value) => Self(value),
        None => panic!("default palette size must be non-zero"),
    };

    /// Gets the inner `u16` value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// The palette size as a `usize` for comparisons against lengths.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.get() as usize
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<NonZeroU16> for PaletteSize {
    fn from(value: NonZeroU16) -> Self {
        Self(value)
    }
}

impl TryFrom<u8> for PaletteSize {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(u16::from(value))
    }
}

impl TryFrom<u16> for PaletteSize {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        NonZeroU16::new(value)
            .map(Self)
            .ok_or(Error::InvalidColorCount(value.into()))
    }
}

impl TryFrom<u32> for PaletteSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(Error::InvalidColorCount(value))
    }
}

impl From<PaletteSize> for u16 {
    fn from(val: PaletteSize) -> Self {
        val.get()
    }
}

impl Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// A palette color together with the number of (bucketed) pixels it was seen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// The bucketed color.
    pub color: Srgb<u8>,
    /// The number of opaque pixels that fell into this color's bucket.
    pub count: u32,
}

impl PaletteEntry {
    /// Creates a new [`PaletteEntry`].
    #[must_use]
    pub const fn new(color: Srgb<u8>, count: u32) -> Self {
        Self { color, count }
    }

    /// The perceived luminance `0.299r + 0.587g + 0.114b` of the color.
    #[must_use]
    pub fn luminance(&self) -> f64 {
        let Srgb { red, green, blue, .. } = self.color;
        0.299 * f64::from(red) + 0.587 * f64::from(green) + 0.114 * f64::from(blue)
    }
}

/// The ordered output of [`quantize`](crate::quantize()).
///
/// Entries are kept in selection order (the most representative color first),
/// not re-sorted by count.
/// A palette is empty only if the quantized pixels had no opaque pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette(Vec<PaletteEntry>);

impl Palette {
    /// Creates a palette from entries that are already in selection order.
    #[must_use]
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self(entries)
    }

    /// Iterates over the palette colors in selection order.
    pub fn colors(&self) -> impl ExactSizeIterator<Item = Srgb<u8>> + '_ {
        self.0.iter().map(|entry| entry.color)
    }
}

impl Deref for Palette {
    type Target = [PaletteEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[PaletteEntry]> for Palette {
    fn as_ref(&self) -> &[PaletteEntry] {
        self
    }
}

impl From<Vec<PaletteEntry>> for Palette {
    fn from(entries: Vec<PaletteEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<PaletteEntry> for Palette {
    fn from_iter<T: IntoIterator<Item = PaletteEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The scale (edge length in output pixels) of one exported grid cell.
///
/// A simple new type wrapper around [`NonZeroU32`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CellScale(NonZeroU32);

impl CellScale {
    /// The editor's default export scale (each cell becomes `20×20` pixels).
    pub const DEFAULT: Self = match NonZeroU32::new(20) {
        Some(value) => Self(value),
        None => panic!("default scale must be non-zero"),
    };

    /// Gets the inner `u32` value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The editor's suggested scale for a grid: `max(20, 640 / N)`,
    /// so that small grids still export at a usable resolution.
    #[must_use]
    pub fn suggested_for(size: GridSize) -> Self {
        let scale = (640 / u32::from(size.get())).max(Self::DEFAULT.get());
        NonZeroU32::new(scale).map_or(Self::DEFAULT, Self)
    }
}

impl Default for CellScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for CellScale {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(Error::InvalidScale(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(
            GridSize::try_from(0u16),
            Err(Error::InvalidGridSize(0))
        ));
        assert!(matches!(
            GridSize::try_from(70_000u32),
            Err(Error::InvalidGridSize(70_000))
        ));
        assert!(matches!(
            PaletteSize::try_from(0u32),
            Err(Error::InvalidColorCount(0))
        ));
        assert!(matches!(
            CellScale::try_from(0),
            Err(Error::InvalidScale(0))
        ));
    }

    #[test]
    fn presets_are_ascending() {
        for pair in GridSize::PRESETS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(GridSize::PRESETS.contains(&GridSize::DEFAULT));
    }

    #[test]
    fn suggested_scale() {
        let scale = |n: u16| CellScale::suggested_for(GridSize::try_from(n).unwrap()).get();
        assert_eq!(scale(8), 80);
        assert_eq!(scale(16), 40);
        assert_eq!(scale(32), 20);
        assert_eq!(scale(128), 20);
    }

    #[test]
    fn luminance_weights() {
        let white = PaletteEntry::new(Srgb::new(255, 255, 255), 1);
        let black = PaletteEntry::new(Srgb::new(0, 0, 0), 1);
        assert!((white.luminance() - 255.0).abs() < 1e-9);
        assert!(black.luminance().abs() < 1e-9);
    }
}
