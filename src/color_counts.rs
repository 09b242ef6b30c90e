//! Contains the code for bucketing and counting the opaque colors of a pixel buffer.

use crate::{is_opaque, PaletteEntry, BUCKET_STEP};
use palette::{Srgb, Srgba};
use std::collections::{hash_map::Entry, HashMap};

/// Rounds a single channel to the nearest multiple of [`BUCKET_STEP`].
///
/// Halves round up. The top bucket (`256`) does not fit in a `u8` and is clamped to `255`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn bucket_channel(value: u8) -> u8 {
    let step = BUCKET_STEP as u16;
    let rounded = (value as u16 + step / 2) / step * step;
    if rounded > u8::MAX as u16 {
        u8::MAX
    } else {
        rounded as u8
    }
}

/// Rounds each channel of `color` with [`bucket_channel`].
#[inline]
#[must_use]
pub fn bucket_color(color: Srgb<u8>) -> Srgb<u8> {
    Srgb::new(
        bucket_channel(color.red),
        bucket_channel(color.green),
        bucket_channel(color.blue),
    )
}

/// A frequency table of the bucketed colors of the opaque pixels in a buffer.
///
/// Colors are kept in discovery order, i.e., the order in which
/// each bucket was first encountered while scanning the pixels.
/// The counts themselves do not depend on the scan order.
///
/// # Examples
/// ```
/// # use pixelette::BucketCounts;
/// # use palette::{Srgb, Srgba};
/// let pixels = [
///     Srgba::new(255, 0, 0, 255),
///     Srgba::new(253, 2, 1, 255), // same bucket as above
///     Srgba::new(0, 0, 255, 10),  // transparent, skipped
/// ];
/// let counts = BucketCounts::new(&pixels);
/// assert_eq!(counts.num_colors(), 1);
/// assert_eq!(counts.total_count(), 2);
/// assert_eq!(counts.colors()[0], Srgb::new(255, 0, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketCounts {
    /// The unique bucketed colors in discovery order.
    colors: Vec<Srgb<u8>>,
    /// The number of pixels for each color in `colors`.
    counts: Vec<u32>,
    /// The total number of opaque pixels counted.
    total_count: u32,
}

impl BucketCounts {
    /// Buckets and counts every opaque pixel in `pixels`. Transparent pixels are skipped entirely.
    #[must_use]
    pub fn new(pixels: &[Srgba<u8>]) -> Self {
        let mut index = HashMap::<[u8; 3], usize>::new();
        let mut colors = Vec::new();
        let mut counts = Vec::<u32>::new();
        let mut total_count = 0u32;

        for pixel in pixels.iter().filter(|p| is_opaque(p.alpha)) {
            let color = bucket_color(pixel.color);
            match index.entry([color.red, color.green, color.blue]) {
                Entry::Occupied(entry) => counts[*entry.get()] += 1,
                Entry::Vacant(entry) => {
                    entry.insert(colors.len());
                    colors.push(color);
                    counts.push(1);
                }
            }
            total_count += 1;
        }

        Self { colors, counts, total_count }
    }

    /// The unique bucketed colors in discovery order.
    #[must_use]
    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }

    /// The number of pixels that fell into each bucket of [`BucketCounts::colors`].
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The total number of opaque pixels that were counted.
    #[must_use]
    pub const fn total_count(&self) -> u32 {
        self.total_count
    }

    /// The number of unique buckets as a `usize`.
    #[must_use]
    pub fn num_colors(&self) -> usize {
        self.colors.len()
    }

    /// Whether no opaque pixel was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Looks up the count of a bucketed color. Returns `0` for unseen colors.
    #[must_use]
    pub fn count_of(&self, color: Srgb<u8>) -> u32 {
        self.colors
            .iter()
            .position(|&c| c == color)
            .map_or(0, |i| self.counts[i])
    }

    /// The buckets as palette entries in discovery order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = PaletteEntry> + '_ {
        self.colors
            .iter()
            .zip(&self.counts)
            .map(|(&color, &count)| PaletteEntry::new(color, count))
    }
}
