//! A frequency and diversity based palette quantizer.
//!
//! This is a lightweight alternative to median cut or k-means, tuned for small pixel-art palettes.
//! Colors are first bucketed and counted (see [`BucketCounts`]).
//! If there are no more buckets than the palette size, every bucket is kept.
//! Otherwise the buckets are ranked by frequency, with near-equal frequencies
//! ranked by how close their luminance is to mid-gray,
//! and a palette is greedily grown from that ranking:
//! a candidate is only accepted if it is far enough (in RGB) from every color selected so far.
//! Any slots left empty after the greedy pass are filled from the remaining ranking.
//!
//! Pure top-k frequency selection clumps near-duplicate colors together,
//! while pure distance based clustering happily picks rare outliers.
//! The hybrid favors common colors but guarantees some visual spread.
//!
//! Note that the fill step ignores the distance threshold,
//! so images with little color diversity can still end up with near-duplicate palette colors.

use crate::{remap::squared_distance, BucketCounts, Palette, PaletteEntry, PaletteSize};
use bitvec::vec::BitVec;
use ordered_float::OrderedFloat;
use palette::{Srgb, Srgba};
use std::cmp::Reverse;

/// Minimum distance to the palette while less than half of the palette has been selected.
const WIDE_SPACING: u32 = 30;

/// Minimum distance to the palette once at least half of the palette has been selected.
const NARROW_SPACING: u32 = 20;

/// The first few colors are accepted regardless of their distance to the palette.
const DIVERSITY_FLOOR: usize = 4;

/// Counts within this fraction of the number of candidates are considered tied.
const TIE_BAND: f64 = 0.1;

/// The luminance that tied candidates are ranked towards.
const MID_LUMINANCE: f64 = 128.0;

/// Computes a palette of at most `k` colors for the opaque pixels in `pixels`.
///
/// The palette is empty if and only if `pixels` contains no opaque pixel.
/// Otherwise, it has exactly `min(unique bucketed colors, k)` entries.
///
/// # Examples
/// ```
/// # use pixelette::{quantize, PaletteSize, Error};
/// # use palette::{Srgb, Srgba};
/// # fn main() -> Result<(), Error> {
/// let pixels = [
///     Srgba::new(255, 0, 0, 255),
///     Srgba::new(255, 0, 0, 255),
///     Srgba::new(0, 255, 0, 255),
///     Srgba::new(0, 0, 255, 255),
/// ];
/// let palette = quantize(&pixels, PaletteSize::try_from(1u16)?);
/// assert_eq!(palette.len(), 1);
/// assert_eq!(palette[0].color, Srgb::new(255, 0, 0));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn quantize(pixels: &[Srgba<u8>], k: PaletteSize) -> Palette {
    palette_from_counts(&BucketCounts::new(pixels), k)
}

/// Computes a palette of at most `k` colors from already counted buckets.
#[must_use]
pub fn palette_from_counts(counts: &BucketCounts, k: PaletteSize) -> Palette {
    let k = k.len();

    if counts.num_colors() <= k {
        log::trace!("{} unique colors fit into a palette of {k}", counts.num_colors());
        return counts.entries().collect();
    }

    let candidates = rank_candidates(counts);
    let mut selected = BitVec::<usize>::repeat(false, candidates.len());
    let mut palette = Vec::with_capacity(k);

    palette.push(candidates[0]);
    selected.set(0, true);

    for (i, &candidate) in candidates.iter().enumerate().skip(1) {
        if palette.len() >= k {
            break;
        }

        #[allow(clippy::cast_precision_loss)]
        let spacing = if (palette.len() as f64) < k as f64 / 2.0 {
            WIDE_SPACING
        } else {
            NARROW_SPACING
        };

        if palette.len() < DIVERSITY_FLOOR
            || min_squared_distance(candidate.color, &palette) > spacing * spacing
        {
            palette.push(candidate);
            selected.set(i, true);
        }
    }

    let diverse = palette.len();
    palette.extend(
        selected
            .iter_zeros()
            .map(|i| candidates[i])
            .take(k - palette.len()),
    );

    log::trace!(
        "selected {diverse} diverse colors out of {} candidates, filled {} more",
        candidates.len(),
        palette.len() - diverse,
    );

    Palette::new(palette)
}

/// Ranks the buckets by descending count.
///
/// Runs of candidates whose neighboring counts differ by at most
/// `TIE_BAND * candidates.len()` are tied and re-ranked by the distance
/// of their luminance from [`MID_LUMINANCE`], closest first.
/// Both sorts are stable, so remaining ties keep discovery order.
fn rank_candidates(counts: &BucketCounts) -> Vec<PaletteEntry> {
    let mut candidates = counts.entries().collect::<Vec<_>>();
    candidates.sort_by_key(|entry| Reverse(entry.count));

    #[allow(clippy::cast_precision_loss)]
    let band = TIE_BAND * candidates.len() as f64;

    for run in candidates.chunk_by_mut(|a, b| f64::from(a.count - b.count) <= band) {
        run.sort_by_key(|entry| OrderedFloat((entry.luminance() - MID_LUMINANCE).abs()));
    }

    candidates
}

/// The squared distance from `color` to the closest color in `palette`.
fn min_squared_distance(color: Srgb<u8>, palette: &[PaletteEntry]) -> u32 {
    palette
        .iter()
        .map(|entry| squared_distance(color, entry.color))
        .min()
        .unwrap_or(u32::MAX)
}
