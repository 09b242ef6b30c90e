//! Nearest-neighbor resampling of a [`Bitmap`] onto a square grid canvas.
//!
//! The source is never smoothed or interpolated:
//! every destination pixel copies exactly one source pixel, so hard edges survive.

use crate::{Bitmap, GridSize};
use palette::Srgba;

/// Horizontal crop offset for landscape sources, as a fraction of the overflow.
///
/// Slightly left of center, a fixed composition bias.
const LANDSCAPE_CROP_BIAS: f64 = 0.4;

/// Vertical crop offset for portrait sources, as a fraction of the overflow (upper third).
const PORTRAIT_CROP_BIAS: f64 = 0.3;

/// A fully transparent pixel, used for uncovered destination pixels.
const TRANSPARENT: Srgba<u8> = Srgba::new(0, 0, 0, 0);

/// How a non-square source is fitted onto the square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectPolicy {
    /// Stretch the whole source over the whole grid, ignoring its aspect ratio.
    Stretch,
    /// Crop a square region out of the source and discard the overflow.
    #[default]
    CropToFit,
    /// Fit the whole source inside the grid and leave the border transparent.
    Letterbox,
}

impl AspectPolicy {
    /// Folds the editor's two option flags into a policy.
    ///
    /// If `maintain_aspect_ratio` is `false`, `crop_to_fit` is ignored.
    #[must_use]
    pub const fn from_flags(maintain_aspect_ratio: bool, crop_to_fit: bool) -> Self {
        match (maintain_aspect_ratio, crop_to_fit) {
            (false, _) => Self::Stretch,
            (true, true) => Self::CropToFit,
            (true, false) => Self::Letterbox,
        }
    }
}

/// A rectangle in the source bitmap. Offsets may be fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    /// The left edge.
    pub x: f64,
    /// The top edge.
    pub y: f64,
    /// The width.
    pub width: f64,
    /// The height.
    pub height: f64,
}

/// A rectangle of whole pixels on the destination grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestRect {
    /// The left edge.
    pub x: u32,
    /// The top edge.
    pub y: u32,
    /// The width.
    pub width: u32,
    /// The height.
    pub height: u32,
}

impl DestRect {
    /// Whether the destination pixel at (`x`, `y`) lies inside this rectangle.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Which part of the source is drawn onto which part of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// The sampled region of the source bitmap.
    pub source: SourceRect,
    /// The covered region of the destination grid.
    pub dest: DestRect,
}

impl Placement {
    /// Computes the placement of a `width×height` source on a `grid_size×grid_size` canvas.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(width: u32, height: u32, grid_size: GridSize, policy: AspectPolicy) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let n = u32::from(grid_size.get());
        let aspect_ratio = w / h;

        let mut source = SourceRect { x: 0.0, y: 0.0, width: w, height: h };
        let mut dest = DestRect { x: 0, y: 0, width: n, height: n };

        match policy {
            AspectPolicy::Stretch => {}
            AspectPolicy::CropToFit => {
                if aspect_ratio > 1.0 {
                    source.width = h;
                    source.x = (LANDSCAPE_CROP_BIAS * (w - h)).max(0.0);
                } else if aspect_ratio < 1.0 {
                    source.height = w;
                    source.y = (PORTRAIT_CROP_BIAS * (h - w)).max(0.0);
                }
            }
            AspectPolicy::Letterbox => {
                let n = f64::from(n);
                if aspect_ratio > 1.0 {
                    let height = (n / aspect_ratio).round();
                    dest.height = height as u32;
                    dest.y = ((n - height) / 2.0).round() as u32;
                } else if aspect_ratio < 1.0 {
                    let width = (n * aspect_ratio).round();
                    dest.width = width as u32;
                    dest.x = ((n - width) / 2.0).round() as u32;
                }
            }
        }

        Self { source, dest }
    }

    /// Maps a destination column/row inside `dest` to a source column/row.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample(
        offset: f64,
        extent: f64,
        dest_offset: u32,
        dest_extent: u32,
        d: u32,
        max: u32,
    ) -> u32 {
        let t = (f64::from(d - dest_offset) + 0.5) / f64::from(dest_extent);
        let s = (offset + t * extent).floor().max(0.0) as u32;
        s.min(max - 1)
    }
}

/// Resamples `bitmap` onto a `grid_size×grid_size` canvas according to `policy`.
///
/// The output always has exactly `grid_size²` pixels in row-major order.
/// Pixels outside of the drawn region are `(0, 0, 0, 0)`;
/// all other pixels are copied unchanged (alpha included) from a single source pixel.
///
/// # Examples
/// ```
/// # use pixelette::{resample, AspectPolicy, Bitmap, GridSize, Error};
/// # use palette::Srgba;
/// # fn main() -> Result<(), Error> {
/// let bitmap = Bitmap::new(4, 2, vec![Srgba::new(9, 9, 9, 255); 8])?;
/// let pixels = resample(&bitmap, GridSize::try_from(4u16)?, AspectPolicy::Letterbox);
/// assert_eq!(pixels.len(), 16);
/// assert_eq!(pixels[0].alpha, 0); // top letterbox row
/// assert_eq!(pixels[4].alpha, 255);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn resample(bitmap: &Bitmap, grid_size: GridSize, policy: AspectPolicy) -> Vec<Srgba<u8>> {
    let Placement { source, dest } =
        Placement::new(bitmap.width(), bitmap.height(), grid_size, policy);

    let n = u32::from(grid_size.get());
    let mut out = vec![TRANSPARENT; grid_size.num_cells()];

    if dest.width == 0 || dest.height == 0 {
        return out;
    }

    let columns = (dest.x..dest.x + dest.width)
        .map(|x| {
            Placement::sample(source.x, source.width, dest.x, dest.width, x, bitmap.width())
        })
        .collect::<Vec<_>>();

    let pixels = bitmap.pixels();
    let stride = bitmap.width() as usize;
    for y in dest.y..dest.y + dest.height {
        let sy =
            Placement::sample(source.y, source.height, dest.y, dest.height, y, bitmap.height());
        let src_row = &pixels[sy as usize * stride..][..stride];
        let dst_row = &mut out[(y * n) as usize..][..n as usize];
        for (x, &sx) in (dest.x..).zip(&columns) {
            dst_row[x as usize] = src_row[sx as usize];
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn grid(n: u16) -> GridSize {
        GridSize::try_from(n).unwrap()
    }

    #[test]
    fn output_always_has_n_squared_pixels() {
        let bitmap = coordinate_bitmap(7, 3);
        for policy in [AspectPolicy::Stretch, AspectPolicy::CropToFit, AspectPolicy::Letterbox] {
            for n in [1, 2, 5, 16, 33] {
                let out = resample(&bitmap, grid(n), policy);
                assert_eq!(out.len(), usize::from(n) * usize::from(n));
            }
        }
    }

    #[test]
    fn alpha_is_zero_or_passed_through() {
        let mut pixels = test_data(60);
        for (i, p) in pixels.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            {
                p.alpha = (i * 4) as u8 | 1;
            }
        }
        let bitmap = Bitmap::new(10, 6, pixels).unwrap();
        let source_alphas = bitmap.pixels().iter().map(|p| p.alpha).collect::<Vec<_>>();

        for policy in [AspectPolicy::Stretch, AspectPolicy::CropToFit, AspectPolicy::Letterbox] {
            for pixel in resample(&bitmap, grid(9), policy) {
                assert!(pixel.alpha == 0 || source_alphas.contains(&pixel.alpha));
            }
        }
    }

    #[test]
    fn landscape_crop_is_biased_left_of_center() {
        let placement = Placement::new(200, 100, grid(16), AspectPolicy::CropToFit);
        assert_eq!(
            placement.source,
            SourceRect { x: 40.0, y: 0.0, width: 100.0, height: 100.0 }
        );
        assert_eq!(placement.dest, DestRect { x: 0, y: 0, width: 16, height: 16 });

        let out = resample(&coordinate_bitmap(200, 100), grid(16), AspectPolicy::CropToFit);
        assert!(out.iter().all(|p| p.alpha == u8::MAX));
        assert!(out.iter().all(|p| (40..140).contains(&p.red)));
        assert_eq!(out[0].red, 43);
    }

    #[test]
    fn portrait_crop_is_biased_to_upper_third() {
        let placement = Placement::new(50, 150, grid(10), AspectPolicy::CropToFit);
        assert_eq!(
            placement.source,
            SourceRect { x: 0.0, y: 30.0, width: 50.0, height: 50.0 }
        );

        let out = resample(&coordinate_bitmap(50, 150), grid(10), AspectPolicy::CropToFit);
        assert!(out.iter().all(|p| (30..80).contains(&p.green)));
    }

    #[test]
    fn square_sources_are_not_cropped() {
        for policy in [AspectPolicy::CropToFit, AspectPolicy::Letterbox] {
            let placement = Placement::new(64, 64, grid(8), policy);
            assert_eq!(
                placement.source,
                SourceRect { x: 0.0, y: 0.0, width: 64.0, height: 64.0 }
            );
            assert_eq!(placement.dest, DestRect { x: 0, y: 0, width: 8, height: 8 });
        }
    }

    #[test]
    fn landscape_letterbox_pads_top_and_bottom() {
        let placement = Placement::new(200, 100, grid(16), AspectPolicy::Letterbox);
        assert_eq!(placement.dest, DestRect { x: 0, y: 4, width: 16, height: 8 });

        let bitmap = solid_bitmap(200, 100, opaque(1, 2, 3));
        let out = resample(&bitmap, grid(16), AspectPolicy::Letterbox);
        for (y, pixels) in (0..).zip(out.chunks_exact(16)) {
            for (x, &p) in (0..).zip(pixels) {
                let inside = placement.dest.contains(x, y);
                assert_eq!(inside, (4..12).contains(&y), "({x}, {y})");
                assert_eq!(p, if inside { opaque(1, 2, 3) } else { TRANSPARENT });
            }
        }
    }

    #[test]
    fn portrait_letterbox_pads_left_and_right() {
        let placement = Placement::new(100, 200, grid(16), AspectPolicy::Letterbox);
        assert_eq!(placement.dest, DestRect { x: 4, y: 0, width: 8, height: 16 });

        let bitmap = solid_bitmap(100, 200, opaque(1, 2, 3));
        let out = resample(&bitmap, grid(16), AspectPolicy::Letterbox);
        for (y, row) in (0..).zip(out.chunks_exact(16)) {
            for (x, &p) in (0..).zip(row) {
                let inside = placement.dest.contains(x, y);
                assert_eq!(inside, (4..12).contains(&x), "({x}, {y})");
                assert_eq!(p, if inside { opaque(1, 2, 3) } else { TRANSPARENT });
            }
        }
    }

    #[test]
    fn dest_rect_bounds_are_half_open() {
        let rect = DestRect { x: 2, y: 1, width: 3, height: 2 };
        assert!(rect.contains(2, 1));
        assert!(rect.contains(4, 2));
        assert!(!rect.contains(5, 2));
        assert!(!rect.contains(4, 3));
        assert!(!rect.contains(1, 1));
        assert!(!DestRect { x: 0, y: 0, width: 0, height: 8 }.contains(0, 0));
    }

    #[test]
    fn extreme_letterbox_leaves_grid_empty() {
        let bitmap = solid_bitmap(100, 1, opaque(1, 2, 3));
        let out = resample(&bitmap, grid(8), AspectPolicy::Letterbox);
        assert!(out.iter().all(|&p| p == TRANSPARENT));
    }

    #[test]
    fn stretch_covers_entire_grid() {
        let bitmap = coordinate_bitmap(4, 2);
        let out = resample(&bitmap, grid(4), AspectPolicy::Stretch);
        let expected = [0, 1, 2, 3].repeat(4);
        assert_eq!(out.iter().map(|p| p.red).collect::<Vec<_>>(), expected);
        let rows = out.chunks_exact(4).map(|row| row[0].green).collect::<Vec<_>>();
        assert_eq!(rows, vec![0, 0, 1, 1]);
    }

    #[test]
    fn identity_when_sizes_match() {
        let bitmap = coordinate_bitmap(8, 8);
        for policy in [AspectPolicy::Stretch, AspectPolicy::CropToFit, AspectPolicy::Letterbox] {
            assert_eq!(resample(&bitmap, grid(8), policy), bitmap.pixels());
        }
    }

    #[test]
    fn policy_from_flags() {
        assert_eq!(AspectPolicy::from_flags(false, true), AspectPolicy::Stretch);
        assert_eq!(AspectPolicy::from_flags(false, false), AspectPolicy::Stretch);
        assert_eq!(AspectPolicy::from_flags(true, true), AspectPolicy::CropToFit);
        assert_eq!(AspectPolicy::from_flags(true, false), AspectPolicy::Letterbox);
    }
}
