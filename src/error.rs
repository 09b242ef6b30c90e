//! Contains the crate-wide error type.

use thiserror::Error;

/// The errors that can be returned by `pixelette`.
///
/// Corrupted persisted state is deliberately absent:
/// [`snapshot::load`](crate::snapshot::load) recovers from it with an empty grid instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested grid size was zero.
    #[error("grid size must be at least 1, got {0}")]
    InvalidGridSize(u32),

    /// The requested palette size (color count) was zero.
    #[error("color count must be at least 1, got {0}")]
    InvalidColorCount(u32),

    /// A bitmap was created with a zero width or height.
    #[error("bitmap dimensions cannot be zero")]
    ZeroDimension,

    /// The pixel buffer length did not match the bitmap dimensions.
    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        /// The number of pixels (or bytes) that were provided.
        len: usize,
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },

    /// An export scale of zero was requested.
    #[error("export scale must be at least 1, got {0}")]
    InvalidScale(u32),

    /// A cell string was neither empty nor a `#RRGGBB` hex color.
    #[error("invalid cell color {0:?}, expected \"\" or \"#RRGGBB\"")]
    ParseColor(String),

    /// A cell coordinate was outside of the grid.
    #[error("cell ({row}, {col}) is outside of a {size}x{size} grid")]
    OutOfBounds {
        /// The requested row.
        row: usize,
        /// The requested column.
        col: usize,
        /// The grid edge length.
        size: u16,
    },

    /// A grid could not replace another grid of a different size,
    /// or a list of rows did not form a square grid.
    #[error("expected a {expected}x{expected} grid, found {found}")]
    ShapeMismatch {
        /// The expected grid edge length.
        expected: usize,
        /// A description of the shape that was found.
        found: String,
    },

    /// The source image could not be decoded.
    #[cfg(feature = "image")]
    #[error("failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),

    /// An exported image could not be encoded or written.
    #[cfg(feature = "image")]
    #[error("failed to write exported image: {0}")]
    Encode(#[source] image::ImageError),

    /// A snapshot could not be encoded.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A `Result` alias defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
