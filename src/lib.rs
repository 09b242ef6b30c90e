//! A library for turning arbitrary images into small pixel-art grids.
//!
//! `pixelette` resamples a source bitmap onto an `N×N` canvas with hard-edged
//! nearest-neighbor sampling, extracts a small palette of representative colors,
//! and maps every opaque pixel onto its nearest palette color.
//! The result is a [`Grid`] of [`Cell`]s that an editor can keep painting on,
//! persist as a [`Snapshot`], or rasterize for export.
//!
//! # Features
//! To reduce dependencies and compile times, `pixelette` has several `cargo` features
//! that can be turned off or on:
//! - `pipelines`: exposes [`ConversionOptions`] and the [`PixelArtPipeline`] builder (more details below).
//! - `threads`: exposes parallel versions of the mapping and rasterization functions via [`rayon`].
//! - `image`: enables integration with the [`image`] crate for decoding sources and PNG export.
//!
//! # High-Level API
//! To get started with the high-level API, see [`PixelArtPipeline`]:
//! ```no_run
//! # use pixelette::{Bitmap, ConversionOptions, GridSize, PaletteSize, PixelArtPipeline};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bitmap = Bitmap::open("some image")?;
//!
//! let options = ConversionOptions::new(GridSize::try_from(32u16)?)
//!     .color_count(PaletteSize::try_from(12u16)?) // at most 12 colors in the palette
//!     .crop_to_fit(false); // letterbox instead of cropping
//!
//! let conversion = PixelArtPipeline::new(&bitmap, options).convert();
//! assert_eq!(conversion.grid.size().get(), 32);
//! # Ok(())
//! # }
//! ```
//!
//! # Lower-Level API
//! Each stage is also available on its own: [`resample`], [`quantize()`], and [`map_to_grid`].
//! Grids can then be edited, saved with the [`snapshot`] module, and rasterized with the [`export`] module.
//! A grid can also start from a procedurally generated [`Scene`] instead of an image, see [`generate()`].

#![deny(unsafe_code)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod bitmap;
mod color_counts;
mod error;
mod generate;
mod grid;
mod quantize;
mod remap;
mod resample;
mod types;

#[cfg(feature = "pipelines")]
mod api;

pub mod export;
pub mod snapshot;

pub use bitmap::*;
pub use color_counts::*;
pub use error::*;
pub use generate::*;
pub use grid::*;
pub use quantize::*;
pub use remap::*;
pub use resample::*;
pub use snapshot::Snapshot;
pub use types::*;

#[cfg(feature = "pipelines")]
pub use api::*;

/// Pixels with an alpha below this value are treated as transparent.
///
/// Transparent pixels never contribute to the palette and always map to [`Cell::Empty`].
pub const ALPHA_THRESHOLD: u8 = 128;

/// Color channels are rounded to the nearest multiple of this value before counting.
pub const BUCKET_STEP: u8 = 8;

/// Returns whether the given alpha value counts as opaque.
#[inline]
pub(crate) const fn is_opaque(alpha: u8) -> bool {
    alpha >= ALPHA_THRESHOLD
}
