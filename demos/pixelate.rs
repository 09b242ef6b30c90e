#![deny(unsafe_code)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{fmt::Display, path::PathBuf};

use clap::{Parser, ValueEnum};
use flexi_logger::Logger;
use palette::{cast::IntoComponents, Srgb};
use pixelette::{
    convert_from,
    export::{self, ExportOptions},
    snapshot, BitmapSource, Cell, CellScale, ConversionOptions, GridSize, PaletteSize,
    PixelArtPipeline,
};

#[derive(Copy, Clone, ValueEnum)]
enum Fit {
    Crop,
    Letterbox,
    Stretch,
}

impl Display for Fit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Fit::Crop => "crop",
                Fit::Letterbox => "letterbox",
                Fit::Stretch => "stretch",
            }
        )
    }
}

#[derive(Parser)]
pub struct Options {
    /// The edge length of the pixel-art grid.
    #[arg(short = 'n', long, default_value_t = GridSize::DEFAULT, value_parser = parse_grid_size)]
    grid_size: GridSize,

    /// The maximum number of colors in the palette.
    #[arg(short, long, default_value_t = PaletteSize::DEFAULT, value_parser = parse_palette_size)]
    k: PaletteSize,

    /// How to fit a non-square image onto the grid.
    #[arg(long, default_value_t = Fit::Crop)]
    fit: Fit,

    /// The edge length in pixels of each exported cell (defaults to `max(20, 640 / n)`).
    #[arg(long)]
    scale: Option<u32>,

    /// Export with a transparent instead of a white background.
    #[arg(long)]
    transparent: bool,

    /// Draw grid lines on the exported image.
    #[arg(long)]
    grid_lines: bool,

    /// Also write the grid as a JSON snapshot to this path.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Run the mapping and export in parallel.
    #[arg(long)]
    par: bool,

    input: PathBuf,

    output: PathBuf,
}

fn parse_grid_size(s: &str) -> Result<GridSize, String> {
    let value: u16 = s.parse().map_err(|e| format!("{e}"))?;
    value.try_into().map_err(|e| format!("{e}"))
}

fn parse_palette_size(s: &str) -> Result<PaletteSize, String> {
    let value: u16 = s.parse().map_err(|e| format!("{e}"))?;
    value.try_into().map_err(|e| format!("{e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let Options {
        grid_size,
        k,
        fit,
        scale,
        transparent,
        grid_lines,
        snapshot: snapshot_path,
        par,
        input,
        output,
    } = Options::parse();

    let options = ConversionOptions::new(grid_size)
        .color_count(k)
        .maintain_aspect_ratio(!matches!(fit, Fit::Stretch))
        .crop_to_fit(matches!(fit, Fit::Crop));

    let time = std::time::Instant::now();
    let conversion = if par {
        let bitmap = input.load_bitmap()?;
        PixelArtPipeline::new(&bitmap, options).convert_par()
    } else {
        convert_from(&input, &options)?
    };
    log::info!("conversion took {}ms", time.elapsed().as_millis());

    let palette = conversion
        .palette
        .iter()
        .map(|entry| format!("{} ({})", Cell::from(entry.color), entry.count))
        .collect::<Vec<_>>();
    log::info!("palette: {}", palette.join(", "));

    let scale = scale.map_or(Ok(CellScale::suggested_for(grid_size)), CellScale::try_from)?;
    let export_options = ExportOptions::for_grid(grid_size)
        .scale(scale)
        .background((!transparent).then_some(Srgb::new(u8::MAX, u8::MAX, u8::MAX)))
        .grid_lines(grid_lines);

    if par {
        let (width, height, pixels) = export::rasterize_par(&conversion.grid, &export_options);
        let buf: Vec<u8> = pixels.into_components();
        image::RgbaImage::from_vec(width, height, buf)
            .ok_or("exported image buffer too small")?
            .save(&output)?;
    } else {
        export::save_png(&conversion.grid, &export_options, &output)?;
    }
    log::info!("wrote {}", output.display());

    if let Some(path) = snapshot_path {
        std::fs::write(&path, snapshot::save(&conversion.grid)?)?;
        log::info!("wrote snapshot to {}", path.display());
    }

    Ok(())
}
