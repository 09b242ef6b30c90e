#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use palette::Srgba;
use pixelette::{Bitmap, GridSize};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

pub fn load_bitmaps(images: &[PathBuf]) -> Vec<(String, Bitmap)> {
    images
        .iter()
        .map(|path| {
            Bitmap::open(path).map(|bitmap| {
                (
                    path.file_name().unwrap().to_owned().into_string().unwrap(),
                    bitmap,
                )
            })
        })
        .collect::<Result<_, _>>()
        .expect("loaded each image")
}

pub fn load_image_dir(dir: impl AsRef<Path>) -> Vec<(String, Bitmap)> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths = entries
        .collect::<Result<Vec<_>, _>>()
        .expect("read each file")
        .iter()
        .map(std::fs::DirEntry::path)
        .collect::<Vec<_>>();

    paths.sort();

    load_bitmaps(&paths)
}

pub const IMAGE_DIR: &str = "img";

pub fn load_image_dir_relative_to_root(dir: impl AsRef<Path>) -> Vec<(String, Bitmap)> {
    // assume current exe path is something like: target/build/deps/current_exe
    let exe = std::env::current_exe().unwrap();
    let root = exe
        .parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap();

    load_image_dir(root.join(dir.as_ref()))
}

/// A photo-like bitmap: smooth gradients with per-pixel noise and a transparent corner.
#[allow(clippy::cast_possible_truncation)]
pub fn synthetic_bitmap(width: u32, height: u32, seed: u64) -> Bitmap {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let noise = |rng: &mut Xoroshiro128PlusPlus, base: u32| {
                (base + rng.gen_range(0..24)).min(255) as u8
            };
            let r = noise(&mut rng, x * 230 / width);
            let g = noise(&mut rng, y * 230 / height);
            let b = noise(&mut rng, (x + y) * 115 / (width + height) + 60);
            let alpha = if x < width / 8 && y < height / 8 { 0 } else { u8::MAX };
            Srgba::new(r, g, b, alpha)
        })
        .collect();

    Bitmap::new(width, height, pixels).unwrap()
}

static BITMAPS: OnceLock<Vec<(String, Bitmap)>> = OnceLock::new();

/// The images under `img/` if there are any, otherwise a few synthetic bitmaps of common sizes.
pub fn bitmaps() -> &'static [(String, Bitmap)] {
    BITMAPS.get_or_init(|| {
        let images = load_image_dir_relative_to_root(IMAGE_DIR);
        if images.is_empty() {
            [(640, 480), (1280, 720), (1080, 1920), (2048, 2048)]
                .into_iter()
                .zip(0..)
                .map(|((w, h), seed)| (format!("synthetic_{w}x{h}"), synthetic_bitmap(w, h, seed)))
                .collect()
        } else {
            images
        }
    })
}

pub fn grid_sizes() -> impl Iterator<Item = GridSize> {
    [16u16, 32, 64, 128].into_iter().map(|n| GridSize::try_from(n).unwrap())
}
