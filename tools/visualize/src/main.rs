//! Preview renderer — draws a classified grid JSON as a terrain-coloured PNG,
//! one pixel per cell, optionally blended over the source heightmap.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grid_core::export::from_json;
use grid_core::{Grid, Terrain};
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render a terrain grid JSON to a preview PNG")]
struct Args {
    /// Grid JSON written by mapgen
    #[arg(short, long, default_value = "MapData.json")]
    input: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "preview.png")]
    output: PathBuf,

    /// Heightmap to blend the terrain colours over (50 % opacity)
    #[arg(long)]
    overlay: Option<PathBuf>,
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn terrain_color(terrain: Terrain) -> [u8; 3] {
    match terrain {
        Terrain::Water    => [ 30,  64, 175],
        Terrain::Plain    => [ 86, 152,  59],
        Terrain::Hill     => [140, 120,  80],
        Terrain::Mountain => [100, 100, 100],
        Terrain::Build | Terrain::Road | Terrain::Bridge | Terrain::None => [0, 0, 0],
    }
}

/// Per-channel 50/50 mix.
fn blend(base: [u8; 3], top: [u8; 3]) -> [u8; 3] {
    let mix = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
    [mix(base[0], top[0]), mix(base[1], top[1]), mix(base[2], top[2])]
}

fn render(grid: &Grid, backdrop: Option<&RgbImage>) -> RgbImage {
    let w = grid.width() as u32;
    let mut img = RgbImage::new(w, w);
    for r in 0..grid.width() {
        for c in 0..grid.width() {
            let color = terrain_color(grid.get(r, c).terrain);
            let px = match backdrop {
                Some(base) => blend(base.get_pixel(c as u32, r as u32).0, color),
                None => color,
            };
            img.put_pixel(c as u32, r as u32, Rgb(px));
        }
    }
    img
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let grid = from_json(&text).with_context(|| format!("parsing {}", args.input.display()))?;
    info!("Loaded {0}×{0} grid from {1}", grid.width(), args.input.display());

    let backdrop = match &args.overlay {
        Some(path) => {
            let size = grid.width() as u32;
            let img = image::open(path)
                .with_context(|| format!("decoding {}", path.display()))?
                .resize_exact(size, size, FilterType::Triangle)
                .to_rgb8();
            Some(img)
        }
        None => None,
    };

    let img = render(&grid, backdrop.as_ref());
    img.save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
