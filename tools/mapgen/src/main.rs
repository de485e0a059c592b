/// Map grid generator: decodes a heightmap PNG and a folder of material
/// weight PNGs, classifies the terrain grid and writes it as JSON.
///
/// Heightmap: red = low byte, green = high byte of a 16-bit height.
/// Material folder: `<index>.png` for index 0–16, weight in the red channel.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use grid_core::export::to_json_pretty;
use grid_core::raster::elevation_rgba;
use grid_core::{
    ClassifierParams, GridClassifier, MaterialLayers, RasterBuffer, RunSummary, MATERIAL_LAYERS,
};
use image::DynamicImage;
use log::{info, warn};
use serde::Serialize;

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "mapgen",
    about = "Classify a heightmap and material weight maps into a terrain grid JSON"
)]
struct Args {
    /// Heightmap PNG (R = low byte, G = high byte)
    #[arg(long)]
    heightmap: PathBuf,

    /// Folder of material weight maps named 0.png … 16.png
    #[arg(long)]
    material_folder: PathBuf,

    /// Output grid JSON
    #[arg(short, long, default_value = "MapData.json")]
    output: PathBuf,

    /// JSON parameter file (camelCase keys); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    sea_level: Option<i32>,

    #[arg(long)]
    plain_threshold: Option<f64>,

    #[arg(long)]
    hill_threshold: Option<f64>,

    /// Raster pixels per grid cell
    #[arg(long)]
    cell_size: Option<i32>,

    /// World extent; grid width = component size / cell size
    #[arg(long)]
    component_size: Option<i32>,

    /// World units per raster pixel
    #[arg(long)]
    grid_size: Option<f64>,

    /// Disable a material layer by index (repeatable)
    #[arg(long = "disable", value_name = "INDEX")]
    disable: Vec<usize>,

    /// Also write `<output>.manifest.json` with parameters and terrain counts
    #[arg(long)]
    manifest: bool,
}

// ── Manifest ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Manifest<'a> {
    heightmap: String,
    material_layers: Vec<usize>,
    params: &'a ClassifierParams,
    summary: RunSummary,
}

// ── Parameters ───────────────────────────────────────────────────────────────

fn resolve_params(args: &Args) -> Result<ClassifierParams> {
    let mut params = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ClassifierParams::default(),
    };

    if let Some(v) = args.sea_level {
        params.sea_level = v;
    }
    if let Some(v) = args.plain_threshold {
        params.plain_threshold = v;
    }
    if let Some(v) = args.hill_threshold {
        params.hill_threshold = v;
    }
    if let Some(v) = args.cell_size {
        params.cell_size = v;
    }
    if let Some(v) = args.component_size {
        params.component_size = v;
    }
    if let Some(v) = args.grid_size {
        params.grid_size = v;
    }
    Ok(params)
}

// ── Raster loading ───────────────────────────────────────────────────────────

/// Decode a PNG to 8-bit RGBA.
fn load_rgba(path: &Path, layer: &str) -> Result<RasterBuffer> {
    let img = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    RasterBuffer::new(layer, w as usize, h as usize, img.into_raw())
        .with_context(|| format!("wrapping {}", path.display()))
}

/// Decode a heightmap PNG.
///
/// Grayscale images carry the height directly in their single channel and are
/// repacked into the R/G layout; colour images are already packed.
fn load_heightmap(path: &Path) -> Result<RasterBuffer> {
    let img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    let data: Vec<u8> = match img {
        DynamicImage::ImageLuma16(buf) => {
            buf.pixels().flat_map(|p| elevation_rgba(p.0[0])).collect()
        }
        DynamicImage::ImageLuma8(buf) => {
            buf.pixels().flat_map(|p| elevation_rgba(u16::from(p.0[0]))).collect()
        }
        other => return load_packed(path, other),
    };
    RasterBuffer::new("heightmap", w, h, data)
        .with_context(|| format!("wrapping {}", path.display()))
}

fn load_packed(path: &Path, img: DynamicImage) -> Result<RasterBuffer> {
    let img = img.to_rgba8();
    let (w, h) = img.dimensions();
    RasterBuffer::new("heightmap", w as usize, h as usize, img.into_raw())
        .with_context(|| format!("wrapping {}", path.display()))
}

/// `"12.png"` → `Some(12)`. Anything else → `None`.
fn material_index(file_name: &str) -> Option<usize> {
    let stem = file_name.strip_suffix(".png")?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

fn load_materials(dir: &Path) -> Result<MaterialLayers> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut layers = MaterialLayers::new();
    for path in entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(index) = material_index(name) else {
            warn!("skipping {}: not named <index>.png", path.display());
            continue;
        };
        if index >= MATERIAL_LAYERS {
            warn!("skipping {}: material index {index} is past the last layer", path.display());
            continue;
        }
        let raster = load_rgba(&path, &format!("material {index}"))?;
        info!("material {index}: {}×{}", raster.width(), raster.height());
        layers.insert(index, raster)?;
    }
    Ok(layers)
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = resolve_params(&args)?;
    params.validate()?;

    info!("Loading heightmap {}…", args.heightmap.display());
    let elevation = load_heightmap(&args.heightmap)?;

    info!("Loading material maps from {}…", args.material_folder.display());
    let mut materials = load_materials(&args.material_folder)?;
    for &index in &args.disable {
        if materials.get(index).is_none() {
            warn!("--disable {index}: no such material layer loaded");
        }
        materials.set_enabled(index, false);
    }
    if let Err(e) = materials.require_usable() {
        bail!("{e} in {}", args.material_folder.display());
    }

    info!("Classifying terrain…");
    let result = GridClassifier::new().classify(&elevation, &materials, &params)?;

    let json = to_json_pretty(&result.grid)?;
    fs::write(&args.output, json).with_context(|| format!("writing {}", args.output.display()))?;
    info!("Wrote {} ({} cells)", args.output.display(), result.grid.len());

    if args.manifest {
        let manifest = Manifest {
            heightmap: args.heightmap.display().to_string(),
            material_layers: materials.enabled().map(|(i, _)| i).collect(),
            params: &params,
            summary: result.summary(),
        };
        let path = args.output.with_extension("manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    println!(
        "{0}×{0} grid: {1}; {2} enclosed region(s) → Mountain",
        result.grid.width(),
        result.counts,
        result.enclosure.enclosed_regions
    );
    Ok(())
}
