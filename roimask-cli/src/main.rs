use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use roimask::image::NdImage;
use roimask::stats::{coverage, masked_stats};
use roimask::view::MaskedView;

/// Masked region statistics: restrict measurements to mask-covered pixels
#[derive(Parser)]
#[command(name = "roimask-stats", version)]
struct Args {
    /// Input grayscale image (PNG or JPEG)
    image: String,

    /// Mask image (PNG or JPEG); zero pixels lie outside the region
    mask: String,

    /// Offset of the mask's bounding box inside the image, as "x,y"
    #[arg(short, long, default_value = "0,0")]
    offset: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Include each on-pixel coordinate and value in the output
    #[arg(long)]
    dump_pixels: bool,
}

#[derive(Serialize)]
struct Report {
    image: String,
    mask: String,
    offset: Vec<i64>,
    size: Vec<i64>,
    count: u64,
    coverage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pixels: Vec<PixelRecord>,
}

#[derive(Serialize)]
struct PixelRecord {
    position: Vec<i64>,
    value: u8,
}

/// Load a PNG/JPEG file as an 8-bit grayscale image.
///
/// Luma8 rows are contiguous, matching the axis-0-fastest layout of
/// `NdImage` with dims `[width, height]`.
fn load_gray(path: &str) -> Result<NdImage<u8>> {
    let img = image::open(path).with_context(|| format!("failed to open {path}"))?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    NdImage::from_vec(&[w as i64, h as i64], gray.into_raw())
        .context("image buffer size mismatch")
}

fn parse_offset(s: &str) -> Result<Vec<i64>> {
    let parts: Vec<i64> = s
        .split(',')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid offset '{s}'"))?;
    if parts.len() != 2 {
        bail!("offset must have exactly two components, got '{s}'");
    }
    Ok(parts)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let img = load_gray(&args.image)?;
    let mask = load_gray(&args.mask)?;
    let offset = parse_offset(&args.offset)?;

    let view = MaskedView::at_offset(&img, &mask, &offset)
        .context("failed to build masked view")?;

    let stats = masked_stats(&view);
    let cov = coverage(&view);

    let pixels = if args.dump_pixels {
        view.localizing_cursor()
            .filter(|s| s.on)
            .map(|s| PixelRecord {
                position: s.position.to_vec(),
                value: *s.value,
            })
            .collect()
    } else {
        Vec::new()
    };

    let report = Report {
        image: args.image,
        mask: args.mask,
        offset: view.offset().to_vec(),
        size: view.region().size().to_vec(),
        count: stats.as_ref().map_or(0, |s| s.count),
        coverage: cov,
        mean: stats.as_ref().map(|s| s.mean),
        min: stats.as_ref().map(|s| s.min),
        max: stats.as_ref().map(|s| s.max),
        pixels,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
