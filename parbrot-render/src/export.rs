//! PNG export with embedded view metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use parbrot_core::Viewport;

use crate::strategy::StrategyKind;

/// View parameters recorded in an exported PNG.
pub struct SnapshotInfo {
    pub viewport: Viewport,
    pub strategy: StrategyKind,
}

/// Write an RGBA pixel buffer as a PNG file with the view parameters
/// embedded as tEXt chunks.
///
/// Uses the `png` crate directly (rather than an image abstraction) to
/// inject custom text chunks readable by exiftool and most viewers, so a
/// saved frame carries enough state to reproduce itself.
pub fn write_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    path: &Path,
    info: &SnapshotInfo,
) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "parbrot".to_string())?;
    for (key, value) in metadata_pairs(info, width, height) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(pixels)?;

    debug!("exported PNG {}x{} to {}", width, height, path.display());
    Ok(())
}

fn metadata_pairs(info: &SnapshotInfo, width: u32, height: u32) -> Vec<(String, String)> {
    let vp = &info.viewport;
    vec![
        ("parbrot.OffsetRe".into(), format!("{}", vp.offset.re)),
        ("parbrot.OffsetIm".into(), format!("{}", vp.offset.im)),
        ("parbrot.ScaleX".into(), format!("{}", vp.scale.x)),
        ("parbrot.ScaleY".into(), format!("{}", vp.scale.y)),
        ("parbrot.MaxCount".into(), vp.max_count.to_string()),
        ("parbrot.Strategy".into(), info.strategy.key().to_string()),
        ("parbrot.Resolution".into(), format!("{width}x{height}")),
    ]
}
