use std::sync::atomic::{AtomicU32, Ordering};

use parbrot_core::PixelCoord;

use crate::color::Rgb;

/// Destination for colored pixels.
///
/// Strategies may run on several threads at once, each writing the pixels of
/// the rows it claimed, so a sink is shared by reference and must tolerate
/// concurrent writes to distinct pixels.
pub trait PixelSink: Sync {
    fn write(&self, pixel: PixelCoord, color: Rgb);
}

/// An RGBA frame buffer that accepts concurrent per-pixel writes.
///
/// Each pixel packs into one `AtomicU32` (RGBA byte order, row-major).
/// Relaxed ordering is enough: a frame writes every pixel at most once, and
/// the strategy joins its workers before anyone snapshots the buffer, so the
/// join is what publishes the stores.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<AtomicU32>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(width: u32, height: u32) -> Self {
        let black = u32::from_le_bytes(Rgb::BLACK.to_rgba8());
        let pixels = (0..width as usize * height as usize)
            .map(|_| AtomicU32::new(black))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Snapshot the buffer as flat RGBA bytes, 4 per pixel, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            out.extend_from_slice(&px.load(Ordering::Relaxed).to_le_bytes());
        }
        out
    }
}

impl PixelSink for FrameBuffer {
    fn write(&self, pixel: PixelCoord, color: Rgb) {
        debug_assert!(
            pixel.col < self.width && pixel.row < self.height,
            "pixel {pixel:?} outside {}x{} buffer",
            self.width,
            self.height
        );
        if pixel.col >= self.width || pixel.row >= self.height {
            return;
        }
        let idx = pixel.row as usize * self.width as usize + pixel.col as usize;
        self.pixels[idx].store(u32::from_le_bytes(color.to_rgba8()), Ordering::Relaxed);
    }
}
