use std::time::{Duration, Instant};

use tracing::{debug, info};

use parbrot_core::{SampleGrid, Viewport};

use crate::sink::PixelSink;
use crate::strategy::StrategyKind;

/// Summary of one rendered frame.
#[derive(Debug, Clone)]
pub struct FrameStats {
    pub strategy: StrategyKind,
    pub width: u32,
    pub height: u32,
    pub max_count: u32,
    pub pixels: u64,
    pub elapsed: Duration,
}

/// Render one frame of the viewport into the sink.
///
/// The pixel-to-world map is frozen into a [`SampleGrid`] up front, so edits
/// to the viewport made while the frame is in flight cannot tear the image.
/// The output does not depend on the strategy, only the timing does.
pub fn render_frame(
    viewport: &Viewport,
    width: u32,
    height: u32,
    strategy: StrategyKind,
    sink: &dyn PixelSink,
) -> FrameStats {
    let start = Instant::now();
    let grid = SampleGrid::new(viewport, width, height);
    debug!(
        width,
        height,
        max_count = viewport.max_count,
        strategy = %strategy,
        "starting frame"
    );

    strategy.strategy().run(&grid, viewport.max_count, sink);

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        pixels = grid.pixel_count(),
        strategy = %strategy,
        "frame complete"
    );

    FrameStats {
        strategy,
        width,
        height,
        max_count: viewport.max_count,
        pixels: grid.pixel_count(),
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::FrameBuffer;

    #[test]
    fn frame_fills_the_buffer_and_reports_stats() {
        let viewport = Viewport::home(64, 48);
        let sink = FrameBuffer::new(64, 48);

        let stats = render_frame(&viewport, 64, 48, StrategyKind::Sequential, &sink);

        assert_eq!(stats.pixels, 64 * 48);
        assert_eq!((stats.width, stats.height), (64, 48));
        assert_eq!(stats.max_count, viewport.max_count);
        assert!(stats.elapsed.as_nanos() > 0);

        // The home view always contains escaped points, so the frame cannot
        // be entirely black.
        let rgba = sink.to_rgba();
        assert!(rgba
            .chunks_exact(4)
            .any(|px| px[0] > 0 || px[1] > 0 || px[2] > 0));
    }

    #[test]
    fn zero_sized_frame_is_a_no_op() {
        let viewport = Viewport::home(64, 48);
        let sink = FrameBuffer::new(0, 0);

        let stats = render_frame(&viewport, 0, 0, StrategyKind::IndexParallel, &sink);

        assert_eq!(stats.pixels, 0);
        assert!(sink.to_rgba().is_empty());
    }
}
