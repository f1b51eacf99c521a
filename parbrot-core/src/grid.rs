use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::viewport::{Scale, Viewport};

/// Integer screen position, column then row, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub col: u32,
    pub row: u32,
}

impl PixelCoord {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Immutable snapshot of the sampling parameters for one frame.
///
/// Freezes the pixel-to-world map of a [`Viewport`] together with the frame
/// dimensions, so a render in flight is unaffected by later viewport edits.
/// Sampling follows one fixed law: the world coordinate of a row's first
/// column comes straight from the row index, and the walk along the row
/// advances the real part by one step per column. The law never depends on
/// which rows were visited earlier or on which thread runs the row, so every
/// evaluation order reproduces the same coordinates bit for bit.
#[derive(Debug, Clone, Copy)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    origin: Complex,
    step: Scale,
}

impl SampleGrid {
    /// Captures the viewport's mapping for a frame of the given size.
    pub fn new(viewport: &Viewport, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin: viewport.offset,
            step: viewport.scale,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of samples in the frame.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// All samples of the frame in row-major order, columns fastest.
    pub fn samples(&self) -> impl Iterator<Item = (PixelCoord, Complex)> + '_ {
        (0..self.height).flat_map(move |row| self.row(row))
    }

    /// Walks one row, yielding each pixel with the world coordinate under it.
    ///
    /// The first sample sits at `origin + row * step.y` on the imaginary
    /// axis; later columns reuse the running real part instead of
    /// recomputing it from the column index.
    pub fn row(&self, row: u32) -> RowSamples {
        debug_assert!(row < self.height.max(1), "row {row} out of range");
        RowSamples {
            row,
            col: 0,
            width: self.width,
            re: self.origin.re,
            im: self.origin.im + f64::from(row) * self.step.y,
            step_re: self.step.x,
        }
    }
}

/// Iterator over the samples of a single grid row, in column order.
pub struct RowSamples {
    row: u32,
    col: u32,
    width: u32,
    re: f64,
    im: f64,
    step_re: f64,
}

impl Iterator for RowSamples {
    type Item = (PixelCoord, Complex);

    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.width {
            return None;
        }
        let item = (
            PixelCoord::new(self.col, self.row),
            Complex::new(self.re, self.im),
        );
        self.col += 1;
        self.re += self.step_re;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.width - self.col) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowSamples {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_yields_every_column_in_order() {
        let vp = Viewport::home(16, 16);
        let grid = SampleGrid::new(&vp, 16, 16);
        let cols: Vec<u32> = grid.row(3).map(|(p, _)| p.col).collect();
        assert_eq!(cols, (0..16).collect::<Vec<_>>());
        assert!(grid.row(3).all(|(p, _)| p.row == 3));
    }

    #[test]
    fn first_sample_matches_viewport_map_exactly() {
        let vp = Viewport::home(640, 480);
        let grid = SampleGrid::new(&vp, 640, 480);
        for row in [0, 1, 239, 479] {
            let (pixel, world) = grid.row(row).next().unwrap();
            let expected = vp.world_at(PixelCoord::new(0, row));
            assert_eq!(pixel, PixelCoord::new(0, row));
            assert_eq!(world.re.to_bits(), expected.re.to_bits());
            assert_eq!(world.im.to_bits(), expected.im.to_bits());
        }
    }

    #[test]
    fn imaginary_part_is_constant_within_a_row() {
        let vp = Viewport::home(64, 64);
        let grid = SampleGrid::new(&vp, 64, 64);
        let ims: Vec<u64> = grid.row(17).map(|(_, c)| c.im.to_bits()).collect();
        assert!(ims.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn row_walk_is_reproducible() {
        let vp = Viewport::home(101, 53);
        let grid = SampleGrid::new(&vp, 101, 53);
        let first: Vec<u64> = grid.row(29).map(|(_, c)| c.re.to_bits()).collect();
        let second: Vec<u64> = grid.row(29).map(|(_, c)| c.re.to_bits()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn row_walk_tracks_column_map_closely() {
        let vp = Viewport::home(640, 480);
        let grid = SampleGrid::new(&vp, 640, 480);
        for (pixel, world) in grid.row(100) {
            let direct = vp.world_at(pixel);
            assert!(
                (world.re - direct.re).abs() < 1e-12,
                "column {} drifted: {} vs {}",
                pixel.col,
                world.re,
                direct.re
            );
        }
    }

    #[test]
    fn snapshot_ignores_later_viewport_edits() {
        let mut vp = Viewport::home(64, 64);
        let grid = SampleGrid::new(&vp, 64, 64);
        let before: Vec<u64> = grid.row(10).map(|(_, c)| c.re.to_bits()).collect();
        vp.pan(25.0, -3.0);
        vp.zoom_about(0.5, PixelCoord::new(32, 32));
        let after: Vec<u64> = grid.row(10).map(|(_, c)| c.re.to_bits()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn unit_scale_grid_maps_pixels_one_to_one() {
        // With a unit step the map is trivially readable: every pixel lands
        // on a distinct lattice point with the row axis flipped.
        let vp = Viewport::new(Complex::ZERO, Scale::new(1.0, -1.0), 16).unwrap();
        let grid = SampleGrid::new(&vp, 10, 10);

        let samples: Vec<(PixelCoord, Complex)> = grid.samples().collect();
        assert_eq!(samples.len(), 100);
        for (pixel, world) in &samples {
            assert_eq!(world.re, f64::from(pixel.col));
            assert_eq!(world.im, -f64::from(pixel.row));
        }

        let mut worlds: Vec<(u64, u64)> = samples
            .iter()
            .map(|(_, w)| (w.re.to_bits(), w.im.to_bits()))
            .collect();
        worlds.sort_unstable();
        worlds.dedup();
        assert_eq!(worlds.len(), 100, "every pixel must map to a distinct point");
    }

    #[test]
    fn samples_walk_row_major_columns_fastest() {
        let vp = Viewport::home(8, 8);
        let grid = SampleGrid::new(&vp, 3, 2);
        let pixels: Vec<(u32, u32)> = grid.samples().map(|(p, _)| (p.row, p.col)).collect();
        assert_eq!(
            pixels,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn empty_grid_has_no_samples() {
        let vp = Viewport::home(64, 64);
        let grid = SampleGrid::new(&vp, 0, 0);
        assert_eq!(grid.pixel_count(), 0);
        assert_eq!(grid.row(0).count(), 0);
        assert_eq!(grid.samples().count(), 0);
    }

    #[test]
    fn size_hint_is_exact() {
        let vp = Viewport::home(32, 32);
        let grid = SampleGrid::new(&vp, 32, 32);
        let mut samples = grid.row(0);
        assert_eq!(samples.len(), 32);
        samples.next();
        assert_eq!(samples.len(), 31);
    }
}
