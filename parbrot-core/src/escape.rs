use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::grid::{PixelCoord, SampleGrid};

/// Escape count for one pixel, tagged with where it belongs on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationResult {
    pub pixel: PixelCoord,
    pub count: u32,
}

/// Iterates `z = z^2 + c` from `z = c` until the orbit leaves the radius-2
/// circle or `max_count` iterations have run.
///
/// Seeding with the sample point folds the first (trivial) iteration into
/// the seed, so a point already outside the radius-2 circle reports zero.
/// The bailout test keeps the boundary itself, `|z|^2 <= 4`, inside the
/// loop, and carrying the component squares across iterations costs three
/// multiplies per step and no square root.
///
/// A return value equal to `max_count` means the point never escaped and is
/// presumed inside the set; any smaller value is the number of iterations the
/// orbit stayed bounded. The count for an escaping point does not depend on
/// the cap, so raising `max_count` only refines points previously reported
/// at the cap.
#[inline]
pub fn escape_count(c: Complex, max_count: u32) -> u32 {
    let mut zx = c.re;
    let mut zy = c.im;
    let mut zx2 = zx * zx;
    let mut zy2 = zy * zy;
    let mut count = 0;
    while count < max_count && zx2 + zy2 <= 4.0 {
        zy = 2.0 * zx * zy + c.im;
        zx = zx2 - zy2 + c.re;
        zx2 = zx * zx;
        zy2 = zy * zy;
        count += 1;
    }
    count
}

/// Evaluates one grid row, yielding results in column order.
///
/// Every evaluation strategy funnels through this function, so the counts a
/// frame produces depend only on the grid and the cap, never on how rows
/// were scheduled across threads.
pub fn evaluate_row(
    grid: &SampleGrid,
    row: u32,
    max_count: u32,
) -> impl Iterator<Item = IterationResult> {
    grid.row(row).map(move |(pixel, c)| IterationResult {
        pixel,
        count: escape_count(c, max_count),
    })
}
