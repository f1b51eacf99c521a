use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rayon::prelude::*;

use parbrot_core::{evaluate_row, SampleGrid};

use crate::color::color_for;
use crate::error::RenderError;
use crate::sink::PixelSink;

/// Evaluate and color one row, pushing its pixels into the sink.
fn color_row(grid: &SampleGrid, row: u32, max_count: u32, sink: &dyn PixelSink) {
    for res in evaluate_row(grid, row, max_count) {
        sink.write(res.pixel, color_for(res.count, max_count));
    }
}

/// A row scheduling policy.
///
/// Implementations hand every row of the grid to the shared row evaluator
/// exactly once and decide only the order and the threads. Because each row
/// funnels through the same evaluator and color map, the frames every
/// strategy produces are identical byte for byte: swapping strategies at
/// runtime is a scheduling experiment that changes wall-clock time, never
/// output.
pub trait GridStrategy: Sync {
    fn run(&self, grid: &SampleGrid, max_count: u32, sink: &dyn PixelSink);
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

/// All rows in order on the calling thread.
pub struct Sequential;

impl GridStrategy for Sequential {
    fn run(&self, grid: &SampleGrid, max_count: u32, sink: &dyn PixelSink) {
        for row in 0..grid.height() {
            color_row(grid, row, max_count, sink);
        }
    }
}

/// Scoped worker threads pulling rows from a shared counter.
///
/// Each worker claims the next unevaluated row when it finishes its current
/// one, so rows that cross the slow set interior never stall the rest of the
/// pool. The pool size follows the machine's available parallelism, capped
/// at the row count.
pub struct RowParallel;

impl GridStrategy for RowParallel {
    fn run(&self, grid: &SampleGrid, max_count: u32, sink: &dyn PixelSink) {
        let rows = grid.height() as usize;
        if rows == 0 {
            return;
        }
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(rows);
        let next_row = AtomicUsize::new(0);
        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let row = next_row.fetch_add(1, Ordering::Relaxed);
                    if row >= rows {
                        break;
                    }
                    color_row(grid, row as u32, max_count, sink);
                });
            }
        });
    }
}

/// Rayon's work-stealing scheduler mapped over the row index range.
pub struct IndexParallel;

impl GridStrategy for IndexParallel {
    fn run(&self, grid: &SampleGrid, max_count: u32, sink: &dyn PixelSink) {
        (0..grid.height())
            .into_par_iter()
            .for_each(|row| color_row(grid, row, max_count, sink));
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Identifies one of the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Sequential,
    RowParallel,
    IndexParallel,
}

/// Registry row tying a strategy to its command-line key and display label.
pub struct StrategyEntry {
    pub kind: StrategyKind,
    pub key: &'static str,
    pub label: &'static str,
    pub strategy: &'static dyn GridStrategy,
}

/// Built-in strategies, in presentation order.
pub static REGISTRY: [StrategyEntry; 3] = [
    StrategyEntry {
        kind: StrategyKind::Sequential,
        key: "sequential",
        label: "single-threaded row sweep",
        strategy: &Sequential,
    },
    StrategyEntry {
        kind: StrategyKind::RowParallel,
        key: "row-parallel",
        label: "worker pool with a dynamic row queue",
        strategy: &RowParallel,
    },
    StrategyEntry {
        kind: StrategyKind::IndexParallel,
        key: "index-parallel",
        label: "rayon parallel iterator over row indices",
        strategy: &IndexParallel,
    },
];

impl StrategyKind {
    /// Resolve a command-line key like `row-parallel`.
    pub fn from_key(key: &str) -> crate::Result<Self> {
        REGISTRY
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.kind)
            .ok_or_else(|| RenderError::UnknownStrategy(key.to_string()))
    }

    pub fn key(self) -> &'static str {
        self.entry().key
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn strategy(self) -> &'static dyn GridStrategy {
        self.entry().strategy
    }

    fn entry(self) -> &'static StrategyEntry {
        match self {
            StrategyKind::Sequential => &REGISTRY[0],
            StrategyKind::RowParallel => &REGISTRY[1],
            StrategyKind::IndexParallel => &REGISTRY[2],
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
