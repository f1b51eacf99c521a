pub mod color;
pub mod error;
pub mod export;
pub mod frame;
pub mod sink;
pub mod strategy;

// Re-export primary types for convenience.
pub use color::{color_for, Rgb};
pub use error::RenderError;
pub use export::{write_png, SnapshotInfo};
pub use frame::{render_frame, FrameStats};
pub use sink::{FrameBuffer, PixelSink};
pub use strategy::{
    GridStrategy, IndexParallel, RowParallel, Sequential, StrategyEntry, StrategyKind, REGISTRY,
};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
