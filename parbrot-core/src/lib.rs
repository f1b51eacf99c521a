pub mod complex;
pub mod error;
pub mod escape;
pub mod grid;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use escape::{escape_count, evaluate_row, IterationResult};
pub use grid::{PixelCoord, SampleGrid};
pub use viewport::{Scale, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
