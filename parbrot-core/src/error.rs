use thiserror::Error;

/// Errors originating from viewport construction.
///
/// Negative dimensions are unrepresentable (grid sizes are `u32`) and a
/// zero-sized grid is a valid degenerate input, so there is no dimension
/// variant. The mutating viewport operations clamp or reject bad input
/// instead of returning these; only `Viewport::new` and deserialization
/// surface them.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid iteration cap: {0} (must be >= 1)")]
    InvalidIterationCap(u32),

    #[error("invalid scale: ({x}, {y}) (components must be finite and non-zero)")]
    InvalidScale { x: f64, y: f64 },

    #[error("invalid offset: ({re}, {im}) (components must be finite)")]
    InvalidOffset { re: f64, im: f64 },
}
