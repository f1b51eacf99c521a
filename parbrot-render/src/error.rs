use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("export io: {0}")]
    Io(#[from] std::io::Error),

    #[error("png encoding: {0}")]
    Png(#[from] png::EncodingError),
}
