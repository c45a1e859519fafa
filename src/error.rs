use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The page writer could not produce output.
    #[error("PDF render failed: {0}")]
    RenderFailed(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error(transparent)]
    Io(std::io::Error),
}
