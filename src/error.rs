use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint `{0}`")]
    Endpoint(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("response is not a valid result record: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("PDF renderer unavailable: {0}")]
    Unavailable(String),
    #[error("failed to open PDF: {0}")]
    Parse(String),
    #[error("failed to read page {page}: {reason}")]
    Page { page: usize, reason: String },
    #[error("failed to rasterize page {page}: {reason}")]
    Rasterize { page: usize, reason: String },
    #[error("render worker stopped")]
    WorkerGone,
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("attachment content is not loaded yet")]
    NotLoaded,
    #[error("only PDF attachments can be printed")]
    NotPrintable,
    #[error("file operation failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("print command exited with {0}")]
    PrintCommand(std::process::ExitStatus),
}
