use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Unable to resolve image: {0}")]
    ResolutionFailure(String),
    #[error("{0} is not set")]
    MissingEnv(&'static str),
    #[error("Content store returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Document failed validation: {0}")]
    Validation(String),
    #[error("Error performing HTTP request")]
    Http(#[from] reqwest::Error),
    #[error("Error performing IO")]
    Io(#[from] std::io::Error),
    #[error("Error reading or writing JSON: {0}")]
    Json(#[from] serde_json::Error),
}
