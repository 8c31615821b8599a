use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Date/time parsing failed: {0}")]
    DateTime(#[from] chrono::ParseError),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ICS generation failed: {0}")]
    IcsGeneration(String),

    #[error("Recipe store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
