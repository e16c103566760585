use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {field}: {problem}")]
    InvalidArgument { field: String, problem: String },

    #[error("Mail transport error: {0}")]
    Smtp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(field: &str, problem: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field: field.to_string(),
            problem: problem.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "validation.invalid_argument",
            Error::Smtp(_) => "smtp.send_failed",
            Error::Io(_) => "internal.io_error",
            Error::Json(_) => "internal.json_error",
            Error::Other(_) => "internal.unexpected",
        }
    }
}
