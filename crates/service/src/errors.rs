use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid utf-8 in upload: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("csv write error: {0}")]
    Write(String),
}

impl ServiceError {
    pub fn parse(msg: impl Into<String>) -> Self { Self::Parse(msg.into()) }

    /// Malformed upload content, as opposed to a missing or unreadable payload.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Encoding(_) | Self::Parse(_))
    }
}

impl From<csv::Error> for ServiceError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
