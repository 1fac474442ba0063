#[derive(Debug, thiserror::Error)]
pub enum WordbookError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("API error ({status}): {}", api_detail(.message, .error))]
    Api {
        status: u16,
        message: Option<String>,
        error: Option<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn api_detail<'a>(message: &'a Option<String>, error: &'a Option<String>) -> &'a str {
    error
        .as_deref()
        .or(message.as_deref())
        .unwrap_or("no details")
}

pub type Result<T> = std::result::Result<T, WordbookError>;
