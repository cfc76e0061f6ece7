#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: session cleared, login required")]
    Unauthorized,

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl BookingError {
    /// True when the caller should send the user back to the login route.
    pub fn requires_login(&self) -> bool {
        matches!(self, BookingError::Unauthorized)
    }

    /// Per-field messages for a validation failure, empty for any other error.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let BookingError::Validation(errors) = self else {
            return Vec::new();
        };
        let mut out: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    (field.to_string(), message)
                })
            })
            .collect();
        out.sort();
        out
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
