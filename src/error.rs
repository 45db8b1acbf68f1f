use thiserror::Error;

pub const GENERIC_REQUEST_FAILURE: &str = "Failed to fetch availability";
pub const UNEXPECTED_FAILURE: &str = "An unexpected error occurred";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid booking URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    AvailabilityRequest(String),

    #[error("Unable to format {input:?}: {reason}")]
    Format { input: String, reason: String },
}

impl BookingError {
    // Empty messages are replaced so callers always get something to show.
    pub fn request(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return BookingError::AvailabilityRequest(UNEXPECTED_FAILURE.to_string());
        }
        BookingError::AvailabilityRequest(message)
    }

    pub fn format(input: &str, reason: impl Into<String>) -> Self {
        BookingError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
