//! Error types for the Toolcrib kiosk

use thiserror::Error;

/// Stable error codes for the kiosk error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    StorageCorruption = 2,
    UnknownReference = 3,
    DuplicateKey = 4,
    ValidationError = 5,
    ImportRowMalformed = 6,
    IoFailure = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Taxonomy code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::UnknownReference,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Duplicate(_) => ErrorCode::DuplicateKey,
            AppError::Io(_) => ErrorCode::IoFailure,
            AppError::Serialization(_) => ErrorCode::StorageCorruption,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(validation_message(&errors))
    }
}

/// Flatten validator errors into a single user-facing message
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => parts.push(message.to_string()),
                None => parts.push(format!("Invalid value for {field}")),
            }
        }
    }
    parts.join(" ")
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_taxonomy_codes() {
        assert_eq!(AppError::NotFound("x".into()).code(), ErrorCode::UnknownReference);
        assert_eq!(AppError::Validation("x".into()).code(), ErrorCode::ValidationError);
        assert_eq!(AppError::Duplicate("x".into()).code(), ErrorCode::DuplicateKey);

        let io = AppError::Io(std::io::Error::other("disk gone"));
        assert_eq!(io.code(), ErrorCode::IoFailure);

        let parse = serde_json::from_str::<Vec<i32>>("{").unwrap_err();
        assert_eq!(AppError::Serialization(parse).code(), ErrorCode::StorageCorruption);
    }

    #[test]
    fn codes_are_stable_values() {
        assert_eq!(ErrorCode::Success as u32, 0);
        assert_eq!(ErrorCode::StorageCorruption as u32, 2);
        assert_eq!(ErrorCode::IoFailure as u32, 7);
    }
}
