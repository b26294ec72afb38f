//! Typed error handling for the billed core
//!
//! Every failure is scoped to the single user action that triggered it.
//! Callers match on the category they care about instead of a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`FormatError`]: malformed raw values (recovered locally by the list service)
//! - [`ReceiptError`]: receipt input validation, raised before any network call
//! - [`RepositoryError`]: remote persistence failures, propagated and never retried
//! - [`SessionError`]: missing or malformed current-user entry
//! - [`SubmissionError`]: operations on a closed bill submission
//! - [`ConfigError`]: configuration parsing
//!
//! A missing repository is not an error: listing operations return `Ok(None)`.
//!
//! # Example
//!
//! ```rust,ignore
//! match submission.stage_file(file).await {
//!     Ok(staged) => preview(&staged.file_url),
//!     Err(BilledError::Receipt(ReceiptError::InvalidFileType { .. })) => {
//!         reset_file_input();
//!         alert(err.user_message());
//!     }
//!     Err(e) => show_error(e.user_message()),
//! }
//! ```

use thiserror::Error;

/// The main error type for the billed core
#[derive(Debug, Error)]
pub enum BilledError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BilledError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BilledError::Format(e) => e.error_code(),
            BilledError::Receipt(e) => e.error_code(),
            BilledError::Repository(e) => e.error_code(),
            BilledError::Session(e) => e.error_code(),
            BilledError::Submission(e) => e.error_code(),
            BilledError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Text shown to the user for this error
    ///
    /// Repository failures carry the backend's own message so the error page
    /// can display it verbatim.
    pub fn user_message(&self) -> String {
        match self {
            BilledError::Receipt(ReceiptError::InvalidFileType { .. }) => {
                "Ce type de fichier n'est pas autorisé".to_string()
            }
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Format Errors
// =============================================================================

/// Errors raised by the display formatters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The raw value is not a calendar date
    #[error("invalid date '{raw}'")]
    InvalidDate { raw: String },
}

impl FormatError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FormatError::InvalidDate { .. } => "INVALID_DATE",
        }
    }
}

// =============================================================================
// Receipt Errors
// =============================================================================

/// Errors related to the uploaded receipt file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// The MIME type is not in the allow-list
    #[error("file type '{mime_type}' is not allowed for '{file_name}'")]
    InvalidFileType { file_name: String, mime_type: String },
}

impl ReceiptError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ReceiptError::InvalidFileType { .. } => "INVALID_FILE_TYPE",
        }
    }
}

// =============================================================================
// Repository Errors
// =============================================================================

/// Errors reported by a [`BillRepository`](crate::core::repository::BillRepository)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No record matches the selector
    #[error("bill '{selector}' not found")]
    NotFound { selector: String },

    /// The remote answered with an error status
    #[error("{message}")]
    Status { code: u16, message: String },

    /// The payload could not be encoded or decoded
    #[error("invalid bill payload: {message}")]
    InvalidPayload { message: String },

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RepositoryError::NotFound { .. } => "BILL_NOT_FOUND",
            RepositoryError::Status { .. } => "REMOTE_ERROR",
            RepositoryError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            RepositoryError::Backend(_) => "BACKEND_ERROR",
        }
    }

    /// Build a status error with the conventional "Erreur <code>" message
    pub fn status(code: u16) -> Self {
        RepositoryError::Status {
            code,
            message: format!("Erreur {}", code),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::InvalidPayload {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors related to the current-user session entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Nothing stored under the key
    #[error("no '{key}' entry in session")]
    MissingEntry { key: String },

    /// The stored entry is not a valid user
    #[error("invalid session user: {message}")]
    InvalidUser { message: String },
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::MissingEntry { .. } => "SESSION_MISSING",
            SessionError::InvalidUser { .. } => "SESSION_INVALID",
        }
    }
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Errors related to the bill submission state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The submission was already finalized or abandoned
    #[error("bill submission is already {state}")]
    Closed { state: String },
}

impl SubmissionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SubmissionError::Closed { .. } => "SUBMISSION_CLOSED",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}
