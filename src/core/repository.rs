//! Repository trait for remote bill persistence

use crate::core::bill::Bill;
use crate::core::error::RepositoryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A receipt file picked by the employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    /// Name as reported by the file input, possibly a full client path
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Last path segment of `name`
    ///
    /// Browsers report paths such as `C:\fakepath\receipt.jpg`.
    pub fn file_name(&self) -> &str {
        self.name
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(self.name.as_str())
    }
}

/// Multipart upload staging a receipt for the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    pub file: ReceiptFile,
    pub email: String,
}

/// What the remote returns after storing a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReceipt {
    pub file_url: String,
    /// Id of the provisional bill record
    pub key: String,
}

/// Remote persistence for bill records
///
/// Implementations talk to the backend; the core only consumes this trait.
/// Every call is a single attempt: no timeout and no retry.
#[async_trait]
pub trait BillRepository: Send + Sync {
    /// List every bill visible to the session
    async fn list(&self) -> Result<Vec<Bill>, RepositoryError>;

    /// Upload a receipt and create the provisional bill holding it
    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedReceipt, RepositoryError>;

    /// Replace a bill with the JSON-encoded `data`
    ///
    /// A `None` selector lets the backend key the record itself, which happens
    /// when a bill is finalized without a staged receipt.
    async fn update(&self, selector: Option<&str>, data: &str) -> Result<Bill, RepositoryError>;

    /// Delete a bill
    async fn delete(&self, selector: &str) -> Result<(), RepositoryError>;
}
