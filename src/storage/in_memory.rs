//! In-memory implementation of BillRepository for testing and development

use crate::core::bill::{Bill, BillStatus, DEFAULT_PCT};
use crate::core::error::RepositoryError;
use crate::core::repository::{BillRepository, CreatedReceipt, ReceiptUpload};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const DEFAULT_FILE_BASE_URL: &str = "https://localhost:3456/images";

/// In-memory bill repository
///
/// Listing returns bills in insertion order. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryBillRepository {
    bills: Arc<RwLock<IndexMap<String, Bill>>>,
    file_base_url: String,
}

impl InMemoryBillRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            bills: Arc::new(RwLock::new(IndexMap::new())),
            file_base_url: DEFAULT_FILE_BASE_URL.to_string(),
        }
    }

    /// Create a repository seeded with `bills`, keyed by their ids
    pub fn with_bills(bills: impl IntoIterator<Item = Bill>) -> Self {
        let repository = Self::new();
        if let Ok(mut stored) = repository.bills.write() {
            stored.extend(bills.into_iter().map(|bill| (bill.id.clone(), bill)));
        }
        repository
    }

    /// Base URL used to build the `fileUrl` of uploaded receipts
    pub fn with_file_base_url(mut self, url: impl Into<String>) -> Self {
        self.file_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get a bill by id
    pub fn get(&self, id: &str) -> Option<Bill> {
        self.bills.read().ok()?.get(id).cloned()
    }

    /// Number of stored bills
    pub fn len(&self) -> usize {
        self.bills.read().map(|bills| bills.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, IndexMap<String, Bill>>, RepositoryError> {
        self.bills
            .write()
            .map_err(|e| RepositoryError::Backend(format!("Failed to acquire write lock: {}", e)))
    }
}

impl Default for InMemoryBillRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillRepository for InMemoryBillRepository {
    async fn list(&self) -> Result<Vec<Bill>, RepositoryError> {
        let bills = self
            .bills
            .read()
            .map_err(|e| RepositoryError::Backend(format!("Failed to acquire read lock: {}", e)))?;

        Ok(bills.values().cloned().collect())
    }

    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedReceipt, RepositoryError> {
        let key = Uuid::new_v4().to_string();
        let file_name = upload.file.file_name().to_string();
        let file_url = format!("{}/{}/{}", self.file_base_url, key, file_name);

        let provisional = Bill {
            id: key.clone(),
            email: upload.email,
            expense_type: String::new(),
            name: String::new(),
            amount: 0,
            date: String::new(),
            vat: String::new(),
            pct: DEFAULT_PCT,
            commentary: String::new(),
            file_url: Some(file_url.clone()),
            file_name: Some(file_name),
            status: BillStatus::Pending.as_str().to_string(),
            comment_admin: None,
        };

        self.write_lock()?.insert(key.clone(), provisional);

        Ok(CreatedReceipt { file_url, key })
    }

    async fn update(&self, selector: Option<&str>, data: &str) -> Result<Bill, RepositoryError> {
        let mut bill: Bill = serde_json::from_str(data)?;
        let mut bills = self.write_lock()?;

        let key = match selector {
            Some(selector) => {
                if !bills.contains_key(selector) {
                    return Err(RepositoryError::NotFound {
                        selector: selector.to_string(),
                    });
                }
                selector.to_string()
            }
            None => Uuid::new_v4().to_string(),
        };

        bill.id = key.clone();
        bills.insert(key, bill.clone());

        Ok(bill)
    }

    async fn delete(&self, selector: &str) -> Result<(), RepositoryError> {
        self.write_lock()?
            .shift_remove(selector)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound {
                selector: selector.to_string(),
            })
    }
}
