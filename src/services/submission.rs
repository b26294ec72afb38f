//! New-bill submission lifecycle
//!
//! A submission walks `Empty → FileStaged → Finalized`, or leaves
//! `FileStaged` through `Abandoned` when the employee navigates away.
//!
//! ```text
//!            stage_file            finalize
//!   Empty ───────────────▶ FileStaged ─────────▶ Finalized
//!     │                      │   ▲  │
//!     │ finalize             │   └──┘ stage_file (replaces, deletes the old record)
//!     └──────────▶ Finalized │
//!                            └─ abandon ─▶ Abandoned (provisional record deleted)
//! ```

use crate::config::BilledConfig;
use crate::core::bill::{Bill, BillStatus, NewBillForm};
use crate::core::error::{BilledError, ReceiptError, RepositoryError, SubmissionError};
use crate::core::navigation::{NavigationContext, Route};
use crate::core::repository::{BillRepository, ReceiptFile, ReceiptUpload};
use crate::core::session::CurrentUser;
use std::fmt;
use std::sync::Arc;

/// A receipt uploaded before the bill form is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedReceipt {
    pub file_url: String,
    pub file_name: String,
    pub bill_id: String,
}

/// Where a submission stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Empty,
    FileStaged(StagedReceipt),
    Finalized(Bill),
    Abandoned,
}

impl SubmissionState {
    fn name(&self) -> &'static str {
        match self {
            SubmissionState::Empty => "empty",
            SubmissionState::FileStaged(_) => "staged",
            SubmissionState::Finalized(_) => "finalized",
            SubmissionState::Abandoned => "abandoned",
        }
    }
}

/// One employee's in-progress bill
pub struct BillSubmission {
    repository: Arc<dyn BillRepository>,
    user: CurrentUser,
    config: Arc<BilledConfig>,
    navigation: NavigationContext,
    state: SubmissionState,
}

impl BillSubmission {
    pub fn new(
        repository: Arc<dyn BillRepository>,
        user: CurrentUser,
        config: Arc<BilledConfig>,
        navigation: NavigationContext,
    ) -> Self {
        Self {
            repository,
            user,
            config,
            navigation,
            state: SubmissionState::Empty,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// The receipt currently staged, if any
    pub fn staged(&self) -> Option<&StagedReceipt> {
        match &self.state {
            SubmissionState::FileStaged(staged) => Some(staged),
            _ => None,
        }
    }

    pub fn navigation(&self) -> &NavigationContext {
        &self.navigation
    }

    /// Validate and upload a receipt, creating the provisional bill
    ///
    /// A disallowed MIME type is rejected before any repository call. Staging
    /// over an existing receipt replaces it; the superseded provisional record
    /// is deleted best-effort.
    pub async fn stage_file(&mut self, file: ReceiptFile) -> Result<StagedReceipt, BilledError> {
        self.ensure_open()?;

        if !self.config.receipts.allows(&file.mime_type) {
            tracing::warn!(
                file_name = file.file_name(),
                mime_type = %file.mime_type,
                "rejected receipt file type"
            );
            return Err(ReceiptError::InvalidFileType {
                file_name: file.file_name().to_string(),
                mime_type: file.mime_type,
            }
            .into());
        }

        let file_name = file.file_name().to_string();
        tracing::info!(file_name = %file_name, "staging receipt");

        let created = self
            .repository
            .create(ReceiptUpload {
                file,
                email: self.user.email.clone(),
            })
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to stage receipt"))?;

        let staged = StagedReceipt {
            file_url: created.file_url,
            file_name,
            bill_id: created.key,
        };

        let previous =
            std::mem::replace(&mut self.state, SubmissionState::FileStaged(staged.clone()));
        if let SubmissionState::FileStaged(superseded) = previous {
            self.delete_provisional(&superseded.bill_id).await;
        }

        Ok(staged)
    }

    /// Persist the complete bill and go back to the bill list
    ///
    /// Without a staged receipt the bill is stored with no attachment. On
    /// failure nothing navigates and the staged receipt is kept for a retry.
    pub async fn finalize(&mut self, form: NewBillForm) -> Result<Bill, BilledError> {
        self.ensure_open()?;

        let staged = self.staged();
        let pct = form.pct_or(self.config.bills.default_pct);
        let bill = Bill {
            id: staged.map(|s| s.bill_id.clone()).unwrap_or_default(),
            email: self.user.email.clone(),
            expense_type: form.expense_type,
            name: form.name,
            amount: form.amount,
            date: form.date,
            vat: form.vat,
            pct,
            commentary: form.commentary,
            file_url: staged.map(|s| s.file_url.clone()),
            file_name: staged.map(|s| s.file_name.clone()),
            status: BillStatus::Pending.as_str().to_string(),
            comment_admin: None,
        };
        let selector = staged.map(|s| s.bill_id.clone());

        let data = serde_json::to_string(&bill).map_err(RepositoryError::from)?;
        let saved = self
            .repository
            .update(selector.as_deref(), &data)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to finalize bill"))?;

        tracing::info!(bill_id = %saved.id, "bill submitted");
        self.state = SubmissionState::Finalized(saved.clone());
        self.navigation.navigate(Route::Bills);

        Ok(saved)
    }

    /// Drop the provisional bill when the employee leaves without submitting
    ///
    /// Best-effort: failures are logged and never returned.
    pub async fn abandon(&mut self) {
        let SubmissionState::FileStaged(staged) = &self.state else {
            tracing::debug!(state = self.state.name(), "nothing to clean up");
            return;
        };
        let bill_id = staged.bill_id.clone();

        self.state = SubmissionState::Abandoned;
        self.delete_provisional(&bill_id).await;
    }

    async fn delete_provisional(&self, bill_id: &str) {
        match self.repository.delete(bill_id).await {
            Ok(()) => tracing::info!(bill_id, "deleted provisional bill"),
            Err(e) => tracing::error!(bill_id, error = %e, "failed to delete provisional bill"),
        }
    }

    fn ensure_open(&self) -> Result<(), SubmissionError> {
        match &self.state {
            SubmissionState::Finalized(_) | SubmissionState::Abandoned => {
                Err(SubmissionError::Closed {
                    state: self.state.name().to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for BillSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillSubmission")
            .field("user", &self.user.email)
            .field("state", &self.state)
            .finish()
    }
}
