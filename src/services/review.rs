//! Administrator review: dashboard filtering and accept/refuse transitions

use crate::config::ReviewConfig;
use crate::core::bill::{Bill, BillStatus};
use crate::core::error::RepositoryError;
use crate::core::format::format_date;
use crate::core::navigation::{NavigationContext, Route};
use crate::core::repository::BillRepository;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Ownership rule applied when filtering the dashboard
///
/// When `enabled` is false the rule is skipped entirely and only the status
/// is compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewExclusion {
    pub enabled: bool,
    pub current_user_email: String,
    pub excluded_emails: HashSet<String>,
}

impl ReviewExclusion {
    /// Build the rule for `current_user_email` from the review configuration
    pub fn from_config(config: &ReviewConfig, current_user_email: impl Into<String>) -> Self {
        Self {
            enabled: config.exclude_test_fixtures,
            current_user_email: current_user_email.into(),
            excluded_emails: config.excluded_emails.iter().cloned().collect(),
        }
    }

    /// A rule that excludes nobody
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn excludes(&self, email: &str) -> bool {
        self.enabled && (email == self.current_user_email || self.excluded_emails.contains(email))
    }
}

/// Bills with `status` whose owner is not excluded
pub fn filter_by_status(
    bills: &[Bill],
    status: BillStatus,
    exclusion: &ReviewExclusion,
) -> Vec<Bill> {
    bills
        .iter()
        .filter(|bill| bill.status == status.as_str() && !exclusion.excludes(&bill.email))
        .cloned()
        .collect()
}

/// Dashboard section index (1-based) to status
pub fn status_for_section(index: usize) -> Option<BillStatus> {
    match index {
        1 => Some(BillStatus::Pending),
        2 => Some(BillStatus::Accepted),
        3 => Some(BillStatus::Refused),
        _ => None,
    }
}

/// Summary shown for one bill in a dashboard section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillCard {
    pub bill_id: String,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub amount: i64,
    pub date: String,
    pub expense_type: String,
}

impl BillCard {
    /// Names come from the email local part: `first.last@…` splits on the dot,
    /// otherwise the whole local part is the last name.
    pub fn from_bill(bill: &Bill) -> Self {
        let local = bill.email.split('@').next().unwrap_or_default();
        let (first_name, last_name) = match local.split_once('.') {
            Some((first, rest)) => (first, rest.split('.').next().unwrap_or_default()),
            None => ("", local),
        };

        Self {
            bill_id: bill.id.clone(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            name: bill.name.clone(),
            amount: bill.amount,
            date: format_date(&bill.date).unwrap_or_else(|_| bill.date.clone()),
            expense_type: bill.expense_type.clone(),
        }
    }
}

/// Accepts or refuses bills on behalf of an administrator
pub struct AdminReviewService {
    repository: Option<Arc<dyn BillRepository>>,
    navigation: NavigationContext,
}

impl AdminReviewService {
    pub fn new(repository: Option<Arc<dyn BillRepository>>, navigation: NavigationContext) -> Self {
        Self {
            repository,
            navigation,
        }
    }

    pub fn navigation(&self) -> &NavigationContext {
        &self.navigation
    }

    /// Every user's bills, unformatted; `Ok(None)` without a repository
    pub async fn get_bills_all_users(&self) -> Result<Option<Vec<Bill>>, RepositoryError> {
        match &self.repository {
            Some(repository) => Ok(Some(repository.list().await?)),
            None => Ok(None),
        }
    }

    /// Mark a bill accepted and return to the dashboard
    pub async fn accept(
        &mut self,
        bill: &Bill,
        comment: &str,
    ) -> Result<Option<Bill>, RepositoryError> {
        self.review(bill, BillStatus::Accepted, comment).await
    }

    /// Mark a bill refused and return to the dashboard
    pub async fn refuse(
        &mut self,
        bill: &Bill,
        comment: &str,
    ) -> Result<Option<Bill>, RepositoryError> {
        self.review(bill, BillStatus::Refused, comment).await
    }

    async fn review(
        &mut self,
        bill: &Bill,
        status: BillStatus,
        comment: &str,
    ) -> Result<Option<Bill>, RepositoryError> {
        let Some(repository) = &self.repository else {
            return Ok(None);
        };

        if bill.status() != Some(BillStatus::Pending) {
            tracing::warn!(
                bill_id = %bill.id,
                from = %bill.status,
                to = %status,
                "reviewing a bill that is not pending"
            );
        }

        let reviewed = bill.reviewed(status, comment);
        let data = serde_json::to_string(&reviewed)?;
        let updated = repository
            .update(Some(&bill.id), &data)
            .await
            .inspect_err(|e| {
                tracing::error!(bill_id = %bill.id, error = %e, "review update failed")
            })?;

        tracing::info!(bill_id = %updated.id, status = %status, "bill reviewed");
        self.navigation.navigate(Route::Dashboard);

        Ok(Some(updated))
    }
}

/// What happened to the edit form after a card click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The form shows this bill
    Opened(Bill),
    /// The form was closed
    Closed,
}

/// Presentation state of the admin dashboard
///
/// Tracks which status sections are expanded and which bill is open in the
/// edit form. Holds data only; rendering is left to the caller.
#[derive(Debug, Clone)]
pub struct ReviewBoard {
    bills: Vec<Bill>,
    exclusion: ReviewExclusion,
    open_sections: HashMap<BillStatus, bool>,
    selected: Option<String>,
}

impl ReviewBoard {
    pub fn new(bills: Vec<Bill>, exclusion: ReviewExclusion) -> Self {
        Self {
            bills,
            exclusion,
            open_sections: HashMap::new(),
            selected: None,
        }
    }

    pub fn is_open(&self, status: BillStatus) -> bool {
        self.open_sections.get(&status).copied().unwrap_or(false)
    }

    /// Bills shown in a section, whether or not it is open
    pub fn section(&self, status: BillStatus) -> Vec<Bill> {
        filter_by_status(&self.bills, status, &self.exclusion)
    }

    /// Flip a section; returns its cards when it opens, `None` when it closes
    pub fn toggle_section(&mut self, status: BillStatus) -> Option<Vec<BillCard>> {
        let open = !self.is_open(status);
        self.open_sections.insert(status, open);

        open.then(|| self.section(status).iter().map(BillCard::from_bill).collect())
    }

    /// Open a bill in the edit form, or close the form if it already shows it
    pub fn select(&mut self, bill_id: &str) -> Selection {
        if self.selected.as_deref() == Some(bill_id) {
            self.selected = None;
            return Selection::Closed;
        }

        match self.bills.iter().find(|bill| bill.id == bill_id) {
            Some(bill) => {
                self.selected = Some(bill_id.to_string());
                Selection::Opened(bill.clone())
            }
            None => {
                self.selected = None;
                Selection::Closed
            }
        }
    }

    pub fn selected(&self) -> Option<&Bill> {
        let id = self.selected.as_deref()?;
        self.bills.iter().find(|bill| bill.id == id)
    }
}
