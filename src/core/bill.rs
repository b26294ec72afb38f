//! Bill records and their status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default VAT percentage applied when the form leaves it empty
pub const DEFAULT_PCT: u32 = 20;

/// Review status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// All statuses, in dashboard section order
    pub const ALL: [BillStatus; 3] = [
        BillStatus::Pending,
        BillStatus::Accepted,
        BillStatus::Refused,
    ];

    /// Parse a wire status code
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(BillStatus::Pending),
            "accepted" => Some(BillStatus::Accepted),
            "refused" => Some(BillStatus::Refused),
            _ => None,
        }
    }

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }

    /// Human label shown in bill lists
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One expense-report record submitted by an employee
///
/// `status` stays a plain string: listing replaces it with a display label and
/// unknown codes must survive untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default = "default_pct")]
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

fn default_pct() -> u32 {
    DEFAULT_PCT
}

impl Bill {
    /// Typed status, `None` for codes outside the lifecycle
    pub fn status(&self) -> Option<BillStatus> {
        BillStatus::parse(&self.status)
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.email == email
    }

    /// Copy of this bill moved to `status` with the admin's comment
    pub fn reviewed(&self, status: BillStatus, comment: &str) -> Bill {
        Bill {
            status: status.as_str().to_string(),
            comment_admin: Some(comment.to_string()),
            ..self.clone()
        }
    }
}

/// Fields typed by the employee on the new-bill form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: i64,
    pub date: String,
    pub vat: String,
    /// Empty or zero falls back to the configured default
    pub pct: Option<u32>,
    pub commentary: String,
}

impl NewBillForm {
    /// Effective percentage: a missing or zero value yields `default`
    pub fn pct_or(&self, default: u32) -> u32 {
        self.pct.filter(|pct| *pct != 0).unwrap_or(default)
    }
}
