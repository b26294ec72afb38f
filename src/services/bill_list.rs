//! Employee bill listing: fetch, format, sort

use crate::core::bill::Bill;
use crate::core::error::RepositoryError;
use crate::core::format::{format_date, format_status, parse_bill_date};
use crate::core::repository::BillRepository;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::sync::Arc;

/// Lists bills ready for display
///
/// Formatting is tolerant: a bill whose date cannot be formatted keeps its raw
/// date and the failure is logged, the rest of the batch is unaffected.
#[derive(Clone, Default)]
pub struct BillListService {
    repository: Option<Arc<dyn BillRepository>>,
}

impl BillListService {
    pub fn new(repository: Option<Arc<dyn BillRepository>>) -> Self {
        Self { repository }
    }

    /// Fetch, format and sort the bills, most recent first
    ///
    /// Returns `Ok(None)` when no repository is configured.
    pub async fn get_bills(&self) -> Result<Option<Vec<Bill>>, RepositoryError> {
        let Some(repository) = &self.repository else {
            return Ok(None);
        };

        let mut keyed: Vec<(Option<NaiveDate>, String, Bill)> = repository
            .list()
            .await?
            .into_iter()
            .map(|raw| {
                let raw_date = raw.date.clone();
                (parse_bill_date(&raw_date), raw_date, format_bill(raw))
            })
            .collect();

        keyed.sort_by(|(a_date, a_raw, _), (b_date, b_raw, _)| {
            compare_newest_first(a_date, a_raw, b_date, b_raw)
        });

        let bills: Vec<Bill> = keyed.into_iter().map(|(_, _, bill)| bill).collect();
        tracing::debug!(length = bills.len(), "listed bills");

        Ok(Some(bills))
    }
}

fn format_bill(raw: Bill) -> Bill {
    let status = format_status(&raw.status);
    match format_date(&raw.date) {
        Ok(date) => Bill { date, status, ..raw },
        Err(e) => {
            tracing::error!(error = %e, record = ?raw, "{} for {:?}", e, raw);
            Bill { status, ..raw }
        }
    }
}

/// Parseable dates descending; unparseable ones last, raw string descending
fn compare_newest_first(
    a_date: &Option<NaiveDate>,
    a_raw: &str,
    b_date: &Option<NaiveDate>,
    b_raw: &str,
) -> Ordering {
    match (a_date, b_date) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b_raw.cmp(a_raw),
    }
}
