//! Shared test harness for the billed services
//!
//! Provides bill fixtures, a `RecordingRepository` that logs every call and can
//! be told to fail, a `RecordingNavigator`, and log capture through a
//! `tracing-subscriber` writer.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod repository_contract;

use async_trait::async_trait;
use billed::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A bill with the given id, owner, date and status code
pub fn bill(id: &str, email: &str, date: &str, status: &str) -> Bill {
    serde_json::from_value(json!({
        "id": id,
        "email": email,
        "type": "Hôtel et logement",
        "name": "encore",
        "amount": 400,
        "date": date,
        "vat": "80",
        "pct": 20,
        "commentary": "séminaire billed",
        "fileUrl": "https://test.storage.tld/v0/b/billable.jpg",
        "fileName": "preview-facture-free-201801-pdf-1.jpg",
        "status": status,
    }))
    .expect("fixture bill")
}

/// Four bills from a@a, one per date between 2001 and 2004
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        bill("47qAXb6fIm2zOKkLzMro", "a@a", "2004-04-04", "pending"),
        bill("BeKy5Mo4jkmdfPGYpTxZ", "a@a", "2001-01-01", "refused"),
        bill("UIUZtnPQvnbFnB0ozvJh", "a@a", "2003-03-03", "accepted"),
        bill("qcCK3SzECmaZAGRrHjaC", "a@a", "2002-02-02", "refused"),
    ]
}

pub fn employee() -> CurrentUser {
    CurrentUser::new(UserType::Employee, "employee@test.tld").expect("fixture user")
}

pub fn admin() -> CurrentUser {
    CurrentUser::new(UserType::Admin, "admin@company.tld").expect("fixture user")
}

pub fn new_bill_form() -> NewBillForm {
    NewBillForm {
        expense_type: "Transports".to_string(),
        name: "Vol Paris Londres".to_string(),
        amount: 348,
        date: "2022-04-22".to_string(),
        vat: "70".to_string(),
        pct: Some(20),
        commentary: "déplacement client".to_string(),
    }
}

// ---------------------------------------------------------------------------
// RecordingRepository
// ---------------------------------------------------------------------------

/// One call received by the repository
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryCall {
    List,
    Create { email: String, file_name: String },
    Update { selector: Option<String>, data: String },
    Delete { selector: String },
}

/// Repository operation names used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

/// In-memory repository that records calls and can fail on demand
#[derive(Clone, Default)]
pub struct RecordingRepository {
    inner: InMemoryBillRepository,
    calls: Arc<Mutex<Vec<RepositoryCall>>>,
    failures: Arc<Mutex<HashMap<Operation, RepositoryError>>>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            inner: InMemoryBillRepository::with_bills(bills),
            ..Self::default()
        }
    }

    /// Make every subsequent `operation` fail with `error`
    pub fn fail(&self, operation: Operation, error: RepositoryError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub fn heal(&self, operation: Operation) {
        self.failures.lock().unwrap().remove(&operation);
    }

    pub fn calls(&self) -> Vec<RepositoryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(Option<String>, serde_json::Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RepositoryCall::Update { selector, data } => {
                    Some((selector, serde_json::from_str(&data).expect("JSON payload")))
                }
                _ => None,
            })
            .collect()
    }

    pub fn stored(&self) -> &InMemoryBillRepository {
        &self.inner
    }

    fn record(&self, call: RepositoryCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: Operation) -> Result<(), RepositoryError> {
        match self.failures.lock().unwrap().get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BillRepository for RecordingRepository {
    async fn list(&self) -> Result<Vec<Bill>, RepositoryError> {
        self.record(RepositoryCall::List);
        self.check(Operation::List)?;
        self.inner.list().await
    }

    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedReceipt, RepositoryError> {
        self.record(RepositoryCall::Create {
            email: upload.email.clone(),
            file_name: upload.file.file_name().to_string(),
        });
        self.check(Operation::Create)?;
        self.inner.create(upload).await
    }

    async fn update(&self, selector: Option<&str>, data: &str) -> Result<Bill, RepositoryError> {
        self.record(RepositoryCall::Update {
            selector: selector.map(str::to_string),
            data: data.to_string(),
        });
        self.check(Operation::Update)?;
        self.inner.update(selector, data).await
    }

    async fn delete(&self, selector: &str) -> Result<(), RepositoryError> {
        self.record(RepositoryCall::Delete {
            selector: selector.to_string(),
        });
        self.check(Operation::Delete)?;
        self.inner.delete(selector).await
    }
}

// ---------------------------------------------------------------------------
// RecordingNavigator
// ---------------------------------------------------------------------------

/// Navigator remembering every route it was asked for
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn context(&self) -> NavigationContext {
        NavigationContext::new(Arc::new(self.clone()))
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// Buffer receiving formatted log lines
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    /// Captured lines logged at `level` ("ERROR", "WARN", ...)
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        let marker = format!(" {} ", level);
        self.contents()
            .lines()
            .filter(|line| line.contains(&marker))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture logs emitted on this thread until the guard is dropped
///
/// `#[tokio::test]` runs on a current-thread runtime, so async code awaited in
/// the test is captured too.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
