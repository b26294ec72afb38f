//! # Billed
//!
//! Core of an employee expense-report front-end: employees list and submit
//! expense bills, administrators review and accept or refuse them.
//!
//! ## Features
//!
//! - **Tolerant Listing**: Bills are formatted for display and sorted newest
//!   first; a corrupted date never fails the batch
//! - **Receipt Lifecycle**: Stage a receipt, finalize the bill, or abandon and
//!   clean up the provisional record
//! - **Admin Review**: Status sections with ownership exclusion and
//!   accept/refuse transitions
//! - **Injected Collaborators**: Repository, session and navigation are traits
//!   handed in by the caller, never ambient globals
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billed::prelude::*;
//!
//! let app = AppBuilder::new()
//!     .with_repository(InMemoryBillRepository::new())
//!     .with_session_store(session)
//!     .with_navigator(|route: Route| println!("go to {}", route))
//!     .build()?;
//!
//! let mut submission = app.new_submission()?.expect("repository configured");
//! submission
//!     .stage_file(ReceiptFile::new("ticket.jpg", "image/jpeg", bytes))
//!     .await?;
//! submission.finalize(form).await?;
//!
//! let bills = app.bill_list().get_bills().await?;
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod services;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        bill::{Bill, BillStatus, NewBillForm},
        error::{
            BilledError, ConfigError, FormatError, ReceiptError, RepositoryError, SessionError,
            SubmissionError,
        },
        format::{format_date, format_status},
        navigation::{NavigationContext, Navigator, NoopNavigator, Route},
        repository::{BillRepository, CreatedReceipt, ReceiptFile, ReceiptUpload},
        session::{CurrentUser, SessionStore, UserType},
    };

    // === Services ===
    pub use crate::services::{
        AdminReviewService, BillCard, BillListService, BillSubmission, ReviewBoard,
        ReviewExclusion, Selection, StagedReceipt, SubmissionState, filter_by_status,
        status_for_section,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::core::session::InMemorySessionStore;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryBillRepository;

    // === App ===
    pub use crate::app::{AppBuilder, BilledApp};
    pub use crate::config::BilledConfig;
    pub use crate::telemetry::init_tracing;

    // === External dependencies ===
    pub use async_trait::async_trait;
}
