//! Core module containing the bill model, formatters and collaborator traits

pub mod bill;
pub mod error;
pub mod format;
pub mod navigation;
pub mod repository;
pub mod session;

pub use bill::{Bill, BillStatus, NewBillForm};
pub use error::{
    BilledError, ConfigError, FormatError, ReceiptError, RepositoryError, SessionError,
    SubmissionError,
};
pub use format::{format_date, format_status, parse_bill_date};
pub use navigation::{NavigationContext, Navigator, NoopNavigator, Route};
pub use repository::{BillRepository, CreatedReceipt, ReceiptFile, ReceiptUpload};
pub use session::{CurrentUser, SessionStore, UserType};
