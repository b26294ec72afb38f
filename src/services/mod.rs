//! Bill services consumed by the presentation layer

pub mod bill_list;
pub mod review;
pub mod submission;

pub use bill_list::BillListService;
pub use review::{
    AdminReviewService, BillCard, ReviewBoard, ReviewExclusion, Selection, filter_by_status,
    status_for_section,
};
pub use submission::{BillSubmission, StagedReceipt, SubmissionState};
