//! Wiring of the collaborators into ready-to-use services

pub mod builder;
pub mod host;

pub use builder::AppBuilder;
pub use host::BilledApp;
