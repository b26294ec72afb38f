//! AppBuilder for fluent wiring of the billed core

use super::host::BilledApp;
use crate::config::BilledConfig;
use crate::core::navigation::{Navigator, NoopNavigator};
use crate::core::repository::BillRepository;
use crate::core::session::SessionStore;
use anyhow::Result;
use std::sync::Arc;

/// Builder for [`BilledApp`]
///
/// # Example
///
/// ```ignore
/// let app = AppBuilder::new()
///     .with_config(BilledConfig::from_yaml_file("billed.yaml")?)
///     .with_repository(InMemoryBillRepository::new())
///     .with_session_store(session)
///     .with_navigator(|route| router.show(route))
///     .build()?;
/// ```
#[derive(Default)]
pub struct AppBuilder {
    config: Option<BilledConfig>,
    repository: Option<Arc<dyn BillRepository>>,
    session: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` instead of the defaults
    pub fn with_config(mut self, config: BilledConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the bill repository
    ///
    /// Optional: without one, listings return `None` and no submission can start.
    pub fn with_repository(mut self, repository: impl BillRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Share an existing repository handle
    pub fn with_shared_repository(mut self, repository: Arc<dyn BillRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the session store (required)
    pub fn with_session_store(mut self, session: impl SessionStore + 'static) -> Self {
        self.session = Some(Arc::new(session));
        self
    }

    /// Set the navigator; navigation requests are dropped when unset
    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    pub fn build(self) -> Result<BilledApp> {
        let session = self.session.ok_or_else(|| {
            anyhow::anyhow!("SessionStore is required. Call .with_session_store()")
        })?;

        let config = self.config.unwrap_or_default();
        tracing::debug!(
            has_repository = self.repository.is_some(),
            exclude_test_fixtures = config.review.exclude_test_fixtures,
            "building billed app"
        );

        Ok(BilledApp::new(
            Arc::new(config),
            self.repository,
            session,
            self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
        ))
    }
}
