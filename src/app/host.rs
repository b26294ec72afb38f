//! Application host holding the collaborators
//!
//! The host owns everything the services need: configuration, the bill
//! repository, the session store and the navigator. Services are handed out
//! already wired, so the presentation layer never reaches for ambient state.

use crate::config::BilledConfig;
use crate::core::bill::Bill;
use crate::core::error::{BilledError, SessionError};
use crate::core::navigation::{NavigationContext, Navigator};
use crate::core::repository::BillRepository;
use crate::core::session::{CurrentUser, SessionStore};
use crate::services::{
    AdminReviewService, BillListService, BillSubmission, ReviewBoard, ReviewExclusion,
};
use std::sync::Arc;

/// Configured application core
pub struct BilledApp {
    /// Effective configuration
    pub config: Arc<BilledConfig>,

    /// Remote bill persistence, absent when no store is configured
    pub repository: Option<Arc<dyn BillRepository>>,

    /// Session written by the login flow
    pub session: Arc<dyn SessionStore>,

    /// Where navigation requests go
    pub navigator: Arc<dyn Navigator>,

    navigation: NavigationContext,
}

impl BilledApp {
    pub fn new(
        config: Arc<BilledConfig>,
        repository: Option<Arc<dyn BillRepository>>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let navigation = NavigationContext::new(navigator.clone());
        Self {
            config,
            repository,
            session,
            navigator,
            navigation,
        }
    }

    /// The logged-in user, read from the session
    pub fn current_user(&self) -> Result<CurrentUser, SessionError> {
        CurrentUser::from_store(self.session.as_ref())
    }

    /// Navigation context shared by every service this app hands out
    pub fn navigation(&self) -> NavigationContext {
        self.navigation.clone()
    }

    pub fn bill_list(&self) -> BillListService {
        BillListService::new(self.repository.clone())
    }

    /// Start a new-bill submission for the logged-in user
    ///
    /// Returns `Ok(None)` when no repository is configured.
    pub fn new_submission(&self) -> Result<Option<BillSubmission>, BilledError> {
        let Some(repository) = &self.repository else {
            return Ok(None);
        };
        let user = self.current_user()?;

        Ok(Some(BillSubmission::new(
            repository.clone(),
            user,
            self.config.clone(),
            self.navigation(),
        )))
    }

    pub fn admin_review(&self) -> AdminReviewService {
        AdminReviewService::new(self.repository.clone(), self.navigation())
    }

    /// Dashboard exclusion rule for the logged-in admin
    pub fn review_exclusion(&self) -> Result<ReviewExclusion, SessionError> {
        let user = self.current_user()?;
        Ok(ReviewExclusion::from_config(&self.config.review, user.email))
    }

    /// Dashboard state over `bills` for the logged-in admin
    pub fn review_board(&self, bills: Vec<Bill>) -> Result<ReviewBoard, SessionError> {
        Ok(ReviewBoard::new(bills, self.review_exclusion()?))
    }
}
