//! Navigation collaborator and explicit location history

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// The closed set of places control can move to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }

    /// Resolve a path, falling back to the login page for unknown paths
    pub fn from_path(path: &str) -> Self {
        match path {
            "#employee/bills" => Route::Bills,
            "#employee/bill/new" => Route::NewBill,
            "#admin/dashboard" => Route::Dashboard,
            _ => Route::Login,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Moves control to another view; rendering is the implementor's business
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<F> Navigator for F
where
    F: Fn(Route) + Send + Sync,
{
    fn navigate(&self, route: Route) {
        self(route)
    }
}

/// Navigator that ignores every request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _route: Route) {}
}

/// Current and previous locations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct History {
    current: Option<Route>,
    previous: Option<Route>,
}

/// Navigation state threaded through the handlers
///
/// Keeps the current and previous locations next to the navigator instead of
/// in a process-wide variable. Clones share the same history, so a context
/// handed from one handler to the next remembers where the user came from.
#[derive(Clone)]
pub struct NavigationContext {
    navigator: Arc<dyn Navigator>,
    history: Arc<RwLock<History>>,
}

impl NavigationContext {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            history: Arc::new(RwLock::new(History::default())),
        }
    }

    /// Navigate and record the move
    pub fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigating");
        {
            let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
            history.previous = history.current.replace(route);
        }
        self.navigator.navigate(route);
    }

    pub fn current(&self) -> Option<Route> {
        self.snapshot().current
    }

    pub fn previous(&self) -> Option<Route> {
        self.snapshot().previous
    }

    fn snapshot(&self) -> History {
        *self.history.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.snapshot();
        f.debug_struct("NavigationContext")
            .field("current", &history.current)
            .field("previous", &history.previous)
            .finish()
    }
}
