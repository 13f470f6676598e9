//! Headless versions of the application's pages.
//!
//! A view holds the state its page renders from and performs the page's
//! actions, handing back the navigation and notifications a UI should carry
//! out instead of doing them itself.

mod account;
mod detail;
mod form;
mod list;
mod login;
mod register;
mod route;

pub use account::MeView;
pub use detail::SessionDetailView;
pub use form::{session_form, SessionFormView};
pub use list::SessionListView;
pub use login::{login_form, LoginView};
pub use register::{register_form, RegisterView};
pub use route::Route;

use crate::{endpoints::EndpointError, SessionService};
use std::time::Duration;

/// A short-lived confirmation shown to the user (a "snackbar").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub action: &'static str,
    pub duration: Duration,
}

impl Notice {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

    pub fn new(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            action: "Close",
            duration: Notice::DEFAULT_DURATION,
        }
    }
}

/// What the UI should do after an action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub notice: Option<Notice>,
    pub route: Route,
}

impl Transition {
    pub fn to(route: Route) -> Self {
        Transition {
            notice: None,
            route,
        }
    }

    pub fn with_notice(message: impl Into<String>, route: Route) -> Self {
        Transition {
            notice: Some(Notice::new(message)),
            route,
        }
    }
}

/// Things that can go wrong while a view is doing its job.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Unable to talk to the backend")]
    Endpoint(#[from] EndpointError),
    #[error("You need to be logged in")]
    NotLoggedIn,
    #[error("Only administrators can do that")]
    Forbidden,
    #[error("The form is invalid")]
    InvalidForm,
    /// An action needed data which hasn't been loaded yet.
    #[error("The page hasn't finished loading")]
    NotLoaded,
}

/// The current user's id and token, or [`ViewError::NotLoggedIn`].
fn credentials(session: &SessionService) -> Result<(u64, String), ViewError> {
    match (session.user_id(), session.token()) {
        (Some(id), Some(token)) => Ok((id, token)),
        _ => Err(ViewError::NotLoggedIn),
    }
}

/// The navigation bar's "Logout" action.
pub fn log_out(session: &SessionService) -> Route {
    session.log_out();
    Route::Root
}

/// Only lets logged in users through.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AuthGuard;

impl AuthGuard {
    pub fn can_activate(self, session: &SessionService) -> Result<(), Route> {
        if session.is_logged() {
            Ok(())
        } else {
            log::debug!("Not logged in, redirecting to the login page");
            Err(Route::Login)
        }
    }
}

/// Keeps logged in users away from the login and register pages.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct UnauthGuard;

impl UnauthGuard {
    pub fn can_activate(self, session: &SessionService) -> Result<(), Route> {
        if session.is_logged() {
            Err(Route::Sessions)
        } else {
            Ok(())
        }
    }
}

/// Decide whether `route` may be shown, returning where to go instead if
/// it can't.
pub fn guard(session: &SessionService, route: Route) -> Result<Route, Route> {
    let check = if route.requires_login() {
        AuthGuard.can_activate(session)
    } else if route.requires_logged_out() {
        UnauthGuard.can_activate(session)
    } else {
        Ok(())
    };

    check.map(|_| route)
}
