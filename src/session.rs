use crate::subject::{Receiver, Subject, Subscription};
use serde_derive::{Deserialize, Serialize};
use std::cell::RefCell;

/// The profile the backend hands back after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInformation {
    pub id: u64,
    #[serde(default)]
    pub token: String,
    /// The token type, typically `"Bearer"`.
    #[serde(rename = "type", default)]
    pub token_type: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

/// Whether somebody is logged in and, if so, who they are.
///
/// There should be one of these per application instance, shared by
/// reference with everything that needs to know about the current user.
/// Being logged in is derived from having a [`SessionInformation`], so the
/// two can never disagree.
#[derive(Debug)]
pub struct SessionService {
    information: RefCell<Option<SessionInformation>>,
    logged: Subject<bool>,
}

impl SessionService {
    pub fn new() -> Self {
        SessionService {
            information: RefCell::new(None),
            logged: Subject::new(false),
        }
    }

    pub fn is_logged(&self) -> bool { self.information.borrow().is_some() }

    /// The current user's profile, if there is one.
    pub fn session_information(&self) -> Option<SessionInformation> {
        self.information.borrow().clone()
    }

    /// Is the current user an administrator?
    pub fn is_admin(&self) -> bool {
        self.information
            .borrow()
            .as_ref()
            .map(|info| info.admin)
            .unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<u64> {
        self.information.borrow().as_ref().map(|info| info.id)
    }

    pub fn token(&self) -> Option<String> {
        self.information.borrow().as_ref().map(|info| info.token.clone())
    }

    /// Remember `info` as the current user and tell every subscriber we are
    /// logged in.
    ///
    /// Logging in again replaces the stored profile and still notifies
    /// subscribers, even though the logged-in flag doesn't change.
    pub fn log_in(&self, info: SessionInformation) {
        log::info!("Logged in as {} (admin: {})", info.username, info.admin);

        *self.information.borrow_mut() = Some(info);
        self.next();
    }

    /// Forget the current user and tell every subscriber we are logged out.
    pub fn log_out(&self) {
        if let Some(info) = self.information.borrow_mut().take() {
            log::info!("Logged out {}", info.username);
        }

        self.next();
    }

    /// Get told whether we are logged in, starting with the current state
    /// and then every time [`SessionService::log_in()`] or
    /// [`SessionService::log_out()`] is called.
    pub fn subscribe<F>(&self, mut observer: F) -> Subscription
    where
        F: FnMut(bool) + 'static,
    {
        self.logged.subscribe(move |logged: &bool| observer(*logged))
    }

    /// Like [`SessionService::subscribe()`], but values are queued up to be
    /// read later.
    pub fn watch(&self) -> Receiver<bool> { self.logged.watch() }

    fn next(&self) { self.logged.next(self.is_logged()); }
}

impl Default for SessionService {
    fn default() -> Self { SessionService::new() }
}

#[cfg(test)]
pub(crate) fn profile(
    id: u64,
    username: &str,
    admin: bool,
) -> SessionInformation {
    SessionInformation {
        id,
        token: format!("token-{}", id),
        token_type: String::from("Bearer"),
        username: String::from(username),
        first_name: String::from("Test"),
        last_name: String::from("User"),
        admin,
    }
}
