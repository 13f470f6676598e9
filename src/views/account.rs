use crate::{
    endpoints::{users, Backend},
    models::User,
    views::{Route, Transition, ViewError},
    SessionService,
};

/// The "me" page, showing the current user's account.
#[derive(Debug)]
pub struct MeView<'a> {
    backend: &'a Backend,
    session: &'a SessionService,
    user: Option<User>,
}

impl<'a> MeView<'a> {
    pub fn new(backend: &'a Backend, session: &'a SessionService) -> Self {
        MeView {
            backend,
            session,
            user: None,
        }
    }

    pub async fn load(&mut self) -> Result<&User, ViewError> {
        let (user_id, token) = super::credentials(self.session)?;

        let user = users::detail(self.backend, &token, user_id).await?;

        Ok(self.user.insert(user))
    }

    pub fn user(&self) -> Option<&User> { self.user.as_ref() }

    /// Administrators can't delete their own account.
    pub fn can_delete_account(&self) -> bool {
        self.user.as_ref().map(|user| !user.admin).unwrap_or(false)
    }

    /// Delete the account and log out.
    pub async fn delete_account(&mut self) -> Result<Transition, ViewError> {
        let (user_id, token) = super::credentials(self.session)?;

        match self.user {
            Some(ref user) if user.admin => return Err(ViewError::Forbidden),
            Some(_) => {},
            None => return Err(ViewError::NotLoaded),
        }

        users::delete(self.backend, &token, user_id).await?;
        self.user = None;
        self.session.log_out();

        Ok(Transition::with_notice(
            "Your account has been deleted !",
            Route::Root,
        ))
    }

    pub fn back(&self) -> Route { Route::Back }
}
