use crate::{
    endpoints::{sessions, teachers, Backend},
    models::{Session, Teacher},
    views::{Route, Transition, ViewError},
    SessionService,
};

/// A single session, its teacher, and the buttons for joining, leaving or
/// deleting it.
#[derive(Debug)]
pub struct SessionDetailView<'a> {
    backend: &'a Backend,
    session: &'a SessionService,
    session_id: u64,
    yoga_session: Option<Session>,
    teacher: Option<Teacher>,
    is_participate: bool,
}

impl<'a> SessionDetailView<'a> {
    pub fn new(
        backend: &'a Backend,
        session: &'a SessionService,
        session_id: u64,
    ) -> Self {
        SessionDetailView {
            backend,
            session,
            session_id,
            yoga_session: None,
            teacher: None,
            is_participate: false,
        }
    }

    pub fn session_id(&self) -> u64 { self.session_id }

    pub fn yoga_session(&self) -> Option<&Session> {
        self.yoga_session.as_ref()
    }

    pub fn teacher(&self) -> Option<&Teacher> { self.teacher.as_ref() }

    /// Is the current user one of the attendees?
    pub fn is_participate(&self) -> bool { self.is_participate }

    pub fn is_admin(&self) -> bool { self.session.is_admin() }

    pub fn user_id(&self) -> Option<u64> { self.session.user_id() }

    /// Fetch the session and then its teacher.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        let (user_id, token) = super::credentials(self.session)?;

        let yoga_session =
            sessions::detail(self.backend, &token, self.session_id).await?;
        let teacher =
            teachers::detail(self.backend, &token, yoga_session.teacher_id)
                .await?;

        // only replace what we show once everything has arrived
        self.is_participate = yoga_session.is_participant(user_id);
        self.yoga_session = Some(yoga_session);
        self.teacher = Some(teacher);

        Ok(())
    }

    pub async fn participate(&mut self) -> Result<(), ViewError> {
        let (user_id, token) = super::credentials(self.session)?;

        sessions::participate(self.backend, &token, self.session_id, user_id)
            .await?;

        self.load().await
    }

    pub async fn unparticipate(&mut self) -> Result<(), ViewError> {
        let (user_id, token) = super::credentials(self.session)?;

        sessions::unparticipate(self.backend, &token, self.session_id, user_id)
            .await?;

        self.load().await
    }

    /// Delete the session. Only administrators get the button for this.
    pub async fn delete(&mut self) -> Result<Transition, ViewError> {
        let (_, token) = super::credentials(self.session)?;

        if !self.session.is_admin() {
            return Err(ViewError::Forbidden);
        }

        sessions::delete(self.backend, &token, self.session_id).await?;
        log::info!("Deleted session {}", self.session_id);

        Ok(Transition::with_notice("Session deleted !", Route::Sessions))
    }

    pub fn back(&self) -> Route { Route::Back }
}
