use crate::{
    endpoints::{sessions, Backend},
    models::Session,
    views::ViewError,
    SessionInformation, SessionService,
};

/// The list of every upcoming session.
#[derive(Debug)]
pub struct SessionListView<'a> {
    backend: &'a Backend,
    session: &'a SessionService,
    sessions: Vec<Session>,
}

impl<'a> SessionListView<'a> {
    pub fn new(backend: &'a Backend, session: &'a SessionService) -> Self {
        SessionListView {
            backend,
            session,
            sessions: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Result<&[Session], ViewError> {
        let (_, token) = super::credentials(self.session)?;

        self.sessions = sessions::all(self.backend, &token).await?;
        log::debug!("Loaded {} sessions", self.sessions.len());

        Ok(self.sessions.as_slice())
    }

    pub fn sessions(&self) -> &[Session] { &self.sessions }

    pub fn user(&self) -> Option<SessionInformation> {
        self.session.session_information()
    }

    /// Should the "Create" button be shown?
    pub fn can_create(&self) -> bool { self.session.is_admin() }

    /// Should each session get an "Edit" button?
    pub fn can_edit(&self) -> bool { self.session.is_admin() }
}
