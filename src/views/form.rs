use crate::{
    endpoints::{sessions, teachers, Backend},
    forms::{Form, Validator},
    models::{Session, Teacher},
    views::{Route, Transition, ViewError},
    SessionService,
};

/// The fields for creating or editing a session.
pub fn session_form() -> Form {
    Form::new()
        .with_field("name", &[Validator::Required])
        .with_field("date", &[Validator::Required])
        .with_field("teacher_id", &[Validator::Required, Validator::Number])
        .with_field(
            "description",
            &[Validator::Required, Validator::MaxLength(2000)],
        )
}

/// The page for creating a new session or updating an existing one.
#[derive(Debug)]
pub struct SessionFormView<'a> {
    backend: &'a Backend,
    session: &'a SessionService,
    pub form: Form,
    teachers: Vec<Teacher>,
    /// The session being edited, if we're in update mode.
    editing: Option<Session>,
    update_id: Option<u64>,
}

impl<'a> SessionFormView<'a> {
    pub fn new(backend: &'a Backend, session: &'a SessionService) -> Self {
        SessionFormView {
            backend,
            session,
            form: session_form(),
            teachers: Vec::new(),
            editing: None,
            update_id: None,
        }
    }

    /// Are we editing an existing session?
    pub fn on_update(&self) -> bool { self.update_id.is_some() }

    /// The teachers a session can be assigned to.
    pub fn teachers(&self) -> &[Teacher] { &self.teachers }

    /// Get the page ready for `url` (e.g. `/sessions/update/42`).
    ///
    /// Non-administrators get redirected back to the sessions list.
    pub async fn init(
        &mut self,
        url: &str,
    ) -> Result<Option<Route>, ViewError> {
        let (_, token) = super::credentials(self.session)?;

        self.teachers = teachers::all(self.backend, &token).await?;

        if !self.session.is_admin() {
            log::debug!("Only administrators may edit sessions");
            return Ok(Some(Route::Sessions));
        }

        self.form = session_form();
        self.editing = None;
        self.update_id = None;

        match Route::parse(url) {
            Route::SessionUpdate(id) => {
                let existing =
                    sessions::detail(self.backend, &token, id).await?;
                self.fill(&existing);
                self.update_id = Some(id);
                self.editing = Some(existing);
            },
            Route::SessionCreate => {},
            other => {
                log::warn!("\"{}\" isn't a form route ({:?})", url, other);
            },
        }

        Ok(None)
    }

    /// Create or update the session, depending on the mode.
    pub async fn submit(&mut self) -> Result<Transition, ViewError> {
        let (_, token) = super::credentials(self.session)?;

        if !self.session.is_admin() {
            return Err(ViewError::Forbidden);
        }
        if !self.form.can_submit() {
            self.form.touch_all();
            return Err(ViewError::InvalidForm);
        }

        let yoga_session = self.to_session()?;

        let message = match self.update_id {
            Some(id) => {
                sessions::update(self.backend, &token, id, &yoga_session)
                    .await?;
                log::info!("Updated session {}", id);
                "Session updated !"
            },
            None => {
                sessions::create(self.backend, &token, &yoga_session).await?;
                log::info!("Created session {:?}", yoga_session.name);
                "Session created !"
            },
        };

        Ok(Transition::with_notice(message, Route::Sessions))
    }

    fn fill(&mut self, existing: &Session) {
        // dates come back as timestamps but the date picker wants YYYY-MM-DD
        let date = existing.date.get(..10).unwrap_or(&existing.date);

        let values = [
            ("name", existing.name.clone()),
            ("date", date.to_string()),
            ("teacher_id", existing.teacher_id.to_string()),
            ("description", existing.description.clone()),
        ];

        for (name, value) in values {
            if let Some(field) = self.form.field_mut(name) {
                field.input(value);
            }
        }
    }

    fn to_session(&self) -> Result<Session, ViewError> {
        let teacher_id = self
            .form
            .value("teacher_id")
            .parse()
            .map_err(|_| ViewError::InvalidForm)?;
        let users = self
            .editing
            .as_ref()
            .map(|existing| existing.users.clone())
            .unwrap_or_default();

        Ok(Session {
            id: self.update_id,
            name: self.form.value("name").to_string(),
            description: self.form.value("description").to_string(),
            date: self.form.value("date").to_string(),
            teacher_id,
            users,
            created_at: None,
            updated_at: None,
        })
    }
}
