use crate::{
    endpoints::{auth, Backend},
    forms::{Form, Validator},
    models::LoginRequest,
    views::Route,
    SessionService,
};

/// The fields on the login page.
pub fn login_form() -> Form {
    Form::new()
        .with_field("email", &[Validator::Required, Validator::Email])
        .with_field("password", &[Validator::Required, Validator::MinLength(3)])
}

/// The login page.
#[derive(Debug)]
pub struct LoginView<'a> {
    backend: &'a Backend,
    session: &'a SessionService,
    pub form: Form,
    on_error: bool,
}

impl<'a> LoginView<'a> {
    pub const ERROR_MESSAGE: &'static str = "An error occurred";

    pub fn new(backend: &'a Backend, session: &'a SessionService) -> Self {
        LoginView {
            backend,
            session,
            form: login_form(),
            on_error: false,
        }
    }

    /// Did the last login attempt fail?
    pub fn on_error(&self) -> bool { self.on_error }

    /// The message to show under the form, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        if self.on_error {
            Some(LoginView::ERROR_MESSAGE)
        } else {
            None
        }
    }

    /// Try to log in with whatever is in the form.
    ///
    /// On success the profile is handed to the [`SessionService`] and we
    /// should go to the sessions list. Failures only set the error flag.
    pub async fn submit(&mut self) -> Option<Route> {
        if !self.form.can_submit() {
            self.form.touch_all();
            return None;
        }

        let request = LoginRequest {
            email: self.form.value("email").to_string(),
            password: self.form.value("password").to_string(),
        };

        match auth::login(self.backend, &request).await {
            Ok(info) => {
                self.on_error = false;
                self.session.log_in(info);
                Some(Route::Sessions)
            },
            Err(e) => {
                log::warn!("Login failed for {}: {}", request.email, e);
                self.on_error = true;
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use url::Url;

    fn backend() -> Backend {
        // nothing listens here, any request would fail
        let url = Url::parse("http://127.0.0.1:9/api/").unwrap();
        Backend::with_client(Client::new(), url)
    }

    #[tokio::test]
    async fn invalid_forms_are_never_sent() {
        let backend = backend();
        let session = SessionService::new();
        let mut view = LoginView::new(&backend, &session);
        view.form.set("email", "not an email").unwrap();

        let got = view.submit().await;

        assert_eq!(got, None);
        assert!(!view.on_error());
        assert!(view.form.field("password").unwrap().shows_error());
        assert!(!session.is_logged());
    }

    #[tokio::test]
    async fn unreachable_backends_are_reported_as_errors() {
        let backend = backend();
        let session = SessionService::new();
        let mut view = LoginView::new(&backend, &session);
        view.form
            .set_values(&[
                ("email", "yoga@studio.com"),
                ("password", "test!1234"),
            ])
            .unwrap();

        let got = view.submit().await;

        assert_eq!(got, None);
        assert_eq!(view.error_message(), Some("An error occurred"));
        assert!(!session.is_logged());
    }
}
