use crate::{
    endpoints::{auth, Backend},
    forms::{Form, Validator},
    models::RegisterRequest,
    views::Route,
};

/// The fields on the registration page.
pub fn register_form() -> Form {
    Form::new()
        .with_field("email", &[Validator::Required, Validator::Email])
        .with_field("firstName", &name_rules())
        .with_field("lastName", &name_rules())
        .with_field(
            "password",
            &[
                Validator::Required,
                Validator::MinLength(3),
                Validator::MaxLength(40),
            ],
        )
}

fn name_rules() -> [Validator; 3] {
    [
        Validator::Required,
        Validator::MinLength(3),
        Validator::MaxLength(20),
    ]
}

/// The registration page. Registering doesn't log you in, you get sent to
/// the login page instead.
#[derive(Debug)]
pub struct RegisterView<'a> {
    backend: &'a Backend,
    pub form: Form,
    on_error: bool,
}

impl<'a> RegisterView<'a> {
    pub fn new(backend: &'a Backend) -> Self {
        RegisterView {
            backend,
            form: register_form(),
            on_error: false,
        }
    }

    pub fn on_error(&self) -> bool { self.on_error }

    pub async fn submit(&mut self) -> Option<Route> {
        if !self.form.can_submit() {
            self.form.touch_all();
            return None;
        }

        let request = RegisterRequest {
            email: self.form.value("email").to_string(),
            first_name: self.form.value("firstName").to_string(),
            last_name: self.form.value("lastName").to_string(),
            password: self.form.value("password").to_string(),
        };

        match auth::register(self.backend, &request).await {
            Ok(()) => {
                self.on_error = false;
                Some(Route::Login)
            },
            Err(e) => {
                log::warn!("Unable to register {}: {}", request.email, e);
                self.on_error = true;
                None
            },
        }
    }
}
