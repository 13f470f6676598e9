//! Client-side form validation.
//!
//! Each [`Field`] tracks whether the user has interacted with it and whether
//! its current value passes all of its [`Validator`]s. A [`Form`] is only
//! submittable when every field is valid.

/// A single validation rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Validator {
    Required,
    /// Must look like an email address.
    Email,
    MinLength(usize),
    MaxLength(usize),
    /// Must parse as a non-negative integer.
    Number,
}

impl Validator {
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Validator::Required => !value.is_empty(),
            // empty values are left to Required
            _ if value.is_empty() => true,
            Validator::Email => looks_like_email(value),
            Validator::MinLength(min) => value.chars().count() >= min,
            Validator::MaxLength(max) => value.chars().count() <= max,
            Validator::Number => value.parse::<u64>().is_ok(),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        },
        None => false,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Interaction {
    Pristine,
    Touched,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    value: String,
    validators: Vec<Validator>,
    interaction: Interaction,
    validity: Validity,
}

impl Field {
    pub fn new(validators: &[Validator]) -> Self {
        let mut field = Field {
            value: String::new(),
            validators: validators.to_vec(),
            interaction: Interaction::Pristine,
            validity: Validity::Invalid,
        };
        field.validate();
        field
    }

    pub fn value(&self) -> &str { &self.value }

    pub fn interaction(&self) -> Interaction { self.interaction }

    pub fn validity(&self) -> Validity { self.validity }

    pub fn is_valid(&self) -> bool { self.validity == Validity::Valid }

    /// The user typed something.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.validate();
    }

    /// The user moved focus away from the field.
    pub fn blur(&mut self) { self.interaction = Interaction::Touched; }

    /// Should this field be highlighted as being in error?
    pub fn shows_error(&self) -> bool {
        self.interaction == Interaction::Touched
            && self.validity == Validity::Invalid
    }

    fn validate(&mut self) {
        let value = &self.value;
        self.validity = if self.validators.iter().all(|v| v.accepts(value)) {
            Validity::Valid
        } else {
            Validity::Invalid
        };
    }
}

/// The form doesn't have a field with that name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("The form has no \"{name}\" field")]
pub struct UnknownField {
    pub name: String,
}

/// An ordered set of named fields.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Form {
    fields: Vec<(&'static str, Field)>,
}

impl Form {
    pub fn new() -> Self { Form::default() }

    /// Add a field, checked by `validators`.
    pub fn with_field(
        mut self,
        name: &'static str,
        validators: &[Validator],
    ) -> Self {
        self.fields.push((name, Field::new(validators)));
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, field)| field)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, field)| field)
    }

    /// The field's current value, or an empty string if there's no such
    /// field.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(Field::value).unwrap_or_default()
    }

    /// Type into a field and then leave it.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        let field = self.field_mut(name).ok_or_else(|| UnknownField {
            name: String::from(name),
        })?;

        field.input(value);
        field.blur();

        Ok(())
    }

    /// Fill in several fields at once.
    pub fn set_values(
        &mut self,
        values: &[(&str, &str)],
    ) -> Result<(), UnknownField> {
        for (name, value) in values {
            self.set(name, *value)?;
        }

        Ok(())
    }

    /// Mark every field as touched so errors become visible.
    pub fn touch_all(&mut self) {
        for (_, field) in &mut self.fields {
            field.blur();
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|(_, field)| field.is_valid())
    }

    /// Can the submit button be pressed?
    pub fn can_submit(&self) -> bool { self.is_valid() }

    /// Names of the fields currently failing validation.
    pub fn invalid_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|(_, field)| !field.is_valid())
            .map(|(name, _)| *name)
    }
}
