//! Client-side form field validation.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Shown above a form that failed validation on submit.
pub const FORM_BANNER: &str = "Please fix the errors before continuing.";

/// Name of the field that gets the minimum length rule.
const PASSWORD_FIELD: &str = "password1";

const PASSWORD_MIN_LEN: usize = 8;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "pattern is a literal and covered by tests")]
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should be valid")
});

/// Represents the `type` of an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    /// Anything without a format rule.
    #[default]
    Text,
    /// `type="email"`.
    Email,
    /// `type="password"`.
    Password,
}

/// A form field as seen at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// The `name` attribute.
    pub name: &'a str,
    /// The `type` attribute.
    pub kind: InputKind,
    /// Has the `required` attribute.
    pub required: bool,
    /// The current value, untrimmed.
    pub value: &'a str,
}

/// Why a single field is invalid. Displays as the inline message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// A required field is blank.
    #[error("This field is required.")]
    Required,
    /// An email field does not look like an address.
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    /// The password is too short.
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,
}

/// Every invalid field of a form, in form order. Displays as [`FORM_BANNER`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Please fix the errors before continuing.")]
pub struct InvalidForm {
    errors: Vec<(String, FieldError)>,
}

impl InvalidForm {
    /// Returns `(field name, error)` pairs, in form order.
    #[must_use]
    pub fn errors(&self) -> &[(String, FieldError)] {
        &self.errors
    }

    /// Returns the error of the field named `name`, if it is invalid.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, error)| *error)
    }
}

/// Returns `true` if `email` looks like an email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Validates one field. The first failing rule wins.
///
/// Format rules only apply to non-blank values.
///
/// # Example
///
/// ```
/// # use moviereviews::ui::validate::{self, Field, FieldError, InputKind};
/// let field = Field { name: "email", kind: InputKind::Email, required: true, value: "ana@" };
///
/// assert_eq!(Err(FieldError::InvalidEmail), validate::field(&field));
/// ```
pub fn field(field: &Field<'_>) -> Result<(), FieldError> {
    let value = field.value.trim();

    if field.required && value.is_empty() {
        return Err(FieldError::Required);
    }

    if value.is_empty() {
        return Ok(());
    }

    if field.kind == InputKind::Email && !is_valid_email(value) {
        return Err(FieldError::InvalidEmail);
    }

    // Length as a browser counts it, in UTF-16 code units.
    if field.name == PASSWORD_FIELD && value.encode_utf16().count() < PASSWORD_MIN_LEN {
        return Err(FieldError::PasswordTooShort);
    }

    Ok(())
}

/// Validates every field of a form, as done on submit.
pub fn form(fields: &[Field<'_>]) -> Result<(), InvalidForm> {
    let errors: Vec<(String, FieldError)> = fields
        .iter()
        .filter_map(|f| field(f).err().map(|error| (f.name.to_owned(), error)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(InvalidForm { errors })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text<'a>(name: &'a str, required: bool, value: &'a str) -> Field<'a> {
        Field {
            name,
            kind: InputKind::Text,
            required,
            value,
        }
    }

    #[test]
    fn should_match_emails() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn blank_required_should_fail_first() {
        let email = Field {
            name: "email",
            kind: InputKind::Email,
            required: true,
            value: "   ",
        };

        assert_eq!(Err(FieldError::Required), field(&email));
        assert_eq!("This field is required.", FieldError::Required.to_string());
    }

    #[test]
    fn optional_blank_should_pass() {
        let email = Field {
            name: "email",
            kind: InputKind::Email,
            required: false,
            value: "",
        };

        assert_eq!(Ok(()), field(&email));
    }

    #[test]
    fn only_password1_should_need_eight_chars() {
        let short = Field {
            name: "password1",
            kind: InputKind::Password,
            required: true,
            value: "short",
        };
        assert_eq!(Err(FieldError::PasswordTooShort), field(&short));

        let confirm = Field {
            name: "password2",
            ..short
        };
        assert_eq!(Ok(()), field(&confirm));

        let long = Field {
            value: "long enough",
            ..short
        };
        assert_eq!(Ok(()), field(&long));
    }

    #[test]
    fn password_length_should_count_utf16_units() {
        let emoji = Field {
            name: "password1",
            kind: InputKind::Password,
            required: true,
            value: "🎬🎬🎬🎬",
        };
        assert_eq!(Ok(()), field(&emoji));

        let accented = Field {
            value: "contraseñ",
            ..emoji
        };
        assert_eq!(Ok(()), field(&accented));

        let short = Field {
            value: "🎬🎬🎬",
            ..emoji
        };
        assert_eq!(Err(FieldError::PasswordTooShort), field(&short));
    }

    #[test]
    fn form_should_collect_every_error() {
        let fields = [
            text("username", true, ""),
            text("bio", false, ""),
            Field {
                name: "email",
                kind: InputKind::Email,
                required: true,
                value: "nope",
            },
        ];

        let err = form(&fields).unwrap_err();

        assert_eq!(FORM_BANNER, err.to_string());
        assert_eq!(
            [
                ("username".to_owned(), FieldError::Required),
                ("email".to_owned(), FieldError::InvalidEmail)
            ],
            err.errors()
        );
        assert_eq!(None, err.get("bio"));
    }

    #[test]
    fn valid_form_should_pass() {
        assert_eq!(Ok(()), form(&[text("username", true, "ana")]));
    }
}
