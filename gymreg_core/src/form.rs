use serde::Serialize;
use thiserror::Error;

/// Everything the user has entered into the registration form. Every field
/// starts out empty and is updated one at a time as the user types or picks
/// an option. Nothing is checked across fields until `validate` is called.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Full name
    pub name: String,

    /// Email address, also used to log in later
    pub email: String,

    /// Phone number
    pub phone: String,

    /// What kind of account this is (`member`, `trainer`, …)
    pub role: String,

    /// Which gym branch the account belongs to
    pub branch: String,

    /// Plaintext password
    pub password: String,

    /// The password again, to catch typos. Never sent to the server.
    pub confirm_password: String,
}

impl FormState {
    /// Check the form and, if it's OK, take a snapshot of the fields that
    /// get sent to the server.
    ///
    /// ## Errors
    ///
    /// `ValidationError::PasswordMismatch` if the two password fields differ.
    pub fn validate(&self) -> Result<SubmissionPayload, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(SubmissionPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role.clone(),
            phone: self.phone.clone(),
            branch: self.branch.clone(),
        })
    }
}

/// The body of an account-creation request. The only way to get one is
/// `FormState::validate`, so holding one means the passwords matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    /// Full name
    name: String,

    /// Email address
    email: String,

    /// Plaintext password
    password: String,

    /// Account role
    role: String,

    /// Phone number
    phone: String,

    /// Gym branch
    branch: String,
}

/// Problems we can catch before talking to the server.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `password` and `confirm_password` are not the same.
    #[error("Passwords do not match")]
    PasswordMismatch,
}
