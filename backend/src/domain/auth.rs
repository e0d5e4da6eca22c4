//! Credential inputs for login, registration, and password changes.
//!
//! Handlers hand raw strings to these constructors; services only ever see
//! validated values. Passwords are held in [`Zeroizing`] buffers.

use zeroize::Zeroizing;

use super::user::{Email, UserValidationError, Username};

/// Minimum length for a newly chosen password.
pub const PASSWORD_MIN: usize = 8;

/// Validation errors for credential payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// New password is shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Username or email failed validation.
    #[error(transparent)]
    User(#[from] UserValidationError),
}

impl CredentialsValidationError {
    /// Request field the error refers to, in wire casing.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername
            | Self::User(
                UserValidationError::EmptyUsername | UserValidationError::UsernameTooLong { .. },
            ) => "username",
            Self::User(
                UserValidationError::EmptyEmail
                | UserValidationError::InvalidEmail
                | UserValidationError::EmailTooLong { .. },
            ) => "email",
            Self::User(UserValidationError::InvalidId) => "id",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable snake_case code for error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::User(UserValidationError::EmptyUsername) => {
                "empty_username"
            }
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::User(UserValidationError::UsernameTooLong { .. }) => "username_too_long",
            Self::User(UserValidationError::EmptyEmail) => "empty_email",
            Self::User(UserValidationError::InvalidEmail) => "invalid_email",
            Self::User(UserValidationError::EmailTooLong { .. }) => "email_too_long",
            Self::User(UserValidationError::InvalidId) => "invalid_id",
        }
    }
}

fn new_password(raw: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if raw.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    if raw.chars().count() < PASSWORD_MIN {
        return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
    }
    Ok(Zeroizing::new(raw.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use calculator_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "hunter22").expect("valid");
/// assert_eq!(creds.username(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    ///
    /// # Errors
    /// Rejects a blank username or an empty password.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username for the account lookup.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration inputs.
    ///
    /// # Errors
    /// Propagates username and email validation failures and rejects
    /// passwords shorter than [`PASSWORD_MIN`].
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            email: Email::new(email)?,
            password: new_password(password)?,
        })
    }

    /// Requested username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated password change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    replacement: Zeroizing<String>,
}

impl PasswordChange {
    /// Validate the current and replacement passwords.
    ///
    /// # Errors
    /// Rejects an empty current password and a replacement shorter than
    /// [`PASSWORD_MIN`].
    pub fn try_from_parts(current: &str, replacement: &str) -> Result<Self, CredentialsValidationError> {
        if current.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            current: Zeroizing::new(current.to_owned()),
            replacement: new_password(replacement)?,
        })
    }

    /// Password the caller claims is current.
    #[must_use]
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Password to store.
    #[must_use]
    pub fn replacement(&self) -> &str {
        self.replacement.as_str()
    }
}
