use super::{BLANK_FIELD, ValidationError, check_limits};

pub const USERNAME_LENGTH: &str = "Username must be between 3 and 20 characters long (inclusive)";
pub const USERNAME_CHARACTERS: &str =
    "Username must use only plain text characters (a-z, A-Z, 0-9)";
pub const PASSWORD_LENGTH: &str = "Password must be between 10 and 100 characters long (inclusive)";
pub const PASSWORD_CHARACTERS: &str = "Password must use only ASCII characters";

const USERNAME_MAX_CHARS: usize = 20;
const PASSWORD_MAX_CHARS: usize = 100;

/// Both credentials must be filled in.
///
/// # Errors
///
/// Returns [`BLANK_FIELD`] when either is empty.
pub const fn require_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.is_empty() || password.is_empty() {
        return Err(ValidationError(BLANK_FIELD));
    }
    Ok(())
}

/// Rules for a login attempt: both fields filled in and within the account limits.
///
/// # Errors
///
/// Returns the first rule the credentials break.
pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    require_credentials(username, password)?;
    check_limits(&[(username, USERNAME_MAX_CHARS), (password, PASSWORD_MAX_CHARS)])
}

/// Rules for a new account.
///
/// # Errors
///
/// Returns the first rule the credentials break.
pub fn validate_registration(username: &str, password: &str) -> Result<(), ValidationError> {
    require_credentials(username, password)?;

    if !(3..=USERNAME_MAX_CHARS).contains(&username.chars().count()) {
        return Err(ValidationError(USERNAME_LENGTH));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError(USERNAME_CHARACTERS));
    }
    if !(10..=PASSWORD_MAX_CHARS).contains(&password.chars().count()) {
        return Err(ValidationError(PASSWORD_LENGTH));
    }
    // Printable ASCII only.
    if !password.chars().all(|c| (' '..='~').contains(&c)) {
        return Err(ValidationError(PASSWORD_CHARACTERS));
    }
    Ok(())
}
