//! Sign Up and Log In logic
//!
//! Validation happens before the store is touched. Sign Up performs its
//! duplicate check and append under one writer lock, so two concurrent
//! registrations cannot both pass the check or overwrite each other's
//! record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use skinsight_common::credentials::{hash_password, verify_password, CredentialRecord, CredentialStore};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

const PASSWORD_SPECIALS: &str = "@$!%*?&#";
const MIN_PASSWORD_CHARS: usize = 8;

/// Sign Up form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Log In form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Input rejected by Sign Up or Log In
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name should contain only alphabetic characters.")]
    InvalidName,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Password is not strong enough.")]
    WeakPassword,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Email is already registered.")]
    DuplicateEmail,

    // Unknown email and wrong password read the same to the user
    #[error("Invalid email or password.")]
    UnknownEmail,

    #[error("Invalid email or password.")]
    WrongPassword,
}

/// Sign Up / Log In failure
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Account storage is unavailable. Please try again later.")]
    StoreUnavailable(#[source] skinsight_common::Error),
}

/// Check Sign Up fields; the first failing rule is reported
pub fn validate_sign_up(form: &SignUpForm) -> Result<(), ValidationError> {
    if form.name.is_empty() || !form.name.chars().all(char::is_alphabetic) {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_strong_password(&form.password) {
        return Err(ValidationError::WeakPassword);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// At least 8 characters with an uppercase letter, a digit and a special
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Account operations over a shared credential store
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    write_lock: Mutex<()>,
}

impl AccountService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Register a new account
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<(), AccountError> {
        validate_sign_up(form)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await.map_err(store_unavailable)?;

        if records.iter().any(|r| r.email == form.email) {
            return Err(ValidationError::DuplicateEmail.into());
        }

        records.push(CredentialRecord {
            email: form.email.clone(),
            name: form.name.clone(),
            password: hash_password(&form.password),
        });
        self.store.save_all(&records).await.map_err(store_unavailable)?;

        info!(email = %form.email, "Account created");
        Ok(())
    }

    /// Check credentials; returns the display name on success
    pub async fn log_in(&self, form: &LogInForm) -> Result<String, AccountError> {
        let records = self.store.load_all().await.map_err(store_unavailable)?;

        let record = records
            .into_iter()
            .find(|r| r.email == form.email)
            .ok_or(ValidationError::UnknownEmail)?;

        if !verify_password(&record.password, &form.password) {
            warn!(email = %form.email, "Log in rejected: wrong password");
            return Err(ValidationError::WrongPassword.into());
        }

        info!(email = %form.email, "Log in succeeded");
        Ok(record.name)
    }
}

fn store_unavailable(err: skinsight_common::Error) -> AccountError {
    error!("Credential store unavailable: {}", err);
    AccountError::StoreUnavailable(err)
}
