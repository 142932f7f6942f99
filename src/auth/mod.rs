//! Account capability
//!
//! Call sites only see [`IdentityProvider`], so the local TOML-backed provider
//! can be swapped for a hosted one without touching the UI.

pub mod local;
pub mod worker;

pub use local::LocalIdentityProvider;
pub use worker::{AuthEvent, AuthRequest, AuthWorker};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Shortest password accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 6;

/// Third-party sign-in buttons offered on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FederatedProvider {
    Google,
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FederatedProvider::Google => f.write_str("Google"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    /// Set when the account came from a federated provider
    pub federated: Option<FederatedProvider>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("That doesn't look like an email address")]
    InvalidEmail,
    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },
    #[error("An account with that email already exists")]
    EmailInUse,
    #[error("No account found for that email")]
    UserNotFound,
    #[error("Wrong password")]
    WrongPassword,
    #[error("Nobody is signed in")]
    NotSignedIn,
    #[error("{0} sign-in is not available")]
    FederatedUnavailable(FederatedProvider),
    #[error("Account storage error: {0}")]
    Storage(String),
}

/// Sign-up, sign-in and sign-out against some identity backend
pub trait IdentityProvider: Send {
    fn sign_up(&mut self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_out(&mut self) -> Result<(), AuthError>;

    fn federated_sign_in(&mut self, provider: FederatedProvider) -> Result<User, AuthError>;

    fn current_user(&self) -> Option<&User>;
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

/// Trimmed, lowercased email if it has the shape `local@domain.tld`
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    if email_regex().is_match(&email) {
        Ok(email)
    } else {
        Err(AuthError::InvalidEmail)
    }
}

pub fn check_password_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Kid@Example.COM ").unwrap(), "kid@example.com");
        assert_eq!(normalize_email("a.b@mail.school.org").unwrap(), "a.b@mail.school.org");
        assert_eq!(normalize_email("kid@example"), Err(AuthError::InvalidEmail));
        assert_eq!(normalize_email("kid.example.com"), Err(AuthError::InvalidEmail));
        assert_eq!(normalize_email("a@b@c.com"), Err(AuthError::InvalidEmail));
        assert_eq!(normalize_email(""), Err(AuthError::InvalidEmail));
    }

    #[test]
    fn test_password_strength() {
        assert!(check_password_strength("secret").is_ok());
        assert_eq!(
            check_password_strength("12345"),
            Err(AuthError::WeakPassword { min: 6 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::FederatedUnavailable(FederatedProvider::Google).to_string(),
            "Google sign-in is not available"
        );
        assert_eq!(
            AuthError::WeakPassword { min: 6 }.to_string(),
            "Password must be at least 6 characters"
        );
    }
}
