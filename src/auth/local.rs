//! Accounts kept on this machine
//!
//! Users live in `accounts.toml` in the data directory. Passwords are stored
//! as `sha256(salt || password)` in hex with a random per-user salt.

use super::{
    check_password_strength, normalize_email, AuthError, FederatedProvider, IdentityProvider, User,
};
use chrono::Utc;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SALT_BYTES: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAccount {
    salt: String,
    password_hash: String,
    created_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountsFile {
    /// Key: normalized email
    #[serde(default)]
    users: BTreeMap<String, StoredAccount>,
}

pub struct LocalIdentityProvider {
    path: PathBuf,
    accounts: AccountsFile,
    current: Option<User>,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn storage_error(e: impl std::fmt::Display) -> AuthError {
    AuthError::Storage(e.to_string())
}

fn new_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl LocalIdentityProvider {
    /// Open the accounts file at `path`; a missing file means no accounts yet
    pub fn open(path: &Path) -> Result<Self, AuthError> {
        let accounts = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| AuthError::Storage(format!("{}: {}", path.display(), e)))?;
            toml::from_str(&content)
                .map_err(|e| AuthError::Storage(format!("{}: {}", path.display(), e)))?
        } else {
            AccountsFile::default()
        };

        tracing::debug!(
            "Opened {} local accounts from {:?}",
            accounts.users.len(),
            path
        );
        Ok(Self {
            path: path.to_path_buf(),
            accounts,
            current: None,
        })
    }

    pub fn account_count(&self) -> usize {
        self.accounts.users.len()
    }

    fn persist(&self) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }
        let content = toml::to_string_pretty(&self.accounts).map_err(storage_error)?;
        fs::write(&self.path, content).map_err(storage_error)?;
        Ok(())
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn sign_up(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email)?;
        check_password_strength(password)?;
        if self.accounts.users.contains_key(&email) {
            return Err(AuthError::EmailInUse);
        }

        let salt = new_salt();
        let account = StoredAccount {
            password_hash: hash_password(&salt, password),
            salt,
            created_at: Utc::now().to_rfc3339(),
        };
        self.accounts.users.insert(email.clone(), account);
        if let Err(e) = self.persist() {
            self.accounts.users.remove(&email);
            return Err(e);
        }

        tracing::info!("Created local account {}", email);
        let user = User {
            email,
            federated: None,
        };
        self.current = Some(user.clone());
        Ok(user)
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email)?;
        let account = self
            .accounts
            .users
            .get(&email)
            .ok_or(AuthError::UserNotFound)?;

        if hash_password(&account.salt, password) != account.password_hash {
            tracing::info!("Rejected password for {}", email);
            return Err(AuthError::WrongPassword);
        }

        tracing::info!("Signed in {}", email);
        let user = User {
            email,
            federated: None,
        };
        self.current = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        match self.current.take() {
            Some(user) => {
                tracing::info!("Signed out {}", user.email);
                Ok(())
            }
            None => Err(AuthError::NotSignedIn),
        }
    }

    fn federated_sign_in(&mut self, provider: FederatedProvider) -> Result<User, AuthError> {
        tracing::warn!("{} sign-in requested but no federated backend is configured", provider);
        Err(AuthError::FederatedUnavailable(provider))
    }

    fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(dir: &tempfile::TempDir) -> LocalIdentityProvider {
        LocalIdentityProvider::open(&dir.path().join("accounts.toml")).unwrap()
    }

    #[test]
    fn test_sign_up_then_sign_in() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = provider(&dir);
        let user = p.sign_up("Kid@Example.com", "secret1").unwrap();
        assert_eq!(user.email, "kid@example.com");
        assert_eq!(p.current_user(), Some(&user));

        p.sign_out().unwrap();
        assert_eq!(p.current_user(), None);
        assert_eq!(p.sign_out(), Err(AuthError::NotSignedIn));

        // A fresh provider reads what the first one wrote
        let mut reopened = provider(&dir);
        assert_eq!(reopened.account_count(), 1);
        assert_eq!(
            reopened.sign_in("kid@example.com", "wrong!"),
            Err(AuthError::WrongPassword)
        );
        assert_eq!(reopened.sign_in("kid@example.com", "secret1").unwrap(), user);
    }

    #[test]
    fn test_sign_up_rejections() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = provider(&dir);
        assert_eq!(p.sign_up("nope", "secret1"), Err(AuthError::InvalidEmail));
        assert_eq!(
            p.sign_up("kid@example.com", "123"),
            Err(AuthError::WeakPassword { min: 6 })
        );
        p.sign_up("kid@example.com", "secret1").unwrap();
        assert_eq!(
            p.sign_up("KID@example.com", "another1"),
            Err(AuthError::EmailInUse)
        );
        assert_eq!(
            p.sign_in("other@example.com", "secret1"),
            Err(AuthError::UserNotFound)
        );
    }

    #[test]
    fn test_passwords_are_salted() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = provider(&dir);
        p.sign_up("a@example.com", "samepass").unwrap();
        p.sign_up("b@example.com", "samepass").unwrap();

        let raw = fs::read_to_string(dir.path().join("accounts.toml")).unwrap();
        assert!(!raw.contains("samepass"));
        let a = &p.accounts.users["a@example.com"];
        let b = &p.accounts.users["b@example.com"];
        assert_ne!(a.password_hash, b.password_hash);
        assert_eq!(a.password_hash.len(), 64);
    }

    #[test]
    fn test_federated_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = provider(&dir);
        assert_eq!(
            p.federated_sign_in(FederatedProvider::Google),
            Err(AuthError::FederatedUnavailable(FederatedProvider::Google))
        );
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.toml");
        fs::write(&path, "users = 5").unwrap();
        assert!(matches!(
            LocalIdentityProvider::open(&path),
            Err(AuthError::Storage(_))
        ));
    }
}
