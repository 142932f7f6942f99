//! Background task that owns the identity provider
//!
//! The UI thread never blocks on account storage. It pushes [`AuthRequest`]s
//! down one channel and drains [`AuthEvent`]s from the other each frame.

use super::{AuthError, FederatedProvider, IdentityProvider, User};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AuthRequest {
    SignUp { email: String, password: String },
    SignIn { email: String, password: String },
    Federated(FederatedProvider),
    SignOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(User),
    SignedUp(User),
    SignedOut,
    Failed(AuthError),
}

pub struct AuthWorker;

impl AuthWorker {
    /// Spawn the worker on the current tokio runtime
    ///
    /// The task ends when the request sender is dropped.
    pub fn spawn(
        provider: Box<dyn IdentityProvider>,
    ) -> (
        mpsc::UnboundedSender<AuthRequest>,
        mpsc::UnboundedReceiver<AuthEvent>,
        JoinHandle<()>,
    ) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(Self::run(provider, event_tx, request_rx));
        (request_tx, event_rx, handle)
    }

    pub async fn run(
        mut provider: Box<dyn IdentityProvider>,
        event_tx: mpsc::UnboundedSender<AuthEvent>,
        mut request_rx: mpsc::UnboundedReceiver<AuthRequest>,
    ) {
        info!("Auth worker started");

        while let Some(request) = request_rx.recv().await {
            let event = Self::handle(provider.as_mut(), request);
            debug!("Auth event: {:?}", event);
            if event_tx.send(event).is_err() {
                // UI side is gone
                break;
            }
        }

        info!("Auth worker stopped");
    }

    fn handle(provider: &mut dyn IdentityProvider, request: AuthRequest) -> AuthEvent {
        let result = match request {
            AuthRequest::SignUp { email, password } => {
                provider.sign_up(&email, &password).map(AuthEvent::SignedUp)
            }
            AuthRequest::SignIn { email, password } => {
                provider.sign_in(&email, &password).map(AuthEvent::SignedIn)
            }
            AuthRequest::Federated(which) => {
                provider.federated_sign_in(which).map(AuthEvent::SignedIn)
            }
            AuthRequest::SignOut => provider.sign_out().map(|_| AuthEvent::SignedOut),
        };
        result.unwrap_or_else(AuthEvent::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::LocalIdentityProvider;

    #[tokio::test]
    async fn test_worker_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalIdentityProvider::open(&dir.path().join("accounts.toml")).unwrap();
        let (tx, mut rx, handle) = AuthWorker::spawn(Box::new(provider));

        tx.send(AuthRequest::SignUp {
            email: "kid@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap();
        tx.send(AuthRequest::SignOut).unwrap();
        tx.send(AuthRequest::SignIn {
            email: "kid@example.com".to_string(),
            password: "nope".to_string(),
        })
        .unwrap();
        tx.send(AuthRequest::Federated(FederatedProvider::Google)).unwrap();

        let user = User {
            email: "kid@example.com".to_string(),
            federated: None,
        };
        assert_eq!(rx.recv().await, Some(AuthEvent::SignedUp(user)));
        assert_eq!(rx.recv().await, Some(AuthEvent::SignedOut));
        assert_eq!(
            rx.recv().await,
            Some(AuthEvent::Failed(AuthError::WrongPassword))
        );
        assert_eq!(
            rx.recv().await,
            Some(AuthEvent::Failed(AuthError::FederatedUnavailable(
                FederatedProvider::Google
            )))
        );

        drop(tx);
        handle.await.unwrap();
    }
}
