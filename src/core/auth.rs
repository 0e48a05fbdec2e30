//! Sign-in and sign-out through the backend's auth session.
//!
//! Successful calls return the session the backend now reports, so the UI
//! can update before (or without) an auth-change notification.

use crate::core::backend::Backend;
use crate::core::error::AuthError;
use crate::models::Session;

/// E-mail sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(())
    }
}

pub async fn sign_in<B: Backend>(
    backend: &B,
    credentials: &Credentials,
) -> Result<Option<Session>, AuthError> {
    credentials.validate()?;
    backend
        .sign_in_email(credentials.email.trim(), &credentials.password)
        .await
        .map_err(|e| AuthError::from_backend(&e))?;
    Ok(backend.current_user())
}

pub async fn sign_in_with_provider<B: Backend>(backend: &B) -> Result<Option<Session>, AuthError> {
    backend
        .sign_in_google()
        .await
        .map_err(|e| AuthError::from_backend(&e))?;
    Ok(backend.current_user())
}

pub async fn sign_out<B: Backend>(backend: &B) -> Result<(), AuthError> {
    backend
        .sign_out()
        .await
        .map_err(|e| AuthError::from_backend(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeBackend, session};

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_returns_session() {
        let backend = FakeBackend::new();
        backend.add_account("ana@example.com", "secret1", session("s1", "Ana", "vendedor"));

        let signed_in = sign_in(&backend, &credentials(" ana@example.com ", "secret1"))
            .await
            .unwrap();
        assert_eq!(signed_in.map(|s| s.uid), Some("s1".to_string()));
        assert!(backend.current_user().is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let backend = FakeBackend::new();
        backend.add_account("ana@example.com", "secret1", session("s1", "Ana", "vendedor"));

        assert_eq!(
            sign_in(&backend, &credentials("ana@example.com", "nope")).await,
            Err(AuthError::InvalidCredentials)
        );
        assert!(backend.current_user().is_none());
    }

    #[tokio::test]
    async fn test_blank_form_is_rejected_locally() {
        let backend = FakeBackend::new();
        assert_eq!(
            sign_in(&backend, &credentials("  ", "x")).await,
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            sign_in(&backend, &credentials("a@b.c", "")).await,
            Err(AuthError::MissingCredentials)
        );
    }

    #[tokio::test]
    async fn test_provider_popup() {
        let backend = FakeBackend::new();
        assert_eq!(
            sign_in_with_provider(&backend).await,
            Err(AuthError::Cancelled)
        );

        backend.set_provider_account(session("c1", "Bia", "cliente"));
        let signed_in = sign_in_with_provider(&backend).await.unwrap();
        assert_eq!(signed_in.map(|s| s.name), Some("Bia".to_string()));
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let backend = FakeBackend::new();
        backend.sign_in(session("s1", "Ana", "vendedor"));

        sign_out(&backend).await.unwrap();
        assert!(backend.current_user().is_none());
    }
}
