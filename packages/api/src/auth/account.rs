use crate::db::{AccountStore, StoreError};
use crate::models::{NewUser, User};

use super::password::{hash_password, verify_password, PasswordError};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Rejected input; the message is shown to the user as-is.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::Validation {
                field: "email",
                message: "An account with this email already exists",
            },
            e => AuthError::Store(e),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create an account with email and password.
pub async fn register(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
    name: &str,
) -> Result<User, AuthError> {
    let email = normalize_email(email);
    let name = name.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::Validation {
            field: "email",
            message: "Invalid email address",
        });
    }
    if password.len() < 8 {
        return Err(AuthError::Validation {
            field: "password",
            message: "Password must be at least 8 characters",
        });
    }
    if name.is_empty() {
        return Err(AuthError::Validation {
            field: "name",
            message: "Name is required",
        });
    }

    if store.find_by_email(&email).await?.is_some() {
        return Err(StoreError::DuplicateEmail.into());
    }

    let password_hash = hash_password(password)?;
    let user = store
        .create(NewUser {
            email,
            name: name.to_string(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "registered account");
    Ok(user)
}

/// Log in with email and password.
pub async fn login(store: &dyn AccountStore, email: &str, password: &str) -> Result<User, AuthError> {
    let email = normalize_email(email);

    let Some(user) = store.find_by_email(&email).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryAccountStore;

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryAccountStore::new();
        let user = register(&store, " Mari@Example.com ", "hunter2hunter2", "Mari")
            .await
            .unwrap();
        assert_eq!(user.email, "mari@example.com");

        let logged_in = login(&store, "mari@example.com", "hunter2hunter2").await.unwrap();
        assert_eq!(logged_in.id, user.id);

        assert!(matches!(
            login(&store, "mari@example.com", "wrong-password").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&store, "jaan@example.com", "hunter2hunter2").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let store = MemoryAccountStore::new();

        let cases = [
            ("not-an-email", "hunter2hunter2", "Mari", "email"),
            ("mari@example.com", "short", "Mari", "password"),
            ("mari@example.com", "hunter2hunter2", "  ", "name"),
        ];
        for (email, password, name, expected) in cases {
            match register(&store, email, password, name).await {
                Err(AuthError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation error on {expected}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let store = MemoryAccountStore::new();
        register(&store, "mari@example.com", "hunter2hunter2", "Mari")
            .await
            .unwrap();

        let err = register(&store, "MARI@example.com", "hunter2hunter2", "Mari")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "An account with this email already exists");
    }
}
