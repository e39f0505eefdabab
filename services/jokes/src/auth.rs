//! Password hashing and credential checks

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{LoginCredentials, NewUser, User},
    repositories::UserStore,
};

/// Hash a password with Argon2 and a fresh salt, returning the PHC string
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Failed to parse password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Look up the user and check the password; `None` when either is wrong
pub async fn login(users: &dyn UserStore, credentials: &LoginCredentials) -> AppResult<Option<User>> {
    let Some(user) = users.find_by_username(&credentials.username).await? else {
        warn!("Login attempt for unknown user: {}", credentials.username);
        return Ok(None);
    };

    if !verify_password(&credentials.password, &user.password_hash)? {
        warn!("Wrong password for user: {}", credentials.username);
        return Ok(None);
    }

    info!("User {} logged in", user.username);
    Ok(Some(user))
}

/// Create a user with a hashed password
pub async fn register(users: &dyn UserStore, credentials: &LoginCredentials) -> AppResult<User> {
    let new_user = NewUser {
        username: credentials.username.clone(),
        password_hash: hash_password(&credentials.password)?,
    };

    let user = users.create(&new_user).await?;
    info!("Registered user {}", user.username);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("twixrox").unwrap();
        assert_ne!(hash, "twixrox");
        assert!(verify_password("twixrox", &hash).unwrap());
        assert!(!verify_password("twixrocks", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("twixrox", "not-a-phc-string").is_err());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let user = register(&store, &credentials("kody", "twixrox")).await.unwrap();

        let logged_in = login(&store, &credentials("kody", "twixrox")).await.unwrap();
        assert_eq!(logged_in.map(|u| u.id), Some(user.id));

        assert!(login(&store, &credentials("kody", "wrong-password")).await.unwrap().is_none());
        assert!(login(&store, &credentials("nobody", "twixrox")).await.unwrap().is_none());
    }
}
