//! Cookie sessions
//!
//! The session is a signed cookie holding the user's id. Handlers receive an
//! [`AuthContext`] resolved from it rather than reading the cookie themselves.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::SessionSettings,
    error::{AppError, AppResult},
    models::User,
    repositories::UserStore,
    state::AppState,
};

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Session configuration errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session secret must be at least {MIN_SECRET_LEN} bytes, got {0}")]
    SecretTooShort(usize),
}

/// Issues, reads and clears the session cookie
#[derive(Clone)]
pub struct SessionManager {
    key: Key,
    cookie_name: String,
    max_age: time::Duration,
    secure: bool,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(settings: &SessionSettings) -> Result<Self, SessionError> {
        let secret = settings.secret.as_bytes();
        if secret.len() < MIN_SECRET_LEN {
            return Err(SessionError::SecretTooShort(secret.len()));
        }

        Ok(Self {
            key: Key::derive_from(secret),
            cookie_name: settings.cookie_name.clone(),
            max_age: time::Duration::days(settings.max_age_days),
            secure: settings.secure,
        })
    }

    /// The key cookies are signed with
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Resolve the visitor's identity from a verified jar
    pub fn context(&self, jar: &SignedCookieJar) -> AuthContext {
        let user_id = jar
            .get(&self.cookie_name)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        AuthContext { user_id }
    }

    /// Start a session for `user_id`
    pub fn create_user_session(&self, jar: SignedCookieJar, user_id: Uuid) -> SignedCookieJar {
        info!("Creating session for user: {}", user_id);

        let cookie = Cookie::build((self.cookie_name.clone(), user_id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(self.max_age);

        jar.add(cookie)
    }

    /// End the current session
    pub fn logout(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/"))
    }

    /// The signed-in user, if the session still points at one
    pub async fn get_user(
        &self,
        users: &dyn UserStore,
        auth: &AuthContext,
    ) -> AppResult<Option<User>> {
        let Some(user_id) = auth.get_user_id() else {
            return Ok(None);
        };

        let user = users.find_by_id(user_id).await?;
        if user.is_none() {
            warn!("Session refers to missing user: {}", user_id);
        }

        Ok(user)
    }
}

/// Identity of the current request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    user_id: Option<Uuid>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn get_user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// The user id, or a login redirect that brings the visitor back to `redirect_to`
    pub fn require_user_id(&self, redirect_to: &str) -> AppResult<Uuid> {
        self.user_id.ok_or_else(|| AppError::LoginRequired {
            redirect_to: redirect_to.to_string(),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.key().clone()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_headers(&parts.headers, state.sessions.key().clone());
        Ok(state.sessions.context(&jar))
    }
}
