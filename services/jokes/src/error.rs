//! Custom error types for the jokes service
//!
//! Expected conditions (missing joke, not signed in, not the owner, unknown
//! intent) travel as [`AppError::Caught`] and are mapped to a status code by
//! the route boundaries. Everything else is an unexpected failure.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::views;

/// The expected failure kinds a route can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Forbidden,
    BadRequest,
}

impl ErrorKind {
    /// HTTP status for this kind
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        }
    }
}

/// A status-carrying failure with a user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caught {
    pub kind: ErrorKind,
    pub message: String,
}

impl Caught {
    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl fmt::Display for Caught {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Custom error type for the jokes service
#[derive(Error, Debug)]
pub enum AppError {
    /// Expected failure, rendered by a boundary with its status
    #[error("{0}")]
    Caught(Caught),

    /// No session; the visitor is sent to the login page
    #[error("Login required for {redirect_to}")]
    LoginRequired { redirect_to: String },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn caught(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError::Caught(Caught {
            kind,
            message: message.into(),
        })
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::caught(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::caught(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::caught(ErrorKind::Forbidden, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::caught(ErrorKind::BadRequest, message)
    }
}

/// Login page URL that returns the visitor to `redirect_to` afterwards
pub fn login_redirect(redirect_to: &str) -> String {
    format!("/login?redirectTo={}", redirect_to)
}

#[derive(Serialize)]
struct CaughtPage {
    title: String,
}

#[derive(Serialize)]
struct ErrorPage<'a> {
    message: &'a str,
}

/// Document-level boundaries: anything a route did not handle ends up here
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::LoginRequired { redirect_to } => {
                Redirect::to(&login_redirect(&redirect_to)).into_response()
            }
            AppError::Caught(caught) => {
                let status = caught.status();
                let title = format!(
                    "{} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                );
                views::page(status, "caught.html", CaughtPage { title })
            }
            other => {
                error!("Application error: {}", other);
                let message = other.to_string();
                views::page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "error.html",
                    ErrorPage { message: &message },
                )
            }
        }
    }
}

/// Type alias for service results
pub type AppResult<T> = Result<T, AppError>;
