//! Route boundaries
//!
//! A child route of the jokes layout may render its own failures instead of
//! the document-level pages. `catch` handles status-carrying errors and
//! `error` everything unexpected; declining either escalates to the
//! document boundaries in [`crate::error`].

use axum::http::StatusCode;
use serde::Serialize;
use tracing::{error, warn};

use crate::error::{AppError, Caught};

/// A link shown under a fallback message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub text: String,
}

/// What a boundary renders in place of the route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fallback {
    pub message: String,
    pub link: Option<Link>,
}

impl Fallback {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, href: impl Into<String>, text: impl Into<String>) -> Self {
        self.link = Some(Link {
            href: href.into(),
            text: text.into(),
        });
        self
    }
}

/// Per-route failure rendering
pub trait Boundary: Send + Sync {
    /// Fallback for a caught status, or the message of the error this route
    /// raises when it does not handle that status.
    fn catch(&self, caught: &Caught) -> Result<Fallback, String>;

    /// Fallback for unexpected failures; `None` defers to the document.
    fn error(&self) -> Option<Fallback> {
        Some(Fallback::message("Something went wrong"))
    }
}

/// Outcome of offering a failure to a boundary
#[derive(Debug)]
pub enum Resolved {
    /// Render this fallback inside the layout with the given status
    Fallback(StatusCode, Fallback),
    /// Let the document boundaries handle it
    Escalate(AppError),
}

/// Offer `err` to `boundary`
pub fn resolve(boundary: &dyn Boundary, err: AppError) -> Resolved {
    match err {
        AppError::Caught(caught) => match boundary.catch(&caught) {
            Ok(fallback) => Resolved::Fallback(caught.status(), fallback),
            Err(message) => {
                warn!("Unhandled caught response: {}", message);
                match boundary.error() {
                    Some(fallback) => Resolved::Fallback(StatusCode::INTERNAL_SERVER_ERROR, fallback),
                    None => Resolved::Escalate(AppError::Internal(message)),
                }
            }
        },
        AppError::LoginRequired { .. } => Resolved::Escalate(err),
        other => match boundary.error() {
            Some(fallback) => {
                error!("Route failed: {}", other);
                Resolved::Fallback(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
            None => Resolved::Escalate(other),
        },
    }
}
