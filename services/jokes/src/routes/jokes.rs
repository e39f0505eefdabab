//! The `/jokes` layout: header, recent jokes list and the child outlet

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::{
    boundary::{Boundary, Resolved, resolve},
    error::{AppError, AppResult},
    models::{JokeListItem, User},
    session::AuthContext,
    state::AppState,
    views,
};

/// How many jokes the list shows
pub const RECENT_JOKES: i64 = 5;

/// What a child route produced for the outlet
#[derive(Debug)]
pub enum Outlet {
    Page(StatusCode, String),
    Redirect(String),
}

impl Outlet {
    pub fn page(html: String) -> Self {
        Outlet::Page(StatusCode::OK, html)
    }
}

#[derive(Serialize)]
struct Layout<'a> {
    user: Option<User>,
    jokes: Vec<JokeListItem>,
    outlet: &'a str,
}

async fn load_layout(state: &AppState, auth: &AuthContext) -> AppResult<(Option<User>, Vec<JokeListItem>)> {
    let jokes = state.jokes.recent(RECENT_JOKES).await?;
    let user = state.sessions.get_user(state.users.as_ref(), auth).await?;
    Ok((user, jokes))
}

/// Render a child route's result inside the jokes layout.
///
/// Child failures go through `boundary` first; whatever it declines, and any
/// failure loading the layout itself, is rendered by the document boundaries.
pub async fn nest(
    state: &AppState,
    auth: &AuthContext,
    boundary: &dyn Boundary,
    child: AppResult<Outlet>,
) -> Response {
    let (status, outlet) = match child {
        Ok(Outlet::Redirect(to)) => return Redirect::to(&to).into_response(),
        Ok(Outlet::Page(status, html)) => (status, html),
        Err(err) => match resolve(boundary, err) {
            Resolved::Fallback(status, fallback) => match views::render("jokes/fallback.html", &fallback) {
                Ok(html) => (status, html),
                Err(e) => return AppError::from(e).into_response(),
            },
            Resolved::Escalate(err) => return err.into_response(),
        },
    };

    let page = load_layout(state, auth).await.and_then(|(user, jokes)| {
        let body = views::render(
            "jokes/layout.html",
            Layout {
                user,
                jokes,
                outlet: &outlet,
            },
        )?;
        Ok(body)
    });

    match page {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => err.into_response(),
    }
}
