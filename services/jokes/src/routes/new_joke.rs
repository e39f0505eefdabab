//! New joke form: `/jokes/new`

use axum::{Form, extract::State, http::StatusCode, response::Response};
use serde::{Deserialize, Serialize};

use super::jokes::{Outlet, nest};
use crate::{
    boundary::{Boundary, Fallback},
    error::{AppError, AppResult, Caught, ErrorKind},
    models::NewJoke,
    session::AuthContext,
    state::AppState,
    validation::{validate_joke_content, validate_joke_name},
    views,
};

/// Anonymous visitors are pointed at the login page
pub struct NewJokeBoundary;

impl Boundary for NewJokeBoundary {
    fn catch(&self, caught: &Caught) -> Result<Fallback, String> {
        match caught.kind {
            ErrorKind::Unauthorized => Ok(Fallback::message(
                "You must be logged in to submit a joke. Login or signup",
            )
            .with_link("/login", "here.")),
            _ => Err(format!("Unhandled error: {}", caught.status().as_u16())),
        }
    }
}

/// Raw form submission; absent fields stay `None`
#[derive(Debug, Deserialize)]
pub struct NewJokeSubmission {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct JokeFields {
    name: String,
    content: String,
}

#[derive(Debug, Default, Serialize)]
struct JokeFieldErrors {
    name: Option<String>,
    content: Option<String>,
}

impl JokeFieldErrors {
    fn any(&self) -> bool {
        self.name.is_some() || self.content.is_some()
    }
}

/// What the form is re-rendered with after a rejected submission
#[derive(Debug, Default, Serialize)]
struct ActionData {
    fields: JokeFields,
    field_errors: JokeFieldErrors,
    form_error: Option<String>,
}

fn form_page(status: StatusCode, data: &ActionData) -> AppResult<Outlet> {
    Ok(Outlet::Page(status, views::render("jokes/new.html", data)?))
}

fn loader(auth: &AuthContext) -> AppResult<Outlet> {
    if auth.get_user_id().is_none() {
        return Err(AppError::unauthorized("Must be logged in to submit a new joke"));
    }

    form_page(StatusCode::OK, &ActionData::default())
}

async fn action(state: &AppState, auth: &AuthContext, form: NewJokeSubmission) -> AppResult<Outlet> {
    let user_id = auth.require_user_id("/jokes/new")?;

    let (Some(name), Some(content)) = (form.name, form.content) else {
        let data = ActionData {
            form_error: Some("Form not submitted correctly.".to_string()),
            ..Default::default()
        };
        return form_page(StatusCode::BAD_REQUEST, &data);
    };

    let field_errors = JokeFieldErrors {
        name: validate_joke_name(&name).err(),
        content: validate_joke_content(&content).err(),
    };

    if field_errors.any() {
        let data = ActionData {
            fields: JokeFields { name, content },
            field_errors,
            form_error: None,
        };
        return form_page(StatusCode::BAD_REQUEST, &data);
    }

    let joke = state
        .jokes
        .create(&NewJoke {
            user_id,
            name,
            content,
        })
        .await?;

    Ok(Outlet::Redirect(format!("/jokes/{}", joke.id)))
}

/// `GET /jokes/new`
pub async fn show(State(state): State<AppState>, auth: AuthContext) -> Response {
    let child = loader(&auth);
    nest(&state, &auth, &NewJokeBoundary, child).await
}

/// `POST /jokes/new`
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthContext,
    Form(form): Form<NewJokeSubmission>,
) -> Response {
    let child = action(&state, &auth, form).await;
    nest(&state, &auth, &NewJokeBoundary, child).await
}
