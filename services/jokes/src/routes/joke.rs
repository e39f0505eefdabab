//! A single joke: `/jokes/:joke_id`

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::jokes::{Outlet, nest};
use crate::{
    boundary::{Boundary, Fallback},
    error::{AppError, AppResult, Caught, ErrorKind},
    models::{Joke, is_owner},
    session::AuthContext,
    state::AppState,
    views,
};

/// Messages name the joke id from the URL
pub struct JokeBoundary<'a> {
    pub joke_id: &'a str,
}

impl Boundary for JokeBoundary<'_> {
    fn catch(&self, caught: &Caught) -> Result<Fallback, String> {
        let joke_id = self.joke_id;
        match caught.kind {
            ErrorKind::NotFound => Ok(Fallback::message(format!(
                "Could not find joke with id {joke_id}"
            ))),
            ErrorKind::Forbidden => Ok(Fallback::message(format!(
                "Sorry, but {joke_id} is not your joke."
            ))),
            ErrorKind::BadRequest => Ok(Fallback::message(
                "What you're trying to do is not allowed.",
            )),
            ErrorKind::Unauthorized => Err(format!(
                "Unhandled error: {}",
                caught.status().as_u16()
            )),
        }
    }
}

#[derive(Serialize)]
struct JokeView<'a> {
    joke: &'a Joke,
    is_owner: bool,
}

/// Form posted to the joke's action
#[derive(Debug, Deserialize)]
pub struct JokeActionForm {
    pub intent: Option<String>,
}

async fn find_joke(state: &AppState, joke_id: &str) -> AppResult<Option<Joke>> {
    match Uuid::parse_str(joke_id) {
        Ok(id) => Ok(state.jokes.find(id).await?),
        Err(_) => Ok(None),
    }
}

async fn loader(state: &AppState, auth: &AuthContext, joke_id: &str) -> AppResult<Outlet> {
    let joke = find_joke(state, joke_id)
        .await?
        .ok_or_else(|| AppError::not_found("What a joke! Not found."))?;

    let view = JokeView {
        is_owner: is_owner(&joke, auth.get_user_id()),
        joke: &joke,
    };
    Ok(Outlet::page(views::render("jokes/joke.html", view)?))
}

async fn action(
    state: &AppState,
    auth: &AuthContext,
    joke_id: &str,
    intent: &str,
) -> AppResult<Outlet> {
    let redirect_to = match Uuid::parse_str(joke_id) {
        Ok(id) => format!("/jokes/{id}"),
        Err(_) => "/jokes".to_string(),
    };
    let user_id = auth.require_user_id(&redirect_to)?;

    if intent != "delete" {
        return Err(AppError::bad_request(format!(
            "The intent {intent} is not supported"
        )));
    }

    let joke = find_joke(state, joke_id)
        .await?
        .ok_or_else(|| AppError::not_found("Can't delete what does not exist"))?;

    if !is_owner(&joke, Some(user_id)) {
        return Err(AppError::forbidden("Pssh, nice try. That's not your joke"));
    }

    state.jokes.delete(joke.id).await?;
    info!("User {} deleted joke {}", user_id, joke.id);

    Ok(Outlet::Redirect("/jokes".to_string()))
}

/// `GET /jokes/:joke_id`
pub async fn show(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(joke_id): Path<String>,
) -> Response {
    let child = loader(&state, &auth, &joke_id).await;
    nest(&state, &auth, &JokeBoundary { joke_id: &joke_id }, child).await
}

/// `POST /jokes/:joke_id`
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(joke_id): Path<String>,
    Form(form): Form<JokeActionForm>,
) -> Response {
    let intent = form.intent.unwrap_or_default();
    let child = action(&state, &auth, &joke_id, &intent).await;
    nest(&state, &auth, &JokeBoundary { joke_id: &joke_id }, child).await
}
