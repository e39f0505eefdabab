//! Random joke: the index of `/jokes`

use axum::{extract::State, response::Response};
use rand::Rng;
use serde::Serialize;

use super::jokes::{Outlet, nest};
use crate::{
    boundary::{Boundary, Fallback},
    error::{AppError, AppResult, Caught, ErrorKind},
    models::Joke,
    session::AuthContext,
    state::AppState,
    views,
};

const NO_JOKES: &str = "No jokes yet. We're not joking.";

/// Empty store prompts for the first joke; there is no error fallback here
pub struct RandomJokeBoundary;

impl Boundary for RandomJokeBoundary {
    fn catch(&self, caught: &Caught) -> Result<Fallback, String> {
        match caught.kind {
            ErrorKind::NotFound => Ok(Fallback::message(caught.message.clone())
                .with_link("/jokes/new", "Write the first joke")),
            _ => Err(format!(
                "Unexpected caught response with status {}",
                caught.status().as_u16()
            )),
        }
    }

    fn error(&self) -> Option<Fallback> {
        None
    }
}

#[derive(Serialize)]
struct RandomJoke<'a> {
    joke: &'a Joke,
}

/// Pick a joke uniformly at random
pub async fn random_joke(state: &AppState) -> AppResult<Joke> {
    let count = state.jokes.count().await?;
    if count < 1 {
        return Err(AppError::not_found(NO_JOKES));
    }

    let skip = rand::thread_rng().gen_range(0..count);
    state
        .jokes
        .nth(skip)
        .await?
        .ok_or_else(|| AppError::not_found(NO_JOKES))
}

async fn loader(state: &AppState) -> AppResult<Outlet> {
    let joke = random_joke(state).await?;
    Ok(Outlet::page(views::render(
        "jokes/random.html",
        RandomJoke { joke: &joke },
    )?))
}

/// `GET /jokes`
pub async fn index(State(state): State<AppState>, auth: AuthContext) -> Response {
    let child = loader(&state).await;
    nest(&state, &auth, &RandomJokeBoundary, child).await
}
