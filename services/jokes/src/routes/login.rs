//! Login, registration and logout

use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use common::error::DatabaseError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    auth,
    error::{AppError, AppResult},
    models::LoginCredentials,
    state::AppState,
    validation::{DEFAULT_REDIRECT, validate_password, validate_redirect, validate_username},
    views,
};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// Raw login form; absent fields stay `None`
#[derive(Debug, Deserialize)]
pub struct LoginSubmission {
    #[serde(rename = "loginType")]
    pub login_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// Fields echoed back into the form. The password never is.
#[derive(Debug, Default, Serialize)]
struct LoginFields {
    login_type: String,
    username: String,
}

#[derive(Debug, Default, Serialize)]
struct LoginFieldErrors {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct LoginPage {
    redirect_to: String,
    fields: LoginFields,
    field_errors: LoginFieldErrors,
    form_error: Option<String>,
}

impl LoginPage {
    fn rejected(redirect_to: &str, fields: LoginFields, form_error: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.to_string(),
            fields,
            field_errors: LoginFieldErrors::default(),
            form_error: Some(form_error.into()),
        }
    }

    fn render(&self, status: StatusCode) -> Response {
        views::page(status, "login.html", self)
    }
}

/// `GET /login`
pub async fn show(Query(query): Query<LoginQuery>) -> Response {
    let page = LoginPage {
        redirect_to: query.redirect_to.unwrap_or_default(),
        ..Default::default()
    };
    page.render(StatusCode::OK)
}

/// `POST /login`
pub async fn submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginSubmission>,
) -> AppResult<Response> {
    let (Some(login_type), Some(username), Some(password), Some(redirect_to)) =
        (form.login_type, form.username, form.password, form.redirect_to)
    else {
        let page = LoginPage::rejected(DEFAULT_REDIRECT, LoginFields::default(), "Form not submitted correctly.");
        return Ok(page.render(StatusCode::BAD_REQUEST));
    };

    let redirect_to = validate_redirect(&redirect_to);
    let fields = LoginFields {
        login_type: login_type.clone(),
        username: username.clone(),
    };

    let field_errors = LoginFieldErrors {
        username: validate_username(&username).err(),
        password: validate_password(&password).err(),
    };
    if field_errors.username.is_some() || field_errors.password.is_some() {
        let page = LoginPage {
            redirect_to: redirect_to.to_string(),
            fields,
            field_errors,
            form_error: None,
        };
        return Ok(page.render(StatusCode::BAD_REQUEST));
    }

    let credentials = LoginCredentials { username, password };
    let user = match login_type.as_str() {
        "login" => match auth::login(state.users.as_ref(), &credentials).await? {
            Some(user) => user,
            None => {
                let page = LoginPage::rejected(
                    redirect_to,
                    fields,
                    "Username/Password combination is incorrect",
                );
                return Ok(page.render(StatusCode::BAD_REQUEST));
            }
        },
        "register" => {
            let taken = format!("User with username {} already exists", credentials.username);
            if state
                .users
                .find_by_username(&credentials.username)
                .await?
                .is_some()
            {
                return Ok(LoginPage::rejected(redirect_to, fields, taken).render(StatusCode::BAD_REQUEST));
            }

            // A concurrent registration can still claim the name before the insert
            match auth::register(state.users.as_ref(), &credentials).await {
                Ok(user) => user,
                Err(AppError::Database(DatabaseError::Constraint(detail))) => {
                    warn!("Registration for {} lost to a concurrent one: {}", credentials.username, detail);
                    return Ok(LoginPage::rejected(redirect_to, fields, taken).render(StatusCode::BAD_REQUEST));
                }
                Err(e) => return Err(e),
            }
        }
        _ => {
            let page = LoginPage::rejected(redirect_to, fields, "Login type invalid");
            return Ok(page.render(StatusCode::BAD_REQUEST));
        }
    };

    let jar = state.sessions.create_user_session(jar, user.id);
    Ok((jar, Redirect::to(redirect_to)).into_response())
}

/// `POST /logout`
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let auth = state.sessions.context(&jar);
    if let Some(user_id) = auth.get_user_id() {
        info!("User {} logged out", user_id);
    }

    (state.sessions.logout(jar), Redirect::to("/")).into_response()
}

/// `GET /logout`
pub async fn logout_page() -> Redirect {
    Redirect::to("/")
}
