//! HTML templates
//!
//! Templates are embedded at compile time and loaded once into a shared
//! minijinja environment. Names ending in `.html` are auto-escaped.

use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::Environment;
use serde::Serialize;
use tracing::error;

const TEMPLATES: &[(&str, &str)] = &[
    ("document.html", include_str!("../templates/document.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("caught.html", include_str!("../templates/caught.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("jokes/layout.html", include_str!("../templates/jokes/layout.html")),
    ("jokes/random.html", include_str!("../templates/jokes/random.html")),
    ("jokes/joke.html", include_str!("../templates/jokes/joke.html")),
    ("jokes/new.html", include_str!("../templates/jokes/new.html")),
    ("jokes/fallback.html", include_str!("../templates/jokes/fallback.html")),
];

fn environment() -> &'static Environment<'static> {
    static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();
    ENVIRONMENT.get_or_init(|| {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("Failed to compile template {name}: {e}"));
        }
        env
    })
}

/// Render the template `name` with `ctx`
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, minijinja::Error> {
    environment().get_template(name)?.render(ctx)
}

/// Render a full page with `status`. A template failure becomes a bare 500.
pub fn page<S: Serialize>(status: StatusCode, name: &str, ctx: S) -> Response {
    match render(name, ctx) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("Failed to render {}: {}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        for &(name, _) in TEMPLATES {
            assert!(environment().get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_html_is_escaped() {
        let body = render("error.html", context! { message => "<script>" }).unwrap();
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
    }
}
