//! Template engine for the server-rendered dashboard pages.
//!
//! Templates live in `templates/` at the project root and are compiled into the
//! binary, so the service does not depend on its working directory.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const TEMPLATES: &[(&str, &str)] = &[
    (
        "layout.html.jinja",
        include_str!("../../../templates/layout.html.jinja"),
    ),
    (
        "login.html.jinja",
        include_str!("../../../templates/login.html.jinja"),
    ),
    (
        "dashboard.html.jinja",
        include_str!("../../../templates/dashboard.html.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // `.html.jinja` is not picked up by the default extension check
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with any serializable context.
///
/// # Example
/// ```ignore
/// let html = render_page("login.html.jinja", &LoginPageContext { error: None })?;
/// ```
pub fn render_page<S: Serialize>(template_name: &str, ctx: &S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
