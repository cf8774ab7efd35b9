// src/web/mod.rs
use crate::error::{AppError, AppResult};
use askama::Template;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

pub mod aluno_handlers;
pub mod auth_handlers;
pub mod mw_auth;
pub mod mw_role;
pub mod professor_handlers;
pub mod routes;

// Mensagens de feedback passadas na query string (padrão Post/Redirect/Get)
#[derive(Deserialize, Debug, Default)]
pub struct FeedbackParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

pub fn redirect_with_success(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{}?success={}", path, urlencoding::encode(message)))
}

pub fn redirect_with_error(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{}?error={}", path, urlencoding::encode(message)))
}

/// Renderiza um template Askama; falha de renderização vira erro interno.
pub fn render_page<T: Template>(template: &T) -> AppResult<Response> {
    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}
