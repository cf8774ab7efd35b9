// src/web/mw_auth.rs
use crate::{
    error::{AppError, AppResult},
    models::profile::CurrentUser,
    services::profile_service,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Chave da sessão onde fica o ID do perfil autenticado.
pub const SESSION_USER_KEY: &str = "user_id";

/// Resolve a identidade do pedido: sessão -> ID -> perfil.
/// Sessão sem perfil correspondente é limpa e tratada como anónima.
pub async fn resolve_current_user(state: &AppState, session: &Session) -> AppResult<Option<CurrentUser>> {
    let user_id = session
        .get::<String>(SESSION_USER_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("Erro ao ler sessão: {}", e)))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    match profile_service::find_profile_by_id(&state.db_pool, &user_id).await? {
        Some(profile) => Ok(Some(CurrentUser::from(&profile))),
        None => {
            tracing::warn!("Sessão aponta para perfil inexistente '{}'. Limpando sessão.", user_id);
            session
                .flush()
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao limpar sessão: {}", e)))?;
            Ok(None)
        }
    }
}

// Middleware que verifica se o utilizador está logado e põe o CurrentUser nas extensões
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let lookup = resolve_current_user(&state, &session);
    let current = match tokio::time::timeout(state.session_fetch_timeout, lookup).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::error!(
                "Autenticação MW: sessão/perfil não resolvidos em {:?}",
                state.session_fetch_timeout
            );
            return Err(AppError::SessionTimeout);
        }
    };

    match current {
        Some(user) => {
            tracing::debug!("Autenticação MW: '{}' ({}) autenticado.", user.id, user.user_type);
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Autenticação MW: não autenticado. Redirecionando para /login");
            Ok(Redirect::to("/login").into_response())
        }
    }
}
