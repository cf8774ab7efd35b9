// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::profile::{LoginForm, Profile, RegisterForm},
    services::auth_service,
    state::AppState,
    templates::{LoginPage, RegisterPage},
    web::{mw_auth, render_page, FeedbackParams},
};
use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Autentica a sessão: novo ID (evita fixação) + ID do perfil
async fn start_session(session: &Session, profile: &Profile) -> AppResult<()> {
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert(mw_auth::SESSION_USER_KEY, &profile.id)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;
    Ok(())
}

// GET / -> dashboard do papel, ou login
pub async fn handle_root(State(state): State<AppState>, session: Session) -> AppResult<Redirect> {
    match mw_auth::resolve_current_user(&state, &session).await? {
        Some(user) => Ok(Redirect::to(user.user_type.dashboard_path())),
        None => Ok(Redirect::to("/login")),
    }
}

// GET /login
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    if let Some(user) = mw_auth::resolve_current_user(&state, &session).await? {
        tracing::debug!("GET /login: '{}' já logado, redirecionando.", user.id);
        return Ok(Redirect::to(user.user_type.dashboard_path()).into_response());
    }

    render_page(&LoginPage {
        error: params.error,
        success: params.success,
    })
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para: {}", form.email);

    match auth_service::authenticate(&state.db_pool, &form.email, &form.password).await {
        Ok(profile) => {
            start_session(&session, &profile).await?;
            tracing::info!("✅ Login bem-sucedido para: {} ({})", profile.email, profile.user_type);
            Ok(Redirect::to(profile.user_type.dashboard_path()).into_response())
        }
        Err(AppError::InvalidCredentials) => render_page(&LoginPage {
            error: Some("Email ou senha inválidos.".to_string()),
            success: None,
        }),
        Err(e) => Err(e),
    }
}

// GET /register
pub async fn show_register_form() -> AppResult<Response> {
    render_page(&RegisterPage { error: None })
}

// POST /register -> cria o perfil e já deixa a sessão autenticada
pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    tracing::info!("Registo de nova conta: {} ({})", form.email, form.user_type);

    match auth_service::register(&state.db_pool, &form).await {
        Ok(profile) => {
            start_session(&session, &profile).await?;
            Ok(Redirect::to(profile.user_type.dashboard_path()).into_response())
        }
        Err(e @ (AppError::ValidationError(_) | AppError::EmailTaken)) => render_page(&RegisterPage {
            error: Some(e.to_string()),
        }),
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<String> = session.get(mw_auth::SESSION_USER_KEY).await.ok().flatten();

    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    match user_id {
        Some(id) => tracing::info!("🚪 Utilizador '{}' desligado.", id),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }

    Ok(Redirect::to("/login"))
}
