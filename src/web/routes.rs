// src/web/routes.rs
use crate::{
    state::AppState,
    web::{aluno_handlers, auth_handlers, mw_auth, mw_role, professor_handlers},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, SessionManagerLayer, SessionStore};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(auth_handlers::handle_root))
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/register", get(auth_handlers::show_register_form).post(auth_handlers::handle_register))
        .route("/logout", get(auth_handlers::handle_logout));

    // --- Dashboard do Professor ---
    let professor_routes = Router::new()
        .route("/", get(professor_handlers::show_dashboard))
        .route("/salas", post(professor_handlers::handle_create_classroom))
        .route("/salas/{id}/arquivar", post(professor_handlers::handle_set_archived))
        .route_layer(middleware::from_fn(mw_role::require_professor));

    // --- Dashboard do Aluno ---
    let aluno_routes = Router::new()
        .route("/", get(aluno_handlers::show_dashboard))
        .route("/entrar", post(aluno_handlers::handle_join_classroom))
        .route_layer(middleware::from_fn(mw_role::require_aluno));

    // --- Rotas Autenticadas ---
    // require_auth corre antes dos middlewares de papel (é a camada de fora)
    let authenticated_routes = Router::new()
        .nest("/professor", professor_routes)
        .nest("/aluno", aluno_routes)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}

/// Router completo com tracing e sessões (cookie assinado com `key`).
pub fn create_app<S>(app_state: AppState, session_store: S, key: Key) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_signed(key);

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
