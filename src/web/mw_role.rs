// src/web/mw_role.rs
use crate::models::profile::{CurrentUser, UserType};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

// Redireciona para o dashboard do papel certo. Isto é conveniência de navegação:
// a verificação que conta está nos próprios serviços.
async fn require_role(expected: UserType, user: CurrentUser, request: Request, next: Next) -> Response {
    if user.user_type == expected {
        next.run(request).await
    } else {
        tracing::debug!(
            "Role MW: '{}' é {} mas a rota é de {}. Redirecionando.",
            user.id,
            user.user_type,
            expected
        );
        Redirect::to(user.user_type.dashboard_path()).into_response()
    }
}

/// Deve ser executado *depois* de `require_auth`.
pub async fn require_professor(Extension(user): Extension<CurrentUser>, request: Request, next: Next) -> Response {
    require_role(UserType::Professor, user, request, next).await
}

/// Deve ser executado *depois* de `require_auth`.
pub async fn require_aluno(Extension(user): Extension<CurrentUser>, request: Request, next: Next) -> Response {
    require_role(UserType::Aluno, user, request, next).await
}
