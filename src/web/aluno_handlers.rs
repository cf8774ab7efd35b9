// src/web/aluno_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        attendance::AlunoStats, classroom::ClassroomCard, enrollment::JoinClassroomForm, profile::CurrentUser,
    },
    services::{dashboard_service, enrollment_service},
    state::AppState,
    templates::AlunoDashboardPage,
    web::{redirect_with_error, redirect_with_success, render_page, FeedbackParams},
};
use axum::{
    extract::{Extension, Form, Query, State},
    response::{Redirect, Response},
};

const DASHBOARD: &str = "/aluno";

// GET /aluno
pub async fn show_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    tracing::debug!("GET /aluno: carregando dashboard de {}", user.id);

    let (enrollments, load_error) =
        match enrollment_service::list_enrollments_for_student(&state.db_pool, &user.id).await {
            Ok(list) => (list, None),
            Err(e) => {
                tracing::error!("Erro ao carregar matrículas de {}: {:?}", user.id, e);
                (Vec::new(), Some("Erro ao carregar salas".to_string()))
            }
        };

    // Estatísticas são acessórias: se falharem, a página abre com zeros
    let stats = match dashboard_service::aluno_stats(&state.db_pool, &user.id, &enrollments).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Erro ao calcular estatísticas de {}: {:?}", user.id, e);
            AlunoStats::default()
        }
    };
    let classrooms: Vec<ClassroomCard> = enrollments.into_iter().map(Into::into).collect();

    render_page(&AlunoDashboardPage {
        user_name: user.name,
        stats,
        classrooms,
        success_message: params.success,
        error_message: load_error.or(params.error),
    })
}

// POST /aluno/entrar
pub async fn handle_join_classroom(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<JoinClassroomForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /aluno/entrar: '{}' com código '{}'", user.id, form.code);

    match enrollment_service::join_classroom(&state.db_pool, &user, &form.code).await {
        Ok(_) => Ok(redirect_with_success(DASHBOARD, "Você entrou na sala com sucesso!")),
        Err(e @ (AppError::InvalidCode | AppError::AlreadyEnrolled)) => {
            Ok(redirect_with_error(DASHBOARD, &e.to_string()))
        }
        Err(AppError::Forbidden) => Err(AppError::Forbidden),
        Err(e) => Ok(redirect_with_error(
            DASHBOARD,
            &format!("Erro ao entrar na sala: {}", e.backend_message()),
        )),
    }
}
