// src/web/professor_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{attendance::ProfessorStats, classroom::CreateClassroomForm, profile::CurrentUser},
    services::{classroom_service, dashboard_service},
    state::AppState,
    templates::{ProfessorDashboardPage, TeacherClassroomCard},
    web::{redirect_with_error, redirect_with_success, render_page, FeedbackParams},
};
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{Redirect, Response},
};
use serde::Deserialize;

const DASHBOARD: &str = "/professor";

#[derive(Deserialize, Debug)]
pub struct ArchiveForm {
    archived: bool,
}

// GET /professor
pub async fn show_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Response> {
    tracing::debug!("GET /professor: carregando dashboard de {}", user.id);

    let (classrooms, load_error) = match classroom_service::list_classrooms_for_teacher(&state.db_pool, &user.id).await {
        Ok(list) => (list, None),
        Err(e) => {
            tracing::error!("Erro ao carregar salas de {}: {:?}", user.id, e);
            (Vec::new(), Some("Erro ao carregar salas".to_string()))
        }
    };

    // Estatísticas são acessórias: se falharem, a página abre com zeros
    let stats = match dashboard_service::professor_stats(&state.db_pool, &user.id, &classrooms).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Erro ao calcular estatísticas de {}: {:?}", user.id, e);
            ProfessorStats::default()
        }
    };

    let cards = classrooms
        .into_iter()
        .map(|c| TeacherClassroomCard {
            archived: c.archived,
            card: c.into(),
        })
        .collect();

    render_page(&ProfessorDashboardPage::new(
        user.name,
        stats,
        cards,
        params.success,
        load_error.or(params.error),
    ))
}

// POST /professor/salas
pub async fn handle_create_classroom(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<CreateClassroomForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /professor/salas: '{}' criando sala '{}'", user.id, form.name);

    match classroom_service::create_classroom(&state.db_pool, &state.codes, &user, &form).await {
        // O código só chega aos alunos através do professor, por isso vai na mensagem
        Ok(classroom) => Ok(redirect_with_success(
            DASHBOARD,
            &format!("Sala criada com sucesso! Código: {}", classroom.code),
        )),
        Err(AppError::ValidationError(msg)) => Ok(redirect_with_error(DASHBOARD, &msg)),
        Err(AppError::Forbidden) => Err(AppError::Forbidden),
        Err(e) => Ok(redirect_with_error(
            DASHBOARD,
            &format!("Erro ao criar sala: {}", e.backend_message()),
        )),
    }
}

// POST /professor/salas/{id}/arquivar
pub async fn handle_set_archived(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(classroom_id): Path<String>,
    Form(form): Form<ArchiveForm>,
) -> AppResult<Redirect> {
    classroom_service::set_archived(&state.db_pool, &user.id, &classroom_id, form.archived).await?;
    let msg = if form.archived { "Sala arquivada." } else { "Sala reativada." };
    Ok(redirect_with_success(DASHBOARD, msg))
}
