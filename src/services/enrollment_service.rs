// src/services/enrollment_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        enrollment::{EnrolledClassroom, Enrollment},
        profile::{CurrentUser, UserType},
    },
    services::{classroom_service, code_generator},
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Matrículas de um aluno, com os campos da sala. O filtro pelo aluno é obrigatório.
pub async fn list_enrollments_for_student(
    db_pool: &SqlitePool,
    student_id: &str,
) -> AppResult<Vec<EnrolledClassroom>> {
    tracing::debug!("Buscando matrículas do aluno {}", student_id);
    let rows = sqlx::query_as::<_, EnrolledClassroom>(
        r#"
        SELECT
            e.id AS enrollment_id,
            e.enrolled_at,
            c.id AS classroom_id,
            c.name,
            c.code,
            c.period,
            c.schedule,
            c.max_absences,
            c.total_classes
        FROM enrollments e
        JOIN classrooms c ON c.id = e.classroom_id
        WHERE e.student_id = ?1
        ORDER BY e.enrolled_at DESC, c.name ASC
        "#,
    )
    .bind(student_id)
    .fetch_all(db_pool)
    .await?;
    Ok(rows)
}

/// Quantas matrículas existem para o par (sala, aluno). Nunca mais de 1.
pub async fn count_enrollments(db_pool: &SqlitePool, classroom_id: &str, student_id: &str) -> AppResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrollments WHERE classroom_id = ?1 AND student_id = ?2",
    )
    .bind(classroom_id)
    .bind(student_id)
    .fetch_one(db_pool)
    .await?;
    Ok(count)
}

/// Insere a matrícula. A unicidade (sala, aluno) é garantida pela base de dados.
pub async fn insert_enrollment(db_pool: &SqlitePool, classroom_id: &str, student_id: &str) -> AppResult<Enrollment> {
    // ID e data gerados aqui, como nas outras tabelas
    let enrollment = Enrollment {
        id: Uuid::new_v4().to_string(),
        classroom_id: classroom_id.to_string(),
        student_id: student_id.to_string(),
        enrolled_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO enrollments (id, classroom_id, student_id, enrolled_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&enrollment.id)
    .bind(&enrollment.classroom_id)
    .bind(&enrollment.student_id)
    .bind(enrollment.enrolled_at)
    .execute(db_pool)
    .await?;

    Ok(enrollment)
}

/// Fluxo "Entrar em Sala": normaliza o código, resolve a sala e matricula o aluno.
///
/// Não há transação entre a busca e a inserção: se a sala desaparecer entretanto,
/// a falha de chave estrangeira volta como `UnknownError`.
pub async fn join_classroom(db_pool: &SqlitePool, caller: &CurrentUser, raw_code: &str) -> AppResult<Enrollment> {
    // 1. Só alunos se matriculam
    if caller.user_type != UserType::Aluno {
        tracing::warn!("'{}' ({}) tentou entrar numa sala.", caller.id, caller.user_type);
        return Err(AppError::Forbidden);
    }

    // 2. Normaliza ("abc123 " -> "ABC123") e rejeita formatos impossíveis sem ir à base
    let code = code_generator::normalize_code(raw_code);
    if !code_generator::is_valid_code(&code) {
        tracing::debug!("Código mal formatado recebido de {}: '{}'", caller.id, raw_code);
        return Err(AppError::InvalidCode);
    }

    // 3. Resolve o código. Falha da consulta != código inexistente
    let classroom_id = classroom_service::find_classroom_id_by_code(db_pool, &code)
        .await
        .map_err(|e| AppError::UnknownError(e.backend_message()))? // Erro da base
        .ok_or_else(|| {
            tracing::debug!("Nenhuma sala com código {}", code);
            AppError::InvalidCode
        })?;

    // 4. Insere; a constraint UNIQUE (sala, aluno) decide o duplicado
    match insert_enrollment(db_pool, &classroom_id, &caller.id).await {
        Ok(enrollment) => {
            tracing::info!("✅ Aluno {} matriculado na sala {} ({})", caller.id, classroom_id, code);
            Ok(enrollment)
        }
        // Já matriculado (mesmo que por outra grafia do código)
        Err(e) if e.is_unique_violation() => {
            tracing::info!("Aluno {} já matriculado na sala {}", caller.id, classroom_id);
            Err(AppError::AlreadyEnrolled)
        }
        // Qualquer outra falha (ex: chave estrangeira) segue com a mensagem da base
        Err(e) => {
            tracing::error!("Erro ao matricular {} na sala {}: {:?}", caller.id, classroom_id, e);
            Err(AppError::UnknownError(e.backend_message()))
        }
    }
}
