// src/services/classroom_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        classroom::{Classroom, CreateClassroomForm, NewClassroom},
        profile::{CurrentUser, UserType},
    },
    services::code_generator::CodeGenerator,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Quantas vezes se sorteia um código novo quando o anterior já existe.
pub const MAX_CODE_ATTEMPTS: usize = 5;

const CLASSROOM_COLUMNS: &str =
    "id, teacher_id, name, code, period, schedule, max_absences, total_classes, archived, created_at";

// --- Acesso a dados ---

/// Resolve um código (já normalizado) para o ID da sala, se existir.
pub async fn find_classroom_id_by_code(db_pool: &SqlitePool, code: &str) -> AppResult<Option<String>> {
    let id = sqlx::query_scalar::<_, String>("SELECT id FROM classrooms WHERE code = ?1")
        .bind(code)
        .fetch_optional(db_pool)
        .await?;
    Ok(id)
}

pub async fn find_classroom_by_id(db_pool: &SqlitePool, id: &str) -> AppResult<Option<Classroom>> {
    let classroom = sqlx::query_as::<_, Classroom>(&format!(
        "SELECT {} FROM classrooms WHERE id = ?1",
        CLASSROOM_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(classroom)
}

/// Salas de um professor. O filtro pelo dono é obrigatório.
pub async fn list_classrooms_for_teacher(db_pool: &SqlitePool, teacher_id: &str) -> AppResult<Vec<Classroom>> {
    tracing::debug!("Buscando salas do professor {}", teacher_id);
    let classrooms = sqlx::query_as::<_, Classroom>(&format!(
        "SELECT {} FROM classrooms WHERE teacher_id = ?1 ORDER BY created_at DESC, name ASC",
        CLASSROOM_COLUMNS
    ))
    .bind(teacher_id)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontradas {} salas para {}.", classrooms.len(), teacher_id);
    Ok(classrooms)
}

/// Insere a sala com o código dado. Erros da base de dados são devolvidos tal como vêm.
pub async fn insert_classroom(
    db_pool: &SqlitePool,
    teacher_id: &str,
    code: &str,
    fields: &NewClassroom,
) -> AppResult<Classroom> {
    let classroom = Classroom {
        id: Uuid::new_v4().to_string(),
        teacher_id: teacher_id.to_string(),
        name: fields.name.clone(),
        code: code.to_string(),
        period: fields.period.clone(),
        schedule: fields.schedule.clone(),
        max_absences: fields.max_absences,
        total_classes: fields.total_classes,
        archived: false,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO classrooms
            (id, teacher_id, name, code, period, schedule, max_absences, total_classes, archived, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(&classroom.id)
    .bind(&classroom.teacher_id)
    .bind(&classroom.name)
    .bind(&classroom.code)
    .bind(&classroom.period)
    .bind(&classroom.schedule)
    .bind(classroom.max_absences)
    .bind(classroom.total_classes)
    .bind(classroom.archived)
    .bind(classroom.created_at)
    .execute(db_pool)
    .await?;

    Ok(classroom)
}

pub async fn set_archived(db_pool: &SqlitePool, teacher_id: &str, classroom_id: &str, archived: bool) -> AppResult<()> {
    let rows_affected = sqlx::query("UPDATE classrooms SET archived = ?1 WHERE id = ?2 AND teacher_id = ?3")
        .bind(archived)
        .bind(classroom_id)
        .bind(teacher_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    // Nenhuma linha: a sala não existe ou é de outro professor
    if rows_affected == 0 {
        tracing::warn!("Sala {} não encontrada para o professor {}", classroom_id, teacher_id);
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// --- Fluxo de criação ---

fn parse_positive(raw: &str, label: &str) -> AppResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::ValidationError(format!(
            "{} deve ser um número inteiro positivo.",
            label
        ))),
    }
}

/// Valida o formulário "Nova Sala". Nada chega à base de dados se falhar.
pub fn validate_classroom_form(form: &CreateClassroomForm) -> AppResult<NewClassroom> {
    let name = form.name.trim();
    let period = form.period.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError("O nome da disciplina é obrigatório.".into()));
    }
    if period.is_empty() {
        return Err(AppError::ValidationError("O período letivo é obrigatório.".into()));
    }

    let max_absences = parse_positive(&form.max_absences, "Máximo de faltas")?;
    let total_classes = parse_positive(&form.total_classes, "Total de aulas")?;

    // Horário é opcional: vazio vira NULL
    let schedule = Some(form.schedule.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(NewClassroom {
        name: name.to_string(),
        period: period.to_string(),
        schedule,
        max_absences,
        total_classes,
    })
}

/// Cria uma sala para o professor autenticado, com um código novo.
/// Se o código sorteado já existir, sorteia outro (até MAX_CODE_ATTEMPTS).
pub async fn create_classroom(
    db_pool: &SqlitePool,
    codes: &CodeGenerator,
    caller: &CurrentUser,
    form: &CreateClassroomForm,
) -> AppResult<Classroom> {
    // 1. Só professores criam salas
    if caller.user_type != UserType::Professor {
        tracing::warn!("'{}' ({}) tentou criar uma sala.", caller.id, caller.user_type);
        return Err(AppError::Forbidden);
    }

    // 2. Valida antes de gastar um código
    let fields = validate_classroom_form(form)?;

    // 3. Sorteia e insere; a constraint UNIQUE do código deteta colisões
    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = codes.next_code();
        match insert_classroom(db_pool, &caller.id, &code, &fields).await {
            Ok(classroom) => {
                tracing::info!(
                    "✅ Sala '{}' criada por {} com código {}",
                    classroom.name,
                    caller.id,
                    classroom.code
                );
                return Ok(classroom);
            }
            // Código já usado por outra sala: tenta outro
            Err(e) if e.is_unique_violation() => {
                tracing::warn!("Código {} já em uso (tentativa {}/{}).", code, attempt, MAX_CODE_ATTEMPTS);
            }
            // Outras falhas não se resolvem com outro código
            Err(e) => {
                tracing::error!("Erro ao inserir sala para {}: {:?}", caller.id, e);
                return Err(AppError::UnknownError(e.backend_message()));
            }
        }
    }

    // Todas as tentativas colidiram
    Err(AppError::UnknownError(
        "não foi possível gerar um código único para a sala".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(max_absences: &str, total_classes: &str) -> CreateClassroomForm {
        CreateClassroomForm {
            name: "Math".into(),
            period: "2024.1".into(),
            schedule: "  ".into(),
            max_absences: max_absences.into(),
            total_classes: total_classes.into(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_blank_schedule_dropped() {
        let fields = validate_classroom_form(&form("15", " 60 ")).unwrap();
        assert_eq!(fields.name, "Math");
        assert_eq!(fields.schedule, None);
        assert_eq!(fields.max_absences, 15);
        assert_eq!(fields.total_classes, 60);
    }

    #[test]
    fn zero_negative_and_non_numeric_limits_are_rejected() {
        for (max, total) in [("0", "60"), ("15", "0"), ("-1", "60"), ("abc", "60"), ("15", ""), ("1.5", "60")] {
            let err = validate_classroom_form(&form(max, total)).unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)), "{} / {}", max, total);
        }
    }

    #[test]
    fn name_and_period_are_required() {
        let mut f = form("15", "60");
        f.name = " ".into();
        assert!(validate_classroom_form(&f).is_err());

        let mut f = form("15", "60");
        f.period = String::new();
        assert!(validate_classroom_form(&f).is_err());
    }
}
