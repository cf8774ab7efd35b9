// src/services/dashboard_service.rs
use crate::{
    error::AppResult,
    models::{
        attendance::{AlunoStats, Attendance, AttendanceStatus, ProfessorStats},
        classroom::Classroom,
        enrollment::EnrolledClassroom,
    },
};
use sqlx::SqlitePool;
use std::collections::HashMap;

const ATTENDANCE_COLUMNS: &str = "a.id, a.classroom_id, a.student_id, a.date, a.status, a.notes, a.created_at";

pub async fn list_attendance_for_student(db_pool: &SqlitePool, student_id: &str) -> AppResult<Vec<Attendance>> {
    let rows = sqlx::query_as::<_, Attendance>(&format!(
        "SELECT {} FROM attendance a WHERE a.student_id = ?1 ORDER BY a.date ASC",
        ATTENDANCE_COLUMNS
    ))
    .bind(student_id)
    .fetch_all(db_pool)
    .await?;
    Ok(rows)
}

/// Registos de todas as salas de um professor.
pub async fn list_attendance_for_teacher(db_pool: &SqlitePool, teacher_id: &str) -> AppResult<Vec<Attendance>> {
    let rows = sqlx::query_as::<_, Attendance>(&format!(
        r#"
        SELECT {} FROM attendance a
        JOIN classrooms c ON c.id = a.classroom_id
        WHERE c.teacher_id = ?1
        ORDER BY a.date ASC
        "#,
        ATTENDANCE_COLUMNS
    ))
    .bind(teacher_id)
    .fetch_all(db_pool)
    .await?;
    Ok(rows)
}

/// Alunos distintos matriculados em qualquer sala do professor.
pub async fn count_students_for_teacher(db_pool: &SqlitePool, teacher_id: &str) -> AppResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT e.student_id)
        FROM enrollments e
        JOIN classrooms c ON c.id = e.classroom_id
        WHERE c.teacher_id = ?1
        "#,
    )
    .bind(teacher_id)
    .fetch_one(db_pool)
    .await?;
    Ok(total)
}

/// Percentagem de presenças (arredondada). Sem registos -> 0.
pub fn attendance_percentage(records: &[Attendance]) -> u8 {
    if records.is_empty() {
        return 0;
    }
    let presentes = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Presente)
        .count();
    // Arredonda ao inteiro mais próximo
    ((presentes * 100 + records.len() / 2) / records.len()) as u8
}

/// Salas em que as faltas (não justificadas) do aluno já chegaram a 75% do limite.
pub fn count_alerts(records: &[Attendance], enrollments: &[EnrolledClassroom]) -> i64 {
    // Conta faltas por sala (justificadas não contam)
    let mut faltas: HashMap<&str, i64> = HashMap::new();
    for r in records.iter().filter(|r| r.status == AttendanceStatus::Falta) {
        *faltas.entry(r.classroom_id.as_str()).or_default() += 1;
    }

    enrollments
        .iter()
        .filter(|e| {
            let n = faltas.get(e.classroom_id.as_str()).copied().unwrap_or(0);
            n > 0 && n * 4 >= e.max_absences * 3 // n >= 75% do limite
        })
        .count() as i64
}

pub async fn professor_stats(
    db_pool: &SqlitePool,
    teacher_id: &str,
    classrooms: &[Classroom],
) -> AppResult<ProfessorStats> {
    let total_students = count_students_for_teacher(db_pool, teacher_id).await?;
    let records = list_attendance_for_teacher(db_pool, teacher_id).await?;
    Ok(ProfessorStats {
        active_classrooms: classrooms.iter().filter(|c| !c.archived).count(),
        total_students,
        average_attendance: attendance_percentage(&records),
    })
}

pub async fn aluno_stats(
    db_pool: &SqlitePool,
    student_id: &str,
    enrollments: &[EnrolledClassroom],
) -> AppResult<AlunoStats> {
    let records = list_attendance_for_student(db_pool, student_id).await?;
    Ok(AlunoStats {
        enrolled_classrooms: enrollments.len(),
        overall_attendance: attendance_percentage(&records),
        alerts: count_alerts(&records, enrollments),
    })
}
