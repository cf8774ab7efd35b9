// src/models/attendance.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Presente,
    Falta,
    FaltaJustificada,
}

// Um registo por aluno por aula. Só é lido (estatísticas dos dashboards).
#[derive(Debug, Clone, FromRow)]
pub struct Attendance {
    pub id: String,
    pub classroom_id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Estatísticas do dashboard do professor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfessorStats {
    pub active_classrooms: usize,
    pub total_students: i64,
    pub average_attendance: u8, // percentagem 0..=100
}

/// Estatísticas do dashboard do aluno.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlunoStats {
    pub enrolled_classrooms: usize,
    pub overall_attendance: u8,
    pub alerts: i64,
}
