// src/models/enrollment.rs
use super::classroom::ClassroomCard;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;

// Linha da tabela 'enrollments'
#[derive(Debug, Clone, FromRow)]
pub struct Enrollment {
    pub id: String,
    pub classroom_id: String,
    pub student_id: String,
    pub enrolled_at: DateTime<Utc>,
}

/// Matrícula com os campos da sala (JOIN), para o dashboard do aluno.
#[derive(Debug, Clone, FromRow)]
pub struct EnrolledClassroom {
    pub enrollment_id: String,
    pub enrolled_at: DateTime<Utc>,
    pub classroom_id: String,
    pub name: String,
    pub code: String,
    pub period: String,
    pub schedule: Option<String>,
    pub max_absences: i64,
    pub total_classes: i64,
}

impl From<EnrolledClassroom> for ClassroomCard {
    fn from(e: EnrolledClassroom) -> Self {
        Self {
            id: e.classroom_id,
            name: e.name,
            code: e.code,
            period: e.period,
            schedule: e.schedule,
            max_absences: e.max_absences,
            total_classes: e.total_classes,
        }
    }
}

// Formulário "Entrar em Sala"
#[derive(Debug, Deserialize)]
pub struct JoinClassroomForm {
    pub code: String,
}
