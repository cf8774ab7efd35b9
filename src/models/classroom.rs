// src/models/classroom.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;

// Linha da tabela 'classrooms'
#[derive(Debug, Clone, FromRow)]
pub struct Classroom {
    pub id: String,
    pub teacher_id: String,
    pub name: String,
    pub code: String, // 6 caracteres [A-Z0-9]
    pub period: String,
    pub schedule: Option<String>,
    pub max_absences: i64,
    pub total_classes: i64,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

/// Campos já validados para inserir uma sala nova (sem id nem código).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClassroom {
    pub name: String,
    pub period: String,
    pub schedule: Option<String>,
    pub max_absences: i64,
    pub total_classes: i64,
}

/// Formulário "Nova Sala". Os números chegam como texto para que a
/// validação produza a mensagem certa em vez de uma rejeição do extrator.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassroomForm {
    pub name: String,
    pub period: String,
    #[serde(default)]
    pub schedule: String,
    pub max_absences: String,
    pub total_classes: String,
}

pub const DEFAULT_MAX_ABSENCES: i64 = 15;
pub const DEFAULT_TOTAL_CLASSES: i64 = 60;

/// Dados mostrados num cartão de sala (dashboard do professor ou do aluno).
#[derive(Debug, Clone)]
pub struct ClassroomCard {
    pub id: String,
    pub name: String,
    pub code: String,
    pub period: String,
    pub schedule: Option<String>,
    pub max_absences: i64,
    pub total_classes: i64,
}

impl From<Classroom> for ClassroomCard {
    fn from(c: Classroom) -> Self {
        Self {
            id: c.id,
            name: c.name,
            code: c.code,
            period: c.period,
            schedule: c.schedule,
            max_absences: c.max_absences,
            total_classes: c.total_classes,
        }
    }
}
