// src/templates.rs
use crate::models::{
    attendance::{AlunoStats, ProfessorStats},
    classroom::{ClassroomCard, DEFAULT_MAX_ABSENCES, DEFAULT_TOTAL_CLASSES},
};
use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub error: Option<String>,
}

/// Cartão de sala do professor (inclui o estado arquivado).
#[derive(Clone, Debug)]
pub struct TeacherClassroomCard {
    pub card: ClassroomCard,
    pub archived: bool,
}

#[derive(Template)]
#[template(path = "professor_dashboard.html")]
pub struct ProfessorDashboardPage {
    pub user_name: String,
    pub stats: ProfessorStats,
    pub classrooms: Vec<TeacherClassroomCard>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    // Valores iniciais do formulário "Nova Sala"
    pub default_max_absences: i64,
    pub default_total_classes: i64,
}

impl ProfessorDashboardPage {
    pub fn new(
        user_name: String,
        stats: ProfessorStats,
        classrooms: Vec<TeacherClassroomCard>,
        success_message: Option<String>,
        error_message: Option<String>,
    ) -> Self {
        Self {
            user_name,
            stats,
            classrooms,
            success_message,
            error_message,
            default_max_absences: DEFAULT_MAX_ABSENCES,
            default_total_classes: DEFAULT_TOTAL_CLASSES,
        }
    }
}

#[derive(Template)]
#[template(path = "aluno_dashboard.html")]
pub struct AlunoDashboardPage {
    pub user_name: String,
    pub stats: AlunoStats,
    pub classrooms: Vec<ClassroomCard>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}
