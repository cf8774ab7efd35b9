// src/models/profile.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// Papel de um perfil. Fixado no registo e nunca alterado depois.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Professor,
    Aluno,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Professor => "professor",
            UserType::Aluno => "aluno",
        }
    }

    /// Caminho do dashboard deste papel.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserType::Professor => "/professor",
            UserType::Aluno => "/aluno",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professor" => Ok(UserType::Professor),
            "aluno" => Ok(UserType::Aluno),
            other => Err(format!("tipo de utilizador desconhecido: '{}'", other)),
        }
    }
}

// Representa uma linha da tabela 'profiles'
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Identidade do pedido atual, resolvida uma vez pelo middleware de autenticação
/// e passada explicitamente aos handlers e serviços.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub user_type: UserType,
}

impl From<&Profile> for CurrentUser {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            user_type: profile.user_type,
        }
    }
}

// Dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// Dados do formulário de registo
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
}
