// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuração inválida: {0}")]
    ConfigError(String),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Email já registado")]
    EmailTaken,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Tempo esgotado ao verificar a sessão")]
    SessionTimeout,

    #[error("Acesso negado")]
    Forbidden,

    // --- Erros dos fluxos de sala ---
    #[error("Código de sala inválido")]
    InvalidCode,

    #[error("Você já está matriculado nesta sala")]
    AlreadyEnrolled,

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    UnknownError(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    /// Verdadeiro se o erro vem de uma constraint UNIQUE da base de dados.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, AppError::SqlxError(sqlx::Error::Database(db_err)) if db_err.is_unique_violation())
    }

    /// Mensagem devolvida pelo backend (ou a própria mensagem do erro).
    pub fn backend_message(&self) -> String {
        match self {
            AppError::SqlxError(sqlx::Error::Database(db_err)) => db_err.message().to_string(),
            AppError::UnknownError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match &self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".to_string())
            }
            AppError::EnvVarError(_) | AppError::ConfigError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.".to_string())
            }
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Email ou senha inválidos.".to_string())
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.".to_string())
            }
            AppError::SessionTimeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Não foi possível verificar a sua sessão. Tente novamente.".to_string(),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Acesso negado.".to_string()),
            AppError::InvalidCode
            | AppError::AlreadyEnrolled
            | AppError::EmailTaken
            | AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::UnknownError(_) | AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Voltar</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
