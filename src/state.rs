// src/state.rs
use crate::services::code_generator::CodeGenerator;
use sqlx::SqlitePool;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Fonte dos códigos de sala (pode ser semeada nos testes)
    pub codes: CodeGenerator,
    // Limite para o middleware resolver sessão + perfil
    pub session_fetch_timeout: Duration,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, codes: CodeGenerator, session_fetch_timeout: Duration) -> Self {
        Self {
            db_pool,
            codes,
            session_fetch_timeout,
        }
    }
}
