// src/config.rs
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr, time::Duration};

/// Tamanho mínimo da chave que assina o cookie de sessão.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

// Configuração lida das variáveis de ambiente (ou do .env)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    // Tempo máximo para resolver sessão + perfil no gate dos dashboards
    pub session_fetch_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let session_secret = env::var("SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(AppError::ConfigError(format!(
                "SESSION_SECRET precisa de pelo menos {} bytes",
                MIN_SESSION_SECRET_LEN
            )));
        }

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::ConfigError(format!("BIND_ADDR inválido: {}", e)))?;

        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 5)?;
        let timeout_secs: u64 = parse_or("SESSION_FETCH_TIMEOUT_SECS", 5)?;

        Ok(Self {
            database_url,
            db_max_connections,
            session_secret,
            bind_addr,
            session_fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// Lê uma variável numérica opcional, usando `default` se não estiver definida.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::ConfigError(format!("{} inválido: '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_default_when_unset() {
        let v: u32 = parse_or("CHAMADA_TEST_VAR_QUE_NAO_EXISTE", 7).unwrap();
        assert_eq!(v, 7);
    }
}
