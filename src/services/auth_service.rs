// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::profile::{Profile, RegisterForm, UserType},
    services::profile_service,
};
use sqlx::SqlitePool;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
            AppError::PasswordHashingError
        })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
            AppError::PasswordHashingError
        })
}

/// Login por email + senha. Email desconhecido e senha errada dão o mesmo erro.
pub async fn authenticate(db_pool: &SqlitePool, email: &str, password: &str) -> AppResult<Profile> {
    let profile = profile_service::find_profile_by_email(db_pool, email)
        .await?
        .ok_or(AppError::InvalidCredentials)?; // Email desconhecido

    // bcrypt corre fora do runtime async

    if verify_password(password, &profile.password_hash).await? {
        Ok(profile)
    } else {
        tracing::warn!("Senha incorreta para {}", email);
        Err(AppError::InvalidCredentials)
    }
}

/// Valida o formulário de registo, sem tocar na base de dados.
pub fn validate_registration(form: &RegisterForm) -> AppResult<UserType> {
    let email = form.email.trim();
    if form.name.trim().is_empty() {
        return Err(AppError::ValidationError("O nome é obrigatório.".into()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::ValidationError("Email inválido.".into()));
    }
    if form.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::ValidationError(format!(
            "A senha precisa de pelo menos {} caracteres.",
            MIN_PASSWORD_LEN
        )));
    }
    form.user_type
        .parse::<UserType>()
        .map_err(|_| AppError::ValidationError("Tipo de conta inválido.".into()))
}

/// Cria a conta: valida, gera o hash e insere o perfil.
pub async fn register(db_pool: &SqlitePool, form: &RegisterForm) -> AppResult<Profile> {
    let user_type = validate_registration(form)?;
    // Hash só depois de validar (bcrypt é caro)
    let password_hash = hash_password(&form.password).await?;
    profile_service::insert_profile(db_pool, &form.name, &form.email, user_type, &password_hash).await
}
