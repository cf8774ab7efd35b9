// src/services/profile_service.rs
use crate::{
    error::{AppError, AppResult},
    models::profile::{Profile, UserType},
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, name, email, user_type, password_hash, created_at";

/// Busca um perfil pelo ID (o ID guardado na sessão).
pub async fn find_profile_by_id(db_pool: &SqlitePool, id: &str) -> AppResult<Option<Profile>> {
    tracing::debug!("Buscando perfil por ID: {}", id);
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {} FROM profiles WHERE id = ?1",
        PROFILE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?;

    if profile.is_none() {
        tracing::debug!("Perfil '{}' não encontrado.", id);
    }
    Ok(profile)
}

pub async fn find_profile_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {} FROM profiles WHERE email = ?1",
        PROFILE_COLUMNS
    ))
    .bind(email.trim())
    .fetch_optional(db_pool)
    .await?;
    Ok(profile)
}

/// Insere um perfil novo. O hash da senha já deve vir calculado.
pub async fn insert_profile(
    db_pool: &SqlitePool,
    name: &str,
    email: &str,
    user_type: UserType,
    password_hash: &str,
) -> AppResult<Profile> {
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        user_type,
        password_hash: password_hash.to_string(),
        created_at: Utc::now(),
    };

    // Insere e trata a constraint UNIQUE do email (NOCASE) à parte
    let result = sqlx::query(
        r#"
        INSERT INTO profiles (id, name, email, user_type, password_hash, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&profile.id)
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(profile.user_type)
    .bind(&profile.password_hash)
    .bind(profile.created_at)
    .execute(db_pool)
    .await
    .map_err(AppError::from);

    match result {
        Ok(_) => {
            tracing::info!("✅ Perfil '{}' ({}) criado.", profile.email, profile.user_type);
            Ok(profile)
        }
        // Email já usado (sem distinguir maiúsculas)
        Err(e) if e.is_unique_violation() => {
            tracing::warn!("Registo falhou: email '{}' já existe.", profile.email);
            Err(AppError::EmailTaken)
        }
        Err(e) => Err(e),
    }
}
