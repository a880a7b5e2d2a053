/// User lookup and profile persistence.
use anyhow::Result;
use sqlx::SqlitePool;

use crate::db;
use crate::models::user::{RegisterRequest, UpdateProfileRequest, User};

pub async fn find_by_login(pool: &SqlitePool, login: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = ?")
        .bind(login)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Any existing user already holding this login, email or phone.
/// A null phone collides with nothing.
pub async fn collision_exists(
    pool: &SqlitePool,
    login: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<bool> {
    let count: i64 = match phone {
        Some(phone) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE login = ? OR email = ? OR phone = ?")
                .bind(login)
                .bind(email)
                .bind(phone)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE login = ? OR email = ?")
                .bind(login)
                .bind(email)
                .fetch_one(pool)
                .await?
        }
    };
    Ok(count > 0)
}

/// Is this phone number already on some other user's profile?
pub async fn phone_taken(pool: &SqlitePool, phone: &str, exclude_login: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE phone = ? AND login != ?")
            .bind(phone)
            .bind(exclude_login)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, req: &RegisterRequest, password_hash: &str) -> Result<User> {
    sqlx::query(
        "INSERT INTO users (login, email, password_hash, password_epoch, country_code, is_public, phone, image, created_at)
         VALUES (?, ?, ?, 0, ?, ?, ?, ?, ?)",
    )
    .bind(&req.login)
    .bind(&req.email)
    .bind(password_hash)
    .bind(&req.country_code)
    .bind(req.is_public)
    .bind(&req.phone)
    .bind(&req.image)
    .bind(db::now_epoch())
    .execute(pool)
    .await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = ?")
        .bind(&req.login)
        .fetch_one(pool)
        .await?;
    Ok(user)
}

/// Applies only the fields present in the request; an all-empty request
/// is a no-op.
pub async fn update(pool: &SqlitePool, login: &str, changes: &UpdateProfileRequest) -> Result<()> {
    let mut sets: Vec<&str> = Vec::new();
    if changes.country_code.is_some() {
        sets.push("country_code = ?");
    }
    if changes.is_public.is_some() {
        sets.push("is_public = ?");
    }
    if changes.phone.is_some() {
        sets.push("phone = ?");
    }
    if changes.image.is_some() {
        sets.push("image = ?");
    }
    if sets.is_empty() {
        return Ok(());
    }

    let sql = format!("UPDATE users SET {} WHERE login = ?", sets.join(", "));
    let mut query = sqlx::query(&sql);
    if let Some(v) = &changes.country_code {
        query = query.bind(v);
    }
    if let Some(v) = changes.is_public {
        query = query.bind(v);
    }
    if let Some(v) = &changes.phone {
        query = query.bind(v);
    }
    if let Some(v) = &changes.image {
        query = query.bind(v);
    }
    query.bind(login).execute(pool).await?;
    Ok(())
}

/// Stores the new hash and bumps the password epoch, which orphans every
/// token issued before this call.
pub async fn update_password(pool: &SqlitePool, login: &str, new_hash: &str) -> Result<()> {
    sqlx::query(
        "UPDATE users SET password_hash = ?, password_epoch = password_epoch + 1 WHERE login = ?",
    )
    .bind(new_hash)
    .bind(login)
    .execute(pool)
    .await?;
    Ok(())
}
