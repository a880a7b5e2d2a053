/// Friend edge storage. Edges are directional: `user_login` added
/// `friend_login`, nothing is implied the other way.
use anyhow::Result;
use sqlx::SqlitePool;

use crate::db;
use crate::models::friend::FriendRow;

pub async fn edge_exists(pool: &SqlitePool, user_login: &str, friend_login: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM friends WHERE user_login = ? AND friend_login = ?",
    )
    .bind(user_login)
    .bind(friend_login)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn add(pool: &SqlitePool, user_login: &str, friend_login: &str) -> Result<()> {
    sqlx::query("INSERT INTO friends (user_login, friend_login, added_at) VALUES (?, ?, ?)")
        .bind(user_login)
        .bind(friend_login)
        .bind(db::now_epoch())
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns the number of edges removed.
pub async fn remove(pool: &SqlitePool, user_login: &str, friend_login: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM friends WHERE user_login = ? AND friend_login = ?")
        .bind(user_login)
        .bind(friend_login)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// One page of a user's friends, oldest first. `id` breaks ties between
/// edges added in the same second.
pub async fn list_page(
    pool: &SqlitePool,
    user_login: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<FriendRow>> {
    let rows = sqlx::query_as::<_, FriendRow>(
        "SELECT friend_login, added_at FROM friends
         WHERE user_login = ?
         ORDER BY added_at, id
         LIMIT ? OFFSET ?",
    )
    .bind(user_login)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Every login this user has added, for feed access checks.
pub async fn friend_logins(pool: &SqlitePool, user_login: &str) -> Result<Vec<String>> {
    let logins =
        sqlx::query_scalar::<_, String>("SELECT friend_login FROM friends WHERE user_login = ?")
            .bind(user_login)
            .fetch_all(pool)
            .await?;
    Ok(logins)
}
