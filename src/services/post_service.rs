/// Post storage and reactions. Reaction counts are never stored, they
/// are aggregated from the reactions table on every read.
use anyhow::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::models::post::{PostResponse, PostRow};

const POST_SELECT: &str = "SELECT p.id, p.author, p.content, p.tags, p.created_at, p.is_public,
        COALESCE(SUM(CASE WHEN r.is_like = 1 THEN 1 ELSE 0 END), 0) AS likes_count,
        COALESCE(SUM(CASE WHEN r.is_like = 0 THEN 1 ELSE 0 END), 0) AS dislikes_count
    FROM posts p
    LEFT JOIN reactions r ON r.post_id = p.id";

pub async fn create(
    pool: &SqlitePool,
    author: &str,
    is_public: bool,
    content: &str,
    tags: &[String],
) -> Result<PostResponse> {
    let id = Uuid::new_v4().to_string();
    let created_at = db::now_epoch();
    let tags_json = serde_json::to_string(tags)?;

    sqlx::query(
        "INSERT INTO posts (id, author, content, tags, created_at, is_public)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(author)
    .bind(content)
    .bind(&tags_json)
    .bind(created_at)
    .bind(is_public)
    .execute(pool)
    .await?;

    Ok(PostResponse {
        id,
        content: content.to_string(),
        author: author.to_string(),
        tags: tags.to_vec(),
        created_at: db::format_epoch(created_at),
        likes_count: 0,
        dislikes_count: 0,
    })
}

pub async fn exists(pool: &SqlitePool, post_id: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn get(pool: &SqlitePool, post_id: &str) -> Result<Option<PostRow>> {
    let sql = format!("{POST_SELECT} WHERE p.id = ? GROUP BY p.id");
    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// One page of an author's posts, oldest first. `rowid` breaks ties for
/// posts created in the same second.
pub async fn feed_page(
    pool: &SqlitePool,
    author: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRow>> {
    let sql = format!(
        "{POST_SELECT} WHERE p.author = ? GROUP BY p.id
         ORDER BY p.created_at, p.rowid
         LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(author)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Records or flips a reaction. One row per (post, login); reacting
/// again with the other value overwrites, never duplicates.
pub async fn react(pool: &SqlitePool, post_id: &str, login: &str, is_like: bool) -> Result<()> {
    sqlx::query(
        "INSERT INTO reactions (post_id, login, is_like) VALUES (?, ?, ?)
         ON CONFLICT (post_id, login) DO UPDATE SET is_like = excluded.is_like",
    )
    .bind(post_id)
    .bind(login)
    .bind(is_like)
    .execute(pool)
    .await?;
    Ok(())
}
