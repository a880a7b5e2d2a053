use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db;

/// A post as read back from storage, reaction counts already aggregated.
/// `tags` is the JSON-encoded array as stored.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: String,
    pub author: String,
    pub content: String,
    pub tags: String,
    pub created_at: i64,
    pub is_public: bool,
    pub likes_count: i64,
    pub dislikes_count: i64,
}

impl PostRow {
    pub fn into_response(self) -> PostResponse {
        PostResponse {
            id: self.id,
            content: self.content,
            author: self.author,
            tags: serde_json::from_str(&self.tags).unwrap_or_default(),
            created_at: db::format_epoch(self.created_at),
            likes_count: self.likes_count,
            dislikes_count: self.dislikes_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub likes_count: i64,
    pub dislikes_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub tags: Vec<String>,
}
