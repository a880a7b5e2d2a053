use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db;

#[derive(Debug, Clone, FromRow)]
pub struct FriendRow {
    pub friend_login: String,
    pub added_at: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponse {
    pub login: String,
    pub added_at: String,
}

impl From<FriendRow> for FriendResponse {
    fn from(row: FriendRow) -> Self {
        FriendResponse {
            login: row.friend_login,
            added_at: db::format_epoch(row.added_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FriendRequest {
    pub login: String,
}
