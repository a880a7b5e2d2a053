use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    pub alpha2: String,
    pub alpha3: String,
    pub region: String,
}
