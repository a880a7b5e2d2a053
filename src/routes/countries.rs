use axum::{
    extract::{Path, RawQuery, State},
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::country::Country;
use crate::services::country_service;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/countries", get(list_countries))
        .route("/api/countries/:alpha2", get(country_by_alpha2))
}

async fn list_countries(
    State(pool): State<SqlitePool>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Country>>, ApiError> {
    let regions = parse_regions(query.as_deref());
    if regions.is_empty() {
        return Ok(Json(country_service::all(&pool).await?));
    }

    let known = country_service::known_regions(&pool).await?;
    if regions.iter().any(|region| !known.contains(region)) {
        return Err(ApiError::validation("unknown region"));
    }
    Ok(Json(country_service::by_regions(&pool, &regions).await?))
}

async fn country_by_alpha2(
    State(pool): State<SqlitePool>,
    Path(alpha2): Path<String>,
) -> Result<Json<Country>, ApiError> {
    let country = country_service::by_alpha2(&pool, &alpha2.to_uppercase())
        .await?
        .ok_or_else(|| ApiError::not_found("country not found"))?;
    Ok(Json(country))
}

/// Collects every `region=` pair by hand; `axum::extract::Query` cannot
/// fold repeated keys into a Vec.
fn parse_regions(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == "region")
        .map(|(_, value)| value.replace('+', " "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_regions;

    #[test]
    fn collects_repeated_region_params() {
        assert_eq!(parse_regions(None), Vec::<String>::new());
        assert_eq!(parse_regions(Some("")), Vec::<String>::new());
        assert_eq!(parse_regions(Some("region=Europe")), vec!["Europe"]);
        assert_eq!(
            parse_regions(Some("region=Europe&region=Asia")),
            vec!["Europe", "Asia"]
        );
        assert_eq!(
            parse_regions(Some("limit=5&region=Africa&foo=bar")),
            vec!["Africa"]
        );
        assert_eq!(parse_regions(Some("region=New+Zealand")), vec!["New Zealand"]);
    }
}
