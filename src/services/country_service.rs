/// Reference data about countries, seeded by migration.
use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::country::Country;

const COUNTRY_SELECT: &str = "SELECT id, name, alpha2, alpha3, region FROM countries";

pub async fn all(pool: &SqlitePool) -> Result<Vec<Country>> {
    let sql = format!("{COUNTRY_SELECT} ORDER BY alpha2");
    let countries = sqlx::query_as::<_, Country>(&sql).fetch_all(pool).await?;
    Ok(countries)
}

pub async fn by_alpha2(pool: &SqlitePool, alpha2: &str) -> Result<Option<Country>> {
    let sql = format!("{COUNTRY_SELECT} WHERE alpha2 = ?");
    let country = sqlx::query_as::<_, Country>(&sql)
        .bind(alpha2)
        .fetch_optional(pool)
        .await?;
    Ok(country)
}

pub async fn code_exists(pool: &SqlitePool, alpha2: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM countries WHERE alpha2 = ?")
        .bind(alpha2)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn known_regions(pool: &SqlitePool) -> Result<Vec<String>> {
    let regions = sqlx::query_scalar::<_, String>("SELECT DISTINCT region FROM countries")
        .fetch_all(pool)
        .await?;
    Ok(regions)
}

pub async fn by_regions(pool: &SqlitePool, regions: &[String]) -> Result<Vec<Country>> {
    if regions.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = regions.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
    let sql = format!("{COUNTRY_SELECT} WHERE region IN ({placeholders}) ORDER BY alpha2");
    let mut query = sqlx::query_as::<_, Country>(&sql);
    for region in regions {
        query = query.bind(region);
    }
    let countries = query.fetch_all(pool).await?;
    Ok(countries)
}
