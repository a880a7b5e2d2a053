use std::env;

const DEV_SECRET: &str = "pulse-hub-dev-secret-do-not-deploy";

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub secret_key: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://pulse_hub.db".into());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let secret_key = match env::var("SECRET_KEY") {
            Ok(v) if !v.is_empty() => v,
            _ => {
                tracing::warn!("SECRET_KEY not set, using the development default");
                DEV_SECRET.into()
            }
        };
        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        Config {
            database_url,
            port,
            secret_key,
            token_ttl_hours,
            bcrypt_cost,
        }
    }
}
