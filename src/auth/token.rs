use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Login of the bearer.
    pub sub: String,
    /// Password epoch at issue time. A stale epoch means the password
    /// changed after this token was signed.
    pub ver: i64,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys plus the token lifetime, shared
/// through the application state.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl AuthKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        AuthKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    pub fn issue(&self, login: &str, password_epoch: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: login.to_string(),
            ver: password_epoch,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.ttl_hours)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Checks signature and expiry; epoch matching is the caller's job.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_and_decodes() {
        let keys = AuthKeys::new("unit-test-secret", 24);
        let token = keys.issue("alice", 3).unwrap();
        let claims = keys.decode(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.ver, 3);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let keys = AuthKeys::new("unit-test-secret", 24);
        let other = AuthKeys::new("different-secret", 24);
        let token = other.issue("alice", 0).unwrap();
        assert!(keys.decode(&token).is_err());
    }

    #[test]
    fn rejects_expired() {
        // Negative lifetime puts exp two hours in the past, well beyond
        // the default leeway.
        let keys = AuthKeys::new("unit-test-secret", -2);
        let token = keys.issue("alice", 0).unwrap();
        assert!(keys.decode(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let keys = AuthKeys::new("unit-test-secret", 24);
        assert!(keys.decode("not-a-token").is_err());
        assert!(keys.decode("").is_err());
    }
}
