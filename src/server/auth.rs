use crate::error::{Result, UniformError};
use actix_web::HttpRequest;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory anti-forgery token store. Tokens are issued per session,
/// reusable until their TTL lapses, and purged on access.
pub struct NonceStore {
    ttl: Duration,
    issued: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl NonceStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs),
            issued: Mutex::new(HashMap::new()),
        }
    }

    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let mut issued = self.issued.lock().unwrap();
        let now = Utc::now();
        issued.retain(|_, created| now - *created < self.ttl);
        issued.insert(token.clone(), now);
        token
    }

    pub fn verify(&self, token: &str) -> bool {
        let mut issued = self.issued.lock().unwrap();
        let now = Utc::now();
        issued.retain(|_, created| now - *created < self.ttl);
        issued.contains_key(token)
    }
}

/// Admin capability check: a bearer token matching the configured
/// secret. Runs before any business logic.
pub fn require_admin(req: &HttpRequest, expected: &str) -> Result<()> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| UniformError::AuthorizationError("Unauthorized access".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| UniformError::AuthorizationError("Invalid token format".into()))?;

    if token != expected {
        return Err(UniformError::AuthorizationError(
            "Unauthorized access".into(),
        ));
    }
    Ok(())
}

pub fn require_nonce(store: &NonceStore, nonce: &str) -> Result<()> {
    if !store.verify(nonce) {
        return Err(UniformError::AuthorizationError(
            "Security check failed".into(),
        ));
    }
    Ok(())
}
