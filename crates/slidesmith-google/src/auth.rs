//! OAuth credential store.
//!
//! Reads the standard Google authorized-user JSON (the file the OAuth
//! consent flow writes), refreshes the access token through the token
//! endpoint when it has expired, and persists the refreshed file. Loading
//! is lazy: a missing token file surfaces as a tool error on the first
//! remote call, not as a startup failure.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use slidesmith_core::DeckError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Contents of an authorized-user token file. Unknown fields are kept so
/// the file round-trips through a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// RFC 3339 expiry timestamp; an unparseable or absent value is
    /// treated as already expired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl StoredCredentials {
    pub fn parse(raw: &str) -> Result<Self, DeckError> {
        serde_json::from_str(raw)
            .map_err(|err| DeckError::Auth(format!("Malformed token file: {err}")))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry.as_deref() {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                // Refresh a minute early so an in-flight call never
                // crosses the boundary.
                Ok(expiry) => expiry.with_timezone(&Utc) - Duration::seconds(60) <= now,
                Err(_) => true,
            },
            None => true,
        }
    }

    fn can_refresh(&self) -> bool {
        self.refresh_token.is_some() && self.client_id.is_some() && self.client_secret.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Lazily loaded, refresh-capable token store shared by both API clients.
pub struct TokenStore {
    path: PathBuf,
    creds: Mutex<Option<StoredCredentials>>,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore {
            path: path.into(),
            creds: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current bearer token, refreshing first if needed.
    pub async fn bearer(&self, http: &reqwest::Client) -> Result<String, DeckError> {
        let mut slot = self.creds.lock().await;

        if slot.is_none() {
            let raw = std::fs::read_to_string(&self.path).map_err(|_| {
                DeckError::Auth(format!("Token file not found at {}", self.path.display()))
            })?;
            *slot = Some(StoredCredentials::parse(&raw)?);
        }

        let creds = slot.as_mut().ok_or_else(|| {
            DeckError::Auth("credential store is empty after load".to_string())
        })?;

        if creds.is_expired(Utc::now()) {
            if !creds.can_refresh() {
                return Err(DeckError::Auth(
                    "Access token expired and no refresh credentials are available".to_string(),
                ));
            }
            refresh(http, creds).await?;
            persist(&self.path, creds)?;
        }

        Ok(creds.token.clone())
    }
}

async fn refresh(http: &reqwest::Client, creds: &mut StoredCredentials) -> Result<(), DeckError> {
    let token_uri = creds.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);
    debug!(token_uri, "refreshing access token");

    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", creds.refresh_token.as_deref().unwrap_or_default()),
        ("client_id", creds.client_id.as_deref().unwrap_or_default()),
        ("client_secret", creds.client_secret.as_deref().unwrap_or_default()),
    ];

    let response = http
        .post(token_uri)
        .form(&params)
        .send()
        .await
        .map_err(|err| DeckError::Auth(format!("Token refresh request failed: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DeckError::Auth(format!(
            "Token refresh returned status {status}: {body}"
        )));
    }

    let refreshed: RefreshResponse = response
        .json()
        .await
        .map_err(|err| DeckError::Auth(format!("Malformed token refresh response: {err}")))?;

    creds.token = refreshed.access_token;
    creds.expiry = Some(
        (Utc::now() + Duration::seconds(refreshed.expires_in.unwrap_or(3600)))
            .to_rfc3339(),
    );
    Ok(())
}

fn persist(path: &Path, creds: &StoredCredentials) -> Result<(), DeckError> {
    let serialized = serde_json::to_string_pretty(creds)
        .map_err(|err| DeckError::Auth(format!("Failed to serialize token file: {err}")))?;
    std::fs::write(path, serialized)
        .map_err(|err| DeckError::Auth(format!("Failed to write token file: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(expiry: Option<&str>) -> StoredCredentials {
        StoredCredentials {
            token: "ya29.sample".to_string(),
            refresh_token: Some("refresh".to_string()),
            token_uri: None,
            client_id: Some("client".to_string()),
            client_secret: Some("secret".to_string()),
            scopes: vec![],
            expiry: expiry.map(str::to_string),
            extra: Default::default(),
        }
    }

    #[test]
    fn expiry_in_the_future_is_fresh() {
        let creds = sample(Some("2096-01-01T00:00:00Z"));
        assert!(!creds.is_expired(Utc::now()));
    }

    #[test]
    fn past_missing_or_garbled_expiry_counts_as_expired() {
        let now = Utc::now();
        assert!(sample(Some("2006-01-01T00:00:00Z")).is_expired(now));
        assert!(sample(None).is_expired(now));
        assert!(sample(Some("not-a-date")).is_expired(now));
    }

    #[test]
    fn parse_accepts_authorized_user_json() {
        let raw = r#"{
            "token": "ya29.abc",
            "refresh_token": "1//xyz",
            "token_uri": "https://oauth2.googleapis.com/token",
            "client_id": "id.apps.googleusercontent.com",
            "client_secret": "secret",
            "scopes": ["https://www.googleapis.com/auth/presentations"],
            "expiry": "2026-01-01T00:00:00Z",
            "universe_domain": "googleapis.com"
        }"#;
        let creds = StoredCredentials::parse(raw).expect("parse");
        assert_eq!(creds.token, "ya29.abc");
        assert!(creds.extra.contains_key("universe_domain"));
    }

    #[tokio::test]
    async fn fresh_token_is_served_from_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("token.json");
        let creds = sample(Some("2096-01-01T00:00:00Z"));
        std::fs::write(&path, serde_json::to_string(&creds).expect("serialize"))
            .expect("write token");

        let store = TokenStore::new(&path);
        let http = reqwest::Client::new();
        let bearer = store.bearer(&http).await.expect("bearer");
        assert_eq!(bearer, "ya29.sample");
    }

    #[tokio::test]
    async fn missing_file_is_an_auth_error() {
        let store = TokenStore::new("/nonexistent/token.json");
        let http = reqwest::Client::new();
        let err = store.bearer(&http).await.expect_err("missing file");
        assert!(matches!(err, DeckError::Auth(_)));
        assert!(err.to_string().contains("Token file not found"));
    }
}
