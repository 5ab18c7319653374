//! Thin client for the Slides REST API (`presentations` resource).

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use slidesmith_core::DeckError;

use crate::auth::TokenStore;

const SLIDES_API_BASE: &str = "https://slides.googleapis.com/v1/presentations";

pub struct SlidesClient {
    http: reqwest::Client,
    token: Arc<TokenStore>,
}

impl SlidesClient {
    pub fn new(http: reqwest::Client, token: Arc<TokenStore>) -> Self {
        SlidesClient { http, token }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, DeckError> {
        let bearer = self.token.bearer(&self.http).await?;
        let response = request
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|err| DeckError::remote(format!("request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| DeckError::remote(format!("failed to read response: {err}")))?;
        if !status.is_success() {
            return Err(DeckError::remote(format!(
                "Slides API returned status {status}: {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|err| DeckError::remote(format!("malformed Slides response: {err}")))
    }

    /// Create an empty presentation and return its id.
    pub async fn create_presentation(&self, title: &str) -> Result<String, DeckError> {
        debug!(title, "slides: create presentation");
        let response = self
            .send(self.http.post(SLIDES_API_BASE).json(&json!({ "title": title })))
            .await?;
        response["presentationId"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DeckError::remote("create response carried no presentation id"))
    }

    /// Apply a batch of update requests to a presentation.
    pub async fn batch_update(
        &self,
        presentation_id: &str,
        requests: Vec<Value>,
    ) -> Result<Value, DeckError> {
        debug!(presentation_id, count = requests.len(), "slides: batch update");
        let url = format!("{SLIDES_API_BASE}/{presentation_id}:batchUpdate");
        self.send(self.http.post(&url).json(&json!({ "requests": requests })))
            .await
    }

    /// Fetch a presentation resource, optionally narrowed by a `fields`
    /// mask.
    pub async fn get(
        &self,
        presentation_id: &str,
        fields: Option<&str>,
    ) -> Result<Value, DeckError> {
        debug!(presentation_id, fields, "slides: get presentation");
        let url = format!("{SLIDES_API_BASE}/{presentation_id}");
        let mut request = self.http.get(&url);
        if let Some(fields) = fields {
            request = request.query(&[("fields", fields)]);
        }
        self.send(request).await
    }
}
