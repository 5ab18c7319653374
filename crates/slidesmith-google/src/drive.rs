//! Drive client covering the three operations decks need: uploading
//! rendered chart images, making them link-readable, and searching for
//! presentation files to use as theme templates.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use slidesmith_core::DeckError;

use crate::auth::TokenStore;

const DRIVE_UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart&fields=id";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Presentation file as returned by a Drive search.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "modifiedTime", default)]
    pub modified: Option<String>,
}

pub struct DriveClient {
    http: reqwest::Client,
    token: Arc<TokenStore>,
}

impl DriveClient {
    pub fn new(http: reqwest::Client, token: Arc<TokenStore>) -> Self {
        DriveClient { http, token }
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
                "Drive API returned status {status}: {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|err| DeckError::remote(format!("malformed Drive response: {err}")))
    }

    /// Upload a PNG via the multipart endpoint and return the new file id.
    pub async fn upload_png(&self, name: &str, bytes: Vec<u8>) -> Result<String, DeckError> {
        debug!(name, size = bytes.len(), "drive: upload png");
        let metadata = json!({ "name": name, "mimeType": "image/png" });
        let metadata_part = reqwest::multipart::Part::text(metadata.to_string())
            .mime_str("application/json")
            .map_err(|err| DeckError::remote(format!("bad metadata part: {err}")))?;
        let media_part = reqwest::multipart::Part::bytes(bytes)
            .mime_str("image/png")
            .map_err(|err| DeckError::remote(format!("bad media part: {err}")))?;
        let form = reqwest::multipart::Form::new()
            .part("metadata", metadata_part)
            .part("media", media_part);

        let response = self
            .send(self.http.post(DRIVE_UPLOAD_URL).multipart(form))
            .await?;
        response["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DeckError::remote("upload response carried no file id"))
    }

    /// Grant anyone-with-the-link read access, so Slides can fetch the
    /// image when building the deck.
    pub async fn share_public(&self, file_id: &str) -> Result<(), DeckError> {
        debug!(file_id, "drive: share public");
        let url = format!("{DRIVE_FILES_URL}/{file_id}/permissions");
        self.send(
            self.http
                .post(&url)
                .json(&json!({ "type": "anyone", "role": "reader" })),
        )
        .await?;
        Ok(())
    }

    /// Search Drive for presentation files matching `query`, newest first.
    pub async fn list_presentations(&self, query: &str) -> Result<Vec<DriveFile>, DeckError> {
        debug!(query, "drive: list presentations");
        let response = self
            .send(self.http.get(DRIVE_FILES_URL).query(&[
                ("q", query),
                ("fields", "files(id,name,modifiedTime)"),
                ("orderBy", "modifiedTime desc"),
            ]))
            .await?;
        let files = response
            .get("files")
            .cloned()
            .unwrap_or_else(|| json!([]));
        serde_json::from_value(files)
            .map_err(|err| DeckError::remote(format!("malformed file list: {err}")))
    }
}

/// Publicly fetchable URL for a Drive file, suitable for `createImage`.
pub fn public_image_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?id={file_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn image_url_embeds_file_id() {
        assert_eq!(
            public_image_url("abc123"),
            "https://drive.google.com/uc?id=abc123"
        );
    }

    #[test]
    fn drive_file_parses_without_modified_time() {
        let file: DriveFile =
            serde_json::from_value(json!({ "id": "f1", "name": "Deck" })).unwrap();
        assert_eq!(file.id, "f1");
        assert_eq!(file.name, "Deck");
        assert!(file.modified.is_none());
    }
}
