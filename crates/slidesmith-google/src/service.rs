//! Deck operations built on the Slides and Drive clients.
//!
//! `DeckService` owns the name-to-id registry and all remote state. Slide
//! tools follow the same shape: resolve the deck, create the slide, read
//! back placeholder ids, then fill text in a second batch.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

use slidesmith_core::{ids, page, requests, table, text, DeckError, DeckRegistry};
use slidesmith_core::requests::SlideLayout;

use crate::auth::TokenStore;
use crate::drive::{self, DriveClient, DriveFile};
use crate::slides::SlidesClient;

/// Field mask used when reading a deck back to locate placeholders. The
/// slide object ids must be part of the mask or the freshly created slide
/// cannot be matched.
const PLACEHOLDER_FIELDS: &str = "slides(objectId,pageElements)";

/// Background tint applied by `apply_styling`.
const STYLING_BACKGROUND: (f64, f64, f64) = (0.97, 0.98, 1.0);

pub struct DeckService {
    slides: SlidesClient,
    drive: DriveClient,
    registry: Mutex<DeckRegistry>,
}

impl DeckService {
    /// Build a service reading credentials from `token_path`. The token is
    /// loaded lazily, so construction never touches the filesystem.
    pub fn new(token_path: PathBuf) -> Self {
        let http = reqwest::Client::new();
        let token = Arc::new(TokenStore::new(token_path));
        DeckService {
            slides: SlidesClient::new(http.clone(), Arc::clone(&token)),
            drive: DriveClient::new(http, token),
            registry: Mutex::new(DeckRegistry::new()),
        }
    }

    async fn resolve(&self, name: &str) -> Result<String, DeckError> {
        let registry = self.registry.lock().await;
        registry.resolve(name).map(str::to_string)
    }

    /// Create an empty presentation and register it under `name`.
    pub async fn create_deck(&self, name: &str) -> Result<String, DeckError> {
        {
            let registry = self.registry.lock().await;
            if registry.contains(name) {
                return Err(DeckError::invalid(format!(
                    "Presentation '{name}' already exists"
                )));
            }
        }

        let presentation_id = self.slides.create_presentation(name).await?;
        let mut registry = self.registry.lock().await;
        registry.register(name, &presentation_id)?;
        info!(name, presentation_id, "created presentation");
        Ok(presentation_id)
    }

    pub async fn presentation_url(&self, name: &str) -> Result<String, DeckError> {
        let registry = self.registry.lock().await;
        registry.url(name)
    }

    /// Create a slide with the given layout and return its object id plus
    /// the placeholders found on it.
    async fn new_slide(
        &self,
        presentation_id: &str,
        id_prefix: &str,
        title: &str,
        layout: SlideLayout,
    ) -> Result<(String, page::SlidePlaceholders), DeckError> {
        let slide_id = ids::slide_id(id_prefix, title);
        let response = self
            .slides
            .batch_update(presentation_id, vec![requests::create_slide(&slide_id, layout)])
            .await?;
        let created = page::created_slide_id(&response)
            .ok_or_else(|| DeckError::remote("batch reply carried no slide id"))?
            .to_string();

        let presentation = self
            .slides
            .get(presentation_id, Some(PLACEHOLDER_FIELDS))
            .await?;
        let placeholders = page::find_slide(&presentation, &created)
            .map(page::scan_placeholders)
            .unwrap_or_default();
        Ok((created, placeholders))
    }

    pub async fn add_title_slide(
        &self,
        name: &str,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<(), DeckError> {
        let presentation_id = self.resolve(name).await?;
        let (_, placeholders) = self
            .new_slide(&presentation_id, "title", title, SlideLayout::Title)
            .await?;

        let mut batch = Vec::new();
        if let Some(title_id) = &placeholders.title {
            batch.push(requests::insert_text(title_id, title));
        }
        if let (Some(subtitle), Some(subtitle_id)) = (subtitle, &placeholders.subtitle) {
            batch.push(requests::insert_text(subtitle_id, subtitle));
        }
        if !batch.is_empty() {
            self.slides.batch_update(&presentation_id, batch).await?;
        }
        Ok(())
    }

    /// Section header slide. The SECTION_HEADER layout exposes the
    /// subtitle as a BODY placeholder.
    pub async fn add_section_slide(
        &self,
        name: &str,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<(), DeckError> {
        let presentation_id = self.resolve(name).await?;
        let (_, placeholders) = self
            .new_slide(&presentation_id, "section", title, SlideLayout::SectionHeader)
            .await?;

        let mut batch = Vec::new();
        if let Some(title_id) = &placeholders.title {
            batch.push(requests::insert_text(title_id, title));
        }
        if let (Some(subtitle), Some(body_id)) = (subtitle, placeholders.bodies.first()) {
            batch.push(requests::insert_text(body_id, subtitle));
        }
        if !batch.is_empty() {
            self.slides.batch_update(&presentation_id, batch).await?;
        }
        Ok(())
    }

    /// Bulleted content slide. Indentation in `content` (one tab per
    /// level) maps to bullet nesting.
    pub async fn add_content_slide(
        &self,
        name: &str,
        title: &str,
        content: &str,
    ) -> Result<(), DeckError> {
        let presentation_id = self.resolve(name).await?;
        let (_, placeholders) = self
            .new_slide(&presentation_id, "content", title, SlideLayout::TitleAndBody)
            .await?;

        let mut batch = Vec::new();
        if let Some(title_id) = &placeholders.title {
            batch.push(requests::insert_text(title_id, title));
        }
        if let Some(body_id) = placeholders.bodies.first() {
            let body = content.trim();
            if !body.is_empty() {
                batch.push(requests::insert_text(body_id, body));
                for range in text::compute_bullet_ranges(body) {
                    batch.push(requests::create_paragraph_bullets(body_id, &range));
                }
            }
        }
        if !batch.is_empty() {
            self.slides.batch_update(&presentation_id, batch).await?;
        }
        Ok(())
    }

    pub async fn add_two_column_slide(
        &self,
        name: &str,
        title: &str,
        left_title: &str,
        left_content: &str,
        right_title: &str,
        right_content: &str,
    ) -> Result<(), DeckError> {
        let presentation_id = self.resolve(name).await?;
        let (_, placeholders) = self
            .new_slide(
                &presentation_id,
                "twocol",
                title,
                SlideLayout::TitleAndTwoColumns,
            )
            .await?;

        let mut batch = Vec::new();
        if let Some(title_id) = &placeholders.title {
            batch.push(requests::insert_text(title_id, title));
        }
        let columns = [(left_title, left_content), (right_title, right_content)];
        for ((column_title, column_content), body_id) in
            columns.iter().zip(placeholders.bodies.iter())
        {
            let body = format!("{column_title}\n{column_content}");
            batch.push(requests::insert_text(body_id, &body));
        }
        if !batch.is_empty() {
            self.slides.batch_update(&presentation_id, batch).await?;
        }
        Ok(())
    }

    /// Table slide: a TITLE_ONLY slide carrying a table with a bold
    /// header row. Input shape is validated before any remote call.
    pub async fn add_table_slide(
        &self,
        name: &str,
        title: &str,
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<(), DeckError> {
        table::validate_table(headers, rows)?;

        let presentation_id = self.resolve(name).await?;
        let (created, placeholders) = self
            .new_slide(&presentation_id, "table", title, SlideLayout::TitleOnly)
            .await?;

        let table_id = ids::table_id(&created);
        let mut batch = Vec::new();
        if let Some(title_id) = &placeholders.title {
            batch.push(requests::insert_text(title_id, title));
        }
        batch.push(requests::create_table(
            &table_id,
            &created,
            rows.len() + 1,
            headers.len(),
        ));
        self.slides.batch_update(&presentation_id, batch).await?;

        // Cell text cannot ride in the creation batch; the table has to
        // exist before insertText can target its cells.
        self.slides
            .batch_update(&presentation_id, table::header_requests(&table_id, headers))
            .await?;
        self.slides
            .batch_update(&presentation_id, table::data_requests(&table_id, rows))
            .await?;
        Ok(())
    }

    /// Image slide: upload the PNG to Drive, share it, then place it on a
    /// TITLE_ONLY slide with an optional caption box.
    pub async fn add_image_slide(
        &self,
        name: &str,
        title: &str,
        png: Vec<u8>,
        caption: Option<&str>,
    ) -> Result<(), DeckError> {
        let presentation_id = self.resolve(name).await?;

        let file_name = image_file_name(title);
        let file_id = self.drive.upload_png(&file_name, png).await?;
        self.drive.share_public(&file_id).await?;

        let (created, placeholders) = self
            .new_slide(&presentation_id, "img", title, SlideLayout::TitleOnly)
            .await?;

        if let Some(title_id) = &placeholders.title {
            self.slides
                .batch_update(&presentation_id, vec![requests::insert_text(title_id, title)])
                .await?;
        }

        let image_id = ids::image_id(&created);
        let url = drive::public_image_url(&file_id);
        self.slides
            .batch_update(
                &presentation_id,
                vec![requests::create_image(&image_id, &created, &url)],
            )
            .await?;

        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            let caption_id = ids::caption_id(&created);
            self.slides
                .batch_update(
                    &presentation_id,
                    vec![
                        requests::create_caption_box(&caption_id, &created),
                        requests::insert_text(&caption_id, caption),
                    ],
                )
                .await?;
        }
        Ok(())
    }

    /// Copy the theme of another presentation onto the named deck by
    /// clearing master shapes with a transparent replacement image.
    pub async fn apply_theme_from(
        &self,
        name: &str,
        source_presentation_id: &str,
    ) -> Result<(), DeckError> {
        let presentation_id = self.resolve(name).await?;

        let source = self.slides.get(source_presentation_id, Some("masters")).await?;
        let masters = page::master_count(&source);
        if masters == 0 {
            return Err(DeckError::invalid("Source presentation has no masters"));
        }

        let batch: Vec<Value> = (0..masters)
            .map(|_| requests::replace_shapes_with_image(requests::TRANSPARENT_PIXEL_URL))
            .collect();
        self.slides.batch_update(&presentation_id, batch).await?;
        Ok(())
    }

    /// Tint every slide's background with a light blue wash. Returns the
    /// number of slides touched.
    pub async fn apply_styling(&self, name: &str) -> Result<usize, DeckError> {
        let presentation_id = self.resolve(name).await?;

        let presentation = self.slides.get(&presentation_id, Some("slides")).await?;
        let slide_ids = page::slide_ids(&presentation);
        let (red, green, blue) = STYLING_BACKGROUND;
        let batch: Vec<Value> = slide_ids
            .iter()
            .map(|id| requests::slide_background(id, red, green, blue))
            .collect();
        if !batch.is_empty() {
            self.slides.batch_update(&presentation_id, batch).await?;
        }
        Ok(slide_ids.len())
    }

    /// Find a theme template in Drive by name and apply it. Returns the
    /// matched file's name.
    pub async fn apply_theme_by_name(
        &self,
        name: &str,
        theme: &str,
    ) -> Result<String, DeckError> {
        // Resolve first so a missing deck reports NotFound, not a failed
        // Drive search.
        self.resolve(name).await?;

        let query = format!(
            "name contains '{theme}' and mimeType='application/vnd.google-apps.presentation'"
        );
        let files = self.drive.list_presentations(&query).await?;
        let template = files.first().ok_or_else(|| {
            DeckError::invalid(format!(
                "No theme template found with name containing '{theme}'"
            ))
        })?;

        self.apply_theme_from(name, &template.id).await?;
        Ok(template.name.clone())
    }

    /// Presentations in Drive whose names suggest they are themes.
    pub async fn list_themes(&self) -> Result<Vec<DriveFile>, DeckError> {
        let query = "mimeType='application/vnd.google-apps.presentation' \
                     and (name contains 'theme' or name contains 'template')";
        self.drive.list_presentations(query).await
    }
}

/// Drive file name for an uploaded slide image: the title with spaces
/// replaced, truncated to keep names short.
fn image_file_name(title: &str) -> String {
    let stem: String = title.replace(' ', "_").chars().take(20).collect();
    format!("img_{stem}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn image_file_name_truncates_and_replaces_spaces() {
        assert_eq!(image_file_name("Revenue Chart"), "img_Revenue_Chart.png");
        assert_eq!(
            image_file_name("A very long slide title indeed"),
            "img_A_very_long_slide_ti.png"
        );
    }

    #[tokio::test]
    async fn unknown_deck_is_not_found() {
        let service = DeckService::new(PathBuf::from("token.json"));
        let err = service.presentation_url("missing").await.expect_err("missing");
        assert!(matches!(err, DeckError::NotFound(name) if name == "missing"));
    }
}
