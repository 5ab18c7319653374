//! Builders for Slides batch-update request bodies.
//!
//! Each function returns one entry of the `requests` array sent to
//! `presentations.batchUpdate`. Geometry is expressed in points; the fixed
//! placements match the layouts the slide tools produce.

use serde_json::{json, Value};

use crate::text::BulletRange;

/// 1x1 transparent PNG, used by theme application to replace master
/// shapes.
pub const TRANSPARENT_PIXEL_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Bullet glyph cycle for content slides.
pub const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";

/// The predefined Google Slides layouts used by the slide tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    Title,
    SectionHeader,
    TitleAndBody,
    TitleAndTwoColumns,
    TitleOnly,
}

impl SlideLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            SlideLayout::Title => "TITLE",
            SlideLayout::SectionHeader => "SECTION_HEADER",
            SlideLayout::TitleAndBody => "TITLE_AND_BODY",
            SlideLayout::TitleAndTwoColumns => "TITLE_AND_TWO_COLUMNS",
            SlideLayout::TitleOnly => "TITLE_ONLY",
        }
    }
}

fn element_properties(page_id: &str, width: f64, height: f64, x: f64, y: f64) -> Value {
    json!({
        "pageObjectId": page_id,
        "size": {
            "width": { "magnitude": width, "unit": "PT" },
            "height": { "magnitude": height, "unit": "PT" },
        },
        "transform": {
            "scaleX": 1,
            "scaleY": 1,
            "translateX": x,
            "translateY": y,
            "unit": "PT",
        },
    })
}

pub fn create_slide(slide_id: &str, layout: SlideLayout) -> Value {
    json!({
        "createSlide": {
            "objectId": slide_id,
            "slideLayoutReference": {
                "predefinedLayout": layout.as_str(),
            },
        }
    })
}

pub fn insert_text(object_id: &str, text: &str) -> Value {
    json!({
        "insertText": {
            "objectId": object_id,
            "text": text,
        }
    })
}

pub fn create_paragraph_bullets(object_id: &str, range: &BulletRange) -> Value {
    json!({
        "createParagraphBullets": {
            "objectId": object_id,
            "textRange": {
                "type": "FIXED_RANGE",
                "startIndex": range.start,
                "endIndex": range.end,
            },
            "bulletPreset": BULLET_PRESET,
        }
    })
}

pub fn create_table(table_id: &str, page_id: &str, rows: usize, columns: usize) -> Value {
    json!({
        "createTable": {
            "objectId": table_id,
            "elementProperties": element_properties(page_id, 400.0, 300.0, 100.0, 100.0),
            "rows": rows,
            "columns": columns,
        }
    })
}

pub fn insert_table_cell_text(table_id: &str, row: usize, column: usize, text: &str) -> Value {
    json!({
        "insertText": {
            "objectId": table_id,
            "cellLocation": {
                "rowIndex": row,
                "columnIndex": column,
            },
            "text": text,
        }
    })
}

pub fn bold_table_cell(table_id: &str, row: usize, column: usize) -> Value {
    json!({
        "updateTextStyle": {
            "objectId": table_id,
            "cellLocation": {
                "rowIndex": row,
                "columnIndex": column,
            },
            "style": { "bold": true },
            "fields": "bold",
        }
    })
}

pub fn create_image(image_id: &str, page_id: &str, url: &str) -> Value {
    json!({
        "createImage": {
            "objectId": image_id,
            "url": url,
            "elementProperties": element_properties(page_id, 400.0, 300.0, 100.0, 150.0),
        }
    })
}

/// Caption text box below an image, paired with an `insertText`.
pub fn create_caption_box(caption_id: &str, page_id: &str) -> Value {
    json!({
        "createShape": {
            "objectId": caption_id,
            "shapeType": "TEXT_BOX",
            "elementProperties": element_properties(page_id, 400.0, 50.0, 100.0, 470.0),
        }
    })
}

pub fn slide_background(slide_id: &str, red: f64, green: f64, blue: f64) -> Value {
    json!({
        "updateSlideProperties": {
            "objectId": slide_id,
            "slideProperties": {
                "pageBackgroundFill": {
                    "solidFill": {
                        "color": {
                            "rgbColor": { "red": red, "green": green, "blue": blue },
                        },
                    },
                },
            },
            "fields": "pageBackgroundFill",
        }
    })
}

pub fn replace_shapes_with_image(image_url: &str) -> Value {
    json!({
        "replaceAllShapesWithImage": {
            "imageUrl": image_url,
            "replaceMethod": "CENTER_INSIDE",
        }
    })
}
