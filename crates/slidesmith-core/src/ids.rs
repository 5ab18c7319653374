//! Deterministic object ids for slides and page elements.
//!
//! The Slides API requires caller-chosen object ids to be unique within a
//! presentation; deriving them from the slide title keeps repeated builds
//! stable and the ids short enough for the API's length limit.

use sha2::{Digest, Sha256};

/// A short id of the form `prefix_1a2b3c4d5e` (10 hex chars of the title
/// digest).
pub fn slide_id(prefix: &str, title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    let mut short = String::with_capacity(prefix.len() + 11);
    short.push_str(prefix);
    short.push('_');
    for byte in &digest[..5] {
        short.push_str(&format!("{byte:02x}"));
    }
    short
}

/// Table element id attached to a slide.
pub fn table_id(slide_id: &str) -> String {
    format!("{slide_id}_tbl")
}

/// Image element id attached to a slide.
pub fn image_id(slide_id: &str) -> String {
    format!("{slide_id}_i")
}

/// Caption text-box id attached to a slide.
pub fn caption_id(slide_id: &str) -> String {
    format!("{slide_id}_c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_short() {
        let a = slide_id("title", "Quarterly Review");
        let b = slide_id("title", "Quarterly Review");
        assert_eq!(a, b);
        assert!(a.starts_with("title_"));
        assert_eq!(a.len(), "title_".len() + 10);
    }

    #[test]
    fn different_titles_diverge() {
        assert_ne!(slide_id("content", "Alpha"), slide_id("content", "Beta"));
    }
}
