//! Readers for presentation resources returned by `presentations.get`.
//!
//! Slide tools resolve placeholder object ids from a read-back of the
//! freshly created slide before the text batch can be sent.

use serde_json::Value;

/// Placeholder object ids found on one slide. Layouts with two columns
/// carry multiple BODY placeholders, in page-element order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SlidePlaceholders {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub bodies: Vec<String>,
}

/// The object id of the slide created by the first reply of a batch
/// update.
pub fn created_slide_id(batch_response: &Value) -> Option<&str> {
    batch_response["replies"][0]["createSlide"]["objectId"].as_str()
}

/// Find a slide by object id in a `presentations.get` response.
pub fn find_slide<'a>(presentation: &'a Value, slide_id: &str) -> Option<&'a Value> {
    presentation["slides"]
        .as_array()?
        .iter()
        .find(|slide| slide["objectId"].as_str() == Some(slide_id))
}

/// Scan a slide's page elements for TITLE/SUBTITLE/BODY placeholders.
pub fn scan_placeholders(slide: &Value) -> SlidePlaceholders {
    let mut found = SlidePlaceholders::default();
    let Some(elements) = slide["pageElements"].as_array() else {
        return found;
    };

    for element in elements {
        let Some(object_id) = element["objectId"].as_str() else {
            continue;
        };
        match element["shape"]["placeholder"]["type"].as_str() {
            Some("TITLE") => found.title = Some(object_id.to_string()),
            Some("SUBTITLE") => found.subtitle = Some(object_id.to_string()),
            Some("BODY") => found.bodies.push(object_id.to_string()),
            _ => {}
        }
    }

    found
}

/// Slide object ids in presentation order.
pub fn slide_ids(presentation: &Value) -> Vec<String> {
    presentation["slides"]
        .as_array()
        .map(|slides| {
            slides
                .iter()
                .filter_map(|slide| slide["objectId"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Number of master slides in a presentation resource.
pub fn master_count(presentation: &Value) -> usize {
    presentation["masters"]
        .as_array()
        .map(Vec::len)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scan_finds_placeholders_in_order() {
        let slide = json!({
            "objectId": "s1",
            "pageElements": [
                { "objectId": "e1", "shape": { "placeholder": { "type": "TITLE" } } },
                { "objectId": "e2", "image": {} },
                { "objectId": "e3", "shape": { "placeholder": { "type": "BODY" } } },
                { "objectId": "e4", "shape": { "placeholder": { "type": "BODY" } } },
            ],
        });
        let found = scan_placeholders(&slide);
        assert_eq!(found.title.as_deref(), Some("e1"));
        assert_eq!(found.subtitle, None);
        assert_eq!(found.bodies, vec!["e3".to_string(), "e4".to_string()]);
    }

    #[test]
    fn created_slide_id_reads_first_reply() {
        let response = json!({
            "presentationId": "p1",
            "replies": [ { "createSlide": { "objectId": "slide_9" } } ],
        });
        assert_eq!(created_slide_id(&response), Some("slide_9"));
        assert_eq!(created_slide_id(&json!({ "replies": [] })), None);
    }

    #[test]
    fn find_slide_matches_object_id() {
        let presentation = json!({
            "slides": [
                { "objectId": "a" },
                { "objectId": "b", "pageElements": [] },
            ],
        });
        assert!(find_slide(&presentation, "b").is_some());
        assert!(find_slide(&presentation, "missing").is_none());
        assert_eq!(slide_ids(&presentation), vec!["a".to_string(), "b".to_string()]);
    }
}
