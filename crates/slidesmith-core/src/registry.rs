//! In-memory deck registry: the only state shared between tool calls.

use std::collections::BTreeMap;

use crate::error::DeckError;

/// Maps presentation names (as chosen by the caller) to Google
/// presentation ids. Owned by the server handler and passed explicitly to
/// every operation; names are unique for the lifetime of the process.
#[derive(Debug, Default)]
pub struct DeckRegistry {
    decks: BTreeMap<String, String>,
}

impl DeckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decks.contains_key(name)
    }

    /// Record a freshly created presentation. Duplicate names are rejected
    /// so later lookups stay unambiguous.
    pub fn register(&mut self, name: &str, presentation_id: &str) -> Result<(), DeckError> {
        if self.decks.contains_key(name) {
            return Err(DeckError::invalid(format!(
                "Presentation '{name}' already exists"
            )));
        }
        self.decks
            .insert(name.to_string(), presentation_id.to_string());
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&str, DeckError> {
        self.decks
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DeckError::NotFound(name.to_string()))
    }

    /// Edit URL for a registered presentation.
    pub fn url(&self, name: &str) -> Result<String, DeckError> {
        let id = self.resolve(name)?;
        Ok(format!("https://docs.google.com/presentation/d/{id}/edit"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_resolve() {
        let mut registry = DeckRegistry::new();
        registry.register("Launch Deck", "pres-123").expect("register");
        assert_eq!(registry.resolve("Launch Deck").expect("resolve"), "pres-123");
        assert_eq!(
            registry.url("Launch Deck").expect("url"),
            "https://docs.google.com/presentation/d/pres-123/edit"
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = DeckRegistry::new();
        registry.register("Deck", "a").expect("register");
        let err = registry.register("Deck", "b").expect_err("duplicate");
        assert!(matches!(err, DeckError::InvalidInput(_)));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let registry = DeckRegistry::new();
        let err = registry.resolve("missing").expect_err("missing");
        assert!(matches!(err, DeckError::NotFound(name) if name == "missing"));
    }
}
