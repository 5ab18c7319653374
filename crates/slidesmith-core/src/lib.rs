//! Core domain types for Slidesmith.
//!
//! Everything here is pure: request builders produce `serde_json::Value`
//! bodies for the Slides batch-update API, the bullet translator turns a
//! content block into range edits, and the chart module renders PNG bytes
//! in memory. Remote I/O lives in `slidesmith-google`.

pub mod chart;
pub mod error;
pub mod ids;
pub mod page;
pub mod registry;
pub mod requests;
pub mod sample;
pub mod table;
pub mod text;

pub use error::DeckError;
pub use registry::DeckRegistry;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::version;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
