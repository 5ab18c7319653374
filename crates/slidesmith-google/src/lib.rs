//! Google Slides and Drive REST clients plus the deck orchestration
//! layer.
//!
//! All remote calls are issued strictly sequentially: later edits address
//! text the earlier calls inserted, so ordering is mandatory. Nothing is
//! retried and partially built slides are left in place on failure.

pub mod auth;
pub mod drive;
pub mod service;
pub mod slides;

pub use auth::TokenStore;
pub use service::DeckService;
