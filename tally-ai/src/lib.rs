//! tally-ai: optional AI assistance via a chat-completion API.
//!
//! One plain request/response client plus two helpers built on it:
//! freeform spending insights and statement-text extraction. No retries,
//! no caching, no streaming — a single call either returns text or fails.

pub mod client;
pub mod extract;
pub mod insights;

pub use client::{chat_complete, AiConfig, ChatTurn, API_KEY_ENV};
pub use extract::extract_statement;
pub use insights::generate_insights;
