//! Gemini-backed [`ItemParser`](lostlink_core::parser::ItemParser).
//!
//! Sends a lost/found description to the Gemini `generateContent` endpoint
//! with a JSON response schema and decodes the structured reply into a
//! [`ParsedItem`](lostlink_core::parser::ParsedItem).

mod client;
mod types;

pub mod error;

pub use client::{GeminiConfig, GeminiParser};
pub use error::{Error, Result};
