//! Core types and logic for the LostLink lost-and-found ledger.
//!
//! This crate has no HTTP or database dependencies. The two
//! external seams, credential persistence and free-text item parsing, are
//! traits ([`credential::CredentialStore`], [`parser::ItemParser`])
//! implemented by other crates.

// Native `async fn` in traits; the traits spell out their `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod credential;
pub mod error;
pub mod export;
pub mod handover;
pub mod intake;
pub mod item;
pub mod ledger;
pub mod matches;
pub mod parser;
pub mod report;
pub mod sample;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
