//! booklens - public-domain book cache with LLM literary analysis.
//!
//! Books are fetched once from a Gutenberg-style catalog, stored in SQLite,
//! and analyzed on demand by a chat-completion model. The analysis is stored
//! with the book and never recomputed.

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
pub mod utils;
