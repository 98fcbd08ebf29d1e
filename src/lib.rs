//! Single-user notes server: REST CRUD over an embedded SQLite store, a
//! static web UI, and a summarization endpoint proxying a chat-completion
//! API.
//!
//! The binary in `main.rs` wires everything together; the modules here are
//! exported so integration tests can build the router against a throwaway
//! database.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod server;
pub mod service;
pub mod summary;
