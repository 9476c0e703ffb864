//! Pachara API library.
//!
//! Account registration, cookie sessions and a product catalog over
//! `PostgreSQL`, served with axum. The binary in `main.rs` wires this up; the
//! CLI reuses the database and auth layers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
