//! Message board REST service
//!
//! Exposes CRUD routes for messages and a user registration route on top of
//! PostgreSQL. The binary in `main.rs` wires these pieces together.

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
