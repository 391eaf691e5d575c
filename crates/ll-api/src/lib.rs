//! LogLens API: library crate for the log sharing and analysis server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `ll-e2e-tests`) can access internal types like `AppState`,
//! `build_router`, and `LogStore`.

pub mod analysis;
pub mod config;
pub mod db;
pub mod error;
pub mod inference;
pub mod routes;
pub mod state;
pub mod store;
