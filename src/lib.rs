//! HireSense Analysis Service
//!
//! A Rust backend for resume vs job-description matching. The numeric match
//! score comes from a deterministic keyword-overlap heuristic; qualitative
//! analysis is delegated to an external LLM with a guaranteed fallback, so
//! the endpoint always returns a well-formed report.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
