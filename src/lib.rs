//! AgriTrack - farm beneficiary monitoring API
//!
//! REST backend for a program dashboard that registers farmer
//! beneficiaries and tracks the seedlings they receive, crop survival
//! surveys and farm plot boundaries.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and rules
//! - **services**: Application use cases
//! - **infra**: Database, file storage and reference data
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (responses, lenient input parsing)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Seed the first dashboard account
//! cargo run -- create-admin --username admin --password 'change-me-now'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use errors::{AppError, AppResult};
