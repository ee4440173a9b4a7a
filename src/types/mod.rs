//! Shared types used across layers.

pub mod lenient;
mod response;

pub use response::{Created, MessageResponse};
