//! Application configuration module
//!
//! Environment-driven settings plus roles, limits and upload constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
