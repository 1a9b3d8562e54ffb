//! # gostrap-core
//!
//! Core library for the gostrap CLI providing:
//! - Configuration loading with embedded defaults, a user file, and
//!   environment overrides
//! - Home and projects directory resolution
//! - The shared configuration error type

pub mod config;
pub mod error;
pub mod utils;

pub use config::{ConfigLoader, GostrapConfig, ToolchainConfig};
pub use error::{Error, Result};
pub use utils::get_home_dir;
