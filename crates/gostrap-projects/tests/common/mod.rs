//! Common test utilities for gostrap-projects
//!
//! This module provides shared test infrastructure including:
//! - A recording fake command runner that simulates the Go toolchain
//! - Scripted overwrite prompts and a recording observer
//! - Sandboxed workspaces and assertion helpers

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use assertions::*;
pub use fixtures::*;
pub use mocks::*;
