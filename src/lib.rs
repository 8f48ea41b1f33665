//! Crossforge - cross-compilation build orchestrator
//!
//! Resolves inter-project dependency graphs for embedded C/C++ solutions,
//! decides incrementally what must be recompiled, runs compilation in
//! parallel across bounded worker slots, and links artifacts in dependency
//! order via an external GCC cross toolchain.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Build orchestration logic (entities, staleness, scheduling,
//!   graph driving, linking, cleaning)
//! - [`infra`] - Infrastructure layer (filesystem, external tool processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
