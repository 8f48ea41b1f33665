//! Core build orchestration logic
//!
//! # Submodules
//!
//! - [`project`] - Project, source file and reference entities
//! - [`solution`] - Solution model and reference resolution
//! - [`manifest`] - Solution/project descriptor parsing
//! - [`layout`] - Build output directory layout
//! - [`outcome`] - Per-pass compile/link result value objects
//! - [`staleness`] - Incremental staleness detection
//! - [`scheduler`] - Bounded-concurrency compile scheduling
//! - [`driver`] - Recursive graph build driver
//! - [`linker`] - Link and archive stage
//! - [`clean`] - Clean build artifacts logic

pub mod clean;
pub mod driver;
pub mod layout;
pub mod linker;
pub mod manifest;
pub mod outcome;
pub mod project;
pub mod scheduler;
pub mod solution;
pub mod staleness;
