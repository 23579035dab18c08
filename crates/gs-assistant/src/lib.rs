//! Government services assistant: library crate.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `gs-e2e-tests`) can reach the router, classifiers and fakes.

pub mod classifier;
pub mod config;
pub mod executor;
pub mod formatter;
pub mod model;
pub mod repl;
pub mod router;
pub mod services;
pub mod synthesizer;
pub mod transcript;
