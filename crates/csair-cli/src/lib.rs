//! CSAir CLI library.
//!
//! This crate provides the data file resolution and output formatting used
//! by the `csair-cli` binary.

pub mod config;
pub mod output;
