//! # Amber
//!
//! Command-line front end for the Amber game-content model.
//!
//! This crate owns everything `amber-core` deliberately leaves out:
//! - reading feed dumps from disk and unwrapping response envelopes
//! - layered configuration (flags, environment, `amber.toml`)
//! - the clap command surface and its text/JSON output

pub mod cli;
pub mod config;
pub mod source;
