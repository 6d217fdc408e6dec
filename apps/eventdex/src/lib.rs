//! # eventdex
//!
//! Library half of the eventdex binary, exposed so the CLI can be driven
//! from integration tests.

pub mod cli;
