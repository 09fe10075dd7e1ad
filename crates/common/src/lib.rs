//! Shared runtime helpers for the admin editor crates.
//!
//! Keeps logging setup and `.env` handling in one place so every crate and
//! test harness initialises them the same way.

pub mod env;
pub mod utils;
