//! fnlog CLI library.
//!
//! Shared pieces of the `fnlog-cli` binary: logger setup from flags and
//! environment, and output formatting for command results.

#![deny(warnings)]

pub mod logging;
pub mod output;
