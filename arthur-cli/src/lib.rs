//! Library half of the `arthur` binary: config file handling shared with
//! the acceptance suite.

pub mod config;
