//! Command-line parsing for the perfgen tools

pub mod args;
