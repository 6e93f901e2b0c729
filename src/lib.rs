//! Engineering-Support Tools Library
//!
//! This library backs a small family of one-shot command-line utilities:
//! the perf waterfall JSON/CSV generator, a source-tree rename planner,
//! a PNG baseline lint rule, an HTTP echo test fixture, and a flaky-test
//! expectations updater.

pub mod cli;
pub mod io;
pub mod models;
pub mod services;

pub use models::{BenchmarkMetadata, TestEntry, Waterfall};

use std::result;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
    Validation { messages: Vec<String> },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::Validation { messages } => {
                write!(f, "Validation failed:\n{}", messages.join("\n"))
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(format!("JSON error: {err}"))
    }
}

pub type Result<T> = result::Result<T, Error>;
