//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `jobforge` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! The taxonomy follows the three fatal classes of the job pipeline:
//!
//! - Configuration parsing errors: the job description file yields no job
//!   definitions at all (empty or garbage input). Fatal for the whole file.
//! - Option errors: a recognized option carries a malformed or unknown value
//!   (e.g. an unknown `git:` sub-key). Fatal for that job definition, and the
//!   message always names the offending key(s) or value.
//! - Transport errors: a remote server call failed with an HTTP status code.
//!   The publisher retries the transient class internally; everything else is
//!   surfaced unchanged.
//!
//! The `Result` type alias is used to return `Result<T, Error>` from
//! functions, making it easy to handle errors and propagate them up the
//! call stack.

use thiserror::Error;

/// Main error type for jobforge operations
#[derive(Error, Debug)]
pub enum Error {
    /// The job description file could not be parsed into any job definition.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A recognized option carries a value the compiler cannot interpret.
    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// The `git:` block (or an `additional_repositories` entry) contains
    /// sub-keys outside the closed, enumerated set.
    #[error("Received unknown git options: [{}]", keys.join(", "))]
    UnknownGitOptions { keys: Vec<String> },

    /// A remote server call failed with an HTTP status code.
    #[error("Server returned status {status}: {message}")]
    Transport { status: u16, message: String },

    /// A job named in a server request does not exist on the server.
    #[error("Job not found on server: {name}")]
    JobNotFound { name: String },

    /// An error occurred during a network operation, before any HTTP status
    /// was available.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// An error occurred while executing a Git command.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error occurred while building or parsing a markup tree.
    #[error("Markup error: {message}")]
    Markup { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
