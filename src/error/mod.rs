//! Error module for the keyword automaton.
//!
//! Component errors ([`TrieError`], [`AutomatonError`], [`ConfigError`]) are
//! collected into [`AppError`] at the application boundary. Errors are
//! synchronous and local; nothing here retries or aborts the caller.
//!
//! [`ConfigError`]: config::ConfigError

use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::data_structures::aho_corasick::AutomatonError;
use crate::data_structures::keyword_trie::TrieError;

pub mod config;

/// Result type alias used by the application layer.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error enum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Keyword insertion or removal errors.
    #[error("Trie error: {0}")]
    Trie(#[from] TrieError),

    /// Automaton build or scan errors.
    #[error("Automaton error: {0}")]
    Automaton(#[from] AutomatonError),

    /// IO errors that may occur while reading keyword or input files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: AppError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<S: Into<String>>(error: AppError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    /// Report an error with context.
    fn report(&self, context: ErrorContext);
}

/// Error reporter that logs errors using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}
