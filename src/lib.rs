//! Keyword Automaton Library
//!
//! A dynamic multi-pattern matcher: keywords are kept in a reference-counted
//! trie that supports insertion and removal, failure links are computed on
//! demand, and a single left-to-right scan reports every keyword occurrence.
//!
//! # Architecture
//!
//! - [`data_structures::keyword_trie`] stores the keyword set
//! - [`data_structures::aho_corasick`] builds failure links and scans
//! - [`config`] and [`error`] provide the ambient configuration and error layers
//!   used by the command-line driver

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the keyword automaton.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loads and validates the configuration.
///
/// Falls back to defaults when `path` is `None`; environment variables with the
/// [`config::ENV_PREFIX`] prefix override file values.
pub fn init(path: Option<&std::path::Path>) -> error::AppResult<config::AppConfig> {
    let loader = config::ConfigLoader::new(path, config::ENV_PREFIX);
    Ok(loader.load()?)
}
