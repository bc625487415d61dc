//! Tests for the error module.

use crate::data_structures::aho_corasick::{Automaton, AutomatonError};
use crate::data_structures::keyword_trie::TrieError;
use crate::error::config::ConfigError;
use crate::error::{
    AppError, AppResult, ErrorContext, ErrorReporter, MockErrorReporter, TracingErrorReporter,
};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = AppError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that component errors convert into application errors with `?`.
#[test]
fn test_component_errors_convert() {
    fn remove_missing() -> AppResult<()> {
        let mut automaton = Automaton::new();
        automaton.remove("absent")?;
        Ok(())
    }

    let error = remove_missing().unwrap_err();
    assert!(matches!(
        error,
        AppError::Automaton(AutomatonError::Trie(TrieError::NotFound(ref k))) if k == "absent"
    ));
    assert!(error.to_string().starts_with("Automaton error:"));

    let error = AppError::from(TrieError::EmptyKeyword);
    assert!(error.to_string().starts_with("Trie error:"));

    let error = AppError::from(ConfigError::ValidationError("bad".to_string()));
    assert!(error.to_string().contains("bad"));
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = AppError::Io(io_error);

    let error_string = format!("{error}");
    assert!(error_string.contains("file not found"));
}

/// Test that reporters receive the full context.
#[test]
fn test_reporter_receives_context() {
    let mut reporter = MockErrorReporter::new();
    reporter
        .expect_report()
        .withf(|context| {
            context.component == "scan"
                && context.details.as_deref() == Some("input.txt")
                && matches!(context.error, AppError::Automaton(_))
        })
        .times(1)
        .return_const(());

    let error = AppError::from(AutomatonError::StaleAutomaton {
        built: None,
        current: 0,
    });
    reporter.report(ErrorContext::new(error, "scan").with_details("input.txt"));
}

/// Test that reporters can be used as trait objects.
#[test]
fn test_reporter_trait_object() {
    let mut mock = MockErrorReporter::new();
    mock.expect_report().times(1).return_const(());

    let reporters: Vec<Box<dyn ErrorReporter>> =
        vec![Box::new(mock), Box::new(TracingErrorReporter)];
    for reporter in &reporters {
        reporter.report(ErrorContext::new(
            AppError::Custom("test error".to_string()),
            "test_component",
        ));
    }
}
