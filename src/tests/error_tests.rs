//! Tests for the error module.

use crate::error::catalog::CatalogError;
use crate::error::config::ConfigError;
use crate::error::{
    report_error, set_error_reporter, ErrorContext, ErrorReporter, ErrorReporting, StoreZenError,
    TracingErrorReporter,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = StoreZenError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that nested errors keep their messages.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = StoreZenError::Io(io_error);
    assert!(error.to_string().contains("file not found"));

    let error = StoreZenError::from(CatalogError::NotFound(PathBuf::from("products.json")));
    assert_eq!(
        error.to_string(),
        "Catalog error: Catalog file not found: products.json"
    );

    let error = StoreZenError::from(ConfigError::ValidationError("bad level".to_string()));
    assert_eq!(
        error.to_string(),
        "Configuration error: Configuration validation error: bad level"
    );
}

#[test]
fn test_catalog_parse_error_from_json() {
    let json_error = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
    let error = CatalogError::from(json_error);
    assert!(error.to_string().starts_with("Failed to parse catalog"));
}

/// Counting reporter for testing.
#[derive(Debug, Default)]
struct CountingReporter {
    reported: AtomicUsize,
}

impl ErrorReporter for CountingReporter {
    fn report(&self, _context: &ErrorContext) {
        self.reported.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_error_reporting_uses_installed_reporter() {
    let reporter = Arc::new(CountingReporter::default());
    let mut reporting = ErrorReporting::default();
    reporting.set_reporter(reporter.clone());

    let context = ErrorContext::new(StoreZenError::Custom("boom".to_string()), "search");
    reporting.report(&context);
    reporting.report(&context);

    assert_eq!(reporter.reported.load(Ordering::SeqCst), 2);
}

/// Installing a global reporter routes `report_error` through it.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(CountingReporter::default());
    set_error_reporter(reporter.clone());

    let context = ErrorContext::new(StoreZenError::Custom("test error".to_string()), "catalog");
    report_error(&context);

    assert!(reporter.reported.load(Ordering::SeqCst) >= 1);
    set_error_reporter(Arc::new(TracingErrorReporter));
}

/// The tracing reporter must not panic without a subscriber.
#[test]
fn test_tracing_error_reporter() {
    let context = ErrorContext::new(StoreZenError::Custom("test error".to_string()), "test_component");
    TracingErrorReporter.report(&context);
    ErrorReporting::default().report(&context);
}
