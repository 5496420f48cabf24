use serde_json::json;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};

use crate::config::{format_error_message_auto, ErrorReportConfig, ErrorReportStyle};

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    Fatal,  // Output write or stdin failure
    Medium, // Source open or read failure
    Soft,   // Unparseable line
}

/// Error information for tracking and reporting
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub severity: ErrorSeverity,
    pub message: String,
    pub context: Option<String>,
    pub line_number: Option<usize>,
}

impl ErrorInfo {
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

/// Destination for non-fatal diagnostics raised while aggregating.
///
/// One sink is created per run and handed to the aggregator and the
/// scheduler, so it must tolerate concurrent reports from worker threads.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, error: ErrorInfo);
}

#[derive(Debug, Default)]
struct ReporterState {
    errors: Vec<ErrorInfo>,
    error_counts: HashMap<String, usize>,
    error_examples: HashMap<String, Vec<String>>,
}

/// Error reporting and collection system
#[derive(Debug)]
pub struct ErrorReporter {
    pub config: ErrorReportConfig,
    state: Mutex<ReporterState>,
}

impl ErrorReporter {
    pub fn new(config: ErrorReportConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ReporterState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ReporterState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Report an error according to the configured style
    pub fn report_error(&self, error: ErrorInfo) {
        let mut state = self.state();
        match (&self.config.style, &error.severity) {
            // Fatal errors are always printed, never summarized
            (_, ErrorSeverity::Fatal) => {
                eprintln!("{}", format_error_message_auto(&render(&error)));
            }
            (ErrorReportStyle::Off, _) | (ErrorReportStyle::Summary, _) => {
                track_error(&mut state, &error);
            }
            (ErrorReportStyle::Print, _) => {
                eprintln!("{}", format_error_message_auto(&render(&error)));
                track_error(&mut state, &error);
            }
        }

        state.errors.push(error);
    }

    /// Generate summary report
    pub fn generate_summary(&self) -> Option<String> {
        let state = self.state();
        if state.errors.is_empty() {
            return None;
        }

        match self.config.style {
            ErrorReportStyle::Summary => {
                let mut summary = json!({});

                for (error_type, count) in &state.error_counts {
                    let examples = state
                        .error_examples
                        .get(error_type)
                        .cloned()
                        .unwrap_or_default();
                    summary[error_type] = json!({
                        "count": count,
                        "examples": examples
                    });
                }

                Some(
                    serde_json::to_string_pretty(&summary)
                        .unwrap_or_else(|_| "Error serializing summary".to_string()),
                )
            }
            _ => None,
        }
    }

    /// Print the summary to stderr when running in summary style
    pub fn print_summary(&self) {
        if let Some(summary) = self.generate_summary() {
            eprintln!("{}", summary);
        }
    }

    /// Write summary to file if configured
    pub fn write_summary_to_file(&self) -> Result<()> {
        if let Some(ref file_path) = self.config.file {
            if let Some(summary) = self.generate_summary() {
                let mut file = File::create(file_path)
                    .with_context(|| format!("cannot create error report '{}'", file_path))?;
                file.write_all(summary.as_bytes())?;
            }
        }
        Ok(())
    }

    /// Get total error count
    pub fn error_count(&self) -> usize {
        self.state().errors.len()
    }

    /// Number of reported errors with the given severity
    pub fn count_of(&self, severity: ErrorSeverity) -> usize {
        self.state()
            .errors
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }
}

impl DiagnosticSink for ErrorReporter {
    fn report(&self, error: ErrorInfo) {
        self.report_error(error)
    }
}

/// Sink that tags context-free diagnostics with the source they came from
pub struct SourceScopedSink<'a> {
    inner: &'a dyn DiagnosticSink,
    source: &'a str,
}

impl<'a> SourceScopedSink<'a> {
    pub fn new(inner: &'a dyn DiagnosticSink, source: &'a str) -> Self {
        Self { inner, source }
    }
}

impl DiagnosticSink for SourceScopedSink<'_> {
    fn report(&self, mut error: ErrorInfo) {
        if error.context.is_none() {
            error.context = Some(self.source.to_string());
        }
        self.inner.report(error)
    }
}

/// Track error for summary reporting
fn track_error(state: &mut ReporterState, error: &ErrorInfo) {
    let error_type = format!("{:?}", error.severity);
    *state.error_counts.entry(error_type.clone()).or_insert(0) += 1;

    let examples = state.error_examples.entry(error_type).or_default();
    if examples.len() < 3 {
        examples.push(render(error));
    }
}

fn render(error: &ErrorInfo) -> String {
    match (&error.context, error.line_number) {
        (Some(context), Some(line)) => format!("{}:{}: {}", context, line, error.message),
        (Some(context), None) => format!("{}: {}", context, error.message),
        (None, Some(line)) => format!("line {}: {}", line, error.message),
        (None, None) => error.message.clone(),
    }
}

/// Helper functions to create errors with appropriate severity
pub fn create_fatal_error(message: String, context: Option<String>) -> ErrorInfo {
    ErrorInfo {
        severity: ErrorSeverity::Fatal,
        message,
        context,
        line_number: None,
    }
}

pub fn create_medium_error(message: String, context: Option<String>) -> ErrorInfo {
    ErrorInfo {
        severity: ErrorSeverity::Medium,
        message,
        context,
        line_number: None,
    }
}

pub fn create_soft_error(message: String, context: Option<String>) -> ErrorInfo {
    ErrorInfo {
        severity: ErrorSeverity::Soft,
        message,
        context,
        line_number: None,
    }
}
