//! Validation errors and run summaries.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a validation error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The validation function rejected the data
    Failed,
    /// A required parameter could not be extracted
    MissingParam,
    /// A parameter value has the wrong type
    TypeMismatch,
    /// The validator did not finish in time
    Timeout,
    /// The validator could not be executed
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::MissingParam => "missing_param",
            Self::TypeMismatch => "type_mismatch",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding produced by a mapped validator, before it is attributed to a data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A validation error attributed to a data set and a validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable id `<validator>:<kind>`, suitable for grouping across runs
    pub error_id: String,
    pub data_set_id: String,
    /// Position of the data set in the run; tells apart data sets sharing an id
    #[serde(default)]
    pub data_set_index: usize,
    pub validator: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(data_set_id: impl Into<String>, validator: impl Into<String>, failure: Failure) -> Self {
        let validator = validator.into();
        Self {
            error_id: format!("{}:{}", validator, failure.kind),
            data_set_id: data_set_id.into(),
            data_set_index: 0,
            validator,
            kind: failure.kind,
            message: failure.message,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.data_set_id, self.validator, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating one or more data sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Ids of data sets without errors
    pub succeeded: Vec<String>,
    /// Ids of data sets with at least one error
    pub failed: Vec<String>,
    pub errors: Vec<ValidationError>,
}

impl ValidationSummary {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            started_at: now,
            completed_at: now,
            succeeded: Vec::new(),
            failed: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record the outcome of one data set. Its errors are tagged with the
    /// position of the data set in this run.
    pub fn add_data_set(&mut self, data_set_id: impl Into<String>, errors: Vec<ValidationError>) {
        let data_set_id = data_set_id.into();
        let index = self.succeeded.len() + self.failed.len();
        if errors.is_empty() {
            self.succeeded.push(data_set_id);
        } else {
            self.failed.push(data_set_id);
            self.errors
                .extend(errors.into_iter().map(|error| ValidationError { data_set_index: index, ..error }));
        }
    }

    pub fn finalize(&mut self) {
        self.completed_at = Utc::now();
    }

    pub fn num_succeeds(&self) -> usize {
        self.succeeded.len()
    }

    pub fn num_fails(&self) -> usize {
        self.failed.len()
    }

    pub fn num_errors_total(&self) -> usize {
        self.errors.len()
    }

    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }

    /// Errors of all data sets with this id.
    pub fn errors_for<'a>(&'a self, data_set_id: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| e.data_set_id == data_set_id)
    }

    /// Errors of the data set at `index` in this run.
    pub fn errors_at(&self, index: usize) -> impl Iterator<Item = &ValidationError> + '_ {
        self.errors.iter().filter(move |e| e.data_set_index == index)
    }

    /// Number of errors per error id.
    pub fn error_counts_by_id(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.errors {
            *counts.entry(error.error_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether any error message contains `needle`.
    pub fn contains_error(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.message.contains(needle))
    }

    /// Generate a human-readable report.
    pub fn report(&self) -> String {
        let mut report = String::new();
        let total = self.num_succeeds() + self.num_fails();

        report.push_str(&format!("Validation run {}\n", self.run_id));
        report.push_str(&format!(
            "Status: {}\n",
            if self.passed() { "✅ PASSED" } else { "❌ FAILED" }
        ));
        report.push_str(&format!(
            "Duration: {}ms\n",
            (self.completed_at - self.started_at).num_milliseconds()
        ));

        if !self.failed.is_empty() {
            report.push_str("\nErrors:\n");
            let mut current = None;
            for error in &self.errors {
                if current != Some(error.data_set_index) {
                    current = Some(error.data_set_index);
                    report.push_str(&format!("  ❌ {}\n", error.data_set_id));
                }
                report.push_str(&format!("     - {}: {}\n", error.validator, error.message));
            }

            report.push_str("\nErrors by id:\n");
            for (error_id, count) in self.error_counts_by_id() {
                report.push_str(&format!("  {:>5}  {}\n", count, error_id));
            }
        }

        report.push_str(&format!(
            "\nSummary: {}/{} data sets passed, {} errors",
            self.num_succeeds(),
            total,
            self.num_errors_total()
        ));

        report
    }
}

impl Default for ValidationSummary {
    fn default() -> Self {
        Self::new()
    }
}
