//! Conversion specification models and top-level error types.

use std::fmt;

use crate::report::ReportConvert;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Pattern matching mode for field include/exclude lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumConvertPatternMode {
    /// Shell-like wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression pattern.
    Regex,
    /// Exact substring match.
    Literal,
}

/// Batch execution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumConvertExecutionMode {
    /// Convert every element on the caller's thread, in input order.
    Serial,
    /// Fan per-element work out over a rayon thread pool.
    Parallel,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `convert_batch`.
#[derive(Debug, Clone)]
pub struct SpecConvertOptions {
    /// Include patterns applied to field names; `None` accepts every field.
    pub patterns_include_fields: Option<Vec<String>>,
    /// Exclude patterns applied to field names.
    pub patterns_exclude_fields: Option<Vec<String>>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumConvertPatternMode,
    /// Serial vs parallel per-element execution.
    pub rule_execution: EnumConvertExecutionMode,
    /// Maximum worker threads for the parallel execution stage.
    pub num_workers_max: Option<usize>,
}

impl Default for SpecConvertOptions {
    fn default() -> Self {
        Self {
            patterns_include_fields: None,
            patterns_exclude_fields: None,
            rule_pattern: EnumConvertPatternMode::Glob,
            rule_execution: EnumConvertExecutionMode::Serial,
            num_workers_max: None,
        }
    }
}

/// Output of one `convert_batch` run: targets in input order plus run report.
#[derive(Debug, Clone)]
pub struct SpecConvertOutcome<T> {
    /// Converted targets; `targets[i]` corresponds to `sources[i]`.
    pub targets: Vec<T>,
    /// Counters and warnings collected during the run.
    pub report: ReportConvert,
}

/// "Top-level call failed" errors (input validation / setup stage).
#[derive(Debug)]
pub enum ConvertBatchError {
    /// Invalid include/exclude field pattern.
    InvalidPattern(String),
    /// Invalid worker limit value.
    InvalidWorkerLimit(String),
}

impl fmt::Display for ConvertBatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern(msg) => write!(f, "{msg}"),
            Self::InvalidWorkerLimit(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConvertBatchError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
