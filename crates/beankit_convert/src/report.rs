//! Conversion report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one `convert_batch` run.
#[derive(Debug, Default, Clone)]
pub struct ReportConvert {
    /// Total source elements seen.
    pub cnt_scanned: u64,
    /// Number of targets produced.
    pub cnt_converted: u64,
    /// Number of callback invocations.
    pub cnt_callbacks: u64,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
}

impl ReportConvert {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_converted".to_string(), self.cnt_converted);
        dict_counts.insert("cnt_callbacks".to_string(), self.cnt_callbacks);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} converted={} callbacks={} warnings={}",
            dict_counts["cnt_scanned"],
            dict_counts["cnt_converted"],
            dict_counts["cnt_callbacks"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportConvert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[CONVERT]"))
    }
}

/// Mutable accumulator for conversion statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportConvertBuilder {
    /// See [`ReportConvert::cnt_scanned`].
    pub cnt_scanned: u64,
    /// See [`ReportConvert::cnt_converted`].
    pub cnt_converted: u64,
    /// See [`ReportConvert::cnt_callbacks`].
    pub cnt_callbacks: u64,
    /// See [`ReportConvert::warnings`].
    pub warnings: Vec<String>,
}

impl ReportConvertBuilder {
    /// Increment one or more named counters by `value`.
    ///
    /// Unknown names are ignored intentionally to keep call-sites concise.
    pub fn add_counts(&mut self, field_names: &[&str], value: u64) {
        for field_name in field_names {
            match *field_name {
                "cnt_scanned" => self.cnt_scanned += value,
                "cnt_converted" => self.cnt_converted += value,
                "cnt_callbacks" => self.cnt_callbacks += value,
                _ => {}
            }
        }
    }

    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    /// Increment converted count by one.
    pub fn add_converted(&mut self) {
        self.cnt_converted += 1;
    }

    /// Increment callback count by one.
    pub fn add_callback(&mut self) {
        self.cnt_callbacks += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportConvert {
        ReportConvert {
            cnt_scanned: self.cnt_scanned,
            cnt_converted: self.cnt_converted,
            cnt_callbacks: self.cnt_callbacks,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportConvert, ReportConvertBuilder};

    #[test]
    fn report_convert_to_dict_and_format_agree() {
        let report = ReportConvert {
            cnt_scanned: 4,
            cnt_converted: 4,
            cnt_callbacks: 2,
            warnings: vec!["w".to_string()],
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_scanned"], 4);
        assert_eq!(dict_counts["cnt_converted"], 4);
        assert_eq!(dict_counts["cnt_callbacks"], 2);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format("[CONVERT]");
        assert_eq!(txt, "[CONVERT] scanned=4 converted=4 callbacks=2 warnings=1");
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn report_builder_counts_and_builds() {
        let mut builder_cv_report = ReportConvertBuilder::default();
        builder_cv_report.add_scanned();
        builder_cv_report.add_scanned();
        builder_cv_report.add_converted();
        builder_cv_report.add_callback();
        builder_cv_report.add_counts(&["cnt_converted", "cnt_callbacks"], 1);
        builder_cv_report.add_counts(&["cnt_unknown"], 7);
        builder_cv_report.add_warning("pool fallback".to_string());

        let report = builder_cv_report.build();
        assert_eq!(report.cnt_scanned, 2);
        assert_eq!(report.cnt_converted, 2);
        assert_eq!(report.cnt_callbacks, 2);
        assert_eq!(report.warning_count(), 1);
    }
}
