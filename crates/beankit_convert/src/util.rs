use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{ConvertBatchError, EnumConvertPatternMode};

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
pub(crate) enum TypeConvertPatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SpecConvertFieldPatterns {
    pub(crate) patterns_include_fields: Option<TypeConvertPatternSeq>,
    pub(crate) patterns_exclude_fields: Option<TypeConvertPatternSeq>,
}

impl SpecConvertFieldPatterns {
    pub(crate) fn from_raw(
        patterns_include_fields: Option<&[String]>,
        patterns_exclude_fields: Option<&[String]>,
        rule_pattern: EnumConvertPatternMode,
    ) -> Result<Self, ConvertBatchError> {
        Ok(Self {
            patterns_include_fields: _compile(patterns_include_fields, rule_pattern)?,
            patterns_exclude_fields: _compile(patterns_exclude_fields, rule_pattern)?,
        })
    }
}

fn _compile(
    patterns: Option<&[String]>,
    rule_pattern: EnumConvertPatternMode,
) -> Result<Option<TypeConvertPatternSeq>, ConvertBatchError> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    match rule_pattern {
        EnumConvertPatternMode::Literal => {
            Ok(Some(TypeConvertPatternSeq::Literal(patterns.to_vec())))
        }
        EnumConvertPatternMode::Glob => {
            let mut l_glob = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let matcher = Glob::new(pattern)
                    .map_err(|e| {
                        ConvertBatchError::InvalidPattern(format!(
                            "Invalid pattern in include/exclude: {e}"
                        ))
                    })?
                    .compile_matcher();
                l_glob.push(matcher);
            }
            Ok(Some(TypeConvertPatternSeq::Glob(l_glob)))
        }
        EnumConvertPatternMode::Regex => {
            let mut l_regex = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex = Regex::new(pattern).map_err(|e| {
                    ConvertBatchError::InvalidPattern(format!(
                        "Invalid pattern in include/exclude: {e}"
                    ))
                })?;
                l_regex.push(regex);
            }
            Ok(Some(TypeConvertPatternSeq::Regex(l_regex)))
        }
    }
}

fn _is_pattern_matching(
    value: &str,
    patterns: Option<&TypeConvertPatternSeq>,
    rule_pattern: EnumConvertPatternMode,
) -> bool {
    let Some(patterns) = patterns else {
        return false;
    };

    match rule_pattern {
        EnumConvertPatternMode::Literal => match patterns {
            TypeConvertPatternSeq::Literal(v) => v.iter().any(|p| value.contains(p)),
            TypeConvertPatternSeq::Glob(_) => false,
            TypeConvertPatternSeq::Regex(_) => false,
        },
        EnumConvertPatternMode::Glob => match patterns {
            TypeConvertPatternSeq::Glob(v) => v.iter().any(|p| p.is_match(value)),
            TypeConvertPatternSeq::Literal(_) => false,
            TypeConvertPatternSeq::Regex(_) => false,
        },
        EnumConvertPatternMode::Regex => match patterns {
            TypeConvertPatternSeq::Regex(v) => v.iter().any(|p| p.is_match(value)),
            TypeConvertPatternSeq::Literal(_) => false,
            TypeConvertPatternSeq::Glob(_) => false,
        },
    }
}

fn _should_include(
    value: &str,
    patterns: Option<&TypeConvertPatternSeq>,
    rule_pattern: EnumConvertPatternMode,
) -> bool {
    match patterns {
        None => true,
        Some(_) => _is_pattern_matching(value, patterns, rule_pattern),
    }
}

fn _should_exclude(
    value: &str,
    patterns: Option<&TypeConvertPatternSeq>,
    rule_pattern: EnumConvertPatternMode,
) -> bool {
    match patterns {
        None => false,
        Some(_) => _is_pattern_matching(value, patterns, rule_pattern),
    }
}

pub(crate) fn should_exclude_field_by_patterns(
    name_field: &str,
    patterns_include: Option<&TypeConvertPatternSeq>,
    patterns_exclude: Option<&TypeConvertPatternSeq>,
    rule_pattern: EnumConvertPatternMode,
) -> bool {
    !_should_include(name_field, patterns_include, rule_pattern)
        || _should_exclude(name_field, patterns_exclude, rule_pattern)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WorkerSizing

pub(crate) fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, 8),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{
        SpecConvertFieldPatterns, calculate_worker_limit, should_exclude_field_by_patterns,
    };
    use crate::spec::{ConvertBatchError, EnumConvertPatternMode};

    fn compile(
        include: Option<&[&str]>,
        exclude: Option<&[&str]>,
        rule_pattern: EnumConvertPatternMode,
    ) -> SpecConvertFieldPatterns {
        let to_owned =
            |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect::<Vec<String>>();
        SpecConvertFieldPatterns::from_raw(
            include.map(to_owned).as_deref(),
            exclude.map(to_owned).as_deref(),
            rule_pattern,
        )
        .expect("compile patterns")
    }

    fn excluded(spec_cv_pats: &SpecConvertFieldPatterns, name_field: &str, rule_pattern: EnumConvertPatternMode) -> bool {
        should_exclude_field_by_patterns(
            name_field,
            spec_cv_pats.patterns_include_fields.as_ref(),
            spec_cv_pats.patterns_exclude_fields.as_ref(),
            rule_pattern,
        )
    }

    #[test]
    fn patterns_none_accepts_everything() {
        let rule = EnumConvertPatternMode::Glob;
        let spec_cv_pats = compile(None, None, rule);
        assert!(!excluded(&spec_cv_pats, "id", rule));
        assert!(!excluded(&spec_cv_pats, "anything_at_all", rule));
    }

    #[test]
    fn patterns_glob_include_and_exclude() {
        let rule = EnumConvertPatternMode::Glob;
        let spec_cv_pats = compile(Some(&["id*", "name"]), Some(&["id_legacy"]), rule);
        assert!(!excluded(&spec_cv_pats, "id", rule));
        assert!(!excluded(&spec_cv_pats, "id_short", rule));
        assert!(!excluded(&spec_cv_pats, "name", rule));
        assert!(excluded(&spec_cv_pats, "id_legacy", rule));
        assert!(excluded(&spec_cv_pats, "extra", rule));
    }

    #[test]
    fn patterns_regex_exclude_only() {
        let rule = EnumConvertPatternMode::Regex;
        let spec_cv_pats = compile(None, Some(&["^secret_"]), rule);
        assert!(!excluded(&spec_cv_pats, "name", rule));
        assert!(excluded(&spec_cv_pats, "secret_token", rule));
    }

    #[test]
    fn patterns_literal_matches_substring() {
        let rule = EnumConvertPatternMode::Literal;
        let spec_cv_pats = compile(None, Some(&["internal"]), rule);
        assert!(excluded(&spec_cv_pats, "internal_flag", rule));
        assert!(excluded(&spec_cv_pats, "flag_internal", rule));
        assert!(!excluded(&spec_cv_pats, "flag", rule));
    }

    #[test]
    fn patterns_empty_list_is_no_filter() {
        let rule = EnumConvertPatternMode::Glob;
        let spec_cv_pats = compile(Some(&[]), None, rule);
        assert!(!excluded(&spec_cv_pats, "whatever", rule));
    }

    #[test]
    fn patterns_invalid_regex_rejected() {
        let err = SpecConvertFieldPatterns::from_raw(
            Some(&["(".to_string()]),
            None,
            EnumConvertPatternMode::Regex,
        )
        .expect_err("must fail");
        assert!(matches!(err, ConvertBatchError::InvalidPattern(_)));
    }

    #[test]
    fn worker_limit_clamps_to_cpu_range() {
        let n_cpu = std::thread::available_parallelism()
            .map(|v| v.get())
            .unwrap_or(1);

        assert_eq!(calculate_worker_limit(Some(1)), 1);
        assert!(calculate_worker_limit(Some(usize::MAX)) <= n_cpu);

        let n_default = calculate_worker_limit(None);
        assert!((1..=8).contains(&n_default));
    }
}
