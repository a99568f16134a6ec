//! Per-type-pair shallow field-copy seam.

use crate::spec::{ConvertBatchError, EnumConvertPatternMode};
use crate::util::{SpecConvertFieldPatterns, should_exclude_field_by_patterns};

/// Field-name gate consulted by [`PopulateFrom`] implementations.
///
/// Built from the include/exclude field patterns of
/// [`SpecConvertOptions`](crate::spec::SpecConvertOptions); the plain entry
/// points use [`FieldFilter::allow_all`]. A field whose name is not accepted
/// must be left at its factory-assigned default.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    spec_cv_pats: SpecConvertFieldPatterns,
    rule_pattern: EnumConvertPatternMode,
}

impl Default for FieldFilter {
    fn default() -> Self {
        Self {
            spec_cv_pats: SpecConvertFieldPatterns::default(),
            rule_pattern: EnumConvertPatternMode::Glob,
        }
    }
}

impl FieldFilter {
    /// Filter that accepts every field name.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub(crate) fn from_raw(
        patterns_include_fields: Option<&[String]>,
        patterns_exclude_fields: Option<&[String]>,
        rule_pattern: EnumConvertPatternMode,
    ) -> Result<Self, ConvertBatchError> {
        Ok(Self {
            spec_cv_pats: SpecConvertFieldPatterns::from_raw(
                patterns_include_fields,
                patterns_exclude_fields,
                rule_pattern,
            )?,
            rule_pattern,
        })
    }

    /// Whether the named field should receive a value from the source.
    pub fn accepts(&self, name_field: &str) -> bool {
        !should_exclude_field_by_patterns(
            name_field,
            self.spec_cv_pats.patterns_include_fields.as_ref(),
            self.spec_cv_pats.patterns_exclude_fields.as_ref(),
            self.rule_pattern,
        )
    }
}

/// Shallow field copy from a source type into `Self`, one impl per type pair.
///
/// Implementations copy each field of `Self` that has a same-named,
/// assignment-compatible counterpart on `S`: plain value copy for `Copy`
/// fields, `clone()` for owned handles. Copying must not recurse into nested
/// object graphs. Fields without a counterpart (either side) and fields the
/// filter rejects are simply not written, so they keep whatever the target
/// factory assigned.
///
/// # Examples
/// ```ignore
/// impl PopulateFrom<UserEntity> for UserView {
///     fn populate_from(&mut self, source: &UserEntity, filter_fields: &FieldFilter) {
///         if filter_fields.accepts("id") {
///             self.id = source.id;
///         }
///         if filter_fields.accepts("name") {
///             self.name = source.name.clone();
///         }
///         // `UserView::rendered_at` has no counterpart: left untouched.
///     }
/// }
/// ```
pub trait PopulateFrom<S> {
    /// Copy every matching field of `source` into `self`.
    fn populate_from(&mut self, source: &S, filter_fields: &FieldFilter);
}

#[cfg(test)]
mod tests {
    use super::FieldFilter;
    use crate::spec::EnumConvertPatternMode;

    #[test]
    fn field_filter_allow_all_accepts_any_name() {
        let filter_fields = FieldFilter::allow_all();
        assert!(filter_fields.accepts("id"));
        assert!(filter_fields.accepts(""));
        assert!(filter_fields.accepts("no_such_field"));
    }

    #[test]
    fn field_filter_from_raw_applies_patterns() {
        let patterns_include = vec!["id".to_string(), "name".to_string()];
        let patterns_exclude = vec!["name".to_string()];
        let filter_fields = FieldFilter::from_raw(
            Some(patterns_include.as_slice()),
            Some(patterns_exclude.as_slice()),
            EnumConvertPatternMode::Literal,
        )
        .expect("compile filter");

        assert!(filter_fields.accepts("id"));
        assert!(!filter_fields.accepts("name"));
        assert!(!filter_fields.accepts("extra"));
    }
}
