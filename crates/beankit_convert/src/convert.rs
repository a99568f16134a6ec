//! Single-object and batch conversion orchestration.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::populate::{FieldFilter, PopulateFrom};
use crate::report::ReportConvertBuilder;
use crate::spec::{
    ConvertBatchError, EnumConvertExecutionMode, SpecConvertOptions, SpecConvertOutcome,
};
use crate::util::calculate_worker_limit;

/// Convert one `source` into a fresh target from `target_supplier`.
///
/// Returns `None` when `source` or `target_supplier` is absent (the
/// null-object short-circuit); this is the "no conversion requested" signal,
/// not a failure. Otherwise the supplier runs exactly once and the target is
/// populated through its [`PopulateFrom`] impl.
pub fn convert_to<S, T, F>(source: Option<&S>, target_supplier: Option<F>) -> Option<T>
where
    T: PopulateFrom<S>,
    F: FnOnce() -> T,
{
    convert_to_with(source, target_supplier, |_: &S, _: &mut T| {})
}

/// Like [`convert_to`], then run `callback(source, &mut target)`.
///
/// The callback always observes a fully populated target: the field copy
/// completes before the callback runs. Use it for mapping logic plain field
/// copy cannot express (derived fields, nested object mapping).
pub fn convert_to_with<S, T, F, C>(
    source: Option<&S>,
    target_supplier: Option<F>,
    callback: C,
) -> Option<T>
where
    T: PopulateFrom<S>,
    F: FnOnce() -> T,
    C: FnOnce(&S, &mut T),
{
    let source = source?;
    let target_supplier = target_supplier?;

    let mut target = target_supplier();
    target.populate_from(source, &FieldFilter::allow_all());
    callback(source, &mut target);
    Some(target)
}

/// Convert every element of `sources` on the caller's thread, in input order.
///
/// The supplier runs exactly once per element; `result[i]` is the conversion
/// of `sources[i]`. Returns `None` when `sources` or `target_supplier` is
/// absent.
pub fn convert_list_to<S, T, F>(
    sources: Option<&[S]>,
    target_supplier: Option<F>,
) -> Option<Vec<T>>
where
    T: PopulateFrom<S>,
    F: Fn() -> T,
{
    let l_sources = sources?;
    let target_supplier = target_supplier?;
    Some(run_serial(
        l_sources,
        &target_supplier,
        None::<&fn(&S, &mut T)>,
        &FieldFilter::allow_all(),
    ))
}

/// Like [`convert_list_to`], with `callback` run once per element after that
/// element's copy completes.
pub fn convert_list_to_with<S, T, F, C>(
    sources: Option<&[S]>,
    target_supplier: Option<F>,
    callback: C,
) -> Option<Vec<T>>
where
    T: PopulateFrom<S>,
    F: Fn() -> T,
    C: Fn(&S, &mut T),
{
    let l_sources = sources?;
    let target_supplier = target_supplier?;
    Some(run_serial(
        l_sources,
        &target_supplier,
        Some(&callback),
        &FieldFilter::allow_all(),
    ))
}

/// Convert every element of `sources` on a rayon worker pool.
///
/// Per-element work (supplier, field copy, callback) is independent; result
/// placement stays index-for-index with the input, only execution timing is
/// unordered. Pool size follows the CPU-clamped default; use
/// [`convert_batch`] to pick an explicit `num_workers_max`.
pub fn convert_list_to_parallel<S, T, F>(
    sources: Option<&[S]>,
    target_supplier: Option<F>,
) -> Option<Vec<T>>
where
    S: Sync,
    T: PopulateFrom<S> + Send,
    F: Fn() -> T + Sync,
{
    let l_sources = sources?;
    let target_supplier = target_supplier?;
    let mut builder_cv_report = ReportConvertBuilder::default();
    Some(run_parallel(
        l_sources,
        &target_supplier,
        None::<&fn(&S, &mut T)>,
        &FieldFilter::allow_all(),
        calculate_worker_limit(None),
        &mut builder_cv_report,
    ))
}

/// Like [`convert_list_to_parallel`], with `callback` run once per element.
///
/// If the callback touches shared state, synchronizing that state is the
/// caller's responsibility.
pub fn convert_list_to_parallel_with<S, T, F, C>(
    sources: Option<&[S]>,
    target_supplier: Option<F>,
    callback: C,
) -> Option<Vec<T>>
where
    S: Sync,
    T: PopulateFrom<S> + Send,
    F: Fn() -> T + Sync,
    C: Fn(&S, &mut T) + Sync,
{
    let l_sources = sources?;
    let target_supplier = target_supplier?;
    let mut builder_cv_report = ReportConvertBuilder::default();
    Some(run_parallel(
        l_sources,
        &target_supplier,
        Some(&callback),
        &FieldFilter::allow_all(),
        calculate_worker_limit(None),
        &mut builder_cv_report,
    ))
}

/// Batch conversion driven by [`SpecConvertOptions`].
///
/// Behavior is controlled by the options, including:
/// - include/exclude pattern rules for field names,
/// - serial vs parallel per-element execution,
/// - worker count for the parallel stage.
///
/// This function performs:
/// 1. Input validation and field-pattern compilation.
/// 2. The null-object short-circuit (`Ok(None)` on absent inputs).
/// 3. Per-element conversion (serial or rayon thread pool).
/// 4. Report aggregation.
///
/// Returns [`SpecConvertOutcome`] when the run completes. Returns
/// [`ConvertBatchError`] only for setup and validation failures.
pub fn convert_batch<S, T, F, C>(
    sources: Option<&[S]>,
    target_supplier: Option<F>,
    callback: Option<C>,
    spec_cv_options: SpecConvertOptions,
) -> Result<Option<SpecConvertOutcome<T>>, ConvertBatchError>
where
    S: Sync,
    T: PopulateFrom<S> + Send,
    F: Fn() -> T + Sync,
    C: Fn(&S, &mut T) + Sync,
{
    if spec_cv_options.num_workers_max == Some(0) {
        return Err(ConvertBatchError::InvalidWorkerLimit(
            "Arg `num_workers_max` must be >= 1 or None.".to_string(),
        ));
    }

    let filter_fields = FieldFilter::from_raw(
        spec_cv_options.patterns_include_fields.as_deref(),
        spec_cv_options.patterns_exclude_fields.as_deref(),
        spec_cv_options.rule_pattern,
    )?;

    let (Some(l_sources), Some(target_supplier)) = (sources, target_supplier.as_ref()) else {
        return Ok(None);
    };

    let n_workers_max = calculate_worker_limit(spec_cv_options.num_workers_max);
    let mut builder_cv_report = ReportConvertBuilder::default();
    builder_cv_report.add_counts(&["cnt_scanned"], l_sources.len() as u64);

    let if_serial = spec_cv_options.rule_execution == EnumConvertExecutionMode::Serial
        || n_workers_max <= 1;
    let l_targets = if if_serial {
        run_serial(l_sources, target_supplier, callback.as_ref(), &filter_fields)
    } else {
        run_parallel(
            l_sources,
            target_supplier,
            callback.as_ref(),
            &filter_fields,
            n_workers_max,
            &mut builder_cv_report,
        )
    };

    builder_cv_report.add_counts(&["cnt_converted"], l_targets.len() as u64);
    if callback.is_some() {
        builder_cv_report.add_counts(&["cnt_callbacks"], l_targets.len() as u64);
    }

    Ok(Some(SpecConvertOutcome {
        targets: l_targets,
        report: builder_cv_report.build(),
    }))
}

fn convert_element<S, T, F, C>(
    source: &S,
    target_supplier: &F,
    callback: Option<&C>,
    filter_fields: &FieldFilter,
) -> T
where
    T: PopulateFrom<S>,
    F: Fn() -> T,
    C: Fn(&S, &mut T),
{
    let mut target = target_supplier();
    target.populate_from(source, filter_fields);
    if let Some(callback) = callback {
        callback(source, &mut target);
    }
    target
}

fn run_serial<S, T, F, C>(
    l_sources: &[S],
    target_supplier: &F,
    callback: Option<&C>,
    filter_fields: &FieldFilter,
) -> Vec<T>
where
    T: PopulateFrom<S>,
    F: Fn() -> T,
    C: Fn(&S, &mut T),
{
    l_sources
        .iter()
        .map(|source| convert_element(source, target_supplier, callback, filter_fields))
        .collect()
}

fn run_parallel<S, T, F, C>(
    l_sources: &[S],
    target_supplier: &F,
    callback: Option<&C>,
    filter_fields: &FieldFilter,
    n_workers_max: usize,
    builder_cv_report: &mut ReportConvertBuilder,
) -> Vec<T>
where
    S: Sync,
    T: PopulateFrom<S> + Send,
    F: Fn() -> T + Sync,
    C: Fn(&S, &mut T) + Sync,
{
    let thread_pool = ThreadPoolBuilder::new().num_threads(n_workers_max).build();
    let Ok(thread_pool) = thread_pool else {
        builder_cv_report.add_warning(format!(
            "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial conversion."
        ));
        return run_serial(l_sources, target_supplier, callback, filter_fields);
    };

    // Indexed par_iter keeps result placement aligned with input order.
    thread_pool.install(|| {
        l_sources
            .par_iter()
            .map(|source| convert_element(source, target_supplier, callback, filter_fields))
            .collect::<Vec<_>>()
    })
}
