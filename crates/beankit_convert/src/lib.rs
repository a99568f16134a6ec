//! `beankit_convert` v1:
//! Rust-side object conversion kernel.
//!
//! Architecture:
//! - `convert`  : single and batch conversion orchestration
//! - `populate` : per-type-pair shallow field-copy seam
//! - `spec`     : enums/options/errors
//! - `report`   : run-time report model
//! - `util`     : shared helper functions

pub mod convert;
pub mod populate;
pub mod report;
pub mod spec;
mod util;

pub use convert::{
    convert_batch, convert_list_to, convert_list_to_parallel, convert_list_to_parallel_with,
    convert_list_to_with, convert_to, convert_to_with,
};
pub use populate::{FieldFilter, PopulateFrom};
pub use report::{ReportConvert, ReportConvertBuilder};
pub use spec::{
    ConvertBatchError, EnumConvertExecutionMode, EnumConvertPatternMode, SpecConvertOptions,
    SpecConvertOutcome,
};
