pub mod aggregate;
pub mod document;
pub mod row;
pub mod section;
pub mod share;

mod errors;
pub mod models;

pub use aggregate::{
    AggregationOptions, MissingMetricPolicy, ThresholdAggregator, DEFAULT_CUTOFF_FRACTION,
};
pub use document::{PositionGroup, TeamYearUsageDocument};
pub use errors::UsageError;
pub use models::*;
pub use row::{build_row, Column, RowEntry, RowModel, StatField};
pub use section::{Section, SectionAssembler, SectionKind, ViewMode};
pub use share::share;
