// Library crate for the team usage dashboard
// This file exposes the public API for the server binary and integration tests

pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod palette;
pub mod render;
pub mod shared;
pub mod usage;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use dashboard::{
    DashboardController, DashboardError, DashboardPage, DocumentSource, NavigationOutcome,
    Navigator, UsageKey,
};
pub use palette::{Color, ColorResolver, TeamColorPalette};
pub use render::{HtmlSink, JsonSink, RenderSink};
pub use shared::{AppError, AppState};
pub use usage::{
    AggregationOptions, MissingMetricPolicy, PlayerStat, Section, SectionAssembler, StatGroup,
    TeamYearUsageDocument, ThresholdAggregator,
};
