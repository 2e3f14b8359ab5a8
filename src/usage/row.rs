use serde::Serialize;

use super::{format_count, share, Metric, PlayerStat, StatGroup};
use crate::palette::{Color, ColorResolver};

/// Player attribute a detail-table column reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatField {
    Name,
    Usage,
    Share,
    PlateAppearances,
    Metric(Metric),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub header: String,
    pub field: StatField,
}

impl Column {
    pub fn new(header: impl Into<String>, field: StatField) -> Self {
        Self {
            header: header.into(),
            field,
        }
    }

    pub fn metric(metric: Metric) -> Self {
        Self::new(metric.to_string(), StatField::Metric(metric))
    }
}

/// One bar segment / table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowEntry {
    pub player: PlayerStat,
    /// Percent of the group total
    pub share: f64,
    pub color: Color,
}

impl RowEntry {
    pub fn cell(&self, field: StatField) -> String {
        match field {
            StatField::Name => self.player.name.clone(),
            StatField::Usage => format!("{:.1}", self.player.usage),
            StatField::Share => format!("{:.1}%", self.share),
            StatField::PlateAppearances => self
                .player
                .plate_appearances
                .map(format_count)
                .unwrap_or_default(),
            StatField::Metric(metric) => self
                .player
                .metrics
                .get(metric)
                .map(|value| format!("{:.*}", metric.precision(), value))
                .unwrap_or_default(),
        }
    }

    /// Hover text for the bar segment
    pub fn tooltip(&self) -> String {
        format!("{}: {:.1}%", self.player.name, self.share)
    }
}

/// Renderable row: a proportional bar plus its backing detail table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowModel {
    pub label: String,
    pub total_label: String,
    pub summary: Option<String>,
    pub entries: Vec<RowEntry>,
    pub columns: Vec<Column>,
}

impl RowModel {
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn share_total(&self) -> f64 {
        self.entries.iter().map(|e| e.share).sum()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    pub fn table_rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|entry| self.columns.iter().map(|c| entry.cell(c.field)).collect())
            .collect()
    }
}

/// Builds the row for one group.
///
/// Entries are ordered by descending share (stable), and colors follow that
/// order so bar segments read left to right in palette order. Bucket entries
/// always take the resolver's "Other" color. A group with a zero total yields
/// a row without entries.
pub fn build_row(
    resolver: &ColorResolver,
    team_code: &str,
    label: &str,
    total_label: &str,
    group: &StatGroup,
    columns: Vec<Column>,
) -> RowModel {
    let mut row = RowModel {
        label: label.to_string(),
        total_label: total_label.to_string(),
        summary: None,
        entries: Vec::new(),
        columns,
    };
    if group.is_empty() {
        return row;
    }

    let mut shared: Vec<(&PlayerStat, f64)> = group
        .players
        .iter()
        .filter_map(|player| share(player.usage, group.total).map(|s| (player, s)))
        .collect();
    shared.sort_by(|a, b| b.1.total_cmp(&a.1));

    row.entries = shared
        .into_iter()
        .enumerate()
        .map(|(index, (player, share))| RowEntry {
            color: if player.is_other {
                resolver.other_color()
            } else {
                resolver.resolve(team_code, index)
            },
            player: player.clone(),
            share,
        })
        .collect();
    row
}
