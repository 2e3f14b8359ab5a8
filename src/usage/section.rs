use serde::Serialize;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, instrument};

use super::{
    build_row, Column, Metric, PositionGroup, RowModel, StatField, StatGroup,
    TeamYearUsageDocument, ThresholdAggregator,
};
use crate::palette::ColorResolver;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Defense,
    Batting,
    Pitching,
    DesignatedHitter,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Defense => "Position Player Usage & Production",
            SectionKind::Batting => "Batting Usage & Production",
            SectionKind::Pitching => "Pitching Usage & Production",
            SectionKind::DesignatedHitter => "Designated Hitter Usage & Production",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            SectionKind::Defense => "Bar length shows share of innings at each position",
            SectionKind::Batting => "Bar length shows plate appearances",
            SectionKind::Pitching => "Bar length shows share of team innings pitched",
            SectionKind::DesignatedHitter => "Bar length shows plate appearances as DH",
        }
    }
}

/// Which view of a section is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Bars,
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Bars => ViewMode::Table,
            ViewMode::Table => ViewMode::Bars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<RowModel>,
    pub view: ViewMode,
}

impl Section {
    fn new(kind: SectionKind, rows: Vec<RowModel>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            subtitle: kind.subtitle().to_string(),
            rows,
            view: ViewMode::default(),
        }
    }

    pub fn toggle(&mut self) {
        self.view = self.view.toggled();
    }
}

fn fielding_columns() -> Vec<Column> {
    vec![
        Column::new("Player", StatField::Name),
        Column::new("Inn", StatField::Usage),
        Column::new("%", StatField::Share),
        Column::new("PA", StatField::PlateAppearances),
        Column::metric(Metric::Woba),
        Column::metric(Metric::Xwoba),
    ]
}

fn batting_columns() -> Vec<Column> {
    vec![
        Column::new("Player", StatField::Name),
        Column::new("PA", StatField::Usage),
        Column::new("%", StatField::Share),
        Column::metric(Metric::Woba),
        Column::metric(Metric::Xwoba),
    ]
}

fn pitching_columns() -> Vec<Column> {
    vec![
        Column::new("Pitcher", StatField::Name),
        Column::new("IP", StatField::Usage),
        Column::new("%", StatField::Share),
        Column::metric(Metric::Era),
        Column::metric(Metric::Fip),
        Column::metric(Metric::Xfip),
    ]
}

/// Turns a usage document into the ordered list of page sections
#[derive(Debug, Clone)]
pub struct SectionAssembler {
    resolver: Arc<ColorResolver>,
    aggregator: ThresholdAggregator,
}

impl SectionAssembler {
    pub fn new(resolver: Arc<ColorResolver>, aggregator: ThresholdAggregator) -> Self {
        Self {
            resolver,
            aggregator,
        }
    }

    /// Sections appear in defense, batting, pitching, DH order; any section
    /// without data in the document is left out entirely.
    #[instrument(skip(self, document))]
    pub fn assemble_sections(
        &self,
        document: &TeamYearUsageDocument,
        team_code: &str,
    ) -> Vec<Section> {
        let mut sections = Vec::new();

        if !document.positions.is_empty() {
            let rows = document
                .positions
                .iter()
                .map(|position| self.position_row(team_code, position))
                .collect();
            sections.push(Section::new(SectionKind::Defense, rows));
        }

        if let Some(batting) = &document.batting {
            let row = self.group_row(team_code, "Batters", batting, batting_columns());
            sections.push(Section::new(SectionKind::Batting, vec![row]));
        }

        let pitching_rows: Vec<RowModel> = [
            ("All Pitchers", &document.pitching_all),
            ("Relief Only", &document.pitching_relief),
        ]
        .into_iter()
        .filter_map(|(label, group)| {
            group
                .as_ref()
                .map(|g| self.group_row(team_code, label, g, pitching_columns()))
        })
        .collect();
        if !pitching_rows.is_empty() {
            sections.push(Section::new(SectionKind::Pitching, pitching_rows));
        }

        if let Some(dh) = &document.dh {
            let row = self.group_row(team_code, "DH", dh, batting_columns());
            sections.push(Section::new(SectionKind::DesignatedHitter, vec![row]));
        }

        debug!(section_count = sections.len(), "Assembled dashboard sections");
        sections
    }

    fn position_row(&self, team_code: &str, position: &PositionGroup) -> RowModel {
        let row = self.group_row(
            team_code,
            &position.position,
            &position.group,
            fielding_columns(),
        );
        match position.team_woba {
            Some(woba) => row.with_summary(format!("wOBA {:.3}", woba)),
            None => row,
        }
    }

    fn group_row(
        &self,
        team_code: &str,
        label: &str,
        group: &StatGroup,
        columns: Vec<Column>,
    ) -> RowModel {
        let aggregated = StatGroup {
            players: self.aggregator.aggregate(&group.players, group.total),
            ..group.clone()
        };
        build_row(
            &self.resolver,
            team_code,
            label,
            &group.total_label(),
            &aggregated,
            columns,
        )
    }
}
