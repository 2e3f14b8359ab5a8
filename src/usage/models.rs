use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::warn;

use super::UsageError;

/// Name given to the bucket that collects low-usage players
pub const OTHER_BUCKET_NAME: &str = "Other";

/// Relative tolerance when reconciling a provided group total with its members
const TOTAL_RELATIVE_TOLERANCE: f64 = 1e-6;
/// Source files round usage to one decimal, so small absolute drift is expected
const TOTAL_ABSOLUTE_TOLERANCE: f64 = 0.5;

/// Unit a group's raw usage counts are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum UsageUnit {
    #[strum(serialize = "inn")]
    Innings,
    #[strum(serialize = "PA")]
    PlateAppearances,
    #[strum(serialize = "IP")]
    InningsPitched,
}

/// Secondary quality metrics carried alongside usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Metric {
    #[strum(serialize = "wOBA")]
    Woba,
    #[strum(serialize = "xwOBA")]
    Xwoba,
    #[strum(serialize = "ERA")]
    Era,
    #[strum(serialize = "FIP")]
    Fip,
    #[strum(serialize = "xFIP")]
    Xfip,
}

impl Metric {
    /// Decimal places the metric is conventionally shown with
    pub fn precision(&self) -> usize {
        match self {
            Metric::Woba | Metric::Xwoba => 3,
            Metric::Era | Metric::Fip | Metric::Xfip => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub woba: Option<f64>,
    pub xwoba: Option<f64>,
    pub era: Option<f64>,
    pub fip: Option<f64>,
    pub xfip: Option<f64>,
}

impl QualityMetrics {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Woba => self.woba,
            Metric::Xwoba => self.xwoba,
            Metric::Era => self.era,
            Metric::Fip => self.fip,
            Metric::Xfip => self.xfip,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::Woba => &mut self.woba,
            Metric::Xwoba => &mut self.xwoba,
            Metric::Era => &mut self.era,
            Metric::Fip => &mut self.fip,
            Metric::Xfip => &mut self.xfip,
        };
        *slot = value;
    }
}

/// One player's contribution within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub name: String,
    pub usage: f64,
    /// Plate appearances, reported for position players
    pub plate_appearances: Option<f64>,
    pub metrics: QualityMetrics,
    /// Marks a bucket that stands in for several low-usage players
    pub is_other: bool,
}

impl PlayerStat {
    pub fn new(name: impl Into<String>, usage: f64) -> Self {
        let name = name.into();
        let is_other = name == OTHER_BUCKET_NAME;
        Self {
            name,
            usage,
            plate_appearances: None,
            metrics: QualityMetrics::default(),
            is_other,
        }
    }

    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.set(metric, Some(value));
        self
    }

    pub fn with_plate_appearances(mut self, plate_appearances: f64) -> Self {
        self.plate_appearances = Some(plate_appearances);
        self
    }

    fn validate(&self) -> Result<(), UsageError> {
        if self.name.trim().is_empty() {
            return Err(UsageError::Validation(
                "player name must not be empty".to_string(),
            ));
        }
        if !self.usage.is_finite() || self.usage < 0.0 {
            return Err(UsageError::Validation(format!(
                "player {} has invalid usage {}",
                self.name, self.usage
            )));
        }
        Ok(())
    }
}

/// A labelled collection of players sharing one usage unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatGroup {
    pub label: String,
    pub unit: UsageUnit,
    pub total: f64,
    pub players: Vec<PlayerStat>,
}

impl StatGroup {
    /// Validates members and settles the group total.
    ///
    /// A provided total wins over the member sum; disagreement beyond
    /// tolerance is logged as a data-quality warning and nothing more.
    pub fn new(
        label: impl Into<String>,
        unit: UsageUnit,
        players: Vec<PlayerStat>,
        provided_total: Option<f64>,
    ) -> Result<Self, UsageError> {
        let label = label.into();
        for player in &players {
            player.validate()?;
        }

        let member_total: f64 = players.iter().map(|p| p.usage).sum();
        let total = match provided_total {
            Some(total) if !total.is_finite() || total < 0.0 => {
                return Err(UsageError::Validation(format!(
                    "group {} has invalid total {}",
                    label, total
                )));
            }
            Some(total) => {
                let drift = (total - member_total).abs();
                let allowed = TOTAL_ABSOLUTE_TOLERANCE.max(total.abs() * TOTAL_RELATIVE_TOLERANCE);
                if drift > allowed {
                    warn!(
                        group = %label,
                        provided_total = total,
                        member_total,
                        "Group total does not match sum of player usage"
                    );
                }
                total
            }
            None => member_total,
        };

        Ok(Self {
            label,
            unit,
            total,
            players,
        })
    }

    pub fn member_total(&self) -> f64 {
        self.players.iter().map(|p| p.usage).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() || self.total == 0.0
    }

    /// Human readable total such as `500 PA` or `1234.5 inn`
    pub fn total_label(&self) -> String {
        format!("{} {}", format_count(self.total), self.unit)
    }
}

/// Whole counts print without decimals, everything else with one
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
