use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Metric, PlayerStat, StatGroup, UsageError, UsageUnit};

/// Defensive position usage plus the position's team-level wOBA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGroup {
    pub position: String,
    pub team_woba: Option<f64>,
    pub group: StatGroup,
}

/// Validated contents of one `{TEAM}_{YEAR}_usage.json` file.
/// Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamYearUsageDocument {
    pub team: Option<String>,
    pub year: Option<u16>,
    pub positions: Vec<PositionGroup>,
    pub batting: Option<StatGroup>,
    pub pitching_all: Option<StatGroup>,
    pub pitching_relief: Option<StatGroup>,
    pub dh: Option<StatGroup>,
}

impl TeamYearUsageDocument {
    /// Parses and validates a raw document body
    #[instrument(skip(body), fields(bytes = body.len()))]
    pub fn from_slice(body: &[u8]) -> Result<Self, UsageError> {
        let raw: RawDocument = serde_json::from_slice(body)?;
        let document = raw.into_document()?;
        debug!(
            positions = document.positions.len(),
            has_batting = document.batting.is_some(),
            has_pitching = document.pitching_all.is_some() || document.pitching_relief.is_some(),
            has_dh = document.dh.is_some(),
            "Parsed usage document"
        );
        Ok(document)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
            && self.batting.is_none()
            && self.pitching_all.is_none()
            && self.pitching_relief.is_none()
            && self.dh.is_none()
    }
}

// Wire format written by the season export script. `percent` fields in the
// file are ignored; shares are always recomputed from usage.

#[derive(Debug, Deserialize)]
struct RawDocument {
    team: Option<String>,
    year: Option<u16>,
    positions: Option<Vec<RawPosition>>,
    batting: Option<RawBatting>,
    pitching: Option<RawPitching>,
    dh: Option<RawBatting>,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    position: String,
    total_inn: Option<f64>,
    #[serde(rename = "team_wOBA")]
    team_woba: Option<f64>,
    #[serde(default)]
    players: Vec<RawFielder>,
}

#[derive(Debug, Deserialize)]
struct RawFielder {
    name: String,
    usage: f64,
    #[serde(rename = "PA")]
    pa: Option<f64>,
    #[serde(rename = "wOBA")]
    woba: Option<f64>,
    #[serde(rename = "xwOBA")]
    xwoba: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBatting {
    #[serde(rename = "total_PA")]
    total_pa: Option<f64>,
    #[serde(default)]
    players: Vec<RawBatter>,
}

#[derive(Debug, Deserialize)]
struct RawBatter {
    name: String,
    #[serde(rename = "PA")]
    pa: f64,
    #[serde(rename = "wOBA")]
    woba: Option<f64>,
    #[serde(rename = "xwOBA")]
    xwoba: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPitching {
    all: Option<RawPitchingGroup>,
    relief_only: Option<RawPitchingGroup>,
}

#[derive(Debug, Deserialize)]
struct RawPitchingGroup {
    total_ip: Option<f64>,
    #[serde(default)]
    players: Vec<RawPitcher>,
}

#[derive(Debug, Deserialize)]
struct RawPitcher {
    name: String,
    #[serde(rename = "IP")]
    ip: f64,
    #[serde(rename = "ERA")]
    era: Option<f64>,
    #[serde(rename = "FIP")]
    fip: Option<f64>,
    #[serde(rename = "xFIP")]
    xfip: Option<f64>,
}

impl RawDocument {
    fn into_document(self) -> Result<TeamYearUsageDocument, UsageError> {
        let positions = self
            .positions
            .unwrap_or_default()
            .into_iter()
            .map(RawPosition::into_group)
            .collect::<Result<Vec<_>, _>>()?;

        let (pitching_all, pitching_relief) = match self.pitching {
            Some(pitching) => (
                pitching
                    .all
                    .map(|g| g.into_group("All Pitchers"))
                    .transpose()?,
                pitching
                    .relief_only
                    .map(|g| g.into_group("Relief Only"))
                    .transpose()?,
            ),
            None => (None, None),
        };

        Ok(TeamYearUsageDocument {
            team: self.team,
            year: self.year,
            positions,
            batting: self.batting.map(|b| b.into_group("Batters")).transpose()?,
            pitching_all,
            pitching_relief,
            dh: self.dh.map(|b| b.into_group("DH")).transpose()?,
        })
    }
}

fn with_optional(player: PlayerStat, metric: Metric, value: Option<f64>) -> PlayerStat {
    match value {
        Some(value) => player.with_metric(metric, value),
        None => player,
    }
}

impl RawPosition {
    fn into_group(self) -> Result<PositionGroup, UsageError> {
        let players = self
            .players
            .into_iter()
            .map(|p| {
                let mut player = PlayerStat::new(p.name, p.usage);
                player.plate_appearances = p.pa;
                let player = with_optional(player, Metric::Woba, p.woba);
                with_optional(player, Metric::Xwoba, p.xwoba)
            })
            .collect();

        Ok(PositionGroup {
            group: StatGroup::new(
                self.position.clone(),
                UsageUnit::Innings,
                players,
                self.total_inn,
            )?,
            position: self.position,
            team_woba: self.team_woba,
        })
    }
}

impl RawBatting {
    fn into_group(self, label: &str) -> Result<StatGroup, UsageError> {
        let players = self
            .players
            .into_iter()
            .map(|p| {
                let player = with_optional(PlayerStat::new(p.name, p.pa), Metric::Woba, p.woba);
                with_optional(player, Metric::Xwoba, p.xwoba)
            })
            .collect();
        StatGroup::new(label, UsageUnit::PlateAppearances, players, self.total_pa)
    }
}

impl RawPitchingGroup {
    fn into_group(self, label: &str) -> Result<StatGroup, UsageError> {
        let players = self
            .players
            .into_iter()
            .map(|p| {
                let player = with_optional(PlayerStat::new(p.name, p.ip), Metric::Era, p.era);
                let player = with_optional(player, Metric::Fip, p.fip);
                with_optional(player, Metric::Xfip, p.xfip)
            })
            .collect();
        StatGroup::new(label, UsageUnit::InningsPitched, players, self.total_ip)
    }
}
