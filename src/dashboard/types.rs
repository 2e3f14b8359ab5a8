use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::DashboardError;
use crate::usage::Section;

const DOCUMENT_SUFFIX: &str = "_usage.json";
const MAX_TEAM_CODE_LEN: usize = 5;

/// Identifies one team/season usage document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UsageKey {
    pub team: String,
    pub year: u16,
}

impl UsageKey {
    pub fn new(team: &str, year: u16) -> Self {
        Self {
            team: team.trim().to_uppercase(),
            year,
        }
    }

    /// Team codes are short ASCII alphanumeric club codes such as `CHC`
    pub fn is_valid_team(team: &str) -> bool {
        !team.is_empty()
            && team.len() <= MAX_TEAM_CODE_LEN
            && team.chars().all(|c| c.is_ascii_alphanumeric())
    }

    pub fn is_valid(&self) -> bool {
        Self::is_valid_team(&self.team)
    }

    /// Validates navigation parameters.
    ///
    /// Absent or blank values are a `MissingParameter`. A malformed team code
    /// or a year that is not a number cannot name any document and is
    /// reported as `DataUnavailable`.
    pub fn from_params(team: Option<&str>, year: Option<&str>) -> Result<Self, DashboardError> {
        let team = team.map(str::trim).filter(|t| !t.is_empty());
        let year = year.map(str::trim).filter(|y| !y.is_empty());
        let (team, year) = match (team, year) {
            (Some(team), Some(year)) => (team, year),
            _ => return Err(DashboardError::MissingParameter),
        };

        if !Self::is_valid_team(team) {
            return Err(DashboardError::unavailable(team, year, "invalid team code"));
        }
        let parsed = year
            .parse::<u16>()
            .map_err(|e| DashboardError::unavailable(team, year, format!("invalid year: {}", e)))?;
        Ok(Self::new(team, parsed))
    }

    /// Document file name, e.g. `CHC_2025_usage.json`
    pub fn file_name(&self) -> String {
        format!("{}_{}{}", self.team, self.year, DOCUMENT_SUFFIX)
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(DOCUMENT_SUFFIX)?;
        let (team, year) = stem.rsplit_once('_')?;
        if !Self::is_valid_team(team) {
            return None;
        }
        Some(Self::new(team, year.parse().ok()?))
    }
}

impl fmt::Display for UsageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.team, self.year)
    }
}

/// Everything needed to render one team/season dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub team: String,
    pub year: u16,
    /// Every season available for this team, ascending
    pub seasons: Vec<u16>,
    pub sections: Vec<Section>,
    pub generated_at: DateTime<Utc>,
}

impl DashboardPage {
    pub fn key(&self) -> UsageKey {
        UsageKey::new(&self.team, self.year)
    }
}
