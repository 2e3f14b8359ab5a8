mod teams;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

/// Color returned for teams with no registered palette
pub const FALLBACK_COLOR: &str = "#666666";

/// Color used for the synthetic "Other" bucket
pub const OTHER_COLOR: &str = "#999999";

/// Opaque display color, usually a `#rrggbb` hex string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Palette for team {0} has no colors")]
    EmptyPalette(String),

    #[error("Failed to read palette file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse palette file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable mapping from team code to its ordered display colors
#[derive(Debug, Clone, Default)]
pub struct TeamColorPalette {
    teams: HashMap<String, Vec<Color>>,
}

impl TeamColorPalette {
    /// Builds a palette, rejecting teams registered with no colors.
    /// Team codes are stored upper-cased.
    pub fn new<I, S>(entries: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (S, Vec<Color>)>,
        S: Into<String>,
    {
        let mut teams = HashMap::new();
        for (code, colors) in entries {
            let code = code.into().to_uppercase();
            if colors.is_empty() {
                return Err(PaletteError::EmptyPalette(code));
            }
            teams.insert(code, colors);
        }
        Ok(Self { teams })
    }

    /// Primary/secondary/tertiary colors for the 30 MLB clubs
    pub fn mlb() -> Self {
        let teams = teams::MLB_TEAM_COLORS
            .iter()
            .map(|(code, colors)| {
                (
                    code.to_string(),
                    colors.iter().map(|c| Color::new(*c)).collect(),
                )
            })
            .collect();
        Self { teams }
    }

    /// Loads a palette from a JSON object of `{"CHC": ["#0E3386", ...]}`
    #[instrument]
    pub fn from_json_file(path: &Path) -> Result<Self, PaletteError> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: HashMap<String, Vec<Color>> = serde_json::from_str(&raw)?;
        debug!(team_count = parsed.len(), "Loaded team palette file");
        Self::new(parsed)
    }

    pub fn colors_for(&self, team_code: &str) -> Option<&[Color]> {
        self.teams
            .get(&team_code.to_uppercase())
            .map(|colors| colors.as_slice())
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Resolves display colors for bar segments from an injected palette
#[derive(Debug, Clone)]
pub struct ColorResolver {
    palette: TeamColorPalette,
    fallback: Color,
    other: Color,
}

impl ColorResolver {
    pub fn new(palette: TeamColorPalette) -> Self {
        Self {
            palette,
            fallback: Color::new(FALLBACK_COLOR),
            other: Color::new(OTHER_COLOR),
        }
    }

    /// Color for the segment at `index` in a team's bar.
    /// Registered palettes wrap around; unknown teams get the fallback color.
    pub fn resolve(&self, team_code: &str, index: usize) -> Color {
        match self.palette.colors_for(team_code) {
            Some(colors) => colors[index % colors.len()].clone(),
            None => self.fallback.clone(),
        }
    }

    pub fn other_color(&self) -> Color {
        self.other.clone()
    }
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::new(TeamColorPalette::mlb())
    }
}
