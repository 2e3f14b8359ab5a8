use thiserror::Error;

/// Longest request value echoed back in a failure message
const MAX_ECHO_CHARS: usize = 24;

/// Failures that end a dashboard render pass.
///
/// The display strings are the fixed messages shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Missing team or year")]
    MissingParameter,

    #[error("Could not load data for {team} {year}")]
    DataUnavailable {
        team: String,
        year: String,
        reason: String,
    },
}

impl DashboardError {
    /// `DataUnavailable` naming the request as given, cut to a bounded length
    pub fn unavailable(team: &str, year: &str, reason: impl Into<String>) -> Self {
        DashboardError::DataUnavailable {
            team: echo(team),
            year: echo(year),
            reason: reason.into(),
        }
    }
}

fn echo(raw: &str) -> String {
    raw.trim().chars().take(MAX_ECHO_CHARS).collect()
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Request for {location} failed with status {status}")]
    Status { status: u16, location: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_echoes_request_verbatim() {
        let err = DashboardError::unavailable(" chc ", "2031", "not found");
        assert_eq!(err.to_string(), "Could not load data for chc 2031");
    }

    #[test]
    fn unavailable_caps_long_values() {
        let long_team = "X".repeat(500);
        let err = DashboardError::unavailable(&long_team, "2025", "invalid team code");

        match err {
            DashboardError::DataUnavailable { team, .. } => {
                assert_eq!(team.chars().count(), MAX_ECHO_CHARS)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
