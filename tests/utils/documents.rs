use serde_json::{json, Value};

// ============================================================================
// Usage Document Fixtures
// ============================================================================

/// Three batters, 500 PA total: 60% / 30% / 10%
pub fn batting_document() -> Value {
    json!({
        "batting": {
            "total_PA": 500,
            "players": [
                { "name": "A", "PA": 300, "wOBA": 0.350 },
                { "name": "B", "PA": 150, "wOBA": 0.300 },
                { "name": "C", "PA": 50, "wOBA": 0.250 }
            ]
        }
    })
}

/// Document in the shape the season export script writes
pub fn full_document(team: &str, year: u16) -> Value {
    json!({
        "team": team,
        "year": year,
        "positions": [
            {
                "position": "C",
                "total_inn": 1300.0,
                "team_wOBA": 0.301,
                "players": [
                    { "name": "Starter C", "usage": 1000.0, "percent": 76.9, "PA": 420, "wOBA": 0.310, "xwOBA": 0.305 },
                    { "name": "Backup C", "usage": 290.0, "percent": 22.3, "PA": 110, "wOBA": 0.270, "xwOBA": 0.280 },
                    { "name": "Emergency C", "usage": 10.0, "percent": 0.8, "PA": 4, "wOBA": 0.200, "xwOBA": 0.210 }
                ]
            },
            {
                "position": "SS",
                "total_inn": 1400.0,
                "team_wOBA": 0.322,
                "players": [
                    { "name": "Shortstop", "usage": 1400.0, "percent": 100.0, "PA": 650, "wOBA": 0.322, "xwOBA": 0.330 }
                ]
            }
        ],
        "batting": {
            "total_PA": 1000,
            "players": [
                { "name": "Shortstop", "PA": 650, "wOBA": 0.322, "xwOBA": 0.330 },
                { "name": "Starter C", "PA": 340, "wOBA": 0.310, "xwOBA": 0.305 },
                { "name": "Backup C", "PA": 10, "wOBA": 0.270, "xwOBA": null }
            ]
        },
        "pitching": {
            "all": {
                "total_ip": 200.0,
                "players": [
                    { "name": "Ace", "IP": 150.0, "ERA": 2.95, "FIP": 3.10, "xFIP": 3.30 },
                    { "name": "Closer", "IP": 50.0, "ERA": 2.10, "FIP": 2.80, "xFIP": 3.00 }
                ]
            },
            "relief_only": {
                "total_ip": 50.0,
                "players": [
                    { "name": "Closer", "IP": 50.0, "ERA": 2.10, "FIP": 2.80, "xFIP": 3.00 }
                ]
            }
        }
    })
}

pub fn to_body(document: &Value) -> Vec<u8> {
    serde_json::to_vec(document).unwrap()
}
