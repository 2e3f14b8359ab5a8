/// Primary, secondary and tertiary club colors keyed by team code
pub(super) const MLB_TEAM_COLORS: &[(&str, &[&str])] = &[
    ("ARI", &["#A71930", "#E3D4AD", "#000000"]),
    ("ATL", &["#CE1141", "#13274F", "#EAAA00"]),
    ("BAL", &["#DF4601", "#000000", "#FFFFFF"]),
    ("BOS", &["#BD3039", "#0C2340", "#FFFFFF"]),
    ("CHC", &["#0E3386", "#CC3433", "#FFFFFF"]),
    ("CHW", &["#27251F", "#C4CED4", "#FFFFFF"]),
    ("CIN", &["#C6011F", "#000000", "#FFFFFF"]),
    ("CLE", &["#00385D", "#E50022", "#FFFFFF"]),
    ("COL", &["#333366", "#131413", "#C4CED4"]),
    ("DET", &["#0C2340", "#FA4616", "#FFFFFF"]),
    ("HOU", &["#002D62", "#EB6E1F", "#F4911E"]),
    ("KCR", &["#004687", "#BD9B60", "#FFFFFF"]),
    ("LAA", &["#003263", "#BA0021", "#FFFFFF"]),
    ("LAD", &["#005A9C", "#EF3E42", "#A5ACAF"]),
    ("MIA", &["#00A3E0", "#EF3340", "#41748D"]),
    ("MIL", &["#12284B", "#FFFFFF", "#FFC52F"]),
    ("MIN", &["#002B5C", "#B9975B", "#D31145"]),
    ("NYM", &["#002D72", "#FF5910", "#FFFFFF"]),
    ("NYY", &["#0C2340", "#C4CED3", "#FFFFFF"]),
    ("ATH", &["#003831", "#A2AAAD", "#EFB21E"]),
    ("PHI", &["#E81828", "#002D72", "#FFFFFF"]),
    ("PIT", &["#27251F", "#FFFFFF", "#FDB827"]),
    ("SDP", &["#2F241D", "#FFC425", "#FFFFFF"]),
    ("SFG", &["#FD5A1E", "#27251F", "#FFFFFF"]),
    ("SEA", &["#0C2C56", "#005C5C", "#C4CED4"]),
    ("STL", &["#C41E3A", "#0C2340", "#FFFFFF"]),
    ("TBR", &["#092C5C", "#F5D130", "#8FBCE6"]),
    ("TEX", &["#003278", "#C0111F", "#FFFFFF"]),
    ("TOR", &["#134A8E", "#1D2D5C", "#FFFFFF"]),
    ("WSH", &["#AB0003", "#14225A", "#FFFFFF"]),
];
