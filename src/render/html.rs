// HTML rendering for the usage dashboard. Pages are self-contained documents
// with inline CSS; the bar/table switch of each section is a plain link
// carrying the `table` query parameter.

use crate::dashboard::{Catalog, DashboardError, DashboardPage};
use crate::usage::{RowModel, Section, SectionKind, ViewMode};

/// Render a full team/season dashboard
pub fn render_page(page: &DashboardPage) -> String {
    let title = format!("{} {} Usage", page.team, page.year);
    let tables: Vec<SectionKind> = page
        .sections
        .iter()
        .filter(|s| s.view == ViewMode::Table)
        .map(|s| s.kind)
        .collect();

    let body = if page.sections.is_empty() {
        r#"<p class="subtle">No usage data recorded for this season.</p>"#.to_string()
    } else {
        page.sections
            .iter()
            .map(|section| render_section(page, section, &tables))
            .collect::<Vec<_>>()
            .join("\n")
    };

    document(
        &title,
        &format!(
            r#"<h1>{title}</h1>
{seasons}
<div class="subtle">Generated {generated}</div>
<div id="usage-dashboard">
{body}
</div>"#,
            title = escape(&title),
            seasons = render_seasons(page, &tables),
            generated = page.generated_at.format("%Y-%m-%d %H:%M UTC"),
            body = body,
        ),
    )
}

/// Render the fixed user-facing message for a failed load
pub fn render_failure(error: &DashboardError) -> String {
    document(
        "Usage Dashboard",
        &format!(
            r#"<h2>{message}</h2>
<p><a href="/">Back to teams</a></p>"#,
            message = escape(&error.to_string())
        ),
    )
}

/// Render the team/season selector
pub fn render_catalog(catalog: &Catalog) -> String {
    let cards = catalog
        .iter()
        .flat_map(|(team, years)| {
            years.iter().map(move |year| {
                format!(
                    r#"<a class="team-card" href="/team?team={team}&amp;year={year}">{team} &mdash; {year}</a>"#,
                    team = escape(team),
                    year = year,
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = if cards.is_empty() {
        r#"<p class="subtle">No usage documents available.</p>"#.to_string()
    } else {
        cards
    };

    document(
        "Team Usage",
        &format!(
            r#"<h1>Team Usage</h1>
<div id="team-selector">
{body}
</div>"#
        ),
    )
}

/// Links to the team's other seasons, keeping the current table views
fn render_seasons(page: &DashboardPage, tables: &[SectionKind]) -> String {
    if page.seasons.is_empty() {
        return String::new();
    }

    let table_query = if tables.is_empty() {
        String::new()
    } else {
        let kinds: Vec<String> = tables.iter().map(|kind| kind.to_string()).collect();
        format!("&amp;table={}", kinds.join(","))
    };

    let links = page
        .seasons
        .iter()
        .map(|&year| {
            if year == page.year {
                format!(r#"<span class="season current">{year}</span>"#)
            } else {
                format!(
                    r#"<a class="season" href="/team?team={team}&amp;year={year}{table_query}">{year}</a>"#,
                    team = escape(&page.team),
                )
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(r#"<nav class="seasons">Season: {links}</nav>"#)
}

fn render_section(page: &DashboardPage, section: &Section, tables: &[SectionKind]) -> String {
    let toggled: Vec<String> = tables
        .iter()
        .filter(|kind| **kind != section.kind)
        .copied()
        .chain((section.view == ViewMode::Bars).then_some(section.kind))
        .map(|kind| kind.to_string())
        .collect();

    let mut href = format!("/team?team={}&amp;year={}", escape(&page.team), page.year);
    if !toggled.is_empty() {
        href.push_str(&format!("&amp;table={}", toggled.join(",")));
    }
    let toggle_label = match section.view {
        ViewMode::Bars => "Show table",
        ViewMode::Table => "Show bars",
    };

    let rows = section
        .rows
        .iter()
        .map(|row| match section.view {
            ViewMode::Bars => render_bar_row(row),
            ViewMode::Table => render_table_row(row),
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div class="section" id="{id}">
<h2>{title}</h2>
<div class="subtle">{subtitle} <a class="toggle" href="{href}">{toggle_label}</a></div>
{rows}
</div>"#,
        id = section.kind,
        title = escape(&section.title),
        subtitle = escape(&section.subtitle),
        href = href,
        toggle_label = toggle_label,
        rows = rows,
    )
}

fn render_row_label(row: &RowModel) -> String {
    format!(
        r#"<div class="position-label">{label}<br><span class="subtle">{total}</span></div>"#,
        label = escape(&row.label),
        total = escape(&row.total_label),
    )
}

fn render_bar_row(row: &RowModel) -> String {
    let segments = if row.is_empty() {
        r#"<div class="empty">No usage recorded</div>"#.to_string()
    } else {
        row.entries
            .iter()
            .map(|entry| {
                format!(
                    r#"<div class="segment" style="width: {width:.3}%; background: {color};" title="{tooltip}"></div>"#,
                    width = entry.share,
                    color = escape(entry.color.as_str()),
                    tooltip = escape(&entry.tooltip()),
                )
            })
            .collect::<Vec<_>>()
            .join("")
    };

    format!(
        r#"<div class="position-row">
<div class="row-header">{label}<div class="bar">{segments}</div><div class="stats">{summary}</div></div>
</div>"#,
        label = render_row_label(row),
        segments = segments,
        summary = escape(row.summary.as_deref().unwrap_or_default()),
    )
}

fn render_table_row(row: &RowModel) -> String {
    if row.is_empty() {
        return format!(
            r#"<div class="position-row">{label}<div class="empty">No usage recorded</div></div>"#,
            label = render_row_label(row),
        );
    }

    let headers = row
        .headers()
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect::<String>();
    let body = row
        .table_rows()
        .iter()
        .zip(&row.entries)
        .map(|(cells, entry)| {
            let cells = cells
                .iter()
                .map(|c| format!("<td>{}</td>", escape(c)))
                .collect::<String>();
            format!(
                r#"<tr><td><span class="swatch" style="background: {color};"></span></td>{cells}</tr>"#,
                color = escape(entry.color.as_str()),
                cells = cells,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div class="position-row">{label}
<table>
<thead><tr><th></th>{headers}</tr></thead>
<tbody>
{body}
</tbody>
</table>
</div>"#,
        label = render_row_label(row),
        headers = headers,
        body = body,
    )
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape(title),
        css = inline_css(),
        body = body,
    )
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; margin: 2rem; color: #222; }
.subtle { color: #777; font-size: 0.85rem; }
.section { margin-bottom: 2rem; }
.position-row { margin: 0.5rem 0; }
.row-header { display: flex; align-items: center; gap: 1rem; }
.position-label { width: 8rem; font-weight: 600; }
.bar { display: flex; flex: 1; height: 1.5rem; border: 1px solid #ddd; overflow: hidden; }
.segment { height: 100%; border-right: 1px solid #fff; }
.stats { width: 8rem; text-align: right; }
.empty { color: #999; font-style: italic; padding: 0.2rem; }
.swatch { display: inline-block; width: 0.8rem; height: 0.8rem; }
table { border-collapse: collapse; margin-top: 0.5rem; }
th, td { padding: 0.2rem 0.6rem; text-align: right; border-bottom: 1px solid #eee; }
.seasons { margin-bottom: 0.5rem; }
.season { margin-right: 0.4rem; }
.season.current { font-weight: 600; }
.team-card { display: inline-block; margin: 0.3rem; padding: 0.6rem 1rem; border: 1px solid #ddd; border-radius: 4px; text-decoration: none; color: inherit; }
"#
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
