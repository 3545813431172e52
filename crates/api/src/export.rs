//! CSV rendering of resource rows for `GET /resources/export/csv`.

use hearth_core::export::{csv_line, header_line, join_list};
use hearth_db::models::resource::Resource;

/// Render the full export: a header line then one line per resource.
pub fn render_csv(resources: &[Resource]) -> String {
    let mut out = header_line();
    out.push('\n');
    for resource in resources {
        out.push_str(&csv_line(&row_cells(resource)));
        out.push('\n');
    }
    out
}

/// Cells for one resource, in export column order. Absent values are empty.
fn row_cells(r: &Resource) -> Vec<String> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        r.name.clone(),
        text(&r.description),
        r.category.clone(),
        join_list(&r.categories),
        join_list(&r.tags),
        r.status.clone(),
        text(&r.address),
        text(&r.city),
        text(&r.state),
        text(&r.zip),
        text(&r.service_area),
        text(&r.phone),
        text(&r.email),
        text(&r.website),
        text(&r.services),
        text(&r.hours),
        text(&r.eligibility),
        text(&r.access_info),
        text(&r.languages),
        text(&r.internal_notes),
        text(&r.public_notes),
        r.confidence_score.to_string(),
        r.last_verified_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    ]
}
