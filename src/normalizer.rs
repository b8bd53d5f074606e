use crate::config::NoiseFilters;
use crate::license::aggregate::{aggregate, LIST_DELIMITER};
use crate::license::classifier::{classify, Classification};
use crate::models::{Application, OutputRow, RawReport, ReportDescriptor, ReportResult, HEADERS};

/// Turn one raw report into sorted output rows plus the unknown components.
///
/// Rows carry the stage named by the raw report payload, falling back to the
/// descriptor's stage when the payload has none. Rows are ordered by
/// `(license_list, stage)`; rows with equal keys keep their report order.
pub fn normalize(
    application: &Application,
    descriptor: &ReportDescriptor,
    raw: RawReport,
    filters: &NoiseFilters,
) -> ReportResult {
    let stage = raw.stage.as_deref().unwrap_or(&descriptor.stage);

    let mut rows = Vec::new();
    let mut unknowns = Vec::new();

    for component in &raw.components {
        match classify(component, filters) {
            Classification::Unknown(unknown) => unknowns.push(unknown),
            Classification::Known(known) => rows.push(OutputRow {
                application_name: application.name.clone(),
                stage: stage.to_string(),
                component: known.identity,
                license_list: aggregate(&known.licenses, LIST_DELIMITER),
                threat_group_list: aggregate(&known.threat_groups, LIST_DELIMITER),
            }),
        }
    }

    sort_rows(&mut rows);

    ReportResult {
        match_summary: raw.match_summary,
        application: application.clone(),
        report: descriptor.clone(),
        headers: HEADERS,
        rows,
        unknowns,
    }
}

/// Order rows by license list, then stage. The component identity is not a key.
pub fn sort_rows(rows: &mut [OutputRow]) {
    rows.sort_by(|a, b| (&a.license_list, &a.stage).cmp(&(&b.license_list, &b.stage)));
}
