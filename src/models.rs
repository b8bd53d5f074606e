use serde::{Deserialize, Serialize};

/// Column headers shared by every [`ReportResult`].
pub const HEADERS: [&str; 5] = ["Application", "Stage", "Component", "License", "ThreatGroup"];

/// A scanned software product as returned by `GET /api/v2/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub public_id: String,
    pub name: String,
}

/// Envelope of the applications endpoint.
#[derive(Debug, Deserialize)]
pub struct ApplicationList {
    pub applications: Vec<Application>,
}

/// One pipeline stage's report for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDescriptor {
    pub stage: String,
    /// Relative to the service base URL.
    pub report_data_url: String,
}

/// Raw report payload served at a descriptor's `reportDataUrl`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    /// Only present on some payloads; rows fall back to the descriptor's stage.
    #[serde(default)]
    pub stage: Option<String>,
    pub match_summary: MatchSummary,
    pub components: Vec<RawComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    #[serde(default)]
    pub total_component_count: u64,
    #[serde(default)]
    pub known_component_count: u64,
}

/// One detected artifact. A `None` package URL marks the component as unknown.
///
/// `packageUrl`, `hash` and `pathnames` must be present; the first two may be null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponent {
    #[serde(deserialize_with = "Option::deserialize")]
    pub package_url: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub hash: Option<String>,
    pub pathnames: Vec<String>,
    #[serde(default)]
    pub license_data: Option<LicenseData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseData {
    #[serde(default)]
    pub declared_licenses: Vec<LicenseRef>,
    #[serde(default)]
    pub observed_licenses: Vec<LicenseRef>,
    #[serde(default)]
    pub effective_license_threats: Vec<LicenseThreat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRef {
    pub license_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseThreat {
    pub license_threat_group_name: String,
}

/// An artifact the service could not resolve to a package identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownComponent {
    pub hash: Option<String>,
    pub pathnames: Vec<String>,
}

/// One line of the exported CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub application_name: String,
    pub stage: String,
    pub component: String,
    pub license_list: String,
    pub threat_group_list: String,
}

impl OutputRow {
    /// Fields in [`HEADERS`] order.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.application_name,
            &self.stage,
            &self.component,
            &self.license_list,
            &self.threat_group_list,
        ]
    }
}

/// Normalized result for one (application, stage) report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResult {
    pub match_summary: MatchSummary,
    pub application: Application,
    pub report: ReportDescriptor,
    pub headers: [&'static str; 5],
    pub rows: Vec<OutputRow>,
    pub unknowns: Vec<UnknownComponent>,
}
