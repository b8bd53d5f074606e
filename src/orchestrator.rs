use std::fmt;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::NoiseFilters;
use crate::models::{Application, ReportDescriptor, ReportResult};
use crate::normalizer::normalize;
use crate::service::{ReportSource, Result};

/// What a run produced.
#[derive(Debug)]
pub enum RunOutcome {
    /// Normalized reports in processing order, ready for export.
    Results(Vec<ReportResult>),
    /// Targeted lookup matched nothing; nothing should be written.
    NotFound(NotFound),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotFound {
    Application { public_id: String },
    Stage { public_id: String, stage: String },
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::Application { public_id } => {
                write!(f, "Cannot find application '{}'", public_id)
            }
            NotFound::Stage { public_id, stage } => {
                write!(f, "Did not find a '{}' report for '{}'", stage, public_id)
            }
        }
    }
}

/// Drives the Report Service fetches and normalizes every selected report.
///
/// Fetches run one at a time; the first [`ServiceError`](crate::service::ServiceError)
/// aborts the run and discards anything collected so far.
pub struct Orchestrator<'a> {
    source: &'a dyn ReportSource,
    filters: &'a NoiseFilters,
    quiet: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(source: &'a dyn ReportSource, filters: &'a NoiseFilters, quiet: bool) -> Self {
        Self {
            source,
            filters,
            quiet,
        }
    }

    /// Normalize the first report of `public_id` whose stage equals `stage`.
    pub async fn run_targeted(&self, public_id: &str, stage: &str) -> Result<RunOutcome> {
        let applications = self.source.applications_by_public_id(public_id).await?;
        let Some(application) = applications.into_iter().next() else {
            return Ok(RunOutcome::NotFound(NotFound::Application {
                public_id: public_id.to_string(),
            }));
        };

        let reports = self.source.reports(&application).await?;
        let Some(report) = reports.into_iter().find(|r| r.stage == stage) else {
            return Ok(RunOutcome::NotFound(NotFound::Stage {
                public_id: application.public_id.clone(),
                stage: stage.to_string(),
            }));
        };

        self.note(&format!(
            "{} '{}' {} report",
            "→".cyan(),
            application.name.bold(),
            report.stage
        ));
        let result = self.process(&application, &report).await?;
        self.note(&components_line(&result));
        Ok(RunOutcome::Results(vec![result]))
    }

    /// Normalize every report of every application, in service order.
    pub async fn run_all(&self) -> Result<RunOutcome> {
        let applications = self.source.applications().await?;
        self.note(&format!("Found {} applications.", applications.len()));

        let pb = self.progress_bar(applications.len() as u64);
        let mut results = Vec::new();

        for application in &applications {
            if let Some(pb) = &pb {
                pb.set_message(application.name.clone());
            }

            let reports = self.source.reports(application).await?;
            self.note_with(
                pb.as_ref(),
                &format!(
                    "{} '{}' {} reports",
                    "→".cyan(),
                    application.name.bold(),
                    reports.len()
                ),
            );

            for report in &reports {
                let result = self.process(application, report).await?;
                self.note_with(pb.as_ref(), &components_line(&result));
                results.push(result);
            }

            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        self.note(&format!("*** {} reports processed ***", results.len()));

        Ok(RunOutcome::Results(results))
    }

    async fn process(
        &self,
        application: &Application,
        report: &ReportDescriptor,
    ) -> Result<ReportResult> {
        let raw = self.source.report_data(report).await?;
        let result = normalize(application, report, raw, self.filters);
        tracing::info!(
            application = %application.name,
            stage = %report.stage,
            rows = result.rows.len(),
            unknowns = result.unknowns.len(),
            "normalized report"
        );
        Ok(result)
    }

    fn progress_bar(&self, len: u64) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }
        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        Some(pb)
    }

    fn note(&self, line: &str) {
        if !self.quiet {
            eprintln!("{}", line);
        }
    }

    fn note_with(&self, pb: Option<&ProgressBar>, line: &str) {
        match pb {
            Some(pb) => pb.println(line),
            None => self.note(line),
        }
    }
}

/// Classified components and unknowns are counted separately.
fn components_line(result: &ReportResult) -> String {
    format!(
        "  - '{}' report contained {} components, {} unknown",
        result.report.stage,
        result.rows.len(),
        result.unknowns.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchSummary, RawReport};
    use crate::service::ServiceError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory Report Service keyed by application id and report URL.
    #[derive(Default)]
    struct FakeSource {
        applications: Vec<Application>,
        reports: HashMap<String, Vec<ReportDescriptor>>,
        data: HashMap<String, serde_json::Value>,
        failing_url: Option<String>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with_app(mut self, id: &str, name: &str, stages: &[&str]) -> Self {
            self.applications.push(Application {
                id: id.to_string(),
                public_id: format!("{}-public", id),
                name: name.to_string(),
            });
            let descriptors = stages
                .iter()
                .enumerate()
                .map(|(i, stage)| {
                    let url = format!("api/v2/applications/{}/reports/{}/raw", id, i);
                    self.data.insert(
                        url.clone(),
                        json!({
                            "matchSummary": { "totalComponentCount": 2, "knownComponentCount": 1 },
                            "components": [
                                {
                                    "packageUrl": format!("pkg:npm/{}-{}@1.0.0?x=1", name, stage),
                                    "hash": "aa",
                                    "pathnames": [],
                                    "licenseData": {
                                        "declaredLicenses": [{ "licenseId": "MIT" }],
                                        "observedLicenses": [{ "licenseId": "Apache-2.0" }]
                                    }
                                },
                                { "packageUrl": null, "hash": "bb", "pathnames": ["x.bin"] }
                            ]
                        }),
                    );
                    ReportDescriptor {
                        stage: stage.to_string(),
                        report_data_url: url,
                    }
                })
                .collect();
            self.reports.insert(id.to_string(), descriptors);
            self
        }

        fn fail_on(mut self, url: &str) -> Self {
            self.failing_url = Some(url.to_string());
            self
        }

        fn check(&self, url: String) -> crate::service::Result<()> {
            self.fetched.lock().unwrap().push(url.clone());
            if self.failing_url.as_deref() == Some(url.as_str()) {
                return Err(ServiceError::NoApplications { url });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ReportSource for FakeSource {
        async fn applications(&self) -> crate::service::Result<Vec<Application>> {
            self.check("applications".to_string())?;
            if self.applications.is_empty() {
                return Err(ServiceError::NoApplications {
                    url: "applications".to_string(),
                });
            }
            Ok(self.applications.clone())
        }

        async fn applications_by_public_id(
            &self,
            public_id: &str,
        ) -> crate::service::Result<Vec<Application>> {
            self.check(format!("applications?publicId={}", public_id))?;
            Ok(self
                .applications
                .iter()
                .filter(|a| a.public_id == public_id)
                .cloned()
                .collect())
        }

        async fn reports(
            &self,
            application: &Application,
        ) -> crate::service::Result<Vec<ReportDescriptor>> {
            self.check(format!("reports/{}", application.id))?;
            Ok(self.reports.get(&application.id).cloned().unwrap_or_default())
        }

        async fn report_data(&self, report: &ReportDescriptor) -> crate::service::Result<RawReport> {
            self.check(report.report_data_url.clone())?;
            Ok(serde_json::from_value(self.data[&report.report_data_url].clone()).unwrap())
        }
    }

    fn results(outcome: RunOutcome) -> Vec<ReportResult> {
        match outcome {
            RunOutcome::Results(results) => results,
            RunOutcome::NotFound(nf) => panic!("unexpected not found: {}", nf),
        }
    }

    #[tokio::test]
    async fn test_targeted_picks_requested_stage() {
        let source = FakeSource::default().with_app("a1", "Foo", &["build", "release"]);
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        let results = results(orchestrator.run_targeted("a1-public", "release").await.unwrap());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].report.stage, "release");
        assert_eq!(results[0].rows[0].component, "pkg:npm/Foo-release@1.0.0");
        assert_eq!(results[0].rows[0].license_list, "Apache-2.0:MIT");
        assert_eq!(results[0].unknowns.len(), 1);
        assert_eq!(
            results[0].match_summary,
            MatchSummary {
                total_component_count: 2,
                known_component_count: 1
            }
        );
    }

    #[tokio::test]
    async fn test_targeted_first_matching_stage_wins() {
        let source = FakeSource::default().with_app("a1", "Foo", &["build", "build"]);
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        let results = results(orchestrator.run_targeted("a1-public", "build").await.unwrap());
        assert_eq!(
            results[0].report.report_data_url,
            "api/v2/applications/a1/reports/0/raw"
        );
    }

    #[tokio::test]
    async fn test_targeted_unknown_application() {
        let source = FakeSource::default().with_app("a1", "Foo", &["build"]);
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        match orchestrator.run_targeted("nope", "build").await.unwrap() {
            RunOutcome::NotFound(nf) => assert_eq!(
                nf,
                NotFound::Application {
                    public_id: "nope".to_string()
                }
            ),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_targeted_missing_stage_fetches_no_report_data() {
        let source = FakeSource::default().with_app("a1", "Foo", &["build"]);
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        let outcome = orchestrator.run_targeted("a1-public", "release").await.unwrap();
        assert!(matches!(outcome, RunOutcome::NotFound(NotFound::Stage { .. })));
        assert_eq!(
            *source.fetched.lock().unwrap(),
            ["applications?publicId=a1-public", "reports/a1"]
        );
    }

    #[tokio::test]
    async fn test_all_collects_every_report_in_service_order() {
        let source = FakeSource::default()
            .with_app("a1", "Foo", &["build"])
            .with_app("a2", "Bar", &["build", "release"]);
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        let results = results(orchestrator.run_all().await.unwrap());
        let order: Vec<(&str, &str)> = results
            .iter()
            .map(|r| (r.application.name.as_str(), r.report.stage.as_str()))
            .collect();
        assert_eq!(order, [("Foo", "build"), ("Bar", "build"), ("Bar", "release")]);
    }

    #[tokio::test]
    async fn test_all_aborts_on_first_failure() {
        let source = FakeSource::default()
            .with_app("a1", "Foo", &["build"])
            .with_app("a2", "Bar", &["build"])
            .with_app("a3", "Baz", &["build"])
            .fail_on("reports/a2");
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        let err = orchestrator.run_all().await.unwrap_err();
        assert_eq!(err.url(), "reports/a2");
        assert!(!source
            .fetched
            .lock()
            .unwrap()
            .iter()
            .any(|u| u == "reports/a3"));
    }

    #[tokio::test]
    async fn test_all_without_applications_is_fatal() {
        let source = FakeSource::default();
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        assert!(matches!(
            orchestrator.run_all().await,
            Err(ServiceError::NoApplications { .. })
        ));
    }

    #[tokio::test]
    async fn test_components_line_counts_rows_and_unknowns_apart() {
        let source = FakeSource::default().with_app("a1", "Foo", &["build"]);
        let filters = NoiseFilters::default();
        let orchestrator = Orchestrator::new(&source, &filters, true);

        let results = results(orchestrator.run_all().await.unwrap());
        assert_eq!(
            components_line(&results[0]),
            "  - 'build' report contained 1 components, 1 unknown"
        );
    }

    #[test]
    fn test_not_found_messages() {
        let nf = NotFound::Stage {
            public_id: "foo".to_string(),
            stage: "release".to_string(),
        };
        assert_eq!(nf.to_string(), "Did not find a 'release' report for 'foo'");
    }
}
