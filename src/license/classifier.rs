use crate::config::NoiseFilters;
use crate::models::{RawComponent, UnknownComponent};

/// A component with a resolved package identity and its filtered license data.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedComponent {
    /// Package URL without its query string.
    pub identity: String,
    /// Declared licenses followed by observed licenses, noise removed, duplicates kept.
    pub licenses: Vec<String>,
    pub threat_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Unknown(UnknownComponent),
    Known(ClassifiedComponent),
}

/// Classify one raw component.
///
/// A component without a package URL is unknown. Otherwise licenses are collected
/// from `declaredLicenses` then `observedLicenses`, and threat groups from
/// `effectiveLicenseThreats`, each skipping values listed in `filters`.
/// Missing license data counts as empty.
pub fn classify(component: &RawComponent, filters: &NoiseFilters) -> Classification {
    let Some(package_url) = component.package_url.as_deref() else {
        return Classification::Unknown(UnknownComponent {
            hash: component.hash.clone(),
            pathnames: component.pathnames.clone(),
        });
    };

    let (licenses, threat_groups) = match &component.license_data {
        Some(data) => {
            let licenses = data
                .declared_licenses
                .iter()
                .chain(&data.observed_licenses)
                .map(|l| l.license_id.as_str())
                .filter(|id| !filters.is_noise_license(id))
                .map(str::to_string)
                .collect();

            let threat_groups = data
                .effective_license_threats
                .iter()
                .map(|t| t.license_threat_group_name.as_str())
                .filter(|name| !filters.is_noise_threat_group(name))
                .map(str::to_string)
                .collect();

            (licenses, threat_groups)
        }
        None => (Vec::new(), Vec::new()),
    };

    Classification::Known(ClassifiedComponent {
        identity: strip_query(package_url).to_string(),
        licenses,
        threat_groups,
    })
}

/// Everything before the first `?`, or the whole input if there is none.
pub fn strip_query(package_url: &str) -> &str {
    package_url
        .split_once('?')
        .map_or(package_url, |(base, _)| base)
}
