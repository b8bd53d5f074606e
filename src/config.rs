use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.iq-license-bom/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Values dropped from the exported license and threat-group lists.
    #[serde(default)]
    pub filters: NoiseFilters,
}

/// License identifiers and threat-group names that carry no information and are
/// excluded from output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NoiseFilters {
    #[serde(default = "default_noise_licenses")]
    pub licenses: Vec<String>,
    #[serde(default = "default_noise_threat_groups")]
    pub threat_groups: Vec<String>,
}

fn default_noise_licenses() -> Vec<String> {
    ["No-Source-License", "Not-Supported", "No-Sources"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_noise_threat_groups() -> Vec<String> {
    ["Sonatype Informational", "Sonatype Special Licenses"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for NoiseFilters {
    fn default() -> Self {
        NoiseFilters {
            licenses: default_noise_licenses(),
            threat_groups: default_noise_threat_groups(),
        }
    }
}

impl NoiseFilters {
    pub fn is_noise_license(&self, license_id: &str) -> bool {
        self.licenses.iter().any(|l| l == license_id)
    }

    pub fn is_noise_threat_group(&self, name: &str) -> bool {
        self.threat_groups.iter().any(|g| g == name)
    }
}

/// Load the filter configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<working_dir>/.iq-license-bom/config.toml`
/// 3. `~/.config/iq-license-bom/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = working_dir.join(".iq-license-bom").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("iq-license-bom")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// HTTP Basic credentials given as `username:password`.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl FromStr for Credentials {
    type Err = String;

    /// Splits at the first `:`, so the password may itself contain colons.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((username, password)) if !username.is_empty() => Ok(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err("expected credentials in the form username:password".to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
