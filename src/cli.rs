use std::path::PathBuf;

use clap::Parser;

use crate::config::Credentials;

#[derive(Parser, Debug)]
#[command(
    name = "iq-license-bom",
    about = "Export a license and threat-group CSV from component-analysis reports",
    version
)]
pub struct Cli {
    /// Report Service base URL
    #[arg(short, long, default_value = "http://localhost:8070")]
    pub url: String,

    /// Credentials as username:password
    #[arg(short, long, default_value = "admin:admin123", value_name = "USER:PASS")]
    pub auth: Credentials,

    /// Pipeline stage to export when --public-id is given
    #[arg(short = 'g', long, default_value = "build")]
    pub stage: String,

    /// Application public id; omit to export every stage of every application
    #[arg(short = 'i', long = "public-id", alias = "publicId", value_name = "ID")]
    pub public_id: Option<String>,

    /// Filter config file [default: ./.iq-license-bom/config.toml, fallback ~/.config/iq-license-bom/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug logging and list unknown components
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the saved-file line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
