//! Output for normalized reports.
//!
//! - [`csv`] — the comma-delimited export file, one shared header row.
//! - [`terminal`] — colored per-report summary table; unknown components with `--verbose`.

pub mod csv;
pub mod terminal;
