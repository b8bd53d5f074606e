//! Per-component license extraction and list aggregation.
//!
//! - [`classifier`] — splits raw components into unknowns and classified
//!   components, dropping noise licenses and threat groups.
//! - [`aggregate`] — deduplicates, sorts and joins value lists for CSV cells.

pub mod aggregate;
pub mod classifier;
