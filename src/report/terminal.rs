use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::ReportResult;

/// Print the post-export summary.
///
/// `saved` is the report count returned by the exporter. `quiet` prints only the
/// saved line; `verbose` adds every unknown component.
pub fn render(results: &[ReportResult], saved: usize, output: &Path, verbose: bool, quiet: bool) {
    let saved = saved_line(saved, output);

    if quiet {
        println!("{}", saved);
        return;
    }

    println!(
        "\n {} v{}\n",
        "iq-license-bom".bold(),
        env!("CARGO_PKG_VERSION")
    );

    if !results.is_empty() {
        println!("{}", summary_table(results));
    }

    if verbose {
        let unknown_count: usize = results.iter().map(|r| r.unknowns.len()).sum();
        if unknown_count > 0 {
            println!(
                "\n {} {} unknown components:\n",
                "[UNKNOWN]".yellow().bold(),
                unknown_count
            );
            println!("{}", unknowns_table(results));
        }
    }

    println!("\n {} {}", "✓".green(), saved);
}

fn saved_line(count: usize, output: &Path) -> String {
    format!("Saved {} reports to {}", count, output.display())
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn summary_table(results: &[ReportResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&[
            "Application",
            "Stage",
            "Components",
            "Known",
            "Rows",
            "Unknown",
        ]));

    for result in results {
        let unknown_color = if result.unknowns.is_empty() {
            Color::Green
        } else {
            Color::Yellow
        };

        table.add_row(vec![
            Cell::new(&result.application.name),
            Cell::new(&result.report.stage),
            Cell::new(result.match_summary.total_component_count)
                .set_alignment(CellAlignment::Right),
            Cell::new(result.match_summary.known_component_count)
                .set_alignment(CellAlignment::Right),
            Cell::new(result.rows.len()).set_alignment(CellAlignment::Right),
            Cell::new(result.unknowns.len())
                .fg(unknown_color)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn unknowns_table(results: &[ReportResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["Application", "Stage", "Hash", "Paths"]));

    for result in results {
        for unknown in &result.unknowns {
            table.add_row(vec![
                Cell::new(&result.application.name),
                Cell::new(&result.report.stage),
                Cell::new(unknown.hash.as_deref().unwrap_or("")).fg(Color::DarkGrey),
                Cell::new(unknown.pathnames.join("\n")),
            ]);
        }
    }

    table
}
