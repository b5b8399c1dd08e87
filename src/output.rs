//! Output rendering for lint runs.
//!
//! Supports `human` (default) and `json` outputs. Human output replays each
//! file's captured diagnostics in input order, adds a failure line for files
//! whose details were not already printed, then a summary. The JSON form
//! carries per-file outcomes and a top-level summary.

use crate::codes::FLAKE_CODES;
use crate::models::{CheckOutcome, RunReport};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print a lint run in the requested format.
pub fn print_run(report: &RunReport, output: &str) {
    match output {
        "json" => println!("{:#}", compose_run_json(report)),
        _ => {
            let color = use_colors(output);
            for r in &report.results {
                print!("{}", r.output);
                if r.outcome == CheckOutcome::Fail {
                    let sev = if color {
                        "⟦error⟧".red().bold().to_string()
                    } else {
                        "⟦error⟧".to_string()
                    };
                    let icon = if color {
                        "✖".red().to_string()
                    } else {
                        "✖".to_string()
                    };
                    let file = if color {
                        r.file.clone().bold().to_string()
                    } else {
                        r.file.clone()
                    };
                    println!("{} {} {} — check failed", icon, sev, file);
                }
            }
            let summary = summary_line(report);
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn summary_line(report: &RunReport) -> String {
    format!(
        "— Summary — files={} failed={} excluded={}",
        report.summary.files, report.summary.failed, report.summary.excluded
    )
}

/// Compose run JSON object (pure) for testing/snapshot purposes.
pub fn compose_run_json(report: &RunReport) -> JsonVal {
    let items: Vec<_> = report
        .results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "outcome": r.outcome,
                "passed": r.outcome.passed(),
                "output": r.output.lines().collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({"results": items, "summary": report.summary})
}

/// Print the numeric code table, or one entry.
///
/// Returns false when `code` is not in the table.
pub fn print_codes(code: Option<&str>, output: &str) -> bool {
    let rows: Vec<(&str, &str)> = FLAKE_CODES
        .iter()
        .filter(|(c, _)| code.map_or(true, |want| want.eq_ignore_ascii_case(c)))
        .map(|(c, kind)| (*c, kind.name()))
        .collect();
    if rows.is_empty() {
        return false;
    }
    match output {
        "json" => {
            let map: serde_json::Map<String, JsonVal> = rows
                .iter()
                .map(|(c, n)| (c.to_string(), JsonVal::from(*n)))
                .collect();
            println!("{:#}", JsonVal::Object(map));
        }
        _ => {
            let color = use_colors(output);
            for (c, n) in rows {
                if color {
                    println!("{}  {}", c.cyan().bold(), n);
                } else {
                    println!("{}  {}", c, n);
                }
            }
        }
    }
    true
}
