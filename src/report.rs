use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::aggregate::{BranchAggregator, ComponentAggregator};
use crate::config::ColumnLayout;
use crate::error::{AuditError, Result};
use crate::models::{Discrepancy, COMPONENT_COUNT};
use crate::ranking::TopThree;

pub const TOTAL_LABEL: &str = "Total";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopScore {
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Score")]
    pub score: f64,
}

/// Final audit summary. Only the four keyed maps are exported as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub rows: usize,
    #[serde(skip)]
    pub batch_year: String,
    /// Component labels in sheet column order.
    #[serde(skip)]
    pub component_labels: Vec<String>,
    #[serde(rename = "Averages")]
    pub averages: BTreeMap<String, f64>,
    #[serde(rename = "BranchWiseAverages")]
    pub branch_averages: BTreeMap<String, f64>,
    #[serde(rename = "Top3")]
    pub top3: BTreeMap<String, Vec<TopScore>>,
    #[serde(rename = "Discrepancies")]
    pub discrepancies: BTreeMap<String, String>,
}

pub fn component_label(headers: &[String], column: usize) -> String {
    headers
        .get(column)
        .map(|header| header.trim())
        .filter(|header| !header.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Column {}", column + 1))
}

pub fn assemble(
    headers: &[String],
    layout: &ColumnLayout,
    batch_year: &str,
    components: &ComponentAggregator,
    branches: &BranchAggregator,
    rankings: &[TopThree; COMPONENT_COUNT],
    discrepancies: Vec<Discrepancy>,
) -> Report {
    let component_labels: Vec<String> = layout
        .component_columns()
        .map(|column| component_label(headers, column))
        .collect();

    let mut averages = BTreeMap::new();
    if let Some(total) = components.overall_average() {
        averages.insert(TOTAL_LABEL.to_string(), total);
    }
    for (label, stat) in component_labels.iter().zip(components.components()) {
        if let Some(average) = stat.average() {
            averages.insert(label.clone(), average);
        }
    }

    let branch_averages = branches
        .averages()
        .map(|(branch, average)| (branch.to_string(), average))
        .collect();

    let top3 = component_labels
        .iter()
        .zip(rankings.iter())
        .map(|(label, ranking)| {
            let entries = ranking
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| TopScore {
                    rank: index + 1,
                    id: entry.student_id.clone(),
                    score: entry.score,
                })
                .collect();
            (label.clone(), entries)
        })
        .collect();

    let discrepancies = discrepancies
        .into_iter()
        .map(|discrepancy| {
            let message = discrepancy.message();
            (discrepancy.student_id, message)
        })
        .collect();

    Report {
        rows: components.rows(),
        batch_year: batch_year.to_string(),
        component_labels,
        averages,
        branch_averages,
        top3,
        discrepancies,
    }
}

/// Console summary printed after a successful run.
pub fn render_summary(report: &Report) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Parsed {} rows", report.rows);
    let _ = writeln!(output, "Averages:");
    if let Some(total) = report.averages.get(TOTAL_LABEL) {
        let _ = writeln!(output, "{TOTAL_LABEL}: {total}");
    }
    for label in &report.component_labels {
        if let Some(average) = report.averages.get(label) {
            let _ = writeln!(output, "{label}: {average}");
        }
    }

    let _ = writeln!(output, "{} batch branch wise averages:", report.batch_year);
    if report.branch_averages.is_empty() {
        let _ = writeln!(output, "No rows matched the {} batch.", report.batch_year);
    }
    for (branch, average) in &report.branch_averages {
        let _ = writeln!(output, "{branch}: {average}");
    }

    for label in &report.component_labels {
        let Some(entries) = report.top3.get(label) else {
            continue;
        };
        let _ = writeln!(output, "Top 3 in {label}:");
        for entry in entries {
            let _ = writeln!(output, "{} {}: {}", entry.rank, entry.id, entry.score);
        }
    }

    output
}

/// Writes the report as 4-space indented JSON with sorted keys.
pub fn export_report(report: &Report, path: &Path) -> Result<()> {
    let write_err = |source| AuditError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(write_err)?;
    let mut writer = std::io::BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    report.serialize(&mut serializer)?;
    writer.write_all(b"\n").map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    Ok(())
}
