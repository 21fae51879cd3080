use tracing::{debug, info};

use crate::aggregate::{BranchAggregator, ComponentAggregator};
use crate::config::AuditConfig;
use crate::discrepancy::DiscrepancyDetector;
use crate::error::{AuditError, Result};
use crate::models::COMPONENT_COUNT;
use crate::parse::RecordParser;
use crate::ranking::TopThree;
use crate::report::{self, Report};
use crate::sheet::GradeSheet;

/// Per-run aggregation state, fed one row at a time in document order.
#[derive(Debug)]
pub struct Audit<'a> {
    config: &'a AuditConfig,
    parser: RecordParser,
    components: ComponentAggregator,
    branches: BranchAggregator,
    rankings: [TopThree; COMPONENT_COUNT],
    discrepancies: DiscrepancyDetector,
}

impl<'a> Audit<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self {
            config,
            parser: RecordParser::new(config.layout, config.batch_year.clone()),
            components: ComponentAggregator::new(config.layout),
            branches: BranchAggregator::default(),
            rankings: Default::default(),
            discrepancies: DiscrepancyDetector::default(),
        }
    }

    /// Returns false when the row was filtered out.
    pub fn ingest(&mut self, row: &[String]) -> bool {
        if !self.config.classes.accepts(row, self.config.layout.class_id) {
            return false;
        }

        let record = self.parser.parse(row);
        let total = self.components.record(&record);
        self.branches.record(record.branch.as_deref(), total);
        for (ranking, score) in self.rankings.iter_mut().zip(record.scores) {
            if let Some(score) = score {
                ranking.offer(score, &record.student_id);
            }
        }
        self.discrepancies
            .check(&record.student_id, record.declared_total, total);
        true
    }

    pub fn rows(&self) -> usize {
        self.components.rows()
    }

    pub fn finish(self, headers: &[String]) -> Result<Report> {
        if self.rows() == 0 {
            return Err(AuditError::NoData);
        }

        Ok(report::assemble(
            headers,
            &self.config.layout,
            &self.config.batch_year,
            &self.components,
            &self.branches,
            &self.rankings,
            self.discrepancies.into_discrepancies(),
        ))
    }
}

/// Runs every sheet row through the audit and assembles the report.
pub fn run(sheet: &GradeSheet, config: &AuditConfig) -> Result<Report> {
    let mut audit = Audit::new(config);
    let mut skipped = 0usize;
    for row in &sheet.rows {
        if !audit.ingest(row) {
            skipped += 1;
        }
    }
    debug!(processed = audit.rows(), skipped, "Finished scanning rows");

    let report = audit.finish(&sheet.headers)?;
    info!(
        rows = report.rows,
        discrepancies = report.discrepancies.len(),
        branches = report.branch_averages.len(),
        "Audit complete"
    );
    Ok(report)
}
