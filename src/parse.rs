use tracing::debug;

use crate::config::{ColumnLayout, BATCH_YEAR_LEN};
use crate::models::{StudentRecord, COMPONENT_COUNT};

const BRANCH_LEN: usize = 2;

/// Returns the two characters after the year prefix when the first four
/// characters of the cohort tag equal `batch_year`.
pub fn branch_code(cohort_tag: &str, batch_year: &str) -> Option<String> {
    let mut chars = cohort_tag.chars();
    let year: String = chars.by_ref().take(BATCH_YEAR_LEN).collect();
    if year != batch_year {
        return None;
    }
    let code: String = chars.take(BRANCH_LEN).collect();
    (code.chars().count() == BRANCH_LEN).then_some(code)
}

fn parse_number(cell: Option<&String>) -> Option<f64> {
    cell.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[derive(Debug, Clone)]
pub struct RecordParser {
    layout: ColumnLayout,
    batch_year: String,
}

impl RecordParser {
    pub fn new(layout: ColumnLayout, batch_year: impl Into<String>) -> Self {
        Self {
            layout,
            batch_year: batch_year.into(),
        }
    }

    pub fn parse(&self, row: &[String]) -> StudentRecord {
        let text = |column: usize| row.get(column).cloned().unwrap_or_default();

        let student_id = text(self.layout.student_id);
        let cohort_tag = text(self.layout.cohort_tag);
        let branch = branch_code(&cohort_tag, &self.batch_year);

        let mut scores = [None; COMPONENT_COUNT];
        for (slot, column) in scores.iter_mut().zip(self.layout.component_columns()) {
            *slot = parse_number(row.get(column));
            if slot.is_none() {
                debug!(student_id = %student_id, column, "Skipping non-numeric component cell");
            }
        }

        let declared_total = parse_number(row.get(self.layout.declared_total)).unwrap_or_else(|| {
            debug!(student_id = %student_id, "Declared total did not parse, using 0");
            0.0
        });

        StudentRecord {
            student_id,
            class_id: text(self.layout.class_id),
            cohort_tag,
            branch,
            scores,
            declared_total,
        }
    }
}
