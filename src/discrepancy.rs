use tracing::warn;

use crate::models::Discrepancy;

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Collects rows whose declared total disagrees with the computed one.
#[derive(Debug, Clone, Default)]
pub struct DiscrepancyDetector {
    found: Vec<Discrepancy>,
}

impl DiscrepancyDetector {
    pub fn check(&mut self, student_id: &str, declared: f64, computed: f64) -> Option<&Discrepancy> {
        let declared = round2(declared);
        let computed = round2(computed);
        if declared == computed {
            return None;
        }

        warn!(
            student_id,
            declared, computed, "Discrepancy found, total not matching"
        );
        self.found.push(Discrepancy {
            student_id: student_id.to_string(),
            declared,
            computed,
        });
        self.found.last()
    }

    pub fn into_discrepancies(self) -> Vec<Discrepancy> {
        self.found
    }
}
