/// Number of graded components tracked per student.
pub const COMPONENT_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub student_id: String,
    /// Kept with the record for callers; filtering reads the raw row.
    pub class_id: String,
    /// Raw tag as read; `branch` is derived from it.
    pub cohort_tag: String,
    pub branch: Option<String>,
    /// `None` marks a cell that did not parse as a number.
    pub scores: [Option<f64>; COMPONENT_COUNT],
    pub declared_total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComponentStat {
    pub sum: f64,
    pub count: usize,
}

impl ComponentStat {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Branch statistics accumulate computed totals, never individual components.
pub type BranchStat = ComponentStat;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedScore {
    pub score: f64,
    pub student_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    pub student_id: String,
    pub declared: f64,
    pub computed: f64,
}

impl Discrepancy {
    pub fn message(&self) -> String {
        format!(
            "Expected total to be {:.6} but turned out to be {:.6}",
            self.declared, self.computed
        )
    }
}
