use std::collections::BTreeMap;

use crate::config::ColumnLayout;
use crate::models::{BranchStat, ComponentStat, StudentRecord, COMPONENT_COUNT};

/// Running per-component sums plus the overall total across processed rows.
#[derive(Debug, Clone)]
pub struct ComponentAggregator {
    layout: ColumnLayout,
    components: [ComponentStat; COMPONENT_COUNT],
    totals: ComponentStat,
}

impl ComponentAggregator {
    pub fn new(layout: ColumnLayout) -> Self {
        Self {
            layout,
            components: [ComponentStat::default(); COMPONENT_COUNT],
            totals: ComponentStat::default(),
        }
    }

    /// Sum of the present scores that count toward the total.
    pub fn computed_total(&self, record: &StudentRecord) -> f64 {
        record
            .scores
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.layout.is_excluded(*index))
            .filter_map(|(_, score)| *score)
            .sum()
    }

    /// Folds one record in and returns its computed total.
    pub fn record(&mut self, record: &StudentRecord) -> f64 {
        for (stat, score) in self.components.iter_mut().zip(record.scores.iter()) {
            if let Some(score) = score {
                stat.add(*score);
            }
        }
        let total = self.computed_total(record);
        self.totals.add(total);
        total
    }

    pub fn rows(&self) -> usize {
        self.totals.count
    }

    pub fn overall_average(&self) -> Option<f64> {
        self.totals.average()
    }

    pub fn components(&self) -> &[ComponentStat; COMPONENT_COUNT] {
        &self.components
    }
}

#[derive(Debug, Clone, Default)]
pub struct BranchAggregator {
    branches: BTreeMap<String, BranchStat>,
}

impl BranchAggregator {
    pub fn record(&mut self, branch: Option<&str>, computed_total: f64) {
        if let Some(branch) = branch.filter(|branch| !branch.is_empty()) {
            self.branches
                .entry(branch.to_string())
                .or_default()
                .add(computed_total);
        }
    }

    /// Branch averages in lexicographic branch order.
    pub fn averages(&self) -> impl Iterator<Item = (&str, f64)> {
        self.branches
            .iter()
            .filter_map(|(branch, stat)| stat.average().map(|avg| (branch.as_str(), avg)))
    }
}
