use std::collections::BTreeSet;

/// Allowed class IDs. An empty filter lets every class through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFilter {
    classes: BTreeSet<String>,
}

impl ClassFilter {
    /// Builds a filter from a comma-separated `--class` value, ignoring empty entries.
    pub fn parse(raw: &str) -> Self {
        let classes = raw
            .split(',')
            .map(str::trim)
            .filter(|class| !class.is_empty())
            .map(str::to_string)
            .collect();
        Self { classes }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn accepts(&self, row: &[String], class_column: usize) -> bool {
        if row.is_empty() || row.iter().all(|cell| cell.trim().is_empty()) {
            return false;
        }
        if self.classes.is_empty() {
            return true;
        }
        row.get(class_column)
            .is_some_and(|class| self.classes.contains(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn empty_filter_accepts_any_non_empty_row() {
        let filter = ClassFilter::parse("");
        assert!(filter.is_empty());
        assert!(filter.accepts(&row(&["1", "C7", "S1"]), 1));
        assert!(!filter.accepts(&[], 1));
        assert!(!filter.accepts(&row(&["", " ", ""]), 1));
    }

    #[test]
    fn parse_ignores_empty_entries() {
        let filter = ClassFilter::parse("C1,,C2,");
        assert_eq!(filter.classes().collect::<Vec<_>>(), vec!["C1", "C2"]);
    }

    #[test]
    fn matches_any_listed_class() {
        let filter = ClassFilter::parse("C1,C2");
        assert!(filter.accepts(&row(&["1", "C2", "S1"]), 1));
        assert!(!filter.accepts(&row(&["1", "C3", "S1"]), 1));
    }

    #[test]
    fn short_row_without_class_cell_is_rejected() {
        let filter = ClassFilter::parse("C1");
        assert!(!filter.accepts(&row(&["1"]), 1));
    }
}
