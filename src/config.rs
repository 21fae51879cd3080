use std::path::PathBuf;

use crate::error::{AuditError, Result};
use crate::filter::ClassFilter;
use crate::models::COMPONENT_COUNT;

pub const DEFAULT_BATCH_YEAR: &str = "2024";
pub const BATCH_YEAR_ENV: &str = "GRADE_AUDIT_BATCH_YEAR";
pub const REPORT_FILE: &str = "report.json";
pub const BATCH_YEAR_LEN: usize = 4;

/// Zero-based column positions within a grade sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub class_id: usize,
    pub student_id: usize,
    pub cohort_tag: usize,
    pub first_component: usize,
    /// Component column that is averaged and ranked but left out of the total.
    pub excluded_component: usize,
    pub declared_total: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            class_id: 1,
            student_id: 2,
            cohort_tag: 3,
            first_component: 4,
            excluded_component: 8,
            declared_total: 10,
        }
    }
}

impl ColumnLayout {
    pub fn component_columns(&self) -> impl Iterator<Item = usize> {
        self.first_component..self.first_component + COMPONENT_COUNT
    }

    pub fn is_excluded(&self, component: usize) -> bool {
        self.first_component + component == self.excluded_component
    }
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub batch_year: String,
    pub layout: ColumnLayout,
    pub classes: ClassFilter,
    pub export: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            batch_year: DEFAULT_BATCH_YEAR.to_string(),
            layout: ColumnLayout::default(),
            classes: ClassFilter::default(),
            export: None,
        }
    }
}

/// Blank values fall back to the default; anything else must be a 4-digit year.
pub fn resolve_batch_year(raw: Option<&str>) -> Result<String> {
    let year = match raw.map(str::trim).filter(|year| !year.is_empty()) {
        Some(year) => year,
        None => return Ok(DEFAULT_BATCH_YEAR.to_string()),
    };
    if year.len() != BATCH_YEAR_LEN || !year.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AuditError::InvalidBatchYear(year.to_string()));
    }
    Ok(year.to_string())
}

impl AuditConfig {
    /// Reads the admission year from `GRADE_AUDIT_BATCH_YEAR`.
    pub fn from_env(class: Option<&str>, export: Option<&str>) -> Result<Self> {
        let batch_year = std::env::var(BATCH_YEAR_ENV).ok();
        Self::from_parts(batch_year.as_deref(), class, export)
    }

    pub fn from_parts(
        batch_year: Option<&str>,
        class: Option<&str>,
        export: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            batch_year: resolve_batch_year(batch_year)?,
            layout: ColumnLayout::default(),
            classes: class.map(ClassFilter::parse).unwrap_or_default(),
            export: export
                .filter(|value| !value.is_empty())
                .map(|_| PathBuf::from(REPORT_FILE)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_excludes_fifth_component() {
        let layout = ColumnLayout::default();
        assert_eq!(layout.component_columns().collect::<Vec<_>>(), vec![4, 5, 6, 7, 8, 9]);
        assert!(layout.is_excluded(4));
        assert!(!layout.is_excluded(5));
    }

    #[test]
    fn export_requires_non_empty_value() {
        let config = AuditConfig::from_parts(None, Some("C1"), Some("")).unwrap();
        assert!(config.export.is_none());
        let config = AuditConfig::from_parts(None, None, Some("yes")).unwrap();
        assert_eq!(config.export, Some(PathBuf::from(REPORT_FILE)));
        assert!(config.classes.is_empty());
    }

    #[test]
    fn batch_year_is_trimmed_and_blank_falls_back() {
        assert_eq!(resolve_batch_year(Some(" 2023 ")).unwrap(), "2023");
        assert_eq!(resolve_batch_year(Some("   ")).unwrap(), DEFAULT_BATCH_YEAR);
        assert_eq!(resolve_batch_year(None).unwrap(), DEFAULT_BATCH_YEAR);
    }

    #[test]
    fn batch_year_must_be_four_digits() {
        for bad in ["202", "20245", "20x4"] {
            assert!(matches!(
                resolve_batch_year(Some(bad)),
                Err(AuditError::InvalidBatchYear(year)) if year == bad
            ));
        }
    }

    #[test]
    fn batch_year_is_read_from_environment() {
        std::env::set_var(BATCH_YEAR_ENV, " 2022 ");
        let config = AuditConfig::from_env(None, None);
        std::env::remove_var(BATCH_YEAR_ENV);
        assert_eq!(config.unwrap().batch_year, "2022");
    }
}
