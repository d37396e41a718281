//! Configuration for the bidwatch front-end.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{BidwatchError, Result};
use crate::notice::Grade;
use crate::query::criteria::SearchCriteria;

/// Settings that shape the cleared search form and where notices come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidwatchConfig {
    /// Publication year the form resets to on clear. Empty means any year.
    pub default_year: String,

    /// Grades selected after clear.
    pub default_grades: BTreeSet<Grade>,

    /// Notice file used when none is given on the command line.
    /// If None, the built-in sample notices are used.
    pub notices_path: Option<PathBuf>,

    /// Evaluate large collections on the rayon pool.
    pub parallel: bool,
}

impl Default for BidwatchConfig {
    fn default() -> Self {
        Self {
            default_year: "2025".to_string(),
            default_grades: Grade::all(),
            notices_path: None,
            parallel: false,
        }
    }
}

impl BidwatchConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BidwatchError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: BidwatchConfig = serde_json::from_str(&content).map_err(|e| {
            BidwatchError::config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        config.cleared_criteria().validate()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Set the default year.
    pub fn with_default_year<S: Into<String>>(mut self, year: S) -> Self {
        self.default_year = year.into();
        self
    }

    /// Set the notice file.
    pub fn with_notices_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.notices_path = Some(path.into());
        self
    }

    /// Set whether to filter in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The criteria a cleared search form holds.
    ///
    /// This is the form state only. Clearing lists the whole collection, see
    /// [`BidwatchConfig::reset_criteria`].
    pub fn cleared_criteria(&self) -> SearchCriteria {
        SearchCriteria::cleared(self.default_year.clone()).with_grades(self.default_grades.clone())
    }

    /// The criteria the result list is matched with after a clear.
    ///
    /// No field constrains anything except the configured grade selection, so
    /// with the default grades every notice is listed regardless of its year.
    pub fn reset_criteria(&self) -> SearchCriteria {
        SearchCriteria::default().with_grades(self.default_grades.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = BidwatchConfig::default();
        assert_eq!(config.default_year, "2025");
        assert_eq!(config.default_grades, Grade::all());
        assert!(config.notices_path.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_cleared_criteria() {
        let criteria = BidwatchConfig::default().cleared_criteria();
        assert_eq!(criteria, SearchCriteria::cleared("2025"));

        let criteria = BidwatchConfig::default()
            .with_default_year("")
            .cleared_criteria();
        assert_eq!(criteria, SearchCriteria::default());
    }

    #[test]
    fn test_reset_criteria_ignores_default_year() {
        let config = BidwatchConfig::default();
        assert_eq!(config.reset_criteria(), SearchCriteria::default());
        assert!(config.reset_criteria().year.is_empty());
        assert_eq!(config.cleared_criteria().year, "2025");

        let mut config = BidwatchConfig::default().with_default_year("2024");
        config.default_grades = BTreeSet::from([Grade::A]);
        assert_eq!(
            config.reset_criteria(),
            SearchCriteria::default().with_grades([Grade::A])
        );
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_year": "2024", "parallel": true}}"#).unwrap();
        file.flush().unwrap();

        let config = BidwatchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_year, "2024");
        assert!(config.parallel);
        assert_eq!(config.default_grades, Grade::all());
    }

    #[test]
    fn test_from_file_rejects_bad_year() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_year": "R7"}}"#).unwrap();
        file.flush().unwrap();

        assert!(matches!(
            BidwatchConfig::from_file(file.path()),
            Err(BidwatchError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            BidwatchConfig::from_file("/nonexistent/bidwatch.json"),
            Err(BidwatchError::Config(_))
        ));
    }
}
