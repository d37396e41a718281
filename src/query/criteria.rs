//! Search criteria built from a user's search form.
//!
//! [`SearchCriteria`] is plain data. An empty string or an empty grade set
//! means "no constraint" for that field; there are no optional fields.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{BidwatchError, Result};
use crate::notice::{Grade, NoticeStatus};

/// How the title criterion is compared with a notice title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleMatchMode {
    /// The notice title contains the criterion.
    #[default]
    Partial,
    /// The notice title equals the criterion.
    Exact,
}

/// How include keywords combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeMode {
    /// Every include keyword must appear.
    #[default]
    All,
    /// At least one include keyword must appear.
    Any,
    /// Include keywords are ignored; only exclude keywords apply.
    ExcludeOnly,
}

/// Bid status constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl StatusFilter {
    /// Whether a notice with `status` passes this filter.
    pub fn accepts(&self, status: NoticeStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => status == NoticeStatus::Open,
            StatusFilter::Closed => status == NoticeStatus::Closed,
        }
    }
}

/// A user's search request over procurement notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Exact region; a nationwide notice matches any region.
    pub region: String,
    /// Substring of the agency name.
    pub agency: String,
    pub title: String,
    pub title_match_mode: TitleMatchMode,
    /// Whitespace-delimited keywords searched in title and agency.
    pub include_keywords: String,
    pub include_mode: IncludeMode,
    /// Whitespace-delimited keywords that must not appear in title and agency.
    pub exclude_keywords: String,
    /// Exact classification (工事, 物品, 役務, ...).
    pub classification: String,
    /// Accepted grades; a notice passes if it shares at least one.
    pub grades: BTreeSet<Grade>,
    /// 4-digit publication year.
    pub year: String,
    /// Lower bound on the publication month, `"01"`..`"12"`.
    pub month_from: String,
    /// Upper bound on the publication month, `"01"`..`"12"`.
    pub month_to: String,
    pub status: StatusFilter,
}

impl Default for SearchCriteria {
    /// Criteria that match every notice.
    fn default() -> Self {
        SearchCriteria {
            region: String::new(),
            agency: String::new(),
            title: String::new(),
            title_match_mode: TitleMatchMode::Partial,
            include_keywords: String::new(),
            include_mode: IncludeMode::All,
            exclude_keywords: String::new(),
            classification: String::new(),
            grades: Grade::all(),
            year: String::new(),
            month_from: String::new(),
            month_to: String::new(),
            status: StatusFilter::All,
        }
    }
}

impl SearchCriteria {
    /// Create criteria that match every notice.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state a search form returns to when cleared.
    ///
    /// Same as [`SearchCriteria::default`] except for the publication year.
    pub fn cleared<S: Into<String>>(default_year: S) -> Self {
        SearchCriteria {
            year: default_year.into(),
            ..Default::default()
        }
    }

    pub fn with_region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_agency<S: Into<String>>(mut self, agency: S) -> Self {
        self.agency = agency.into();
        self
    }

    /// Set the title and how it is compared.
    pub fn with_title<S: Into<String>>(mut self, title: S, mode: TitleMatchMode) -> Self {
        self.title = title.into();
        self.title_match_mode = mode;
        self
    }

    /// Set the include keywords and how they combine.
    pub fn with_include_keywords<S: Into<String>>(mut self, keywords: S, mode: IncludeMode) -> Self {
        self.include_keywords = keywords.into();
        self.include_mode = mode;
        self
    }

    pub fn with_exclude_keywords<S: Into<String>>(mut self, keywords: S) -> Self {
        self.exclude_keywords = keywords.into();
        self
    }

    pub fn with_classification<S: Into<String>>(mut self, classification: S) -> Self {
        self.classification = classification.into();
        self
    }

    pub fn with_grades<I: IntoIterator<Item = Grade>>(mut self, grades: I) -> Self {
        self.grades = grades.into_iter().collect();
        self
    }

    pub fn with_year<S: Into<String>>(mut self, year: S) -> Self {
        self.year = year.into();
        self
    }

    /// Set the inclusive month range. Pass `""` to leave a side unbounded.
    pub fn with_months<S: Into<String>, T: Into<String>>(mut self, from: S, to: T) -> Self {
        self.month_from = from.into();
        self.month_to = to.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Check the input contract the matcher relies on.
    ///
    /// `year` must be empty or four ASCII digits. `month_from` and `month_to`
    /// must be empty or a zero-padded month `"01"`..`"12"`, which keeps the
    /// string comparison of month bounds equivalent to numeric comparison.
    pub fn validate(&self) -> Result<()> {
        if !self.year.is_empty() && !(self.year.len() == 4 && is_ascii_digits(&self.year)) {
            return Err(BidwatchError::invalid_criteria(format!(
                "year must be 4 digits, got {:?}",
                self.year
            )));
        }
        for (name, month) in [("month_from", &self.month_from), ("month_to", &self.month_to)] {
            if !month.is_empty() && !is_canonical_month(month) {
                return Err(BidwatchError::invalid_criteria(format!(
                    "{name} must be \"01\"..\"12\", got {month:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// `"01"` through `"12"`.
pub fn is_canonical_month(s: &str) -> bool {
    s.len() == 2 && is_ascii_digits(s) && ("01"..="12").contains(&s)
}
