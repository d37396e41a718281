//! Procurement notice records.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{BidwatchError, Result};

/// Region value meaning the notice applies to every region.
pub const NATIONWIDE: &str = "全国";

/// A qualification grade required to bid on a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    /// All grades, in display order.
    pub const ALL: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::D];

    /// The single-letter code of this grade.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    /// A set holding every grade.
    pub fn all() -> BTreeSet<Grade> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = BidwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "A" | "a" => Ok(Grade::A),
            "B" | "b" => Ok(Grade::B),
            "C" | "c" => Ok(Grade::C),
            "D" | "d" => Ok(Grade::D),
            other => Err(BidwatchError::parse(format!("unknown grade: {other:?}"))),
        }
    }
}

/// Bid status of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    /// Bids are being accepted.
    Open,
    /// Bidding has ended.
    Closed,
}

impl NoticeStatus {
    /// Label shown on result cards.
    pub fn label(&self) -> &'static str {
        match self {
            NoticeStatus::Open => "受付中",
            NoticeStatus::Closed => "終了",
        }
    }
}

/// A single procurement / tender listing.
///
/// Notices are supplied by the caller and never modified by the matcher.
/// `deadline`, `budget_range` and `url` are informational and take no part
/// in filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub agency: String,
    /// Prefecture name, or [`NATIONWIDE`].
    pub region: String,
    pub classification: String,
    pub grades: BTreeSet<Grade>,
    pub published_date: NaiveDate,
    #[serde(with = "deadline_format")]
    pub deadline: NaiveDateTime,
    pub status: NoticeStatus,
    pub budget_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Notice {
    /// Create a builder for constructing notices.
    pub fn builder<S: Into<String>>(id: S) -> NoticeBuilder {
        NoticeBuilder::new(id)
    }

    /// Whether this notice applies to every region.
    pub fn is_nationwide(&self) -> bool {
        self.region == NATIONWIDE
    }

    /// The 4-digit publication year (`YYYY`).
    pub fn published_year(&self) -> String {
        self.published_date.format("%Y").to_string()
    }

    /// The zero-padded 2-digit publication month (`MM`).
    pub fn published_month(&self) -> String {
        self.published_date.format("%m").to_string()
    }

    /// Text that keyword clauses search: title and agency joined by one space.
    pub fn keyword_haystack(&self) -> String {
        format!("{} {}", self.title, self.agency)
    }

    /// Check the ingestion contract.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(BidwatchError::invalid_notice("notice id is empty"));
        }
        if self.grades.is_empty() {
            return Err(BidwatchError::invalid_notice(format!(
                "notice {} has no grades",
                self.id
            )));
        }
        Ok(())
    }
}

/// A builder for constructing notices in a fluent manner.
#[derive(Debug, Clone)]
pub struct NoticeBuilder {
    notice: Notice,
}

impl NoticeBuilder {
    /// Create a builder with the given id, every grade accepted and an open status.
    pub fn new<S: Into<String>>(id: S) -> Self {
        let published_date = NaiveDate::default();
        NoticeBuilder {
            notice: Notice {
                id: id.into(),
                title: String::new(),
                agency: String::new(),
                region: String::new(),
                classification: String::new(),
                grades: Grade::all(),
                published_date,
                deadline: published_date.and_time(chrono::NaiveTime::MIN),
                status: NoticeStatus::Open,
                budget_range: String::new(),
                url: None,
            },
        }
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.notice.title = title.into();
        self
    }

    pub fn agency<S: Into<String>>(mut self, agency: S) -> Self {
        self.notice.agency = agency.into();
        self
    }

    pub fn region<S: Into<String>>(mut self, region: S) -> Self {
        self.notice.region = region.into();
        self
    }

    pub fn classification<S: Into<String>>(mut self, classification: S) -> Self {
        self.notice.classification = classification.into();
        self
    }

    pub fn grades<I: IntoIterator<Item = Grade>>(mut self, grades: I) -> Self {
        self.notice.grades = grades.into_iter().collect();
        self
    }

    pub fn published_date(mut self, date: NaiveDate) -> Self {
        self.notice.published_date = date;
        self
    }

    pub fn deadline(mut self, deadline: NaiveDateTime) -> Self {
        self.notice.deadline = deadline;
        self
    }

    pub fn status(mut self, status: NoticeStatus) -> Self {
        self.notice.status = status;
        self
    }

    pub fn budget_range<S: Into<String>>(mut self, budget_range: S) -> Self {
        self.notice.budget_range = budget_range.into();
        self
    }

    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.notice.url = Some(url.into());
        self
    }

    /// Build the notice.
    pub fn build(self) -> Notice {
        self.notice
    }
}

/// `YYYY-MM-DD HH:MM` (de)serialization for deadlines.
pub mod deadline_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
