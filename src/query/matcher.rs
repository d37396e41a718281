//! Compiling search criteria into clauses and matching notices against them.
//!
//! [`NoticeMatcher::new`] turns a [`SearchCriteria`] into the list of clauses
//! that actually constrain something; empty criteria fields produce no clause.
//! A notice matches when every clause holds.
//!
//! # Examples
//!
//! ```
//! use bidwatch::notice::sample_notices;
//! use bidwatch::query::{NoticeMatcher, SearchCriteria, StatusFilter};
//!
//! let notices = sample_notices();
//! let criteria = SearchCriteria::new().with_status(StatusFilter::Open);
//! let matcher = NoticeMatcher::new(&criteria);
//!
//! let ids: Vec<_> = matcher.filter(&notices).iter().map(|n| n.id.as_str()).collect();
//! assert_eq!(ids, ["EX-001", "EX-002"]);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use log::debug;
use rayon::prelude::*;

use crate::notice::{Grade, Notice};
use crate::query::criteria::{IncludeMode, SearchCriteria, StatusFilter, TitleMatchMode};
use crate::query::normalizer::NormalizedKeywords;

/// One active constraint compiled from search criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Region equals the value, or the notice is nationwide.
    Region(String),
    /// Agency contains the value.
    Agency(String),
    /// Classification equals the value.
    Classification(String),
    /// Notice grades share at least one of these.
    Grades(BTreeSet<Grade>),
    /// Publication year equals the value.
    Year(String),
    /// Publication month lies in `from..=to`; an empty side is unbounded.
    MonthRange { from: String, to: String },
    /// Status equals the value.
    Status(StatusFilter),
    /// Title contains or equals the value.
    Title { text: String, mode: TitleMatchMode },
    /// Every token appears in the keyword haystack.
    IncludeAll(Vec<String>),
    /// At least one token appears in the keyword haystack.
    IncludeAny(Vec<String>),
    /// No token appears in the keyword haystack.
    Exclude(Vec<String>),
}

impl Clause {
    /// Whether this clause reads the title/agency keyword haystack.
    fn uses_haystack(&self) -> bool {
        matches!(
            self,
            Clause::IncludeAll(_) | Clause::IncludeAny(_) | Clause::Exclude(_)
        )
    }

    /// Evaluate this clause against `notice`.
    pub fn matches(&self, notice: &Notice) -> bool {
        if self.uses_haystack() {
            self.matches_with(notice, &notice.keyword_haystack())
        } else {
            self.matches_with(notice, "")
        }
    }

    /// Evaluate this clause. `haystack` must be `notice.keyword_haystack()`
    /// whenever the clause reads it.
    fn matches_with(&self, notice: &Notice, haystack: &str) -> bool {
        match self {
            Clause::Region(region) => notice.is_nationwide() || notice.region == *region,
            Clause::Agency(agency) => notice.agency.contains(agency.as_str()),
            Clause::Classification(classification) => notice.classification == *classification,
            Clause::Grades(selected) => !selected.is_disjoint(&notice.grades),
            Clause::Year(year) => notice.published_year() == *year,
            Clause::MonthRange { from, to } => {
                let month = notice.published_month();
                (from.is_empty() || month.as_str() >= from.as_str())
                    && (to.is_empty() || month.as_str() <= to.as_str())
            }
            Clause::Status(status) => status.accepts(notice.status),
            Clause::Title { text, mode } => match mode {
                TitleMatchMode::Partial => notice.title.contains(text.as_str()),
                TitleMatchMode::Exact => notice.title == *text,
            },
            Clause::IncludeAll(tokens) => tokens.iter().all(|t| haystack.contains(t.as_str())),
            Clause::IncludeAny(tokens) => {
                tokens.is_empty() || tokens.iter().any(|t| haystack.contains(t.as_str()))
            }
            Clause::Exclude(tokens) => !tokens.iter().any(|t| haystack.contains(t.as_str())),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Region(region) => write!(f, "region:{region}"),
            Clause::Agency(agency) => write!(f, "agency:*{agency}*"),
            Clause::Classification(classification) => write!(f, "classification:{classification}"),
            Clause::Grades(grades) => {
                let grades: Vec<_> = grades.iter().map(Grade::as_str).collect();
                write!(f, "grades:[{}]", grades.join(","))
            }
            Clause::Year(year) => write!(f, "year:{year}"),
            Clause::MonthRange { from, to } => {
                let from = if from.is_empty() { "*" } else { from.as_str() };
                let to = if to.is_empty() { "*" } else { to.as_str() };
                write!(f, "month:[{from} TO {to}]")
            }
            Clause::Status(status) => write!(f, "status:{status:?}"),
            Clause::Title { text, mode } => match mode {
                TitleMatchMode::Partial => write!(f, "title:*{text}*"),
                TitleMatchMode::Exact => write!(f, "title:\"{text}\""),
            },
            Clause::IncludeAll(tokens) => write!(f, "+({})", tokens.join(" AND ")),
            Clause::IncludeAny(tokens) => write!(f, "+({})", tokens.join(" OR ")),
            Clause::Exclude(tokens) => write!(f, "-({})", tokens.join(" OR ")),
        }
    }
}

/// Search criteria compiled into clauses, ready to evaluate notices.
///
/// The matcher holds no mutable state and is `Send + Sync`; the same instance
/// can filter any number of collections, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct NoticeMatcher {
    clauses: Vec<Clause>,
    uses_haystack: bool,
}

impl NoticeMatcher {
    /// Compile `criteria` into its active clauses.
    pub fn new(criteria: &SearchCriteria) -> Self {
        let matcher = Self::compile(criteria);
        debug!("Compiled criteria into {}", matcher.description());
        matcher
    }

    fn compile(criteria: &SearchCriteria) -> Self {
        let mut clauses = Vec::new();

        if !criteria.region.is_empty() {
            clauses.push(Clause::Region(criteria.region.clone()));
        }
        if !criteria.agency.is_empty() {
            clauses.push(Clause::Agency(criteria.agency.clone()));
        }
        if !criteria.classification.is_empty() {
            clauses.push(Clause::Classification(criteria.classification.clone()));
        }
        if !criteria.grades.is_empty() {
            clauses.push(Clause::Grades(criteria.grades.clone()));
        }
        if !criteria.year.is_empty() {
            clauses.push(Clause::Year(criteria.year.clone()));
        }
        if !criteria.month_from.is_empty() || !criteria.month_to.is_empty() {
            clauses.push(Clause::MonthRange {
                from: criteria.month_from.clone(),
                to: criteria.month_to.clone(),
            });
        }
        if criteria.status != StatusFilter::All {
            clauses.push(Clause::Status(criteria.status));
        }
        if !criteria.title.is_empty() {
            clauses.push(Clause::Title {
                text: criteria.title.clone(),
                mode: criteria.title_match_mode,
            });
        }

        let keywords = NormalizedKeywords::from_criteria(criteria);
        if !keywords.include.is_empty() {
            match criteria.include_mode {
                IncludeMode::All => clauses.push(Clause::IncludeAll(keywords.include)),
                IncludeMode::Any => clauses.push(Clause::IncludeAny(keywords.include)),
                IncludeMode::ExcludeOnly => {}
            }
        }
        if !keywords.exclude.is_empty() {
            clauses.push(Clause::Exclude(keywords.exclude));
        }

        Self::from_clauses(clauses)
    }

    /// Build a matcher from already compiled clauses.
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let uses_haystack = clauses.iter().any(Clause::uses_haystack);
        NoticeMatcher {
            clauses,
            uses_haystack,
        }
    }

    /// The active clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether this matcher accepts every notice.
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Human-readable form of the compiled clauses.
    pub fn description(&self) -> String {
        if self.clauses.is_empty() {
            return "(*)".to_string();
        }
        let parts: Vec<String> = self.clauses.iter().map(Clause::to_string).collect();
        format!("({})", parts.join(" "))
    }

    /// Whether `notice` satisfies every clause.
    pub fn matches(&self, notice: &Notice) -> bool {
        let haystack = if self.uses_haystack {
            notice.keyword_haystack()
        } else {
            String::new()
        };
        self.clauses
            .iter()
            .all(|clause| clause.matches_with(notice, &haystack))
    }

    /// Matching notices, in input order.
    pub fn filter<'a>(&self, notices: &'a [Notice]) -> Vec<&'a Notice> {
        let hits: Vec<&Notice> = notices.iter().filter(|n| self.matches(n)).collect();
        debug!("{} of {} notices matched", hits.len(), notices.len());
        hits
    }

    /// Same result as [`NoticeMatcher::filter`], evaluated on the rayon pool.
    pub fn par_filter<'a>(&self, notices: &'a [Notice]) -> Vec<&'a Notice> {
        let hits: Vec<&Notice> = notices.par_iter().filter(|n| self.matches(n)).collect();
        debug!("{} of {} notices matched", hits.len(), notices.len());
        hits
    }

    /// Number of matching notices.
    pub fn count(&self, notices: &[Notice]) -> usize {
        notices.iter().filter(|n| self.matches(n)).count()
    }
}

/// Whether `notice` satisfies `criteria`.
///
/// Compiles `criteria` on every call. Build a [`NoticeMatcher`] once when
/// checking many notices against the same criteria.
pub fn matches(notice: &Notice, criteria: &SearchCriteria) -> bool {
    NoticeMatcher::compile(criteria).matches(notice)
}

/// Notices satisfying `criteria`, in input order.
pub fn filter_notices<'a>(notices: &'a [Notice], criteria: &SearchCriteria) -> Vec<&'a Notice> {
    NoticeMatcher::new(criteria).filter(notices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{NATIONWIDE, NoticeStatus};
    use chrono::NaiveDate;

    fn notice() -> Notice {
        Notice::builder("N-1")
            .title("庁舎清掃業務")
            .agency("大阪市水道局")
            .region("大阪府")
            .classification("役務")
            .grades([Grade::B, Grade::C])
            .published_date(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
            .status(NoticeStatus::Open)
            .build()
    }

    #[test]
    fn test_default_criteria_compile_to_grade_clause_only() {
        let matcher = NoticeMatcher::new(&SearchCriteria::default());
        assert_eq!(matcher.clauses(), &[Clause::Grades(Grade::all())]);
        assert!(matcher.matches(&notice()));
    }

    #[test]
    fn test_empty_grade_set_compiles_to_nothing() {
        let matcher = NoticeMatcher::new(&SearchCriteria::default().with_grades([]));
        assert!(matcher.is_match_all());
        assert_eq!(matcher.description(), "(*)");
    }

    #[test]
    fn test_region_clause() {
        let criteria = SearchCriteria::new().with_region("大阪府");
        assert!(matches(&notice(), &criteria));

        let criteria = SearchCriteria::new().with_region("京都府");
        assert!(!matches(&notice(), &criteria));

        let mut nationwide = notice();
        nationwide.region = NATIONWIDE.to_string();
        assert!(matches(&nationwide, &criteria));
    }

    #[test]
    fn test_agency_is_substring_and_case_sensitive() {
        let n = Notice::builder("N-1").agency("Digital Agency").build();
        assert!(matches(&n, &SearchCriteria::new().with_agency("Agency")));
        assert!(!matches(&n, &SearchCriteria::new().with_agency("agency")));
    }

    #[test]
    fn test_classification_is_exact() {
        assert!(matches(&notice(), &SearchCriteria::new().with_classification("役務")));
        assert!(!matches(&notice(), &SearchCriteria::new().with_classification("役")));
    }

    #[test]
    fn test_grade_intersection() {
        let criteria = SearchCriteria::new().with_grades([Grade::A, Grade::C]);
        assert!(matches(&notice(), &criteria));

        let criteria = SearchCriteria::new().with_grades([Grade::A, Grade::D]);
        assert!(!matches(&notice(), &criteria));
    }

    #[test]
    fn test_year_and_month_range() {
        assert!(matches(&notice(), &SearchCriteria::new().with_year("2024")));
        assert!(!matches(&notice(), &SearchCriteria::new().with_year("2025")));

        assert!(matches(&notice(), &SearchCriteria::new().with_months("06", "06")));
        assert!(matches(&notice(), &SearchCriteria::new().with_months("", "06")));
        assert!(matches(&notice(), &SearchCriteria::new().with_months("06", "")));
        assert!(!matches(&notice(), &SearchCriteria::new().with_months("07", "")));
        assert!(!matches(&notice(), &SearchCriteria::new().with_months("", "05")));
        assert!(!matches(&notice(), &SearchCriteria::new().with_months("10", "02")));
    }

    #[test]
    fn test_status_clause() {
        assert!(matches(&notice(), &SearchCriteria::new().with_status(StatusFilter::Open)));
        assert!(!matches(&notice(), &SearchCriteria::new().with_status(StatusFilter::Closed)));
    }

    #[test]
    fn test_title_modes() {
        let partial = SearchCriteria::new().with_title("清掃", TitleMatchMode::Partial);
        assert!(matches(&notice(), &partial));

        let exact = SearchCriteria::new().with_title("清掃", TitleMatchMode::Exact);
        assert!(!matches(&notice(), &exact));

        let exact = SearchCriteria::new().with_title("庁舎清掃業務", TitleMatchMode::Exact);
        assert!(matches(&notice(), &exact));
    }

    #[test]
    fn test_include_modes() {
        let all = SearchCriteria::new().with_include_keywords("清掃 水道", IncludeMode::All);
        assert!(matches(&notice(), &all));

        let all = SearchCriteria::new().with_include_keywords("清掃 警備", IncludeMode::All);
        assert!(!matches(&notice(), &all));

        let any = SearchCriteria::new().with_include_keywords("清掃 警備", IncludeMode::Any);
        assert!(matches(&notice(), &any));

        let any = SearchCriteria::new().with_include_keywords("警備 建設", IncludeMode::Any);
        assert!(!matches(&notice(), &any));

        let ignored =
            SearchCriteria::new().with_include_keywords("警備 建設", IncludeMode::ExcludeOnly);
        assert!(matches(&notice(), &ignored));
    }

    #[test]
    fn test_keywords_search_joined_haystack() {
        // One token from the title, one from the agency.
        let criteria = SearchCriteria::new().with_include_keywords("業務 水道", IncludeMode::All);
        assert!(matches(&notice(), &criteria));

        // Region and classification are not part of the haystack.
        let criteria = SearchCriteria::new().with_include_keywords("大阪府", IncludeMode::All);
        assert!(!matches(&notice(), &criteria));
        let criteria = SearchCriteria::new().with_exclude_keywords("役務");
        assert!(matches(&notice(), &criteria));

        let n = Notice::builder("N-2").title("ab").agency("cd").build();
        let criteria = SearchCriteria::new().with_include_keywords("b c", IncludeMode::All);
        assert!(matches(&n, &criteria));
    }

    #[test]
    fn test_exclude_applies_in_every_mode() {
        for mode in [IncludeMode::All, IncludeMode::Any, IncludeMode::ExcludeOnly] {
            let criteria = SearchCriteria::new()
                .with_include_keywords("清掃", mode)
                .with_exclude_keywords("水道");
            assert!(!matches(&notice(), &criteria), "mode {mode:?}");
        }
    }

    #[test]
    fn test_description() {
        let criteria = SearchCriteria::new()
            .with_grades([])
            .with_region("東京都")
            .with_months("09", "")
            .with_include_keywords("保守 運用", IncludeMode::Any)
            .with_exclude_keywords("建設");
        let matcher = NoticeMatcher::new(&criteria);
        assert_eq!(
            matcher.description(),
            "(region:東京都 month:[09 TO *] +(保守 OR 運用) -(建設))"
        );
    }

    #[test]
    fn test_keyword_clauses_with_no_tokens_accept() {
        let n = notice();
        for clause in [
            Clause::IncludeAll(vec![]),
            Clause::IncludeAny(vec![]),
            Clause::Exclude(vec![]),
        ] {
            assert!(clause.matches(&n), "{clause:?}");
            assert!(NoticeMatcher::from_clauses(vec![clause]).matches(&n));
        }
    }

    #[test]
    fn test_clause_reads_haystack_from_notice() {
        let n = notice();
        assert!(Clause::IncludeAny(vec!["水道".to_string()]).matches(&n));
        assert!(!Clause::Exclude(vec!["清掃".to_string()]).matches(&n));
        assert!(Clause::Region("大阪府".to_string()).matches(&n));
    }

    #[test]
    fn test_free_matches_compiles_same_clauses() {
        let criteria = SearchCriteria::new()
            .with_region("大阪府")
            .with_include_keywords("清掃", IncludeMode::Any);
        assert_eq!(
            NoticeMatcher::compile(&criteria).clauses(),
            NoticeMatcher::new(&criteria).clauses()
        );
        assert!(matches(&notice(), &criteria));
    }

    #[test]
    fn test_count() {
        let notices = vec![notice(), Notice::builder("N-2").status(NoticeStatus::Closed).build()];
        let matcher = NoticeMatcher::new(&SearchCriteria::new().with_status(StatusFilter::Open));
        assert_eq!(matcher.count(&notices), 1);
    }
}
