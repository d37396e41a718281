//! Search criteria and the notice matcher.

pub mod criteria;
pub mod matcher;
pub mod normalizer;

pub use self::criteria::{IncludeMode, SearchCriteria, StatusFilter, TitleMatchMode};
pub use self::matcher::{Clause, NoticeMatcher, filter_notices, matches};
pub use self::normalizer::{NormalizedKeywords, normalize_keywords};
