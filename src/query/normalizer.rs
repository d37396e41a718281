//! Keyword normalization.
//!
//! Turns the raw keyword strings of a [`SearchCriteria`] into the token lists
//! the matcher compares. Tokens are kept verbatim: no case folding and no
//! de-duplication.

use crate::query::criteria::{IncludeMode, SearchCriteria};

/// Split a raw keyword string on runs of whitespace.
///
/// Whitespace is the Unicode `White_Space` property, which covers the
/// ideographic space U+3000 and NEL U+0085 but not the byte order mark
/// U+FEFF. Empty or all-whitespace input yields no tokens.
///
/// ```
/// use bidwatch::query::normalizer::normalize_keywords;
///
/// assert_eq!(normalize_keywords("  清掃 　 点検\t"), vec!["清掃", "点検"]);
/// assert!(normalize_keywords("   ").is_empty());
/// ```
pub fn normalize_keywords(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Include and exclude tokens derived from one set of criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedKeywords {
    /// Empty when the include mode is [`IncludeMode::ExcludeOnly`].
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl NormalizedKeywords {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let include = match criteria.include_mode {
            IncludeMode::ExcludeOnly => Vec::new(),
            IncludeMode::All | IncludeMode::Any => normalize_keywords(&criteria.include_keywords),
        };

        NormalizedKeywords {
            include,
            exclude: normalize_keywords(&criteria.exclude_keywords),
        }
    }
}
