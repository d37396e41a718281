//! # bidwatch
//!
//! Multi-criteria search over public-procurement notices.
//!
//! ## Features
//!
//! - Region, agency, title, classification, grade, publication period and
//!   bid status constraints
//! - Include keywords (all / any) and exclude keywords over title and agency
//! - Criteria compiled once, evaluated as a pure function per notice
//! - JSON / JSONL notice loading
//! - Command line front-end
//!
//! ## Example
//!
//! ```
//! use bidwatch::prelude::*;
//!
//! let notices = sample_notices();
//! let criteria = SearchCriteria::new().with_include_keywords("電子化", IncludeMode::Any);
//!
//! let hits = filter_notices(&notices, &criteria);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, "EX-002");
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod notice;
pub mod query;

pub mod prelude {
    pub use crate::error::{BidwatchError, Result};
    pub use crate::notice::{Grade, NATIONWIDE, Notice, NoticeStatus, sample_notices};
    pub use crate::query::{
        IncludeMode, NoticeMatcher, SearchCriteria, StatusFilter, TitleMatchMode, filter_notices,
        matches,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
