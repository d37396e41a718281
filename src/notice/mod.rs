//! Notice records and their ingestion.
//!
//! This module provides the [`Notice`] record the matcher evaluates, the
//! built-in sample set, and converters that load notices from files.

pub mod converter;
#[allow(clippy::module_inception)]
pub mod notice;
pub mod sample;

// Re-export commonly used types
pub use converter::{NoticeConverter, load_notices};
pub use notice::{Grade, NATIONWIDE, Notice, NoticeBuilder, NoticeStatus};
pub use sample::sample_notices;
