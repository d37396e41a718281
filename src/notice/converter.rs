//! Notice converters for loading notices from files.
//!
//! This module provides a [`NoticeConverter`] trait and implementations for
//! JSON (an array of notices) and JSONL (one notice per line). Every notice a
//! converter yields has passed [`Notice::validate`].
//!
//! # Example
//!
//! ```no_run
//! use bidwatch::notice::converter::NoticeConverter;
//! use bidwatch::notice::converter::jsonl::JsonlNoticeConverter;
//!
//! let converter = JsonlNoticeConverter::new();
//! for notice in converter.convert("notices.jsonl").unwrap() {
//!     let notice = notice.unwrap();
//!     println!("{}: {}", notice.id, notice.title);
//! }
//! ```

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::notice::notice::Notice;

pub mod json;
pub mod jsonl;

use self::json::JsonNoticeConverter;
use self::jsonl::JsonlNoticeConverter;

/// A trait for converting files into Notice iterators.
pub trait NoticeConverter {
    /// The iterator type that yields notices.
    type Iter: Iterator<Item = Result<Notice>>;

    /// Convert a file into an iterator of Notices.
    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter>;
}

/// Load every notice from `path`, picking the format from the extension.
///
/// `.jsonl` and `.ndjson` are read line by line; anything else is read as a
/// JSON array. Loading stops at the first invalid record.
pub fn load_notices<P: AsRef<Path>>(path: P) -> Result<Vec<Notice>> {
    let path = path.as_ref();
    let is_lines = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl") | Some("ndjson")
    );

    let notices = if is_lines {
        JsonlNoticeConverter::new()
            .convert(path)?
            .collect::<Result<Vec<_>>>()?
    } else {
        JsonNoticeConverter::new()
            .convert(path)?
            .collect::<Result<Vec<_>>>()?
    };

    info!("Loaded {} notices from {}", notices.len(), path.display());
    Ok(notices)
}
