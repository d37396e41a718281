//! JSON format notice converter.
//!
//! Reads a file holding one array of notice objects:
//! ```json
//! [
//!   {"id": "EX-001", "title": "データ入力業務 一式", "agency": "総務省", ...}
//! ]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{BidwatchError, Result};
use crate::notice::converter::NoticeConverter;
use crate::notice::notice::Notice;

/// A notice converter for JSON array files.
#[derive(Clone, Debug, Default)]
pub struct JsonNoticeConverter;

impl JsonNoticeConverter {
    /// Create a new JSON converter.
    pub fn new() -> Self {
        JsonNoticeConverter
    }
}

impl NoticeConverter for JsonNoticeConverter {
    type Iter = std::vec::IntoIter<Result<Notice>>;

    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter> {
        let file = File::open(path.as_ref())?;
        let notices: Vec<Notice> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| BidwatchError::parse(format!("Failed to parse notices: {e}")))?;

        let results: Vec<Result<Notice>> = notices
            .into_iter()
            .map(|notice| notice.validate().map(|_| notice))
            .collect();
        Ok(results.into_iter())
    }
}
