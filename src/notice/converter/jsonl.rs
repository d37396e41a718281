//! JSONL format notice converter.
//!
//! Each non-blank line holds one notice object:
//! ```jsonl
//! {"id": "EX-001", "title": "データ入力業務 一式", "agency": "総務省", ...}
//! {"id": "EX-002", "title": "スキャン・電子化（公文書）", "agency": "広島市", ...}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{BidwatchError, Result};
use crate::notice::converter::NoticeConverter;
use crate::notice::notice::Notice;

/// A notice converter for JSONL format.
#[derive(Clone, Debug, Default)]
pub struct JsonlNoticeConverter;

impl JsonlNoticeConverter {
    /// Create a new JSONL converter.
    pub fn new() -> Self {
        JsonlNoticeConverter
    }

    /// Parse a single JSON line into a Notice.
    fn parse_json_line(&self, line: &str, line_num: usize) -> Result<Notice> {
        let notice: Notice = serde_json::from_str(line).map_err(|e| {
            BidwatchError::parse(format!("Failed to parse notice on line {line_num}: {e}"))
        })?;
        notice.validate()?;
        Ok(notice)
    }
}

/// Iterator over JSONL notices.
pub struct JsonlNoticeIterator {
    reader: BufReader<File>,
    converter: JsonlNoticeConverter,
    line_num: usize,
}

impl Iterator for JsonlNoticeIterator {
    type Item = Result<Notice>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            self.line_num += 1;
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(self.converter.parse_json_line(line, self.line_num));
                }
                Err(e) => {
                    return Some(Err(BidwatchError::parse(format!(
                        "Failed to read line {}: {e}",
                        self.line_num
                    ))));
                }
            }
        }
    }
}

impl NoticeConverter for JsonlNoticeConverter {
    type Iter = JsonlNoticeIterator;

    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter> {
        let file = File::open(path.as_ref())?;

        Ok(JsonlNoticeIterator {
            reader: BufReader::new(file),
            converter: self.clone(),
            line_num: 0,
        })
    }
}
