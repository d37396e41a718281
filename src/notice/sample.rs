//! Built-in sample notices.
//!
//! Used by the CLI when no notice file is given, and by tests.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::notice::notice::{Grade, NATIONWIDE, Notice, NoticeStatus};

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| NaiveTime::from_hms_opt(hour, min, 0).map(|t| d.and_time(t)))
        .unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The three sample notices: two open, one closed and nationwide.
pub fn sample_notices() -> Vec<Notice> {
    vec![
        Notice::builder("EX-001")
            .title("データ入力業務 一式")
            .agency("総務省")
            .region("東京都")
            .classification("役務")
            .grades([Grade::A, Grade::B, Grade::C, Grade::D])
            .published_date(day(2025, 10, 18))
            .deadline(at(2025, 10, 25, 17, 0))
            .status(NoticeStatus::Open)
            .budget_range("200万〜800万円")
            .url("https://example.gov/ex-001")
            .build(),
        Notice::builder("EX-002")
            .title("スキャン・電子化（公文書）")
            .agency("広島市")
            .region("広島県")
            .classification("役務")
            .grades([Grade::B, Grade::C, Grade::D])
            .published_date(day(2025, 10, 16))
            .deadline(at(2025, 10, 30, 17, 0))
            .status(NoticeStatus::Open)
            .budget_range("150万〜300万円")
            .url("https://example.gov/ex-002")
            .build(),
        Notice::builder("EX-003")
            .title("Web更新業務・運用保守")
            .agency("某独法")
            .region(NATIONWIDE)
            .classification("役務")
            .grades([Grade::A, Grade::B])
            .published_date(day(2025, 8, 2))
            .deadline(at(2025, 8, 20, 12, 0))
            .status(NoticeStatus::Closed)
            .budget_range("400万〜600万円")
            .url("https://example.gov/ex-003")
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_notices_are_valid() {
        let notices = sample_notices();
        assert_eq!(notices.len(), 3);
        for notice in &notices {
            notice.validate().unwrap();
        }
        assert_eq!(notices[2].published_month(), "08");
        assert_eq!(notices[0].deadline.format("%Y-%m-%d %H:%M").to_string(), "2025-10-25 17:00");
    }
}
