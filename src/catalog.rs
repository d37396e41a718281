//! Option lists offered by the search form.
//!
//! Each list starts with `""`, the "no constraint" choice.

use serde::Serialize;

use crate::notice::Grade;

/// Regions: no constraint, nationwide, then the 47 prefectures.
#[rustfmt::skip]
pub const REGIONS: &[&str] = &[
    "", "全国",
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県",
    "茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県",
    "新潟県", "富山県", "石川県", "福井県", "山梨県", "長野県",
    "岐阜県", "静岡県", "愛知県", "三重県",
    "滋賀県", "京都府", "大阪府", "兵庫県", "奈良県", "和歌山県",
    "鳥取県", "島根県", "岡山県", "広島県", "山口県",
    "徳島県", "香川県", "愛媛県", "高知県",
    "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
];

/// Publication years.
pub const YEARS: &[&str] = &["", "2023", "2024", "2025", "2026"];

/// Classifications.
pub const CLASSIFICATIONS: &[&str] = &["", "工事", "物品", "役務", "委託", "その他"];

/// Publication months: no constraint, then `"01"`..`"12"`.
pub fn months() -> Vec<String> {
    std::iter::once(String::new())
        .chain((1..=12).map(|m| format!("{m:02}")))
        .collect()
}

/// All option lists, for display.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub regions: Vec<String>,
    pub years: Vec<String>,
    pub months: Vec<String>,
    pub classifications: Vec<String>,
    pub grades: Vec<String>,
}

impl Catalog {
    pub fn new() -> Self {
        let owned = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Catalog {
            regions: owned(REGIONS),
            years: owned(YEARS),
            months: months(),
            classifications: owned(CLASSIFICATIONS),
            grades: Grade::ALL.iter().map(Grade::to_string).collect(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
