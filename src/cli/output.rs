//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::cli::args::{BidwatchArgs, OutputFormat};
use crate::error::Result;
use crate::notice::Notice;

/// Result structure for search operations.
#[derive(Debug, Serialize)]
pub struct SearchResults<'a> {
    /// Compiled form of the criteria that produced these hits.
    pub query: String,
    pub total_hits: usize,
    pub duration_ms: u64,
    pub notices: Vec<&'a Notice>,
}

/// Output search results in the selected format.
pub fn output_search_results(results: &SearchResults<'_>, args: &BidwatchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("Query: {}", results.query);
                println!();
            }
            print!("{}", render_search_results(results));
            if args.verbosity() > 1 {
                println!("Search time: {}ms", results.duration_ms);
            }
            Ok(())
        }
        OutputFormat::Json => output_json(results, args),
    }
}

/// Output the form option lists in the selected format.
pub fn output_catalog(catalog: &Catalog, args: &BidwatchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", render_catalog(catalog));
            Ok(())
        }
        OutputFormat::Json => output_json(catalog, args),
    }
}

fn output_json<T: Serialize>(value: &T, args: &BidwatchArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Render search results as result cards.
pub fn render_search_results(results: &SearchResults<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "検索結果: {}件", results.total_hits);
    let _ = writeln!(out, "═══════════════");

    if results.notices.is_empty() {
        let _ = writeln!(out, "該当する案件はありません");
        return out;
    }

    for notice in &results.notices {
        let _ = writeln!(out);
        out.push_str(&render_notice(notice));
    }
    out
}

/// Render one notice as a result card.
pub fn render_notice(notice: &Notice) -> String {
    let mut out = String::new();
    let grades: Vec<_> = notice.grades.iter().map(|g| g.as_str()).collect();

    let _ = writeln!(out, "[{}] {} {}", notice.status.label(), notice.id, notice.title);
    let _ = writeln!(out, "─────────────");
    let _ = writeln!(
        out,
        "発注機関: {}  地域: {}  区分: {}",
        notice.agency, notice.region, notice.classification
    );
    let _ = writeln!(out, "等級: {}", grades.join(" "));
    let _ = writeln!(
        out,
        "公示日: {}  締切: {}",
        notice.published_date.format("%Y-%m-%d"),
        notice.deadline.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(out, "予算: {}", notice.budget_range);
    if let Some(url) = &notice.url {
        let _ = writeln!(out, "URL: {url}");
    }
    out
}

/// Render the option lists.
pub fn render_catalog(catalog: &Catalog) -> String {
    let shown = |list: &[String]| -> String {
        list.iter()
            .map(|v| if v.is_empty() { "(指定なし)" } else { v.as_str() })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = String::new();
    let _ = writeln!(out, "都道府県: {}", shown(&catalog.regions));
    let _ = writeln!(out, "公示年: {}", shown(&catalog.years));
    let _ = writeln!(out, "公示月: {}", shown(&catalog.months));
    let _ = writeln!(out, "区分: {}", shown(&catalog.classifications));
    let _ = writeln!(out, "等級: {}", shown(&catalog.grades));
    out
}
