//! Command implementations for the bidwatch CLI.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::catalog::Catalog;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::BidwatchConfig;
use crate::error::Result;
use crate::notice::{Notice, load_notices, sample_notices};
use crate::query::{NoticeMatcher, SearchCriteria};

/// Execute a CLI command.
pub fn execute_command(args: BidwatchArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => BidwatchConfig::from_file(path)?,
        None => BidwatchConfig::default(),
    };

    match &args.command {
        Command::Search(search_args) => search(search_args, &config, &args),
        Command::Clear(clear_args) => clear(clear_args, &config, &args),
        Command::Catalog => output_catalog(&Catalog::new(), &args),
    }
}

/// Search notices with criteria built from flags.
fn search(search_args: &SearchArgs, config: &BidwatchConfig, cli_args: &BidwatchArgs) -> Result<()> {
    let notices = resolve_notices(search_args.notices.as_deref(), config)?;
    let results = search_results(search_args, config, &notices)?;
    output_search_results(&results, cli_args)
}

/// Reset the form and list the full collection.
fn clear(clear_args: &ClearArgs, config: &BidwatchConfig, cli_args: &BidwatchArgs) -> Result<()> {
    let notices = resolve_notices(clear_args.notices.as_deref(), config)?;
    let results = clear_results(config, &notices);
    output_search_results(&results, cli_args)
}

/// Validate the flag criteria and select the matching notices.
fn search_results<'a>(
    search_args: &SearchArgs,
    config: &BidwatchConfig,
    notices: &'a [Notice],
) -> Result<SearchResults<'a>> {
    let criteria = search_args.to_criteria();
    criteria.validate()?;
    Ok(select(
        &criteria,
        notices,
        search_args.parallel || config.parallel,
    ))
}

/// Select the notices listed after a clear.
fn clear_results<'a>(config: &BidwatchConfig, notices: &'a [Notice]) -> SearchResults<'a> {
    debug!("Cleared form: {:?}", config.cleared_criteria());
    select(&config.reset_criteria(), notices, config.parallel)
}

/// Load notices from the given file, the configured file, or the built-in samples.
fn resolve_notices(path: Option<&Path>, config: &BidwatchConfig) -> Result<Vec<Notice>> {
    match path.or(config.notices_path.as_deref()) {
        Some(path) => load_notices(path),
        None => {
            info!("No notice file given, using built-in samples");
            Ok(sample_notices())
        }
    }
}

fn select<'a>(criteria: &SearchCriteria, notices: &'a [Notice], parallel: bool) -> SearchResults<'a> {
    let start_time = Instant::now();

    let matcher = NoticeMatcher::new(criteria);
    let hits = if parallel {
        matcher.par_filter(notices)
    } else {
        matcher.filter(notices)
    };

    SearchResults {
        query: matcher.description(),
        total_hits: hits.len(),
        duration_ms: start_time.elapsed().as_millis() as u64,
        notices: hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_resolve_notices_falls_back_to_samples() {
        let notices = resolve_notices(None, &BidwatchConfig::default()).unwrap();
        assert_eq!(notices, sample_notices());
    }

    #[test]
    fn test_resolve_notices_prefers_argument_over_config() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        serde_json::to_writer(&mut file, &sample_notices()[..1]).unwrap();
        file.flush().unwrap();

        let config = BidwatchConfig::default().with_notices_path("/nonexistent/notices.json");
        let notices = resolve_notices(Some(file.path()), &config).unwrap();
        assert_eq!(notices.len(), 1);

        assert!(resolve_notices(None, &config).is_err());
    }

    fn search_args(flags: &[&str]) -> SearchArgs {
        let argv: Vec<&str> = ["bidwatch", "search"].into_iter().chain(flags.iter().copied()).collect();
        match BidwatchArgs::try_parse_from(argv).unwrap().command {
            Command::Search(search_args) => search_args,
            other => panic!("Expected Search command, got {other:?}"),
        }
    }

    fn hit_ids<'a>(results: &SearchResults<'a>) -> Vec<&'a str> {
        results.notices.iter().map(|n| n.id.as_str()).collect()
    }

    fn notices_with_2024() -> Vec<Notice> {
        let mut notices = sample_notices();
        notices.push(
            Notice::builder("EX-004")
                .title("道路補修工事")
                .agency("札幌市建設局")
                .region("北海道")
                .published_date(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap())
                .build(),
        );
        notices
    }

    #[test]
    fn test_search_rejects_bad_month() {
        let args = BidwatchArgs::try_parse_from(["bidwatch", "-q", "search", "--month-from", "9"])
            .unwrap();
        assert!(execute_command(args).is_err());

        let notices = sample_notices();
        let config = BidwatchConfig::default();
        assert!(search_results(&search_args(&["--year", "25"]), &config, &notices).is_err());
    }

    #[test]
    fn test_search_selects_matching_notices() {
        let notices = sample_notices();
        let config = BidwatchConfig::default();

        let results = search_results(&search_args(&["--status", "open"]), &config, &notices).unwrap();
        assert_eq!(hit_ids(&results), ["EX-001", "EX-002"]);
        assert_eq!(results.total_hits, 2);
        assert_eq!(results.query, "(grades:[A,B,C,D] status:Open)");

        let args = search_args(&["--include", "電子化", "--include-mode", "any"]);
        let results = search_results(&args, &config, &notices).unwrap();
        assert_eq!(hit_ids(&results), ["EX-002"]);
    }

    #[test]
    fn test_parallel_search_keeps_order() {
        let notices: Vec<Notice> = (0..50).flat_map(|_| notices_with_2024()).collect();
        let args = search_args(&["--region", "東京都", "--grades", "A"]);

        let sequential = search_results(&args, &BidwatchConfig::default(), &notices).unwrap();
        let parallel_args = search_args(&["--region", "東京都", "--grades", "A", "--parallel"]);
        let by_flag = search_results(&parallel_args, &BidwatchConfig::default(), &notices).unwrap();
        let by_config = search_results(
            &args,
            &BidwatchConfig::default().with_parallel(true),
            &notices,
        )
        .unwrap();

        assert_eq!(sequential.total_hits, 100);
        assert_eq!(hit_ids(&sequential), hit_ids(&by_flag));
        assert_eq!(hit_ids(&sequential), hit_ids(&by_config));
    }

    #[test]
    fn test_clear_lists_every_year() {
        let notices = notices_with_2024();

        let results = clear_results(&BidwatchConfig::default(), &notices);
        assert_eq!(hit_ids(&results), ["EX-001", "EX-002", "EX-003", "EX-004"]);

        let results = clear_results(&BidwatchConfig::default().with_parallel(true), &notices);
        assert_eq!(results.total_hits, notices.len());
    }

    #[test]
    fn test_commands_run_end_to_end() {
        let runs: [&[&str]; 4] = [
            &["bidwatch", "-q", "search", "--status", "open"],
            &["bidwatch", "-q", "-f", "json", "clear"],
            &["bidwatch", "catalog"],
            &["bidwatch", "-f", "json", "--pretty", "catalog"],
        ];
        for argv in runs {
            let args = BidwatchArgs::try_parse_from(argv).unwrap();
            assert!(execute_command(args).is_ok(), "{argv:?}");
        }
    }
}
