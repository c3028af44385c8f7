// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docpeep::layout::locate_matches;
use docpeep::search::{extract_snippet, validate_query};
use docpeep::source::layout_file::load_layout;
use docpeep::{
    find_match_candidate, fuzzy_threshold, map_to_original, normalize, parse_root_arg,
    preview_request, CancellationToken, Config, ErrorResponse, SearchError, SearchResponse,
    SearchResult, Searcher,
};

mod cli;
use cli::display::{self, themed, BOLD, CYAN, GRAY, GREEN, YELLOW};
use cli::{Cli, Commands};

/// Exit status for a request the user got wrong (e.g. an empty query).
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Search {
            query,
            roots,
            workers,
            timeout_ms,
            json,
            limit,
        } => {
            let args = SearchArgs {
                query,
                roots,
                workers,
                timeout: timeout_ms.map(Duration::from_millis),
                json,
                limit,
            };
            run_search(cli.config.as_deref(), &args)
        }
        Commands::Inspect { file, query } => run_inspect(cli.config.as_deref(), &file, &query),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            match e.downcast_ref::<SearchError>() {
                Some(SearchError::EmptyQuery) => ExitCode::from(EXIT_USAGE),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Log to stderr. `DOCPEEP_LOG` wins over `RUST_LOG`; default is `warn`.
fn init_tracing() {
    let filter = std::env::var("DOCPEEP_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct SearchArgs {
    query: String,
    roots: Vec<String>,
    workers: Option<usize>,
    timeout: Option<Duration>,
    json: bool,
    limit: Option<usize>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("loading configuration")
}

fn run_search(config_path: Option<&Path>, args: &SearchArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    let roots = args
        .roots
        .iter()
        .map(|arg| parse_root_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;
    config.merge_roots(roots);
    if args.workers.is_some() {
        config.workers = args.workers;
    }

    let cancel = match args.timeout.or_else(|| config.timeout()) {
        Some(timeout) => CancellationToken::with_timeout(timeout),
        None => CancellationToken::new(),
    };

    let source = config.source();
    let searcher = Searcher::new(&source).with_options(config.search_options());

    let started = Instant::now();
    let outcome = search_with_progress(&searcher, &args.query, &cancel, !args.json);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let mut results = match outcome {
        Ok(results) => results,
        Err(e) => {
            if args.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                })?;
            }
            return Err(e.into());
        }
    };

    let total = results.len();
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    if args.json {
        print_json(&SearchResponse { results })?;
    } else {
        print_results(&args.query, &results, total, elapsed_ms);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn search_with_progress(
    searcher: &Searcher<'_>,
    query: &str,
    cancel: &CancellationToken,
    show_progress: bool,
) -> docpeep::Result<Vec<SearchResult>> {
    use indicatif::{ProgressBar, ProgressStyle};

    let progress = if show_progress && atty::is(atty::Stream::Stderr) {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} {pos} documents") {
        progress.set_style(style);
    }
    progress.set_prefix("Searching");

    let outcome = searcher.search_with_progress(query, cancel, || progress.inc(1));
    progress.finish_and_clear();
    outcome
}

#[cfg(not(feature = "parallel"))]
fn search_with_progress(
    searcher: &Searcher<'_>,
    query: &str,
    cancel: &CancellationToken,
    _show_progress: bool,
) -> docpeep::Result<Vec<SearchResult>> {
    searcher.search_with_cancel(query, cancel)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing response")?;
    println!("{}", json);
    Ok(())
}

fn print_results(query: &str, results: &[SearchResult], total: usize, elapsed_ms: f64) {
    if results.is_empty() {
        println!(
            "No matches for {}",
            themed(YELLOW, &[BOLD], &format!("'{}'", query))
        );
        return;
    }
    for (index, result) in results.iter().enumerate() {
        display::print_result(index + 1, result);
    }
    display::print_summary(results.len(), total, elapsed_ms);
}

fn run_inspect(config_path: Option<&Path>, file: &Path, query: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let query = validate_query(query)?;

    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let normalized_text = normalize(&text);
    let normalized_query = normalize(query);
    let threshold = fuzzy_threshold(normalized_query.len());

    let label = display::truncate_path(&file.display().to_string(), 60);
    display::section_top(&format!("inspect {}", label));
    display::field("query", &format!("{:?} -> {:?}", query, normalized_query.normalized));
    display::field(
        "lengths",
        &format!(
            "text {} chars -> {} normalized, query {} normalized",
            normalized_text.source_len,
            normalized_text.len(),
            normalized_query.len()
        ),
    );
    display::field("threshold", &threshold.to_string());

    display::section_mid("document match");
    let Some(candidate) = find_match_candidate(&text, query) else {
        display::row(&format!(" {}", themed(GRAY, &[], "no match")));
        display::section_bot();
        return Ok(());
    };
    let offset = map_to_original(&text, candidate.offset);
    display::field("distance", &display::distance_badge(candidate.distance, threshold));
    display::field(
        "offset",
        &format!("normalized {} -> original {}", candidate.offset, offset),
    );
    let snippet = extract_snippet(&text, offset, query.chars().count(), config.snippet_context);
    for line in display::wrap(&snippet, display::BOX_WIDTH - 2) {
        display::row(&format!(" {}", display::snippet_text(&line)));
    }

    display::section_mid("pages");
    match load_layout(file, config.viewport_scale)? {
        None => display::row(&format!(" {}", themed(GRAY, &[], "no layout sidecar"))),
        Some(layout) => {
            let matches = locate_matches(&layout, query);
            if matches.is_empty() {
                display::row(&format!(" {}", themed(GRAY, &[], "no matching runs")));
            }
            for page in &matches {
                display::row(&format!(
                    " {}",
                    themed(CYAN, &[BOLD], &format!("page {}", page.page_number))
                ));
                for b in &page.boxes {
                    display::row(&format!("   {}", display::format_box(b)));
                }
            }
            if let Some(request) = preview_request(&layout, &matches, config.preview_padding) {
                display::field(
                    "preview",
                    &themed(
                        GREEN,
                        &[],
                        &format!(
                            "page {}, {} highlight(s), crop {}",
                            request.page_number,
                            request.highlights.len(),
                            display::format_box(&request.crop)
                        ),
                    ),
                );
            }
        }
    }
    display::section_bot();
    Ok(())
}
