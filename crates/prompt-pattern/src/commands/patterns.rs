//! Patterns command: list repeated requests in the prompt log.

use clap::Args;
use owo_colors::OwoColorize;
use prompt_pattern_core::analysis::{AnalysisReport, analyze_window};
use prompt_pattern_core::config::Config;
use prompt_pattern_core::similarity::SimilarityMode;
use prompt_pattern_core::store::PromptStore;
use prompt_pattern_core::suggest::truncate;
use tracing::{debug, instrument};

/// Longest representative text shown per pattern.
const LIST_TEXT_LIMIT: usize = 50;

/// Arguments for the `patterns` subcommand.
#[derive(Args, Debug, Default)]
pub struct PatternsArgs {
    /// Days of history to analyze [default: from config]
    #[arg(long)]
    pub days: Option<i64>,

    /// Similarity strategy
    #[arg(long, value_enum)]
    pub mode: Option<SimilarityMode>,

    /// Minimum similarity for two prompts to group (0.0-1.0)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Minimum repetitions before a request counts as a pattern
    #[arg(long)]
    pub min_count: Option<usize>,
}

/// Analyze the prompt log and print the ranked patterns.
#[instrument(name = "cmd_patterns", skip_all, fields(dir = %store.dir()))]
pub fn cmd_patterns(
    args: PatternsArgs,
    global_json: bool,
    config: &Config,
    store: &PromptStore,
) -> anyhow::Result<()> {
    debug!(?args, "executing patterns command");

    let analysis = super::analysis_config(config, args.mode, args.threshold, args.min_count);
    let days = args.days.unwrap_or(config.days_to_analyze);
    let log = store.load();
    let report = analyze_window(
        &log.prompts,
        chrono::Utc::now(),
        days,
        &log.dismissed,
        &analysis,
    );

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, days);
    Ok(())
}

fn print_report(report: &AnalysisReport, days: i64) {
    if report.patterns.is_empty() {
        println!("No patterns found yet.");
        println!(
            "{}",
            format!(
                "Analyzed {} of {} prompts from the last {days} days.",
                report.stats.analyzed_items, report.stats.total_items
            )
            .dimmed()
        );
        return;
    }

    println!(
        "{} ({} from the last {days} days)",
        "Repeated requests".bold().underline(),
        report.stats.analyzed_items
    );
    for (rank, pattern) in report.patterns.iter().enumerate() {
        println!();
        println!(
            "{}. \"{}\"",
            rank + 1,
            truncate(&pattern.representative_text, LIST_TEXT_LIMIT).bold()
        );
        println!("   {}: {}", "Count".dimmed(), pattern.count);
        if !pattern.keywords.is_empty() {
            println!("   {}: {}", "Keywords".dimmed(), pattern.keywords.join(", "));
        }
        println!(
            "   {}: {}",
            "Shortcut".dimmed(),
            format!("/{}", pattern.suggested_name).cyan()
        );
        println!("   {}: {}", "Id".dimmed(), pattern.id.dimmed());
    }
}
