// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use docseek::utils::logging::{
    format_error, format_heading, format_info, format_success, format_warning,
};
use docseek::{
    Capabilities, Config, DocumentFormat, DocumentResult, DocumentStatus, JsonExporter, Location,
    MatchMode, NavigationResolver, NavigationTarget, ProgressTracker, SearchCoordinator,
    SearchReport, SearchRequest, SearchStats, Validator,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Longest diagnostic detail printed per file.
const MAX_DETAIL_CHARS: usize = 120;

#[derive(Parser)]
#[command(name = "docseek")]
#[command(version)]
#[command(about = "Search PDF, Word and Excel documents for keywords", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", env = "DOCSEEK_CONFIG")]
    config: Option<PathBuf>,

    /// Colored output; defaults to the `output.color` setting
    #[arg(long, action = ArgAction::Set)]
    color: Option<bool>,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search every supported document below a directory
    Search {
        /// Directory to search recursively
        directory: PathBuf,

        /// Keywords separated by commas, semicolons or newlines
        keywords: String,

        /// Only match keywords at word boundaries
        #[arg(long)]
        whole_word: bool,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        #[arg(short, long)]
        pretty: bool,

        /// Also write the JSON report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// List unreadable, unsupported and empty documents
        #[arg(long)]
        diagnostics: bool,

        /// Cancel the search after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        #[arg(long)]
        no_progress: bool,
    },

    /// List supported document formats and their availability
    Formats,
}

struct SearchOptions {
    directory: PathBuf,
    keywords: String,
    whole_word: bool,
    json: bool,
    pretty: bool,
    output: Option<PathBuf>,
    diagnostics: bool,
    timeout: Option<Duration>,
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let colored_output = cli.color.unwrap_or(config.output.color);
    colored::control::set_override(colored_output);

    docseek::utils::logging::init_logger(colored_output, cli.verbose);

    if let Some(path) = &cli.config
        && !path.exists()
    {
        warn!(
            "Config file {} not found, using default configuration",
            path.display()
        );
    }

    let capabilities = Capabilities::detect(&config.formats);

    match cli.command {
        Commands::Search {
            directory,
            keywords,
            whole_word,
            json,
            pretty,
            output,
            diagnostics,
            timeout,
            no_progress,
        } => {
            let options = SearchOptions {
                directory,
                keywords,
                whole_word,
                json,
                pretty,
                output,
                diagnostics: diagnostics || config.output.show_diagnostics,
                timeout: timeout.map(Duration::from_secs),
                no_progress,
            };
            cmd_search(config, capabilities, options, colored_output).await?;
        }
        Commands::Formats => {
            cmd_formats(&capabilities);
        }
    }

    Ok(())
}

async fn cmd_search(
    mut config: Config,
    capabilities: Capabilities,
    options: SearchOptions,
    colored_output: bool,
) -> Result<()> {
    if options.whole_word {
        config.search.match_mode = MatchMode::WholeWord;
    }

    let request = SearchRequest::parse(&options.directory, &options.keywords)?;
    let coordinator = SearchCoordinator::new(config.search.clone(), capabilities);
    let mut handle = coordinator
        .start(request)
        .context("Failed to start search")?;
    info!("Search {} running", handle.id());

    let tracker = if options.no_progress {
        ProgressTracker::hidden()
    } else {
        ProgressTracker::new(colored_output)
    };
    let progress_task = handle.take_progress().map(|mut updates| {
        tokio::spawn(async move {
            while let Some(update) = updates.recv().await {
                tracker.record(&update);
            }
            tracker.finish();
        })
    });

    let cancel = handle.cancel_token();
    let deadline = async {
        match options.timeout {
            Some(timeout) => tokio::time::sleep(timeout).await,
            None => std::future::pending().await,
        }
    };

    let wait = handle.wait();
    tokio::pin!(wait);

    let report = tokio::select! {
        report = &mut wait => report?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("{}", format_warning("Interrupted, finishing the current file"));
            cancel.cancel();
            wait.await?
        }
        _ = deadline => {
            eprintln!("{}", format_warning("Time limit reached, finishing the current file"));
            cancel.cancel();
            wait.await?
        }
    };

    if let Some(task) = progress_task {
        task.await.context("Progress display task failed")?;
    }

    let exporter = JsonExporter::new();
    if let Some(path) = &options.output {
        exporter
            .write(&report, path, options.pretty)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if options.json {
        println!("{}", exporter.render(&report, options.pretty)?);
    } else {
        render_report(&report, options.diagnostics, &StdoutNavigator)
            .context("Failed to print report")?;
        if let Some(path) = &options.output {
            println!(
                "{}",
                format_info(&format!("Report written to {}", path.display()))
            );
        }
    }

    Ok(())
}

fn cmd_formats(capabilities: &Capabilities) {
    println!("{}", format_heading("Supported formats"));
    for format in DocumentFormat::ALL {
        let line = format!(".{:<5} {}", format.extension(), format.description());
        if capabilities.supports(format) {
            println!("{}", format_success(&line));
        } else {
            println!("{} {}", format_error(&line), "(not available)".dimmed());
        }
    }
}

/// Prints where a viewer should jump for each hit.
struct StdoutNavigator;

impl NavigationResolver for StdoutNavigator {
    type Error = io::Error;

    fn navigate(&self, path: &Path, location: &Location) -> Result<(), Self::Error> {
        let target = NavigationTarget::resolve(path, location);
        writeln!(
            io::stdout().lock(),
            "        {} {}",
            "->".dimmed(),
            target.address().dimmed()
        )
    }
}

fn render_report<N>(report: &SearchReport, show_diagnostics: bool, navigator: &N) -> io::Result<()>
where
    N: NavigationResolver<Error = io::Error>,
{
    let mut out = io::stdout().lock();

    writeln!(
        out,
        "{}",
        format_heading(&format!(
            "Keywords [{}] in {}",
            report.keywords,
            report.root.display()
        ))
    )?;
    writeln!(out)?;

    for document in &report.documents_matched {
        render_document(&mut out, document)?;
        render_targets(&mut out, document, navigator)?;
    }

    let stats = SearchStats::from_report(report);
    let summary = format!(
        "{} of {} documents matched, {} hits, {:.1}s",
        stats.files_matched,
        stats.files_scanned,
        stats.total_hits,
        stats.duration.as_secs_f64()
    );

    if report.is_cancelled() {
        writeln!(
            out,
            "{}",
            format_warning(&format!(
                "Search cancelled after {} of {} files; {}",
                report.documents_scanned, report.total_files, summary
            ))
        )?;
    } else if stats.files_matched == 0 {
        writeln!(out, "{}", format_info(&format!("No matches. {}", summary)))?;
    } else {
        writeln!(out, "{}", format_success(&summary))?;
    }

    if !report.diagnostics.is_empty() {
        writeln!(
            out,
            "{}",
            format_warning(&format!(
                "Skipped: {} unreadable, {} unsupported, {} without text",
                report.count_with_status(DocumentStatus::Unreadable),
                report.count_with_status(DocumentStatus::Unsupported),
                report.count_with_status(DocumentStatus::Empty)
            ))
        )?;

        if show_diagnostics {
            for document in &report.diagnostics {
                let detail = document.detail.as_deref().unwrap_or("");
                writeln!(
                    out,
                    "    {} {} {}",
                    status_label(document.status).yellow(),
                    document.relative_path,
                    Validator::truncate_text(detail, MAX_DETAIL_CHARS).dimmed()
                )?;
            }
        }
    }

    Ok(())
}

fn render_document(out: &mut impl Write, document: &DocumentResult) -> io::Result<()> {
    writeln!(
        out,
        "{} {} ({} {})",
        document.relative_path.bold(),
        format!("[{}]", document.format).cyan(),
        document.hits.len(),
        if document.hits.len() == 1 { "hit" } else { "hits" }
    )?;

    let mut current_sheet: Option<&str> = None;
    for hit in &document.hits {
        if let Some(sheet) = hit.location.sheet()
            && current_sheet != Some(sheet)
        {
            writeln!(out, "    {} {}", "Sheet".dimmed(), sheet.bold())?;
            current_sheet = Some(sheet);
        }

        let indent = if current_sheet.is_some() { "      " } else { "    " };
        writeln!(
            out,
            "{}{:<10} {}",
            indent,
            hit.location.label().green(),
            hit.keywords_label()
        )?;
    }

    Ok(())
}

/// One navigation line per distinct target; repeated pages or cells print once.
fn render_targets<N>(
    out: &mut impl Write,
    document: &DocumentResult,
    navigator: &N,
) -> io::Result<()>
where
    N: NavigationResolver<Error = io::Error>,
{
    out.flush()?;
    let mut seen = Vec::new();
    for hit in &document.hits {
        let target = NavigationTarget::resolve(&document.path, &hit.location);
        if seen.contains(&target) {
            continue;
        }
        navigator.navigate(&document.path, &hit.location)?;
        seen.push(target);
    }
    writeln!(out)
}

fn status_label(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Ok => "ok",
        DocumentStatus::Unsupported => "unsupported",
        DocumentStatus::Unreadable => "unreadable",
        DocumentStatus::Empty => "empty",
    }
}
