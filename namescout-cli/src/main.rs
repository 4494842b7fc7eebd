use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use namescout::cancel::CancellationToken;
use namescout::diagnostics::LogDiagnostics;
use namescout::search::search;
use namescout::sink::ResultSink;
use namescout::{actions, browse, Match, SearchConfig, SearchSummary};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliSearchArgs {
    /// Substring to look for in file names (case-insensitive)
    query: String,

    /// Root directory whose subtree is searched
    #[arg(short = 'd', long = "root", default_value = ".")]
    root: PathBuf,

    /// Number of walker threads (default: CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Also test files directly under the root against the query
    #[arg(long)]
    include_root_files: bool,

    /// Print matches and the final summary as JSON lines
    #[arg(long)]
    json: bool,

    /// Hide the progress spinner
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a directory tree for file names containing a substring
    Search(CliSearchArgs),

    /// List the immediate children of a directory
    Browse {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Open a file with the platform's default application
    Open { path: PathBuf },

    /// Delete a file
    Delete { path: PathBuf },
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => {
            let mut cli_config = SearchConfig::for_query(args.root, args.query);
            if let Some(threads) = args.threads {
                cli_config.thread_count = threads;
            }
            cli_config.include_root_files = args.include_root_files;

            let config = match &args.config {
                Some(path) => {
                    SearchConfig::load_from(Some(path.as_path()))?.merge_with_cli(cli_config)
                }
                None => cli_config,
            };

            init_logging(&config.log_level);

            let progress = if args.quiet || args.json {
                None
            } else {
                let pb = ProgressBar::new_spinner();
                pb.enable_steady_tick(Duration::from_millis(80));
                pb.set_message(format!("searching {}", config.root_dir.display()));
                Some(pb)
            };

            let mut printer = StreamPrinter {
                progress,
                json: args.json,
            };
            let summary = search(
                &config,
                &mut printer,
                &LogDiagnostics,
                &CancellationToken::new(),
            )?;
            print_summary(&summary, args.json);
            Ok(())
        }
        Commands::Browse { path } => {
            for child in browse::list_children(&path)? {
                if child.is_dir {
                    println!("{}/", child.name.blue());
                } else {
                    println!("{}", child.name);
                }
            }
            Ok(())
        }
        Commands::Open { path } => {
            actions::open_file(&path)?;
            println!("Opening {}", path.display());
            Ok(())
        }
        Commands::Delete { path } => {
            actions::delete_file(&path)?;
            println!("Deleted {}", path.display());
            Ok(())
        }
    }
}

fn init_logging(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Sink that renders each match the moment the collector hands it over.
struct StreamPrinter {
    progress: Option<ProgressBar>,
    json: bool,
}

impl StreamPrinter {
    fn print_line(&self, line: String) {
        match &self.progress {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
    }
}

impl ResultSink for StreamPrinter {
    fn emit(&mut self, m: Match) {
        let line = if self.json {
            serde_json::to_string(&m).unwrap_or_default()
        } else {
            format!(
                "{}  {}",
                m.file_name().bold(),
                m.containing_dir.display().to_string().blue()
            )
        };
        self.print_line(line);
    }

    // The completion signal retires the progress indicator.
    fn complete(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
    }
}

fn print_summary(summary: &SearchSummary, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(summary) {
            println!("{line}");
        }
        return;
    }

    let elapsed = Duration::from_millis(summary.elapsed.as_millis() as u64);
    let mut line = format!(
        "Found {} matches in {} directories in {}",
        summary.matches_delivered,
        summary.dirs_visited,
        humantime::format_duration(elapsed)
    );
    if summary.dirs_skipped > 0 {
        line.push_str(&format!(" ({} unreadable, skipped)", summary.dirs_skipped));
    }
    println!("{line}");
}
