//! aris - file search and storage analysis.
//!
//! Usage:
//!   aris search [QUERY]          Index common folders and search by name prefix;
//!                                without QUERY, prompt and act on chosen results
//!   aris analyze [PATH]          Storage breakdown and top files for a folder
//!                                (PATH may be a home folder name like downloads)
//!   aris open PATH               Open a file with its default application
//!   aris append PATH [TEXT]      Append text to a .txt/.csv/.json/.md file
//!   aris move PATH DEST          Move a file into another folder
//!   aris delete PATH             Delete a file
//!   aris --help                  Show help

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail, eyre};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aris_analyze::{
    AnalyzeConfig, ExtensionStats, SortOrder, StorageAnalyzer, StorageReport, export_csv,
};
use aris_core::{FileRecord, ScanConfig, format_size, format_timestamp};
use aris_index::{FileIndex, ProgressReceiver, RebuildReport};
use aris_ops::{ConflictKind, DeleteMode, OperationError};

#[derive(Parser)]
#[command(
    name = "aris",
    version,
    about = "File search and storage analysis",
    long_about = "aris indexes your common folders for fast name search and \
                  reports where the space inside a folder goes."
)]
struct Cli {
    /// Log debug output to stderr (overridden by ARIS_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index folders and search files by name prefix (case-insensitive)
    Search {
        /// Name prefix to look for; prompts repeatedly when omitted
        query: Option<String>,

        /// Additional folder to index (repeatable)
        #[arg(short, long = "root")]
        roots: Vec<PathBuf>,

        /// Index only the --root folders, not the default user folders
        #[arg(long, requires = "roots")]
        only: bool,

        /// Skip entries matching this glob (repeatable)
        #[arg(short, long = "ignore")]
        ignore: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Analyze storage usage of a folder
    Analyze {
        /// Folder to analyze, or a home folder name such as downloads
        #[arg(default_value = ".")]
        path: String,

        /// Number of files to list
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,

        /// Ranking order
        #[arg(short, long, default_value = "size")]
        sort: SortBy,

        /// Group extensions case-insensitively
        #[arg(long)]
        fold_case: bool,

        /// Write every analyzed file to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Open a file with the default application
    Open {
        /// File to open
        path: PathBuf,
    },

    /// Append text to a .txt, .csv, .json or .md file
    Append {
        /// File to append to
        path: PathBuf,

        /// Text to append; read from stdin until an empty line when omitted
        text: Option<String>,
    },

    /// Move a file into another folder
    Move {
        /// File to move
        path: PathBuf,

        /// Destination folder (path, or a folder name in your home directory)
        destination: String,

        /// Overwrite an existing file without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a file
    Delete {
        /// File to delete
        path: PathBuf,

        /// Delete without asking
        #[arg(short, long)]
        yes: bool,

        /// Remove permanently instead of moving to the trash
        #[arg(long)]
        permanent: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortBy {
    /// Largest first
    Size,
    /// Most recently modified first
    Time,
}

impl From<SortBy> for SortOrder {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Size => SortOrder::BySizeDesc,
            SortBy::Time => SortOrder::ByTimeDesc,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Search {
            query,
            roots,
            only,
            ignore,
            format,
        } => run_search(query, roots, only, ignore, format),
        Command::Analyze {
            path,
            top,
            sort,
            fold_case,
            export,
            format,
        } => {
            let root = analysis_root(&path, dirs::home_dir().as_deref());
            run_analyze(&root, top, sort.into(), fold_case, export, format)
        }
        Command::Open { path } => {
            println!("Opening file: {}", path.display());
            report_operation(aris_ops::open_path(&path))
        }
        Command::Append { path, text } => run_append(&path, text),
        Command::Move {
            path,
            destination,
            yes,
        } => run_move(&path, &destination, yes),
        Command::Delete {
            path,
            yes,
            permanent,
        } => run_delete(&path, yes, permanent),
    }
}

/// Install the stderr log subscriber.
fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("ARIS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// The user folders searched by default.
fn default_roots() -> Vec<PathBuf> {
    [
        dirs::download_dir(),
        dirs::document_dir(),
        dirs::picture_dir(),
        dirs::video_dir(),
        dirs::audio_dir(),
        dirs::desktop_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Build the index and answer one query, or prompt for queries.
fn run_search(
    query: Option<String>,
    extra_roots: Vec<PathBuf>,
    only: bool,
    ignore: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut roots = if only { Vec::new() } else { default_roots() };
    roots.extend(extra_roots);
    if roots.is_empty() {
        bail!("No folders to index; pass one with --root");
    }

    let config = ScanConfig::builder()
        .root(".")
        .ignore_patterns(ignore)
        .build()
        .context("Invalid scan settings")?;
    let mut index = FileIndex::with_config(config);

    eprintln!("Building file index...");
    let report = rebuild_with_progress(&mut index, &roots)?;
    for skipped in &report.skipped {
        eprintln!("  Skipping: {}", skipped.reason);
    }
    for warning in &report.warnings {
        debug!(path = %warning.path.display(), kind = ?warning.kind, "{}", warning.message);
    }
    eprintln!(
        "Indexing complete! {} files in {} folder(s).",
        report.records,
        report.indexed.len()
    );

    match query {
        Some(query) => print_search_results(&index.search(query.trim()), format),
        None => search_prompt(&index, format),
    }
}

/// Poll interval for progress while the index is rebuilt.
const PROGRESS_POLL: Duration = Duration::from_millis(100);

/// Rebuild `index` on a worker thread, printing scan progress to stderr.
fn rebuild_with_progress(index: &mut FileIndex, roots: &[PathBuf]) -> Result<RebuildReport> {
    let mut progress_rx = index.subscribe();
    thread::scope(|scope| {
        let worker = scope.spawn(|| index.rebuild(roots));
        while !worker.is_finished() {
            print_progress(&mut progress_rx);
            thread::sleep(PROGRESS_POLL);
        }
        print_progress(&mut progress_rx);
        worker.join().map_err(|_| eyre!("Indexing thread panicked"))
    })
}

/// Print every progress snapshot received so far.
fn print_progress(progress_rx: &mut ProgressReceiver) {
    while let Ok(progress) = progress_rx.try_recv() {
        if progress.finished {
            eprintln!(
                "\r  Indexed {}: {} files",
                progress.root.display(),
                progress.files_scanned
            );
        } else {
            eprint!(
                "\r  Indexing {}: {} files ({:.0}/s)",
                progress.root.display(),
                progress.files_scanned,
                progress.files_per_second()
            );
        }
    }
}

/// Read queries from stdin until `quit`, `exit`, `q` or end of input.
fn search_prompt(index: &FileIndex, format: OutputFormat) -> Result<()> {
    loop {
        let Some(query) = prompt("\nEnter file name to search (or 'quit' to exit): ")? else {
            return Ok(());
        };
        if matches!(query.as_str(), "quit" | "exit" | "q") {
            return Ok(());
        }
        let results = index.search(&query);
        print_search_results(&results, format)?;
        if matches!(format, OutputFormat::Text) && !results.is_empty() {
            result_actions(&results)?;
        }
    }
}

/// Something the user can do with a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultAction {
    Open,
    Append,
    Move,
    Delete,
}

impl ResultAction {
    /// Map a menu entry to an action.
    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::Open),
            "2" => Some(Self::Append),
            "3" => Some(Self::Move),
            "4" => Some(Self::Delete),
            _ => None,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Append => "insert into",
            Self::Move => "move",
            Self::Delete => "delete",
        }
    }
}

/// Offer file actions on one set of results until the user moves on.
fn result_actions(results: &[&FileRecord]) -> Result<()> {
    loop {
        println!("What would you like to do?");
        println!("1. Open the file");
        println!("2. Insert text into the file");
        println!("3. Move the file");
        println!("4. Delete the file");
        println!("5. Search for a different file");

        let Some(choice) = prompt("\nChoose operation: ")? else {
            return Ok(());
        };
        if choice == "5" {
            return Ok(());
        }

        match ResultAction::from_choice(&choice) {
            Some(action) => {
                if let Some(record) = select_result(results, action)? {
                    apply_action(action, &record.path)?;
                }
            }
            None => println!("Invalid choice."),
        }

        if !confirm("\nPerform another operation on these results?")? {
            return Ok(());
        }
    }
}

/// Ask which result to act on; a single result is chosen without asking.
fn select_result<'a>(
    results: &[&'a FileRecord],
    action: ResultAction,
) -> Result<Option<&'a FileRecord>> {
    if results.len() == 1 {
        return Ok(Some(results[0]));
    }

    println!("\nMultiple files found.");
    let answer = prompt(&format!(
        "Enter file number to {} (0 to cancel): ",
        action.verb()
    ))?
    .unwrap_or_default();
    let picked = pick_result(results, &answer);
    if picked.is_none() {
        println!("Cancelled.");
    }
    Ok(picked)
}

/// The result numbered `answer` (1-based), if any.
fn pick_result<'a>(results: &[&'a FileRecord], answer: &str) -> Option<&'a FileRecord> {
    let number: usize = answer.trim().parse().ok()?;
    results.get(number.checked_sub(1)?).copied()
}

fn apply_action(action: ResultAction, path: &Path) -> Result<()> {
    match action {
        ResultAction::Open => {
            println!("Opening file: {}", path.display());
            report_operation(aris_ops::open_path(path))
        }
        ResultAction::Append => run_append(path, None),
        ResultAction::Move => {
            let destination = prompt("\nEnter destination folder path: ")?.unwrap_or_default();
            run_move(path, &destination, false)
        }
        ResultAction::Delete => run_delete(path, false, false),
    }
}

/// Print `message` and read one trimmed line, `None` at end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// A record as shown to users.
#[derive(Serialize)]
struct RecordView<'a> {
    name: &'a str,
    path: String,
    size: u64,
    modified: String,
}

impl<'a> From<&'a FileRecord> for RecordView<'a> {
    fn from(record: &'a FileRecord) -> Self {
        Self {
            name: record.name.as_str(),
            path: record.path.display().to_string(),
            size: record.size,
            modified: format_timestamp(record.modified),
        }
    }
}

fn print_search_results(results: &[&FileRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if results.is_empty() {
                println!("No files found.");
                return Ok(());
            }
            println!("\nFound {} file(s):", results.len());
            for (i, record) in results.iter().enumerate() {
                println!("--- File {} ---", i + 1);
                println!("Name: {}", record.name);
                println!("Path: {}", record.path.display());
                println!("Size: {}", format_size(record.size));
                println!("Last Modified: {}", format_timestamp(record.modified));
                println!();
            }
        }
        OutputFormat::Json => {
            let views: Vec<RecordView> = results.iter().map(|r| RecordView::from(*r)).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
    }
    Ok(())
}

/// A path as typed, or a standard folder under home (`downloads`, `pictures`).
///
/// Unresolvable input is returned unchanged so the analyzer reports it.
fn analysis_root(input: &str, home: Option<&Path>) -> PathBuf {
    aris_ops::resolve_folder(input, home).unwrap_or_else(|_| PathBuf::from(input))
}

/// Analyze one folder, print the report and optionally export it.
fn run_analyze(
    path: &Path,
    top: usize,
    order: SortOrder,
    fold_case: bool,
    export: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    eprintln!("Scanning {}...", path.display());

    let config = AnalyzeConfig::builder()
        .limit(top)
        .order(order)
        .fold_extension_case(fold_case)
        .build()
        .context("Invalid analysis settings")?;

    let report = match StorageAnalyzer::with_config(config).analyze(path) {
        Ok(report) => report,
        Err(err) if err.is_invalid_root() => {
            eprintln!("Invalid folder path! ({err})");
            return Ok(());
        }
        Err(err) => return Err(err).context("Scan failed"),
    };

    if report.is_empty() {
        println!("No files found in this folder.");
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_storage_report(&report),
        OutputFormat::Json => {
            let view = ReportView {
                root: report.root.display().to_string(),
                total_files: report.total_files,
                total_size: report.total_size,
                extensions: &report.extensions,
                ranked: report.ranked().iter().map(RecordView::from).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    if let Some(destination) = export {
        match export_csv(&report.records, &destination) {
            Ok(rows) => eprintln!(
                "Analysis exported successfully to: {} ({rows} rows)",
                destination.display()
            ),
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ReportView<'a> {
    root: String,
    total_files: u64,
    total_size: u64,
    extensions: &'a [ExtensionStats],
    ranked: Vec<RecordView<'a>>,
}

fn print_storage_report(report: &StorageReport) {
    println!();
    println!("=== Folder Summary: {} ===", report.root.display());
    println!("Total files: {}", report.total_files);
    println!("Total size: {}", format_size(report.total_size));
    println!();

    println!("=== File Type Breakdown ===");
    for ext in &report.extensions {
        println!(
            "  {}: {} files ({})",
            ext.extension,
            ext.count,
            format_size(ext.total_size)
        );
    }
    println!();

    let heading = match report.order {
        SortOrder::BySizeDesc => "Largest Files",
        SortOrder::ByTimeDesc => "Most Recent Files",
    };
    println!("=== {heading} ===");
    for (i, record) in report.ranked().iter().enumerate() {
        println!(
            "{}. {} - {} - {}",
            i + 1,
            record.name,
            format_size(record.size),
            format_timestamp(record.modified)
        );
    }
    println!();
}

fn run_append(path: &Path, text: Option<String>) -> Result<()> {
    if let Err(err) = aris_ops::check_appendable(path) {
        return report_operation(Err(err));
    }

    let text = match text {
        Some(text) => text,
        None => {
            eprintln!("Enter text to append (press ENTER on empty line to finish):");
            read_until_blank()?
        }
    };

    let result = aris_ops::append_text(path, &text);
    if result.is_ok() {
        println!("Text appended successfully to: {}", path.display());
    }
    report_operation(result)
}

/// Read stdin lines until an empty one, joined with newlines.
fn read_until_blank() -> Result<String> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn run_move(path: &Path, destination: &str, yes: bool) -> Result<()> {
    let home = dirs::home_dir();
    let dest_dir = match aris_ops::resolve_folder(destination, home.as_deref()) {
        Ok(dir) => dir,
        Err(err) => return report_operation(Err(err)),
    };

    match aris_ops::move_into(path, &dest_dir, yes) {
        Err(OperationError::Conflict(conflict)) if conflict.kind == ConflictKind::FileExists => {
            if !confirm("Warning: File already exists at destination. Overwrite?")? {
                println!("Cancelled. ({conflict})");
                return Ok(());
            }
            let moved = aris_ops::move_into(path, &dest_dir, true);
            print_moved(&moved);
            report_operation(moved.map(|_| ()))
        }
        result => {
            print_moved(&result);
            report_operation(result.map(|_| ()))
        }
    }
}

fn print_moved(result: &std::result::Result<PathBuf, OperationError>) {
    if let Ok(destination) = result {
        println!("File moved successfully to: {}", destination.display());
    }
}

fn run_delete(path: &Path, yes: bool, permanent: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete {}?", path.display()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let mode = if permanent {
        DeleteMode::Permanent
    } else {
        DeleteMode::Trash
    };
    let result = aris_ops::delete(path, mode);
    if result.is_ok() {
        println!("Deleted: {}", path.display());
    }
    report_operation(result)
}

/// Ask a yes/no question on stdin.
fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{question} (y/n): "))?;
    Ok(matches!(answer.as_deref(), Some("y" | "Y")))
}

/// Print a failed operation without aborting.
fn report_operation(result: std::result::Result<(), OperationError>) -> Result<()> {
    if let Err(err) = result {
        eprintln!("Error: {err}");
    }
    Ok(())
}
