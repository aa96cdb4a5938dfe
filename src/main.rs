mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use levelup::config::{
    ensure_data_dir, get_data_dir, init_local_dir, load_results, load_settings, log_file, save_results,
    save_settings, settings_file, tests_file, Settings,
};
use levelup::domain::{parse_date, ChartKey, SortOrder, TestType};
use levelup::report::generate_report;
use levelup::seed::{sample_tasks, sample_tests};
use levelup::stopwatch::SystemClock;
use levelup::store::{project_for_chart, sort_by_date, TaskStore, TestFilter, TestRecordStore};
use levelup::Tracker;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter
const LOG_ENV: &str = "LEVELUP_LOG";

#[derive(Parser)]
#[command(name = "levelup")]
#[command(about = "Terminal study tracker: curriculum checklist, stopwatches and test score trends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .levelup directory with default settings
    Init {
        /// Also write the sample test history to tests.json
        #[arg(long)]
        sample_tests: bool,
    },
    /// Print a markdown study report
    Report {
        /// Output file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        selection: TestSelection,
    },
    /// Print chart points for the deviation trend as JSON
    Chart {
        /// Series to include: 4ko, math, japanese, science, social
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
        #[command(flatten)]
        selection: TestSelection,
    },
}

/// Which test results to read and how to filter them
#[derive(clap::Args)]
struct TestSelection {
    /// Test results file (JSON array). Defaults to tests.json in the data directory.
    #[arg(long)]
    tests: Option<PathBuf>,
    /// Test type: all, curriculum, kumiwake, hantei
    #[arg(short = 't', long = "type", default_value = "all")]
    test_type: String,
    /// First date of the range (YYYY/MM/DD or YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Last date of the range (YYYY/MM/DD or YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

impl TestSelection {
    fn filter(&self) -> Result<TestFilter> {
        let test_type = TestType::parse_filter(&self.test_type)?;
        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;

        // A range only applies with both ends
        let date_range = match (from, to) {
            (Some(start), Some(end)) => Some((start, end)),
            (None, None) => None,
            _ => {
                tracing::warn!("date range needs both --from and --to, showing all dates");
                None
            }
        };

        Ok(TestFilter { test_type, date_range })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { sample_tests: with_tests }) => {
            init_cli_logging();
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let dir = init_local_dir(&current_dir)?;
            save_settings(settings_file(&dir), &Settings::default())?;
            if with_tests {
                save_results(tests_file(&dir), &sample_tests())?;
            }

            println!("Initialized levelup directory: {}", dir.display());
            println!();
            println!("Edit settings.json there to change defaults.");
            println!("Run 'levelup' to start studying.");
            Ok(())
        }
        Some(Commands::Report { output, selection }) => {
            init_cli_logging();
            let dir = get_data_dir()?;
            let settings = load_settings(settings_file(&dir))?;
            let tests = load_tests(&dir, &settings, selection.tests.as_deref())?;
            let tasks = initial_tasks(&settings);

            let today = chrono::Local::now().date_naive();
            let report = generate_report(&tasks, &tests, &selection.filter()?, today);

            match output {
                Some(path) => {
                    std::fs::write(&path, report)
                        .with_context(|| format!("Failed to write report: {}", path.display()))?;
                    println!("Report written: {}", path.display());
                }
                None => print!("{}", report),
            }
            Ok(())
        }
        Some(Commands::Chart { keys, selection }) => {
            init_cli_logging();
            let dir = get_data_dir()?;
            let settings = load_settings(settings_file(&dir))?;
            let tests = load_tests(&dir, &settings, selection.tests.as_deref())?;

            let keys = if keys.is_empty() {
                settings.chart_keys.clone()
            } else {
                keys.iter()
                    .map(|key| ChartKey::from_key(key))
                    .collect::<levelup::Result<Vec<_>>>()?
            };

            let mut results = tests.filter(&selection.filter()?);
            sort_by_date(&mut results, SortOrder::Ascending);
            let points = project_for_chart(&results, &keys);

            println!("{}", serde_json::to_string_pretty(&points)?);
            Ok(())
        }
        None => run_tui(),
    }
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Subcommands log to stderr
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// The TUI owns the terminal, so it logs to a file in the data directory
fn init_tui_logging(dir: &Path) -> Result<()> {
    let path = log_file(dir);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(log_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn initial_tasks(settings: &Settings) -> TaskStore {
    if settings.seed_sample_data {
        sample_tasks()
    } else {
        TaskStore::default()
    }
}

/// Tests from an explicit file, else tests.json, else the samples if enabled
fn load_tests(dir: &Path, settings: &Settings, explicit: Option<&Path>) -> Result<TestRecordStore> {
    if let Some(path) = explicit {
        return load_results(path)?.with_context(|| format!("Test results file not found: {}", path.display()));
    }
    if let Some(store) = load_results(tests_file(dir))? {
        return Ok(store);
    }
    Ok(if settings.seed_sample_data {
        sample_tests()
    } else {
        TestRecordStore::default()
    })
}

fn run_tui() -> Result<()> {
    let dir = ensure_data_dir()?;
    init_tui_logging(&dir)?;
    eprintln!("Using levelup directory: {}", dir.display());

    let settings = load_settings(settings_file(&dir))?;
    let tests = load_tests(&dir, &settings, None)?;
    let tracker = Tracker::new(initial_tasks(&settings), SystemClock::new());
    let mut app = AppState::new(tracker, tests, &settings);
    tracing::info!(tasks = app.tracker.store().len(), tests = app.tests.len(), "session started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    for id in app.tracker.running() {
        app.tracker.stop(id);
    }
    tracing::info!("session ended");

    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    settings: &Settings,
) -> Result<()> {
    let tick_rate = settings.tick_rate();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.tick();
    }
}
