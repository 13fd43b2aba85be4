use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lanegraph::ColorChoice;
use lanegraph::areas::output::Sink;
use lanegraph::areas::repository::Repository;
use lanegraph::artifacts::graph::viewport::{DEFAULT_BUFFER_ROWS, ViewMode};
use lanegraph::artifacts::log::git_log::DEFAULT_LOG_LIMIT;
use lanegraph::commands::layout::LayoutOptions;
use lanegraph::commands::log::LogOptions;
use lanegraph::commands::viewport::ViewportOptions;
use lanegraph::commands::{CommitInput, HistoryOptions};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "lanegraph",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Commit graph layout for history views",
    long_about = "Lays out a commit history as lanes, branch colors and connector edges, \
    the way a `git log --graph` style history view draws it. \
    Layouts are printed as JSON or rendered as a text graph.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct HistoryArgs {
    #[arg(long, help = "Read history from the git repository at this path")]
    repo: Option<PathBuf>,
    #[arg(
        long,
        conflicts_with = "repo",
        help = "Read a JSON array of commits from this file"
    )]
    input: Option<PathBuf>,
    #[arg(
        long,
        default_value_t = DEFAULT_LOG_LIMIT,
        help = "Maximum number of commits read from git, 0 for all"
    )]
    limit: usize,
    #[arg(long, help = "Include every ref, not only HEAD")]
    all: bool,
}

impl HistoryArgs {
    fn options(&self, fallback: CommitInput) -> HistoryOptions {
        let input = match (&self.input, &self.repo) {
            (Some(path), _) => CommitInput::File(path.clone()),
            (None, Some(_)) => CommitInput::Repository,
            (None, None) => fallback,
        };
        let limit = (self.limit > 0).then_some(self.limit);
        HistoryOptions::new(input, limit, self.all)
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "layout",
        about = "Print the graph layout as JSON",
        long_about = "This command lays out a commit history and prints rows, max lane and active lanes as JSON. \
        Without --repo or --input it reads a JSON array of commits from stdin."
    )]
    Layout {
        #[command(flatten)]
        history: HistoryArgs,
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
    #[command(
        name = "log",
        about = "Draw the commit graph as text",
        long_about = "This command draws the history of the repository in the current directory, \
        or the one given with --repo, as a text graph with persistent branch colors."
    )]
    Log {
        #[command(flatten)]
        history: HistoryArgs,
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto, help = "When to color the graph")]
        color: ColorChoice,
    },
    #[command(
        name = "viewport",
        about = "Compute the visible row range for a scroll position",
        long_about = "This command prints the rows a virtualized history view renders for a scroll position, \
        along with the scroll and graph dimensions, as JSON."
    )]
    Viewport {
        #[arg(long, allow_negative_numbers = true, help = "Scroll offset in pixels")]
        scroll_top: f64,
        #[arg(long, help = "Height of the scroll container in pixels")]
        container_height: f64,
        #[arg(long, help = "Number of rows in the history")]
        rows: usize,
        #[arg(long, default_value_t = DEFAULT_BUFFER_ROWS, help = "Rows rendered beyond each edge")]
        buffer: usize,
        #[arg(
            long,
            value_enum,
            env = "LANEGRAPH_VIEW_MODE",
            default_value_t = ViewMode::Expanded,
            help = "Row density"
        )]
        view_mode: ViewMode,
        #[arg(long, help = "Row height in pixels, overriding the view mode")]
        row_height: Option<f64>,
        #[arg(long, default_value_t = 0, help = "Highest lane in the layout")]
        max_lane: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LANEGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if std::env::var("DEBUG").is_ok() {
            "lanegraph=debug,info"
        } else {
            "lanegraph=info,warn"
        })
    });

    let format = std::env::var("LANEGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn open_repository(path: Option<&PathBuf>, writer: Box<dyn std::io::Write>) -> Result<Repository> {
    match path {
        Some(path) => Repository::new(&path.to_string_lossy(), writer),
        None => {
            let pwd = std::env::current_dir()?;
            Repository::new(&pwd.to_string_lossy(), writer)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Layout { history, pretty } => {
            let repository = open_repository(history.repo.as_ref(), Box::new(std::io::stdout()))?;
            let opts = LayoutOptions {
                history: history.options(CommitInput::Stdin),
                pretty: *pretty,
            };

            repository.layout(&opts).await?
        }
        Commands::Log { history, color } => {
            let sink = Sink::detect();
            let repository = open_repository(history.repo.as_ref(), sink.writer())?;
            let opts = LogOptions {
                history: history.options(CommitInput::Repository),
                color: *color,
            };

            repository.log(&opts).await?;
            drop(repository);
            sink.finish()?
        }
        Commands::Viewport {
            scroll_top,
            container_height,
            rows,
            buffer,
            view_mode,
            row_height,
            max_lane,
        } => {
            let repository = open_repository(None, Box::new(std::io::stdout()))?;
            let opts = ViewportOptions {
                scroll_top: *scroll_top,
                container_height: *container_height,
                rows: *rows,
                buffer: *buffer,
                view_mode: *view_mode,
                row_height: *row_height,
                max_lane: *max_lane,
            };

            repository.viewport(&opts)?
        }
    }

    Ok(())
}
