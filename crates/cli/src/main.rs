use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mood_client::{HttpRecommendationClient, RecommendationService};
use mood_types::ContractError;
use ratatui::{backend::CrosstermBackend, Terminal};
use recommender_view::{Phase, RecommenderView};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::info;

mod config;
mod print;
mod tui;

use config::AppConfig;

/// Moodtunes - songs that match how you feel
#[derive(Parser)]
#[command(name = "moodtunes")]
#[command(about = "Mood-based music recommendations from the terminal", long_about = None)]
struct Cli {
    /// Base URL of the recommendation service
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive recommender (default)
    Tui,

    /// Get recommendations for one piece of mood text and print them
    Recommend {
        /// How you're feeling, in your own words
        #[arg(long)]
        text: String,

        /// Skip the advanced clustering strategy
        #[arg(long)]
        no_clustering: bool,
    },

    /// Check whether the recommendation service is up
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    config.apply_overrides(cli.service_url.clone(), cli.timeout_secs);

    let command = cli.command.unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui);
    setup_tracing(config.log_file(), interactive)?;

    let client = HttpRecommendationClient::new(&config.client_config())
        .context("Failed to create recommendation client")?;

    match command {
        Commands::Tui => handle_tui(&config, client),
        Commands::Recommend { text, no_clustering } => {
            handle_recommend(client, text, config.use_clustering() && !no_clustering).await
        }
        Commands::Health => handle_health(client).await,
    }
}

/// Logs go to stderr for one-shot commands. The terminal UI owns the
/// screen, so there they only go to the configured log file.
fn setup_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_level = if interactive { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let initialised = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None if interactive => return Ok(()),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .compact()
            .try_init(),
    };
    initialised.map_err(|err| anyhow!("failed to initialise tracing: {err}"))
}

/// Handle the 'tui' command
fn handle_tui(config: &AppConfig, client: HttpRecommendationClient) -> Result<ExitCode> {
    let mut view = RecommenderView::new(Arc::new(client));
    view.set_use_clustering(config.use_clustering());
    view.check_health();
    let mut app = tui::TuiApp::new(view);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    enable_raw_mode()?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    terminal.hide_cursor()?;

    let ui_result = tui::run(&mut terminal, &mut app);

    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    ui_result?;
    Ok(ExitCode::SUCCESS)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    client: HttpRecommendationClient,
    text: String,
    use_clustering: bool,
) -> Result<ExitCode> {
    let mut view = RecommenderView::new(Arc::new(client));
    view.set_user_text(text);
    view.set_use_clustering(use_clustering);

    match view.submit() {
        Ok(ticket) => info!("Submitted request {}", ticket),
        Err(ContractError::EmptyUserText) => bail!("Mood text must not be empty"),
        Err(err) => return Err(err.into()),
    }

    println!("{}", recommender_view::render::LOADING_CAPTION.dimmed());
    let phase = view.wait_until_settled().await;
    print::print_view(&view.render());

    Ok(match phase {
        Phase::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

/// Handle the 'health' command
async fn handle_health(client: HttpRecommendationClient) -> Result<ExitCode> {
    let base_url = client.base_url().to_string();
    match client.health().await {
        Ok(health) if health.is_healthy() => {
            let message = health.message.unwrap_or_default();
            println!("{} {} {} {}", "✓".green(), base_url, health.status.bold(), message);
            Ok(ExitCode::SUCCESS)
        }
        Ok(health) => {
            println!("{} {} {}", "!".yellow(), base_url, health.status.bold());
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            println!("{} {} unreachable: {}", "✗".red(), base_url, err);
            Ok(ExitCode::FAILURE)
        }
    }
}
