use clap::{Parser, Subcommand};
use nhlive::api::Client;
use nhlive::commands::{self, favorites::FavoritesAction};
use nhlive::config;
use nhlive::data_provider::NHLDataProvider;
use nhlive::favorites::FavoriteStore;
use nhlive::layout_constants::REFRESH_CHANNEL_BUFFER_SIZE;
use nhlive::live;
use nhlive::state;
use nhlive::tui::{self, TuiContext, TuiResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "nhlive")]
#[command(about = "Live NHL scores in the terminal", long_about = "Live NHL scores in the terminal\n\nIf no command is specified, the program starts in interactive mode.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Serve fixture data instead of calling the NHL API
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the week's games grouped by date
    Scores {
        /// Any date in the week to show, YYYY-MM-DD (optional, defaults to this week)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Display one game with its live clock and team stats
    Game {
        /// Game ID (e.g., 2024020001)
        game_id: i64,

        /// Date in the game's week, YYYY-MM-DD (optional, defaults to this week)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Display regular season team records, ordered by points
    Teams {
        /// Season ID such as 20242025 (optional, defaults to the current season)
        #[arg(short, long)]
        season: Option<i64>,
    },
    /// Display a player's last seven days of games
    Player {
        /// Player ID (optional, defaults to the featured player)
        player_id: Option<i64>,
    },
    /// Manage favorite teams
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesCommand>,
    },
    /// Display current configuration
    Config,
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List saved teams
    List,
    /// Save a team by its common name (e.g., "Maple Leafs")
    Add { name: String },
    /// Remove a saved team by id
    Remove { id: i64 },
}

impl FavoritesCommand {
    fn to_action(&self) -> FavoritesAction {
        match self {
            FavoritesCommand::List => FavoritesAction::List,
            FavoritesCommand::Add { name } => FavoritesAction::Add(name.clone()),
            FavoritesCommand::Remove { id } => FavoritesAction::Remove(*id),
        }
    }
}

fn create_client() -> Client {
    match Client::new() {
        Ok(client) => client,
        Err(e) => {
            let error_msg = format!("Failed to create NHL API client: {}", e);
            tracing::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "development")]
fn create_provider(cli: &Cli) -> Arc<dyn NHLDataProvider> {
    if cli.mock {
        tracing::info!("Using fixture data");
        return Arc::new(nhlive::dev::mock_client::MockClient::new());
    }
    Arc::new(create_client())
}

#[cfg(not(feature = "development"))]
fn create_provider(_cli: &Cli) -> Arc<dyn NHLDataProvider> {
    Arc::new(create_client())
}

#[cfg(feature = "development")]
fn is_mock(cli: &Cli) -> bool {
    cli.mock
}

#[cfg(not(feature = "development"))]
fn is_mock(_cli: &Cli) -> bool {
    false
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &config::Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("refresh_interval: {} seconds", cfg.refresh_interval);
    println!("time_format: {}", cfg.time_format);
    println!(
        "season: {}",
        match cfg.season {
            Some(season) => season.to_string(),
            None => "(auto: from today's date)".to_string(),
        }
    );
    println!("featured_player_id: {}", cfg.featured_player_id);
    println!(
        "database_path: {}",
        cfg.database_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Unable to determine data path".to_string())
    );
    println!("dark_theme: {}", cfg.dark_theme);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("unfocused_selection_fg: {:?}{}",
        cfg.theme.unfocused_selection_fg(),
        if cfg.theme.unfocused_selection_fg.is_none() { " (auto: 50% darker)" } else { "" }
    );
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Open the favorites store for the TUI; the app still runs without one
fn open_tui_store(config: &config::Config, mock: bool) -> Option<FavoriteStore> {
    let result = if mock {
        FavoriteStore::in_memory().map_err(anyhow::Error::from)
    } else {
        commands::open_store(config)
    };
    match result {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("Favorites disabled: {:#}", e);
            None
        }
    }
}

/// Run TUI mode with the live update loop in the background
async fn run_tui_mode(config: config::Config, provider: Arc<dyn NHLDataProvider>, mock: bool) -> TuiResult<()> {
    let shared = state::shared(config.clone());

    // Create channel for manual refresh triggers
    let (refresh_tx, refresh_rx) = mpsc::channel::<()>(REFRESH_CHANNEL_BUFFER_SIZE);

    let loop_provider = Arc::clone(&provider);
    let loop_shared = Arc::clone(&shared);
    let refresh_interval = config.refresh_interval as u64;
    tokio::spawn(async move {
        live::live_update_loop(loop_provider, loop_shared, refresh_interval, refresh_rx).await;
    });

    let store = open_tui_store(&config, mock);
    tui::run(TuiContext {
        shared,
        refresh_tx,
        provider,
        store,
    })
    .await
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(
    provider: &dyn NHLDataProvider,
    config: &config::Config,
    command: Commands,
) -> anyhow::Result<()> {
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Favorites { .. } => unreachable!("Favorites command should be handled before execute_command"),
        Commands::Scores { date } => commands::scores::run(provider, config, date).await,
        Commands::Game { game_id, date } => commands::game::run(provider, game_id, date).await,
        Commands::Teams { season } => commands::teams::run(provider, config, season).await,
        Commands::Player { player_id } => commands::player::run(provider, config, player_id).await,
    }
}

async fn run_favorites_command(config: &config::Config, action: FavoritesAction) -> anyhow::Result<()> {
    let store = commands::open_store(config)?;
    commands::favorites::run(&store, action).await
}

/// Config problems found before the subscriber existed
fn report_config_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
        tracing::warn!("{}", warning);
    }
}

fn exit_with_error(e: anyhow::Error) -> ! {
    eprintln!("Error: {:#}", e);
    tracing::error!("Command failed: {:#}", e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let (config, config_warnings) = config::load();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }
    report_config_warnings(&config_warnings);

    let Some(command) = cli.command.as_ref() else {
        let provider = create_provider(&cli);
        if let Err(e) = run_tui_mode(config, provider, is_mock(&cli)).await {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        return;
    };

    // Neither of these needs a client
    match command {
        Commands::Config => {
            handle_config_command(&config);
            return;
        }
        Commands::Favorites { action } => {
            let action = action
                .as_ref()
                .map(FavoritesCommand::to_action)
                .unwrap_or(FavoritesAction::List);
            if let Err(e) = run_favorites_command(&config, action).await {
                exit_with_error(e);
            }
            return;
        }
        _ => {}
    }

    let provider = create_provider(&cli);
    let Some(command) = cli.command else {
        return;
    };
    if let Err(e) = execute_command(provider.as_ref(), &config, command).await {
        exit_with_error(e);
    }
}
