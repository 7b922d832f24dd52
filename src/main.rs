use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expense_claims::cli::{
    handle_claim_command, handle_export_command, handle_user_command, handle_watch_command,
    resolve_session,
};
use expense_claims::config::{paths::ClaimsPaths, settings::Settings};
use expense_claims::storage::Storage;

#[derive(Parser)]
#[command(
    name = "claims",
    version,
    about = "Travel-expense claim tracker",
    long_about = "Submit, review and export travel-expense claims. Employees submit \
                  claims, managers and admins approve or reject them, and every \
                  dashboard can be filtered and exported to xlsx or csv."
)]
struct Cli {
    /// Email of the signed-in user
    #[arg(long, global = true, env = "CLAIMS_USER")]
    user: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "CLAIMS_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Email that always signs in as administrator
        #[arg(long)]
        admin_email: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Claim submission and review
    #[command(subcommand)]
    Claim(expense_claims::cli::ClaimCommands),

    /// Export the filtered claims to xlsx or csv
    Export(expense_claims::cli::ExportArgs),

    /// User management (admin only)
    #[command(subcommand)]
    User(expense_claims::cli::UserCommands),

    /// Live dashboard that redraws when claims change
    Watch(expense_claims::cli::WatchArgs),
}

fn init_logging(cli_level: Option<&str>, settings: &Settings) {
    let log_level = cli_level.unwrap_or(&settings.log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ClaimsPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    init_logging(cli.log_level.as_deref(), &settings);
    tracing::debug!(base_dir = %paths.base_dir().display(), "Starting claims");

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init { admin_email }) => {
            println!("Initializing expense-claims at: {}", paths.base_dir().display());
            if let Some(email) = admin_email {
                settings.admin_email = Some(email.trim().to_string());
            }
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            match &settings.admin_email {
                Some(email) => println!("Administrator: {}", email),
                None => println!("No administrator set. Re-run with --admin-email to add one."),
            }
        }
        Some(Commands::Config) => {
            println!("expense-claims Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Claims file:    {}", paths.claims_file().display());
            println!("Users file:     {}", paths.users_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Administrator:  {}",
                settings.admin_email.as_deref().unwrap_or("(none)")
            );
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Date format:    {}", settings.date_format);
            println!("  Watch interval: {} ms", settings.watch_interval_ms);
            println!("  Log level:      {}", settings.log_level);
        }
        Some(Commands::Claim(cmd)) => {
            let session = resolve_session(&storage, &settings, cli.user.as_deref())?;
            handle_claim_command(&storage, &settings, &session, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let session = resolve_session(&storage, &settings, cli.user.as_deref())?;
            handle_export_command(&storage, &settings, &session, args)?;
        }
        Some(Commands::User(cmd)) => {
            let session = resolve_session(&storage, &settings, cli.user.as_deref())?;
            handle_user_command(&storage, &session, cmd)?;
        }
        Some(Commands::Watch(args)) => {
            let session = resolve_session(&storage, &settings, cli.user.as_deref())?;
            handle_watch_command(&storage, &settings, &session, args)?;
        }
        None => {
            println!("expense-claims - travel-expense claim tracker");
            println!();
            println!("Run 'claims --help' for usage information.");
        }
    }

    Ok(())
}
