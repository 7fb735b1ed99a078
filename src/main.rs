use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use issuepad::github::auth_setup;
use issuepad::{
    Aggregator, Config, DigestEngine, DigestError, DocumentFormatter, GitHubClient, NotesClient,
};

#[derive(Parser)]
#[command(name = "issuepad")]
#[command(about = "Publishes a weekly digest of labeled GitHub issues to a notes pad")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (defaults to XDG config location)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Manage GitHub authentication
    Auth {
        #[command(subcommand)]
        auth_command: AuthCommands,
    },

    /// List repositories in scope with their matching-issue counts
    List {
        /// Show matching issue titles
        #[arg(long)]
        details: bool,
    },

    /// Aggregate, format, and publish the digest
    Publish {
        /// Run date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print the document instead of publishing it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Set up authentication
    Setup,

    /// Test current authentication
    Test,

    /// Show authentication status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    info!("Starting issuepad v{}", env!("CARGO_PKG_VERSION"));

    // Init writes a fresh config, so don't load (and implicitly create) one first
    if let Commands::Init { force } = &cli.command {
        return cmd_init(*force);
    }

    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Auth { auth_command } => cmd_auth(auth_command, &config).await,
        Commands::List { details } => cmd_list(details, &config).await,
        Commands::Publish { date, dry_run } => cmd_publish(date, dry_run, config).await,
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

/// Load configuration from specified path or default location
fn load_config(config_path: Option<std::path::PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load(&path),
        None => Config::load_or_default(),
    }
}

/// Resolve the run date: explicit YYYY-MM-DD or today
fn resolve_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw)),
        None => Ok(Local::now().date_naive()),
    }
}

/// Write a fresh default configuration for the operator to fill in
fn cmd_init(force: bool) -> Result<()> {
    let config_path = Config::default_config_path()?;

    if config_path.exists() && !force {
        println!("⚠️  Configuration already exists: {:?}", config_path);
        println!("   Use --force to overwrite it");
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    Config::default().save(&config_path)?;

    println!("✅ issuepad initialized!");
    println!("   Config: {:?}", config_path);
    println!("   Next: set github.organization, github.projects, and notes.base_url,");
    println!("   then run 'issuepad auth setup' and 'issuepad publish'");

    Ok(())
}

/// Handle authentication commands
async fn cmd_auth(auth_command: AuthCommands, config: &Config) -> Result<()> {
    match auth_command {
        AuthCommands::Setup => auth_setup::setup_authentication().await,
        AuthCommands::Test => auth_setup::test_authentication(&config.github).await,
        AuthCommands::Status => {
            match GitHubClient::new(&config.github).await {
                Ok(client) => {
                    println!("✅ Authentication successful");
                    println!("   Username: {}", client.username());
                }
                Err(e) => {
                    println!("❌ Authentication failed: {}", e);
                }
            }
            Ok(())
        }
    }
}

/// List in-scope repositories and how many issues currently match
async fn cmd_list(details: bool, config: &Config) -> Result<()> {
    info!("Listing repositories in scope...");

    let github = GitHubClient::new(&config.github).await?;
    let aggregator = Aggregator::from_config(&github, config);
    let digest = aggregator.aggregate().await?;

    if digest.is_empty() {
        println!("No repositories in scope for organization: {}", config.github.organization);
        println!("Check github.projects in your configuration");
        return Ok(());
    }

    println!(
        "Repositories in {} labeled '{}' ({}):",
        config.github.organization,
        config.github.label,
        digest.entries.len()
    );

    for entry in &digest.entries {
        println!("  📁 {} ({} issues)", entry.repository.name, entry.issues.len());

        if details {
            for issue in &entry.issues {
                println!("     - {}", issue.title);
            }
        }
    }

    Ok(())
}

/// Aggregate, format, and publish the digest
async fn cmd_publish(date: Option<String>, dry_run: bool, config: Config) -> Result<()> {
    let date = resolve_date(date)?;

    let github = GitHubClient::new(&config.github).await?;

    if dry_run {
        println!("🔍 Dry run mode - formatting digest without publishing");

        let digest = Aggregator::from_config(&github, &config).aggregate().await?;
        let formatter = DocumentFormatter::from_config(&config.digest);

        match formatter.format(date, &digest) {
            Ok(document) => {
                println!("\n{}", document.title);
                println!("{}", document.body);
            }
            Err(DigestError::EmptyDigest) => {
                println!("Nothing to publish: no repository passed the filters");
            }
            Err(e) => return Err(e.into()),
        }

        return Ok(());
    }

    let notes = NotesClient::from_config(&config.notes)?;
    let engine = DigestEngine::new(config, github, notes);

    let report = engine.run(date).await?;

    if report.published {
        println!("🎉 Digest published!");
        println!("   📊 Repositories: {}", report.repositories);
        println!("   📝 Issues: {}", report.issues);
        println!("   ⏱️  Duration: {:.2}s", report.duration.as_secs_f64());
        Ok(())
    } else if report.repositories == 0 {
        println!("⚠️  Nothing to publish: no repository passed the filters");
        std::process::exit(1);
    } else {
        println!("❌ Publish failed (see logs for details)");
        std::process::exit(1);
    }
}
