//! ct-sweep main entry point
//!
//! This is the command-line interface for the ct-sweep certificate
//! transparency subdomain discovery unit.

use clap::Parser;
use ct_sweep::config::{load_config_with_hash, Config, DomainScope};
use ct_sweep::discovery::{sweep_domains, DataSource, GoogleCt, HttpTransport};
use ct_sweep::events::EventBus;
use ct_sweep::output::{drain_events, print_statistics, NameWriter, SweepStatistics};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// ct-sweep: certificate transparency subdomain discovery
///
/// Pages through the Google Transparency Report certificate search for each
/// domain and prints every hostname found, one per line.
#[derive(Parser, Debug)]
#[command(name = "ct-sweep")]
#[command(version)]
#[command(about = "Certificate transparency subdomain discovery", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Domain to sweep (repeatable); defaults to every configured domain
    #[arg(short, long = "domain", value_name = "DOMAIN")]
    domains: Vec<String>,

    /// Write names to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be queried without sending requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let scope = DomainScope::from_config(&config)?;
    let domains: Vec<String> = if cli.domains.is_empty() {
        scope.domains().map(str::to_string).collect()
    } else {
        cli.domains.clone()
    };

    if domains.is_empty() {
        tracing::error!("No domains to sweep: pass --domain or add [[domain]] entries");
        return Err("no domains to sweep".into());
    }

    if cli.dry_run {
        handle_dry_run(&config, &domains);
        return Ok(());
    }

    handle_sweep(config, scope, domains, cli.output).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries the discovered names.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ct_sweep=info,warn"),
            1 => EnvFilter::new("ct_sweep=debug,info"),
            2 => EnvFilter::new("ct_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved settings and request plan
fn handle_dry_run(config: &Config, domains: &[String]) {
    println!("=== ct-sweep Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", config.source.base_url);
    println!("  Referer: {}", config.source.referer);
    println!("  Rate limit: one request per {}ms", config.source.rate_limit_ms);
    println!("  Timeout: {}s", config.source.timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.client_name);
    println!("  Version: {}", config.user_agent.client_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nConfigured Domains ({}):", config.domains.len());
    for entry in &config.domains {
        match &entry.pattern {
            Some(pattern) => println!("  - {} (pattern: {})", entry.name, pattern),
            None => println!("  - {}", entry.name),
        }
    }

    println!("\nWould sweep ({}):", domains.len());
    for domain in domains {
        println!("  * {}", domain);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main sweep operation
async fn handle_sweep(
    config: Config,
    scope: DomainScope,
    domains: Vec<String>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bus = EventBus::new();
    let events = bus.subscribe();

    let mut writer = match &output {
        Some(path) => NameWriter::create(path)?,
        None => NameWriter::stdout(),
    };
    let consumer = tokio::spawn(async move { drain_events(events, &mut writer).await });

    let transport = Arc::new(HttpTransport::from_config(
        &config.user_agent,
        &config.source,
    )?);
    let source: Arc<dyn DataSource> = Arc::new(GoogleCt::new(
        &config.source,
        transport,
        Arc::new(scope),
        Arc::new(bus),
    )?);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, stopping sweep");
                cancel.cancel();
            }
        });
    }

    tracing::info!("Sweeping {} domain(s)", domains.len());
    let summaries = sweep_domains(source, domains, cancel).await;

    // The unit held the last bus sender, so the consumer now sees the channel close
    let report = consumer.await??;
    match &output {
        Some(path) => tracing::info!("Wrote {} names to {}", report.written, path.display()),
        None => tracing::info!("Wrote {} names", report.written),
    }

    print_statistics(&SweepStatistics::from_summaries(&summaries));

    if report.is_truncated() {
        eprintln!(
            "\nWarning: output is incomplete, {} events were dropped before they could be written",
            report.dropped
        );
        return Err(format!("name output truncated: {} events dropped", report.dropped).into());
    }
    Ok(())
}
