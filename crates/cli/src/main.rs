use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};
use w3t_cli::terminal::{run_shell, ConsoleHelper};
use w3t_cli::{build_console, CliArgs};
use w3t_config::TerminalConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let mut config = TerminalConfig::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;
    config.apply_overrides(&args.overrides());
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging.level);
    debug!(
        target: "w3t",
        profile = %config.console.profile,
        network = %config.explorer.default_network,
        wallet = config.wallet.provider_url.as_deref().unwrap_or("<none>"),
        "configuration resolved"
    );

    let mut console = build_console(&config)?;
    info!(target: "w3t", commands = console.list_all().len(), "console ready");

    if args.is_one_shot() {
        for line in &args.execute {
            ConsoleHelper::output(&console.dispatch(line).await)?;
        }
        return Ok(());
    }

    if config.console.show_banner {
        ConsoleHelper::banner();
    }
    run_shell(&mut console, &config.console).await
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// wins over the configured level.
fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},w3t={level}")));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
