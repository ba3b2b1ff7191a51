//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;
use w3t_cli::args::*;
use w3t_config::Profile;

#[test]
fn defaults_leave_config_untouched() {
    let args = CliArgs::try_parse_from(["w3t"]).unwrap();
    assert_eq!(args.config, None);
    assert_eq!(args.network, None);
    assert_eq!(args.profile, None);
    assert!(args.execute.is_empty());
    assert!(!args.no_banner);
    assert!(!args.is_one_shot());

    let overrides = args.overrides();
    assert_eq!(overrides, Default::default());
}

#[test]
fn flags_become_overrides() {
    let args = CliArgs::try_parse_from([
        "w3t",
        "--config",
        "/tmp/w3t.toml",
        "--network",
        "base",
        "--wallet-url",
        "http://127.0.0.1:1248",
        "--profile",
        "explorer",
        "--log-level",
        "debug",
        "--no-banner",
    ])
    .unwrap();

    assert_eq!(args.config, Some(PathBuf::from("/tmp/w3t.toml")));
    let overrides = args.overrides();
    assert_eq!(overrides.network.as_deref(), Some("base"));
    assert_eq!(overrides.wallet_url.as_deref(), Some("http://127.0.0.1:1248"));
    assert_eq!(overrides.profile, Some(Profile::Explorer));
    assert_eq!(overrides.log_level.as_deref(), Some("debug"));
    assert_eq!(overrides.show_banner, Some(false));
}

#[test]
fn execute_is_repeatable_and_ordered() {
    let args = CliArgs::try_parse_from(["w3t", "-e", "networks", "--execute", "tx 0xabc arb"])
        .unwrap();
    assert!(args.is_one_shot());
    assert_eq!(args.execute, vec!["networks", "tx 0xabc arb"]);
}

#[test]
fn unknown_profile_is_rejected() {
    assert!(CliArgs::try_parse_from(["w3t", "--profile", "admin"]).is_err());
    assert!(CliArgs::try_parse_from(["w3t", "--log-level", "loud"]).is_err());
}

#[test]
fn log_levels_map_to_tracing() {
    assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
    assert_eq!(LogLevel::Trace.as_str(), "trace");
}
