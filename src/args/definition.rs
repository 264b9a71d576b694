//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::ConfigError;
use crate::state::types::Network;

/// wallet-root - Root orchestration for a shielded light wallet, driven headlessly
#[derive(Parser, Debug)]
#[command(name = "wallet-root")]
#[command(version)]
#[command(about = "Root orchestration for a shielded light wallet, driven headlessly", long_about = None)]
pub struct Args {
    /// Network to run on (mainnet, testnet); overrides `network` in settings.conf
    #[arg(long, value_parser = parse_network)]
    pub network: Option<Network>,

    /// Wallet data directory (default: ~/.local/share/wallet-root)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// UI locale (e.g. en-US); overrides `locale` in settings.conf
    #[arg(long)]
    pub locale: Option<String>,

    /// Read headless commands from this file instead of stdin
    #[arg(long)]
    pub headless_script: Option<PathBuf>,
}

/// Value parser for `--network`.
fn parse_network(s: &str) -> Result<Network, String> {
    Network::from_config_key(s).ok_or_else(|| ConfigError::UnknownNetwork(s.to_string()).to_string())
}

/// What: Pick the network from the command line or settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Loaded `settings.conf`.
///
/// Output:
/// - The selected network.
///
/// # Errors
/// - `ConfigError::MissingNetwork` when neither source selects one.
pub fn resolve_network(args: &Args, settings: &Settings) -> Result<Network, ConfigError> {
    args.network
        .or(settings.network)
        .ok_or(ConfigError::MissingNetwork)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Command-line network wins over settings; neither is a startup error.
    ///
    /// Inputs:
    /// - Args with and without `--network`; settings with and without `network`.
    ///
    /// Output:
    /// - CLI value, then settings value, then `MissingNetwork`.
    fn network_resolution_order() {
        let with_cli = Args::parse_from(["wallet-root", "--network", "testnet"]);
        let without = Args::parse_from(["wallet-root"]);
        let settings = Settings {
            network: Some(Network::Mainnet),
            ..Settings::default()
        };
        assert_eq!(
            resolve_network(&with_cli, &settings).ok(),
            Some(Network::Testnet)
        );
        assert_eq!(
            resolve_network(&without, &settings).ok(),
            Some(Network::Mainnet)
        );
        assert!(matches!(
            resolve_network(&without, &Settings::default()),
            Err(ConfigError::MissingNetwork)
        ));
    }

    #[test]
    fn unknown_network_is_rejected_by_clap() {
        assert!(Args::try_parse_from(["wallet-root", "--network", "regtest"]).is_err());
    }
}
