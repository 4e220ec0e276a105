//! Clap derive structures for the `check_teamviewer` plugin.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, ValueEnum};

/// check_teamviewer -- report whether a TeamViewer device is online
#[derive(Debug, Parser)]
#[command(
    name = "check_teamviewer",
    version,
    about = "Check whether a TeamViewer-managed device is online",
    long_about = "Monitoring plugin for Nagios-compatible schedulers.\n\n\
        Looks up one device in the TeamViewer Web API device list, either by\n\
        hostname (aliases of the form <digits>_<hostname>) or by TeamViewer ID,\n\
        and exits OK (0) when it is online, CRITICAL (2) when it is not or\n\
        cannot be found, and UNKNOWN (3) when the check itself fails."
)]
pub struct Cli {
    /// TeamViewer Web API token
    #[arg(
        long = "apikey",
        visible_alias = "api-key",
        env = "TVCHECK_API_KEY",
        hide_env = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub api_key: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Device list endpoint (overrides profile)
    #[arg(long, env = "TVCHECK_API_URL")]
    pub api_url: Option<String>,

    /// Configuration profile to use
    #[arg(long, short = 'p', env = "TVCHECK_PROFILE")]
    pub profile: Option<String>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "TVCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Additional CA certificate (PEM) to trust
    #[arg(long, env = "TVCHECK_CA_CERT")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "TVCHECK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', env = "TVCHECK_OUTPUT", default_value = "plain")]
    pub output: OutputFormat,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// The device to check. Exactly one must be given.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Hostname to check
    #[arg(long, value_name = "HOSTNAME", value_parser = NonEmptyStringValueParser::new())]
    pub host: Option<String>,

    /// TeamViewer ID of the device to check
    #[arg(long, value_name = "ID", value_parser = NonEmptyStringValueParser::new())]
    pub teamviewerid: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Single status line (monitoring plugins)
    Plain,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn host_and_id_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "check_teamviewer",
            "--apikey",
            "k",
            "--host",
            "h",
            "--teamviewerid",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn one_target_is_required() {
        let result = Cli::try_parse_from(["check_teamviewer", "--apikey", "k"]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_host_is_rejected() {
        let result = Cli::try_parse_from(["check_teamviewer", "--host", ""]);
        assert!(result.is_err());
    }

    #[test]
    fn api_key_alias_is_accepted() {
        let cli = Cli::try_parse_from(["check_teamviewer", "--api-key", "k", "--teamviewerid", "1"]);
        assert!(cli.is_ok_and(|c| c.api_key.as_deref() == Some("k")));
    }
}
