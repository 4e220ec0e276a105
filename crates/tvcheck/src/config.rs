//! Configuration file, profiles, and resolution into a `ProbeConfig`.
//!
//! Layering: built-in defaults, then the TOML file, then `TVCHECK_`
//! environment variables. Command-line flags win over all of them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tvcheck_core::{DEFAULT_DEVICES_URL, MatchCriterion, ProbeConfig, TlsMode};

use crate::cli::{Cli, TargetArgs};
use crate::error::CliError;

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named set of connection settings.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Device list endpoint.
    pub api_url: Option<String>,

    /// API token (plaintext -- prefer `api_key_env`).
    pub api_key: Option<String>,

    /// Environment variable holding the API token.
    pub api_key_env: Option<String>,

    /// Additional CA certificate (PEM) to trust.
    pub ca_cert: Option<PathBuf>,

    /// Override the default timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tvcheck", "tvcheck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tvcheck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` (missing file means defaults) and the
/// environment. A malformed file is an error, not silently ignored.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    debug!(path = %path.display(), "loading configuration");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TVCHECK_").split("__"));

    Ok(figment.extract()?)
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(cli: &Cli, config: &Config) -> String {
    cli.profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate flags + config into the probe's invocation context.
///
/// Flags take priority over profile values, which take priority over
/// global defaults.
pub fn resolve(cli: &Cli, config: &Config) -> Result<ProbeConfig, CliError> {
    let profile_name = active_profile_name(cli, config);
    let fallback = Profile::default();

    let profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile,
        // Only an explicitly requested profile has to exist.
        None if cli.profile.is_some() => {
            let mut available: Vec<_> = config.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => &fallback,
    };

    // 1. Endpoint (flag > profile > public API)
    let url_str = cli
        .api_url
        .as_deref()
        .or(profile.api_url.as_deref())
        .unwrap_or(DEFAULT_DEVICES_URL);
    let api_url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Credentials
    let api_key = resolve_api_key(cli, profile, &profile_name)?;

    // 3. TLS
    let tls = cli
        .ca_cert
        .clone()
        .or_else(|| profile.ca_cert.clone())
        .map_or(TlsMode::System, TlsMode::CustomCa);

    // 4. Timeout
    let timeout = Duration::from_secs(
        cli.timeout
            .or(profile.timeout)
            .unwrap_or(config.defaults.timeout),
    );

    Ok(ProbeConfig {
        api_url,
        api_key,
        criterion: criterion(&cli.target)?,
        tls,
        timeout,
    })
}

/// Resolve the API token: flag/env, then the profile's `api_key_env`,
/// then the plaintext profile value.
fn resolve_api_key(
    cli: &Cli,
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = cli.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    if let Some(ref env_name) = profile.api_key_env {
        match std::env::var(env_name) {
            Ok(val) if !val.is_empty() => return Ok(SecretString::from(val)),
            _ => debug!(env = %env_name, "api_key_env is not set"),
        }
    }

    if let Some(ref key) = profile.api_key {
        if !key.is_empty() {
            return Ok(SecretString::from(key.clone()));
        }
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Turn the mutually exclusive target flags into a criterion.
pub fn criterion(target: &TargetArgs) -> Result<MatchCriterion, CliError> {
    match (&target.host, &target.teamviewerid) {
        (Some(host), None) => Ok(MatchCriterion::Hostname(host.clone())),
        (None, Some(id)) => Ok(MatchCriterion::RemoteControlId(id.clone())),
        _ => Err(CliError::Validation {
            field: "host/teamviewerid".into(),
            reason: "exactly one of --host or --teamviewerid is required".into(),
        }),
    }
}
