//! CLI error types with miette diagnostics.
//!
//! Every error ends the probe with a plugin status line, so each variant
//! knows its severity as well as its help text.

use miette::Diagnostic;
use thiserror::Error;

use tvcheck_core::{CoreError, Status, Verdict};

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(tvcheck::usage), help("Run: check_teamviewer --help"))]
    Usage(String),

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tvcheck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(tvcheck::no_credentials),
        help(
            "Pass --apikey, set TVCHECK_API_KEY, or add api_key / api_key_env\n\
             to the profile in your config file."
        )
    )]
    NoCredentials { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tvcheck::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(tvcheck::config))]
    Config(Box<figment::Error>),

    // ── Probe outcomes ───────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    #[diagnostic(
        code(tvcheck::not_found),
        help("Hostnames are matched against aliases of the form <digits>_<hostname>.")
    )]
    DeviceNotFound { identifier: String },

    #[error("Failed to connect to TeamViewer API: {reason}")]
    #[diagnostic(
        code(tvcheck::fetch_failed),
        help("Check network access to the API endpoint and any proxy or CA settings.")
    )]
    Fetch { reason: String },

    #[error("{message}")]
    #[diagnostic(
        code(tvcheck::auth_failed),
        help("Verify the API token and that it has the device list permission.")
    )]
    AuthFailed { message: String },

    #[error("Failed to connect to TeamViewer API: request timed out after {seconds}s")]
    #[diagnostic(
        code(tvcheck::timeout),
        help("Increase the timeout with --timeout or in the profile.")
    )]
    Timeout { seconds: u64 },

    #[error("Failed to parse TeamViewer API response: {message}")]
    #[diagnostic(code(tvcheck::decode))]
    Decode { message: String },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Usage error from a rejected command line.
    ///
    /// clap puts the offending arguments on the line after a trailing colon
    /// ("the following required arguments were not provided:"), so those are
    /// joined into the single status line.
    pub fn from_clap(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let mut lines = rendered
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("Usage:"));

        let head = lines.next().unwrap_or_default();
        let mut reason = head.trim_start_matches("error: ").to_owned();
        if reason.ends_with(':') {
            if let Some(detail) = lines.next() {
                reason.push(' ');
                reason.push_str(detail);
            }
        }
        Self::Usage(reason)
    }

    /// Plugin severity for this error.
    ///
    /// A device that is missing or unreachable is a problem with the
    /// monitored service; anything that stops the check from running is
    /// `UNKNOWN`.
    pub fn status(&self) -> Status {
        match self {
            Self::DeviceNotFound { .. }
            | Self::Fetch { .. }
            | Self::AuthFailed { .. }
            | Self::Timeout { .. } => Status::Critical,
            Self::Usage(_)
            | Self::Validation { .. }
            | Self::NoCredentials { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config(_)
            | Self::Decode { .. } => Status::Unknown,
        }
    }

    /// Status line reported for this error.
    pub fn verdict(&self) -> Verdict {
        Verdict::new(self.status(), self)
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Decode { source } => CliError::Decode {
                message: source.to_string(),
            },

            CoreError::DeviceNotFound { criterion } => CliError::DeviceNotFound {
                identifier: criterion.value().to_owned(),
            },

            CoreError::InvalidCriterion { criterion, reason } => CliError::Validation {
                field: criterion.to_string(),
                reason,
            },

            CoreError::ConnectionFailed { reason, .. } => CliError::Fetch { reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api { message, .. } => CliError::Fetch { reason: message },

            CoreError::Config { message } => CliError::Usage(message),
        }
    }
}
