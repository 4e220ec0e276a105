//! Output formatting: plugin status line or JSON.
//!
//! Stdout carries exactly one rendered verdict; everything else goes to
//! stderr.

use std::io::{self, Write};

use serde::Serialize;

use tvcheck_core::{Status, Verdict};

use crate::cli::OutputFormat;

/// JSON shape of a verdict, with the exit code the process will use.
#[derive(Debug, Serialize)]
pub struct VerdictReport<'a> {
    pub status: Status,
    pub exit_code: i32,
    pub message: &'a str,
}

impl<'a> From<&'a Verdict> for VerdictReport<'a> {
    fn from(verdict: &'a Verdict) -> Self {
        Self {
            status: verdict.status,
            exit_code: verdict.exit_code(),
            message: &verdict.message,
        }
    }
}

/// Render a verdict in the chosen format.
pub fn render_verdict(format: &OutputFormat, verdict: &Verdict) -> String {
    let report = VerdictReport::from(verdict);
    let rendered = match format {
        OutputFormat::Plain => return verdict.message.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(&report),
        OutputFormat::JsonCompact => serde_json::to_string(&report),
    };
    // Serializing a struct of strings and integers cannot fail; fall back to
    // the status line rather than print nothing.
    rendered.unwrap_or_else(|_| verdict.message.clone())
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_is_the_status_line() {
        let verdict = Verdict::new(Status::Ok, "TeamViewer Online: 5_host1");
        assert_eq!(
            render_verdict(&OutputFormat::Plain, &verdict),
            "OK - TeamViewer Online: 5_host1"
        );
    }

    #[test]
    fn json_carries_exit_code() {
        let verdict = Verdict::new(Status::Critical, "Device not found: host9");
        let value: serde_json::Value =
            serde_json::from_str(&render_verdict(&OutputFormat::Json, &verdict)).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "CRITICAL",
                "exit_code": 2,
                "message": "CRITICAL - Device not found: host9"
            })
        );
    }

    #[test]
    fn compact_json_is_one_line() {
        let verdict = Verdict::new(Status::Unknown, "no data");
        let rendered = render_verdict(&OutputFormat::JsonCompact, &verdict);
        assert!(!rendered.contains('\n'));
        assert!(rendered.contains(r#""exit_code":3"#));
    }
}
