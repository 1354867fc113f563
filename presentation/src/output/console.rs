//! Console output for gate runs
//!
//! Plain lines go to the step log; failures are additionally emitted as
//! `::error::` workflow commands so the runner annotates the job.

use approval_application::{GateOutcome, GateReport};
use approval_domain::VoterSet;
use colored::Colorize;
use std::time::Duration;

/// Formats gate progress and results for the step log
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Line printed once approvers are known
    pub fn voters(voters: &VoterSet) -> String {
        format!(
            "{} {} ({})",
            "Approvers:".cyan().bold(),
            voters.identities().join(", "),
            voters.describe()
        )
    }

    /// Final summary of a finished gate
    pub fn outcome(report: &GateReport) -> String {
        let label = match report.outcome {
            GateOutcome::Approved => "Approved".green().bold(),
            GateOutcome::Denied => "Denied".red().bold(),
            GateOutcome::Cancelled => "Cancelled".yellow().bold(),
        };
        format!(
            "{}: issue #{} closed after {} ({})",
            label,
            report.ticket.id(),
            Self::elapsed(report.elapsed),
            report.ticket.ticket.url
        )
    }

    /// `::error::` workflow command for `message`
    pub fn error_command(message: &str) -> String {
        format!("::error::{}", escape_data(message))
    }

    fn elapsed(elapsed: Duration) -> String {
        let secs = elapsed.as_secs();
        match secs {
            0..60 => format!("{}s", secs),
            60..3600 => format!("{}m {}s", secs / 60, secs % 60),
            _ => format!("{}h {}m", secs / 3600, (secs % 3600) / 60),
        }
    }
}

/// Escape workflow command data so multi-line messages survive.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
