use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed; warnings and non-fatal errors are
///   reported but do not change the status
/// - `Error` (2): Command aborted (config error, unreadable file, permission denied, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
