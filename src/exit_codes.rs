//! Process exit status of the `stylint` binary
//!
//! `0` when no diagnostics remain, `1` when violations remain, `2` when the tool
//! itself failed (bad configuration, unreadable file, parse error).

use std::process::ExitCode;

pub const SUCCESS: u8 = 0;
pub const VIOLATIONS_FOUND: u8 = 1;
pub const TOOL_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Clean,
    Violations,
    ToolError,
}

impl ExitStatus {
    /// Status of a finished run; a tool error outranks remaining violations
    pub fn from_run(tool_errors: usize, remaining_warnings: usize) -> Self {
        if tool_errors > 0 {
            Self::ToolError
        } else if remaining_warnings > 0 {
            Self::Violations
        } else {
            Self::Clean
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Clean => SUCCESS,
            Self::Violations => VIOLATIONS_FOUND,
            Self::ToolError => TOOL_ERROR,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
