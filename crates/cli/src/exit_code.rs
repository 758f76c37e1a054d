//! Exit codes for the doclint CLI.
//!
//! This module defines distinct exit codes for different error types,
//! allowing scripts and CI systems to distinguish between different
//! failure modes.

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no errors
    Success = 0,
    /// Lint diagnostics with error severity were reported
    LintError = 1,
    /// Configuration error (invalid config file or lint section)
    ConfigError = 2,
    /// I/O error (file read/write failure)
    IoError = 4,
    /// The declaration manifest could not be parsed or is inconsistent
    ManifestError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    #[cfg_attr(not(test), allow(dead_code))]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Exit code for an error that aborted a command
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        if error
            .chain()
            .any(|cause| cause.is::<crate::manifest::ManifestError>())
        {
            Self::ManifestError
        } else if error
            .chain()
            .any(|cause| cause.is::<doclint_config::ConfigError>())
        {
            Self::ConfigError
        } else if error.chain().any(|cause| cause.is::<std::io::Error>()) {
            Self::IoError
        } else {
            Self::ConfigError
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::LintError => write!(f, "lint error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ManifestError => write!(f, "manifest error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::LintError.code(), 1);
        assert_eq!(ExitCode::ConfigError.code(), 2);
        assert_eq!(ExitCode::IoError.code(), 4);
        assert_eq!(ExitCode::ManifestError.code(), 5);
    }

    #[test]
    fn test_for_error_looks_through_context() {
        let io: std::io::Result<()> = Err(std::io::Error::other("gone"));
        let error = io.context("Failed to read Widget.cs").unwrap_err();
        assert_eq!(ExitCode::for_error(&error), ExitCode::IoError);

        let manifest = anyhow::Error::new(crate::manifest::ManifestError::InvalidParent {
            index: 0,
            parent: 3,
        });
        assert_eq!(ExitCode::for_error(&manifest), ExitCode::ManifestError);

        assert_eq!(
            ExitCode::for_error(&anyhow::anyhow!("Invalid lint rule name(s): x")),
            ExitCode::ConfigError
        );
    }
}
