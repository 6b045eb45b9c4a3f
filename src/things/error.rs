//! Error types for the Things engine.
//!
//! ThingsError  - what a command invocation reports to its caller
//! LaunchError  - why a single launch attempt failed (wrapped by ThingsError::Launch)

use std::process::ExitStatus;

use thiserror::Error;

/// Failure of one command invocation.
#[derive(Debug, Error)]
pub enum ThingsError {
    /// Input rejected before any parameters were dispatched. Safe to retry
    /// once the input is corrected.
    #[error("{0}")]
    Validation(String),

    /// An empty command name reached the dispatcher.
    #[error("command required")]
    MissingCommand,

    /// The launcher failed (or was canceled) for the given target URL.
    #[error("launch {target:?}: {source}")]
    Launch {
        target: String,
        #[source]
        source: LaunchError,
    },
}

impl ThingsError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ThingsError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ThingsError::Validation(_))
    }

    /// Target URL of a failed launch, if this error came from the launcher.
    pub fn target(&self) -> Option<&str> {
        match self {
            ThingsError::Launch { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Failure of a launcher to hand a URL to the operating environment.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },

    #[error("launch canceled")]
    Canceled,

    /// Failure reported by a non-process launcher (e.g. a configured recorder).
    #[error("{0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_error_message_carries_target_and_cause() {
        let err = ThingsError::Launch {
            target: "things:///version".into(),
            source: LaunchError::Rejected("boom".into()),
        };
        let msg = err.to_string();
        assert_eq!(msg, r#"launch "things:///version": boom"#);
        assert_eq!(err.target(), Some("things:///version"));
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_error_displays_message_verbatim() {
        let err = ThingsError::validation("id is required");
        assert_eq!(err.to_string(), "id is required");
        assert!(err.is_validation());
        assert!(err.target().is_none());
    }
}
