//! Install progress events.
//!
//! The engine reports every phase transition and the terminal outcome
//! through a caller-supplied callback. The caller decides how to surface
//! the messages (the CLI prints them; tests collect them).

/// Phases the install engine moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Creating the target directory layout.
    Prepare,
    /// Placing the client jar.
    Download,
    /// Checking the jar against the manifest.
    Verify,
    /// Writing the launcher profile.
    Profile,
    /// Loading and copying the selected addons.
    Addons,
    /// Installation finished.
    Done,
}

impl Phase {
    /// String representation used in progress output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Prepare => "prepare",
            Phase::Download => "download",
            Phase::Verify => "verify",
            Phase::Profile => "profile",
            Phase::Addons => "addons",
            Phase::Done => "done",
        }
    }
}

/// An event reported by the install engine.
#[derive(Debug, Clone)]
pub enum InstallEvent {
    /// Progress within a phase.
    Status { phase: Phase, message: String },

    /// The install failed; the message describes the cause.
    Error { message: String },
}

impl InstallEvent {
    /// Create a status event.
    pub fn status(phase: Phase, message: impl Into<String>) -> Self {
        InstallEvent::Status {
            phase,
            message: message.into(),
        }
    }

    /// Create an error event.
    pub fn error(message: impl Into<String>) -> Self {
        InstallEvent::Error {
            message: message.into(),
        }
    }

    /// The event message, unchanged from construction.
    pub fn message(&self) -> &str {
        match self {
            InstallEvent::Status { message, .. } => message,
            InstallEvent::Error { message } => message,
        }
    }
}
