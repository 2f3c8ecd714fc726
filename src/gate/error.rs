use std::fmt;

use crate::l10n::TextKey;

use super::Severity;

/// Everything that can stand between a gated mod and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateIssue {
    /// Declared dependencies with zero installed copies. Halts gating for good.
    DependencyNotInstalled(Vec<String>),
    /// Installed, but no copy is enabled in the host's mod list.
    DependencyDisabled(Vec<String>),
    /// Installed and enabled, just not resident yet after the patience window.
    StillLoading(Vec<String>),
    /// The host offers no way to ask whether a mod is enabled.
    HostApiUnavailable,
}

impl GateIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::DependencyNotInstalled(_) | Self::HostApiUnavailable => Severity::Fatal,
            Self::DependencyDisabled(_) | Self::StillLoading(_) => Severity::Warning,
        }
    }

    pub(crate) fn text_keys(&self) -> (TextKey, TextKey) {
        match self {
            Self::DependencyNotInstalled(_) => (TextKey::MissingTitle, TextKey::MissingMessage),
            Self::DependencyDisabled(_) => (TextKey::DisabledTitle, TextKey::DisabledMessage),
            Self::StillLoading(_) => (TextKey::WaitingTitle, TextKey::WaitingMessage),
            Self::HostApiUnavailable => (TextKey::ApiErrorTitle, TextKey::ApiErrorMessage),
        }
    }

    /// Identifiers the issue is about, if any.
    pub fn identifiers(&self) -> &[String] {
        match self {
            Self::DependencyNotInstalled(ids)
            | Self::DependencyDisabled(ids)
            | Self::StillLoading(ids) => ids,
            Self::HostApiUnavailable => &[],
        }
    }
}

impl fmt::Display for GateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependencyNotInstalled(ids) => {
                write!(f, "dependencies not installed: {}", ids.join(", "))
            }
            Self::DependencyDisabled(ids) => {
                write!(f, "dependencies disabled: {}", ids.join(", "))
            }
            Self::StillLoading(ids) => write!(f, "still waiting for: {}", ids.join(", ")),
            Self::HostApiUnavailable => write!(f, "{HostApiUnavailable}"),
        }
    }
}

impl std::error::Error for GateIssue {}

/// The host runtime exposes no mod activation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostApiUnavailable;

impl fmt::Display for HostApiUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host mod activation policy is unavailable")
    }
}

impl std::error::Error for HostApiUnavailable {}

/// Asking the host about one installed copy failed. Logged and treated as a
/// disabled copy, never shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeQueryFailure {
    pub id: String,
    pub reason: String,
}

impl ProbeQueryFailure {
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProbeQueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to query activation of '{}': {}", self.id, self.reason)
    }
}

impl std::error::Error for ProbeQueryFailure {}
