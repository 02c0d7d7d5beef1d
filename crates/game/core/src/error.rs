//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., [`RecordError`](crate::state::RecordError))
//! live next to the data they validate. Downstream crates implement
//! [`GameError`] for their own error enums so that every failure surfaced by
//! the binder can be classified the same way.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the call may be retried or simply ignored
/// - **Validation**: the input is invalid and must be fixed by the caller
/// - **Internal**: an unexpected state inconsistency that indicates a bug
/// - **Fatal**: the object can no longer be used
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry or ignore.
    ///
    /// No binder error uses this today; a second `initialize()` is not an
    /// error and returns `Ok`.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: missing inventory, consumable sitting in an equipment slot
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Reserved for downstream error types; the binder does not raise it.
    Internal,

    /// Fatal error - the binder is torn down and cannot be revived.
    ///
    /// Examples: initializing after `destroy()`
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all errors raised around player records.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return stable, SCREAMING_SNAKE_CASE codes from `error_code`
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
