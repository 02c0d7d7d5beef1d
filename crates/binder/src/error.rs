//! Error types surfaced by the binder API.
//!
//! Only construction, lifecycle and out-of-band load calls can fail. Facade
//! mutations hand rejected items back instead of erroring, and subscriber
//! failures are contained inside dispatch.

use game_core::{ErrorSeverity, GameError, RecordError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BinderError>;

#[derive(Debug, Error)]
pub enum BinderError {
    #[error("player record is missing")]
    MissingPlayer,

    #[error("player record has no equipment map")]
    MissingEquipment,

    #[error("player record has no inventory")]
    MissingInventory,

    #[error("equipment map is malformed: {reason}")]
    MalformedEquipment { reason: String },

    #[error("inventory is malformed: {reason}")]
    MalformedInventory { reason: String },

    #[error("player record is malformed")]
    MalformedRecord(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidRecord(#[from] RecordError),

    #[error("binder has been destroyed")]
    Destroyed,
}

impl GameError for BinderError {
    fn severity(&self) -> ErrorSeverity {
        use BinderError::*;
        match self {
            MissingPlayer
            | MissingEquipment
            | MissingInventory
            | MalformedEquipment { .. }
            | MalformedInventory { .. }
            | MalformedRecord(_) => ErrorSeverity::Validation,

            InvalidRecord(inner) => inner.severity(),

            // Destroy is terminal
            Destroyed => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use BinderError::*;
        match self {
            MissingPlayer => "BINDER_MISSING_PLAYER",
            MissingEquipment => "BINDER_MISSING_EQUIPMENT",
            MissingInventory => "BINDER_MISSING_INVENTORY",
            MalformedEquipment { .. } => "BINDER_MALFORMED_EQUIPMENT",
            MalformedInventory { .. } => "BINDER_MALFORMED_INVENTORY",
            MalformedRecord(_) => "BINDER_MALFORMED_RECORD",
            InvalidRecord(inner) => inner.error_code(),
            Destroyed => "BINDER_DESTROYED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ItemKind, Slot};

    #[test]
    fn binder_errors_are_validation_or_fatal() {
        let errors = [
            BinderError::MissingPlayer,
            BinderError::MalformedInventory {
                reason: "not an array".into(),
            },
            BinderError::InvalidRecord(RecordError::SlotHoldsNonEquipment {
                slot: Slot::Ring,
                kind: ItemKind::Currency,
            }),
            BinderError::Destroyed,
        ];
        let severities: Vec<ErrorSeverity> = errors.iter().map(GameError::severity).collect();

        assert_eq!(
            severities,
            [
                ErrorSeverity::Validation,
                ErrorSeverity::Validation,
                ErrorSeverity::Validation,
                ErrorSeverity::Fatal,
            ]
        );
        assert_eq!(BinderError::Destroyed.error_code(), "BINDER_DESTROYED");
    }
}
