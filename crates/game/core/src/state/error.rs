//! Player record errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::types::{ItemKind, Slot};

/// Structural problems found in a player record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordError {
    /// An equipment slot holds an item that cannot be equipped.
    #[error("slot {slot} holds a non-equipment item of type {kind}")]
    SlotHoldsNonEquipment {
        /// The offending slot.
        slot: Slot,
        /// Type tag of the item found there.
        kind: ItemKind,
    },
}

impl GameError for RecordError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RecordError::SlotHoldsNonEquipment { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RecordError::SlotHoldsNonEquipment { .. } => "RECORD_SLOT_HOLDS_NON_EQUIPMENT",
        }
    }
}
