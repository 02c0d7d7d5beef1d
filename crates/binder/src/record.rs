//! Loading player records from untyped JSON.
//!
//! Hosts usually hand over whatever their save system produced. The shape is
//! checked part by part so a missing inventory reports as such instead of as
//! a generic deserialization failure.

use game_core::{EquipmentState, Item, PlayerRecord};
use serde_json::{Map, Value};

use crate::error::{BinderError, Result};

/// Builds a [`PlayerRecord`] from `{"equipment": {...}, "inventory": [...]}`.
///
/// Unknown top-level fields are ignored; the host may keep other player data
/// in the same object.
pub fn player_record_from_json(value: Value) -> Result<PlayerRecord> {
    let mut player = match value {
        Value::Null => return Err(BinderError::MissingPlayer),
        other => serde_json::from_value::<Map<String, Value>>(other)
            .map_err(BinderError::MalformedRecord)?,
    };

    let equipment = match player.remove("equipment") {
        None | Some(Value::Null) => return Err(BinderError::MissingEquipment),
        Some(value @ Value::Object(_)) => serde_json::from_value::<EquipmentState>(value)
            .map_err(|err| BinderError::MalformedEquipment {
                reason: err.to_string(),
            })?,
        Some(other) => {
            return Err(BinderError::MalformedEquipment {
                reason: format!("expected an object of slots, found {}", json_type(&other)),
            });
        }
    };

    let inventory = match player.remove("inventory") {
        None | Some(Value::Null) => return Err(BinderError::MissingInventory),
        Some(value @ Value::Array(_)) => serde_json::from_value::<Vec<Item>>(value)
            .map_err(|err| BinderError::MalformedInventory {
                reason: err.to_string(),
            })?,
        Some(other) => {
            return Err(BinderError::MalformedInventory {
                reason: format!("expected an array of items, found {}", json_type(&other)),
            });
        }
    };

    Ok(PlayerRecord::new(equipment, inventory))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameError, ItemKind, Slot};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn loads_well_formed_record() {
        let record = player_record_from_json(json!({
            "name": "ignored",
            "equipment": {"WEAPON": {"uid": "w-1", "type": "weapon", "atk": 12}},
            "inventory": [
                {"uid": "a-1", "type": "armor", "enhanceLevel": 3},
                {"type": "consumable", "name": "Potion"},
            ],
        }))
        .unwrap();

        assert_eq!(
            record.equipment.get(Slot::Weapon).map(|item| item.kind),
            Some(ItemKind::Weapon)
        );
        assert_eq!(record.inventory.len(), 2);
        assert_eq!(record.inventory_equipment().count(), 1);
    }

    #[rstest]
    #[case(Value::Null, "BINDER_MISSING_PLAYER")]
    #[case(json!(42), "BINDER_MALFORMED_RECORD")]
    #[case(json!({"inventory": []}), "BINDER_MISSING_EQUIPMENT")]
    #[case(json!({"equipment": null, "inventory": []}), "BINDER_MISSING_EQUIPMENT")]
    #[case(json!({"equipment": {}}), "BINDER_MISSING_INVENTORY")]
    #[case(json!({"equipment": [], "inventory": []}), "BINDER_MALFORMED_EQUIPMENT")]
    #[case(json!({"equipment": {"CAPE": null}, "inventory": []}), "BINDER_MALFORMED_EQUIPMENT")]
    #[case(json!({"equipment": {}, "inventory": {}}), "BINDER_MALFORMED_INVENTORY")]
    #[case(json!({"equipment": {}, "inventory": [{"uid": "x"}]}), "BINDER_MALFORMED_INVENTORY")]
    fn rejects_bad_shapes(#[case] input: Value, #[case] code: &str) {
        let err = player_record_from_json(input).unwrap_err();
        assert_eq!(err.error_code(), code);
    }
}
