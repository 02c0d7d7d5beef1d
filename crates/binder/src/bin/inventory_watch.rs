//! Inventory watcher entry point.
//!
//! Loads a player record from a JSON file, subscribes to every change and
//! plays a short scripted session against it, printing each event as a JSON
//! line on stdout.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use game_core::{AttrValue, Item, Slot};
use inventory_binder::{
    Binder, BinderConfig, ChangeEvent, Channel, LoggingConfig, init_logging,
};
use tracing::{info, warn};

const ENHANCE_ATTR: &str = "enhanceLevel";

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = init_logging(&LoggingConfig::from_env())?;

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: inventory-watch <player.json>");
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let binder = Binder::from_json(value, BinderConfig::from_env())?;
    binder.initialize()?;

    binder.on(Channel::All, print_event);

    run_session(&binder);

    let outcome = binder.refresh();
    info!(
        equipment_changes = outcome.equipment_changes,
        inventory_diffs = outcome.inventory_diffs,
        "Final refresh"
    );

    binder.destroy();
    Ok(())
}

fn print_event(event: &ChangeEvent) -> inventory_binder::ListenerResult {
    let line = serde_json::to_string(event)?;
    println!("{line}");
    Ok(())
}

/// Equips the first carried piece of gear, takes it off again and enhances
/// whatever equip-type item is first in the inventory.
fn run_session(binder: &Binder) {
    let carried = binder.get_inventory_equipment();
    let Some(first) = carried.first() else {
        warn!("No equip-type items in the inventory, nothing to do");
        return;
    };

    let (Some(index), Some(slot)) = (first.index(), Slot::for_kind(first.item.kind)) else {
        return;
    };

    info!(key = %first.key, %slot, "Equipping");
    if let Some(item) = binder.inventory().remove(index) {
        match binder.equipment().equip(slot, item) {
            Ok(Some(previous)) => {
                binder.inventory().push(previous);
            }
            Ok(None) => {}
            Err(item) => {
                warn!(%slot, "Item does not fit the slot, putting it back");
                binder.inventory().push(item);
            }
        }
    }

    info!(%slot, "Unequipping");
    if let Some(item) = binder.equipment().unequip(slot) {
        binder.inventory().unshift([item]);
    }

    if binder.inventory().update(0, enhance) {
        info!("Enhanced the first inventory item");
    }
}

fn enhance(item: &mut Item) {
    let level = match item.attr(ENHANCE_ATTR) {
        Some(AttrValue::Int(level)) => *level,
        _ => 0,
    };
    item.attributes
        .insert(ENHANCE_ATTR.to_owned(), AttrValue::Int(level.saturating_add(1)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ItemKind;

    #[test]
    fn enhance_starts_at_one_and_saturates() {
        let mut fresh = Item::new(ItemKind::Weapon);
        enhance(&mut fresh);
        assert_eq!(fresh.attr(ENHANCE_ATTR), Some(&AttrValue::Int(1)));

        let mut maxed = Item::new(ItemKind::Weapon).with_attr(ENHANCE_ATTR, i64::MAX);
        enhance(&mut maxed);
        assert_eq!(maxed.attr(ENHANCE_ATTR), Some(&AttrValue::Int(i64::MAX)));
    }
}
