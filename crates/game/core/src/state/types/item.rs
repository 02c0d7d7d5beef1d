//! Item-related state types.
//!
//! This module contains the foundational item types:
//! - [`ItemUid`]: durable identity assigned by the item's creator
//! - [`ItemKind`]: the type tag separating equip-type items from the rest
//! - [`AttrValue`]: opaque, recursively comparable item payload
//! - [`Item`]: the value stored in equipment slots and the inventory
//! - [`ItemKey`]: the identity used when diffing inventories

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Durable identity of an item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemUid(pub String);

impl ItemUid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemUid {
    fn from(uid: &str) -> Self {
        Self::new(uid)
    }
}

impl From<String> for ItemUid {
    fn from(uid: String) -> Self {
        Self(uid)
    }
}

/// Type tag carried by every item.
///
/// Only equip-type kinds take part in change tracking; consumables, currency
/// and materials are invisible to the binder.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    // Equip-type
    Weapon,
    Armor,
    Helm,
    Boots,
    Ring,
    Amulet,
    Accessory,

    // Stackables
    Consumable,
    Currency,
    Material,
}

impl ItemKind {
    /// Returns true if items of this kind can be equipped and are tracked.
    pub const fn is_equipment(self) -> bool {
        matches!(
            self,
            ItemKind::Weapon
                | ItemKind::Armor
                | ItemKind::Helm
                | ItemKind::Boots
                | ItemKind::Ring
                | ItemKind::Amulet
                | ItemKind::Accessory
        )
    }
}

/// Opaque attribute value attached to an item.
///
/// The core never interprets attributes. It only compares them, and equality
/// is fully recursive. Floats follow IEEE semantics, so an attribute holding
/// `NaN` never compares equal to itself and the owning item always reads as
/// modified.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<AttrValue>),
    Map(BTreeMap<String, AttrValue>),
}

impl Hash for AttrValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            AttrValue::Null => {}
            AttrValue::Bool(value) => value.hash(state),
            AttrValue::Int(value) => value.hash(state),
            // +0.0 and -0.0 compare equal, so they must hash alike
            AttrValue::Float(value) if *value == 0.0 => 0u64.hash(state),
            AttrValue::Float(value) => value.to_bits().hash(state),
            AttrValue::Text(value) => value.hash(state),
            AttrValue::List(values) => values.hash(state),
            AttrValue::Map(entries) => entries.hash(state),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(values: Vec<T>) -> Self {
        AttrValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Free-form item payload keyed by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// An item as stored in an equipment slot or in the inventory.
///
/// Serialized form: `{"uid": "w-1", "type": "weapon", ...attributes}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub uid: Option<ItemUid>,

    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ItemKind,

    #[cfg_attr(feature = "serde", serde(flatten))]
    pub attributes: Attributes,
}

impl Item {
    /// Creates an item without uid or attributes.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            uid: None,
            kind,
            attributes: Attributes::new(),
        }
    }

    /// Attaches a durable uid (builder pattern).
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<ItemUid>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Sets an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the attribute stored under `name`, if any.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    #[inline]
    pub fn is_equipment(&self) -> bool {
        self.kind.is_equipment()
    }

    /// Identity used when diffing.
    ///
    /// Falls back to a content fingerprint when the item has no uid. The
    /// fingerprint is not durable: editing the item changes it, and two
    /// uid-less items with identical content share it.
    pub fn key(&self) -> ItemKey {
        match &self.uid {
            Some(uid) => ItemKey::Uid(uid.clone()),
            None => ItemKey::Generated(self.content_hash()),
        }
    }

    fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.kind.hash(&mut hasher);
        self.attributes.hash(&mut hasher);
        hasher.finish()
    }
}

/// Identity of an item within one binder's snapshot cache.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ItemKey {
    /// Durable uid supplied with the item.
    Uid(ItemUid),
    /// Content fingerprint for items without a uid.
    Generated(u64),
}

impl ItemKey {
    pub fn is_generated(&self) -> bool {
        matches!(self, ItemKey::Generated(_))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Uid(uid) => write!(f, "{uid}"),
            ItemKey::Generated(hash) => write!(f, "~{hash:016x}"),
        }
    }
}
