//! Snapshot adapter: collector wire format to and from the canonical [`Dataset`].
//!
//! # Purpose
//! The in-game collector emits `{ lastUpdate, players: [{ userId, username,
//! animals: [...] }] }`. This module validates that shape, applies the
//! optional-field defaults in exactly one place ([`normalize_entity`]), and
//! renders a [`Dataset`] back into the same shape so an export can be
//! re-imported unchanged.
//!
//! # Design constraints
//! - Pure, deterministic conversion. No IO.
//! - Structural problems surface as [`MalformedSnapshot`]; nothing is
//!   half-built, so a failed parse never yields a partial dataset.
//! - Only `players` (an array) and each player's numeric `userId` are
//!   required. Missing optional fields get defaults, they are never errors.
//! - Unknown fields are ignored so newer collectors keep importing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Dataset, Entity, Owner, OwnerId, DEFAULT_RARITY, NO_MUTATION};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural validation failure on import.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedSnapshot {
    /// Input is not parseable JSON at all.
    InvalidJson { reason: String },
    /// Top-level value is not an object.
    NotAnObject { found: &'static str },
    /// No `players` key (or `players: null`).
    MissingPlayers,
    /// `players` exists but is not an array.
    PlayersNotArray { found: &'static str },
    /// An element of `players` is not an object.
    PlayerNotObject { index: usize, found: &'static str },
    /// A player has no `userId`.
    MissingOwnerId { index: usize },
    /// `userId` is present but not an integer.
    OwnerIdNotInteger { index: usize, raw: String },
    /// Some other player field has the wrong type (e.g. `animals` not an array).
    InvalidPlayer { owner_id: OwnerId, reason: String },
    /// An entity reports a negative or non-finite generation rate.
    InvalidGeneration {
        owner_id: OwnerId,
        index: usize,
        generation: f64,
    },
}

impl std::fmt::Display for MalformedSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson { reason } => write!(f, "snapshot is not valid JSON: {reason}"),
            Self::NotAnObject { found } => {
                write!(f, "snapshot root must be an object, found {found}")
            }
            Self::MissingPlayers => write!(f, "snapshot is missing the `players` collection"),
            Self::PlayersNotArray { found } => {
                write!(f, "snapshot `players` collection must be an array, found {found}")
            }
            Self::PlayerNotObject { index, found } => {
                write!(f, "players[{index}] must be an object, found {found}")
            }
            Self::MissingOwnerId { index } => {
                write!(f, "players[{index}] has no numeric `userId`")
            }
            Self::OwnerIdNotInteger { index, raw } => {
                write!(f, "players[{index}] `userId` must be an integer, got {raw}")
            }
            Self::InvalidPlayer { owner_id, reason } => {
                write!(f, "player {owner_id} is malformed: {reason}")
            }
            Self::InvalidGeneration {
                owner_id,
                index,
                generation,
            } => write!(
                f,
                "player {owner_id} animals[{index}] has invalid generation {generation}"
            ),
        }
    }
}

impl std::error::Error for MalformedSnapshot {}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Raw import structs (collector JSON -> these -> canonical types)
// ---------------------------------------------------------------------------

/// Player fields other than `userId`, which is validated separately so its
/// error can name the offending index.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub animals: Option<Vec<RawAnimal>>,
}

/// One entity as the collector writes it. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnimal {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_name: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub generation: Option<f64>,
    #[serde(default)]
    pub mutation: Option<String>,
    #[serde(default)]
    pub traits: Option<Vec<String>>,
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub scanned_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Export structs (canonical types -> these -> JSON)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSnapshot {
    pub last_update: String,
    pub players: Vec<WirePlayer>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayer {
    pub user_id: OwnerId,
    pub username: String,
    pub animals: Vec<WireAnimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAnimal {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,
    pub rarity: String,
    pub generation: f64,
    pub mutation: String,
    pub traits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<String>,
}

impl From<&Entity> for WireAnimal {
    fn from(e: &Entity) -> Self {
        Self {
            name: e.name.clone(),
            base_name: e.base_name.clone(),
            rarity: e.rarity.clone(),
            generation: e.generation,
            mutation: e.mutation.clone(),
            traits: e.traits.clone(),
            slot: e.slot.clone(),
            plot: e.origin.clone(),
            scanned_at: e.captured_at.clone(),
        }
    }
}

impl From<&Dataset> for WireSnapshot {
    fn from(d: &Dataset) -> Self {
        Self {
            last_update: d.last_update().to_string(),
            players: d
                .owners()
                .iter()
                .map(|o| WirePlayer {
                    user_id: o.owner_id,
                    username: o.display_name.clone(),
                    animals: o.entities.iter().map(WireAnimal::from).collect(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// The single defaulting step for incoming entities:
/// `name` falls back to `baseName`, then to empty (priced at the fallback),
/// `rarity` to [`DEFAULT_RARITY`],
/// `mutation` to [`NO_MUTATION`], `generation` to `0`, `traits` to empty.
pub fn normalize_entity(
    owner_id: OwnerId,
    index: usize,
    raw: RawAnimal,
) -> Result<Entity, MalformedSnapshot> {
    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .or_else(|| raw.base_name.clone().filter(|n| !n.is_empty()))
        .unwrap_or_default();

    let generation = raw.generation.unwrap_or(0.0);
    if !generation.is_finite() || generation < 0.0 {
        return Err(MalformedSnapshot::InvalidGeneration {
            owner_id,
            index,
            generation,
        });
    }

    Ok(Entity {
        name,
        base_name: raw.base_name,
        rarity: raw.rarity.unwrap_or_else(|| DEFAULT_RARITY.to_string()),
        generation,
        mutation: raw.mutation.unwrap_or_else(|| NO_MUTATION.to_string()),
        traits: raw.traits.unwrap_or_default(),
        slot: raw.slot,
        origin: raw.plot,
        captured_at: raw.scanned_at,
    })
}

fn owner_id_of(index: usize, player: &Value) -> Result<OwnerId, MalformedSnapshot> {
    match player.get("userId") {
        None | Some(Value::Null) => Err(MalformedSnapshot::MissingOwnerId { index }),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| MalformedSnapshot::OwnerIdNotInteger {
            index,
            raw: n.to_string(),
        }),
        Some(other) => Err(MalformedSnapshot::OwnerIdNotInteger {
            index,
            raw: other.to_string(),
        }),
    }
}

fn normalize_player(index: usize, player: Value) -> Result<Owner, MalformedSnapshot> {
    if !player.is_object() {
        return Err(MalformedSnapshot::PlayerNotObject {
            index,
            found: json_kind(&player),
        });
    }
    let owner_id = owner_id_of(index, &player)?;

    let raw: RawPlayer =
        serde_json::from_value(player).map_err(|e| MalformedSnapshot::InvalidPlayer {
            owner_id,
            reason: e.to_string(),
        })?;

    let entities = raw
        .animals
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, a)| normalize_entity(owner_id, i, a))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Owner::new(owner_id, raw.username.unwrap_or_default(), entities))
}

/// Validate and normalize an already-parsed JSON value.
///
/// Players repeated within one snapshot collapse to the last record, at the
/// position of the first.
pub fn normalize_value(value: Value) -> Result<Dataset, MalformedSnapshot> {
    let mut root = match value {
        Value::Object(map) => map,
        other => {
            return Err(MalformedSnapshot::NotAnObject {
                found: json_kind(&other),
            })
        }
    };

    let players = match root.remove("players") {
        None | Some(Value::Null) => return Err(MalformedSnapshot::MissingPlayers),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(MalformedSnapshot::PlayersNotArray {
                found: json_kind(&other),
            })
        }
    };

    let last_update = match root.remove("lastUpdate") {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };

    let owners = players
        .into_iter()
        .enumerate()
        .map(|(i, p)| normalize_player(i, p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::new(last_update, owners))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a snapshot (or a previously exported dataset) from JSON text.
///
/// # Errors
/// Returns the first [`MalformedSnapshot`] encountered, in document order.
pub fn deserialize(json: &str) -> Result<Dataset, MalformedSnapshot> {
    let value: Value = serde_json::from_str(json).map_err(|e| MalformedSnapshot::InvalidJson {
        reason: e.to_string(),
    })?;
    normalize_value(value)
}

/// Render a dataset in the collector's shape (pretty, 2-space indent).
pub fn serialize(dataset: &Dataset) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&WireSnapshot::from(dataset))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
