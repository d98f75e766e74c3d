use std::collections::BTreeMap;

/// Player account identity. The only key a dataset is indexed by.
pub type OwnerId = i64;

/// Rarity assigned to an entity whose snapshot omitted it.
pub const DEFAULT_RARITY: &str = "COMMON";

/// Mutation sentinel meaning "no mutation". Distinct from an absent field,
/// which normalizes to this value.
pub const NO_MUTATION: &str = "None";

/// One collected in-game item instance.
///
/// `rarity`, `mutation` and `generation` are always populated: the wire
/// adapter substitutes [`DEFAULT_RARITY`], [`NO_MUTATION`] and `0.0` when the
/// snapshot leaves them out. `slot`, `origin` and `captured_at` are opaque and
/// carried through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub name: String,
    pub base_name: Option<String>,
    pub rarity: String,
    /// Per-second generation rate. Never negative.
    pub generation: f64,
    pub mutation: String,
    pub traits: Vec<String>,
    pub slot: Option<String>,
    /// Plot the entity was scanned on (`plot` on the wire).
    pub origin: Option<String>,
    /// Scan time as reported by the collector (`scannedAt` on the wire).
    pub captured_at: Option<String>,
}

impl Entity {
    pub fn new(name: impl Into<String>, generation: f64) -> Self {
        debug_assert!(generation >= 0.0, "Entity.generation must be >= 0");
        Self {
            name: name.into(),
            base_name: None,
            rarity: DEFAULT_RARITY.to_string(),
            generation,
            mutation: NO_MUTATION.to_string(),
            traits: Vec::new(),
            slot: None,
            origin: None,
            captured_at: None,
        }
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_mutation(mut self, mutation: impl Into<String>) -> Self {
        self.mutation = mutation.into();
        self
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }

    /// `true` unless the mutation is the [`NO_MUTATION`] sentinel.
    pub fn has_mutation(&self) -> bool {
        self.mutation != NO_MUTATION
    }
}

/// One player account and the entities it holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Owner {
    pub owner_id: OwnerId,
    /// Informational only; not part of identity.
    pub display_name: String,
    /// Kept in snapshot order for stable display.
    pub entities: Vec<Entity>,
}

impl Owner {
    pub fn new(owner_id: OwnerId, display_name: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            owner_id,
            display_name: display_name.into(),
            entities,
        }
    }
}

/// Whether [`Dataset::upsert`] added a new owner or replaced an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Replaced,
}

/// Canonical collection of owners, unique by `owner_id`.
///
/// Owners iterate in insertion order. Replacing an owner keeps its original
/// position, so re-importing a known player never reshuffles the listing.
///
/// The absent dataset is `Option::<Dataset>::None`. Operations that can empty
/// the owner set return `Option<Dataset>` and never hand back an empty value.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    last_update: String,
    owners: Vec<Owner>,
    /// owner_id -> position in `owners`.
    index: BTreeMap<OwnerId, usize>,
}

impl Dataset {
    /// Build a dataset from owners in order. A repeated `owner_id` replaces
    /// the earlier record in place (last writer wins).
    pub fn new(last_update: impl Into<String>, owners: impl IntoIterator<Item = Owner>) -> Self {
        let mut dataset = Self {
            last_update: last_update.into(),
            owners: Vec::new(),
            index: BTreeMap::new(),
        };
        for owner in owners {
            dataset.upsert(owner);
        }
        dataset
    }

    /// Insert or wholesale-replace the owner with the same id.
    pub fn upsert(&mut self, owner: Owner) -> Upsert {
        match self.index.get(&owner.owner_id) {
            Some(&pos) => {
                self.owners[pos] = owner;
                Upsert::Replaced
            }
            None => {
                self.index.insert(owner.owner_id, self.owners.len());
                self.owners.push(owner);
                Upsert::Added
            }
        }
    }

    pub fn last_update(&self) -> &str {
        &self.last_update
    }

    pub(crate) fn set_last_update(&mut self, last_update: String) {
        self.last_update = last_update;
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn owner(&self, owner_id: OwnerId) -> Option<&Owner> {
        self.index.get(&owner_id).map(|&pos| &self.owners[pos])
    }

    pub fn contains_owner(&self, owner_id: OwnerId) -> bool {
        self.index.contains_key(&owner_id)
    }

    /// Owner ids in iteration order.
    pub fn owner_ids(&self) -> Vec<OwnerId> {
        self.owners.iter().map(|o| o.owner_id).collect()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.owners.iter().map(|o| o.entities.len()).sum()
    }

    /// Equality that ignores `last_update`, which every merge rewrites.
    pub fn same_owners(&self, other: &Dataset) -> bool {
        self.owners == other.owners
    }

    /// Collapse an empty dataset to the absent state.
    pub fn into_non_empty(self) -> Option<Dataset> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn into_owners(self) -> Vec<Owner> {
        self.owners
    }
}
