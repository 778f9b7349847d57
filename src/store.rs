//! Store model and identity matching.
//!
//! A store is the unit of balance aggregation: one entry per distinct
//! `(name, owner)` pair, compared case-insensitively after trimming.

use serde::Serialize;

/// Normalized identity key for store deduplication.
///
/// Two transactions resolve to the same store when their trimmed names
/// and owners match case-insensitively, regardless of original casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    name: String,
    owner: String,
}

impl StoreKey {
    /// Builds the key from raw name/owner strings as they appear in a
    /// record.
    pub fn new(name: &str, owner: &str) -> Self {
        StoreKey {
            name: name.trim().to_lowercase(),
            owner: owner.trim().to_lowercase(),
        }
    }
}

/// A deduplicated store identity.
///
/// Created lazily the first time a transaction references an unseen
/// `(name, owner)` pair. Keeps the casing of the first sighting. Only
/// ever mutated by linking further transactions; cleared by an engine
/// reset.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    /// Sequential identifier, assigned on first sighting (starts at 1).
    pub id: u32,

    /// Store name as first seen (trimmed).
    pub name: String,

    /// Owner name as first seen (trimmed).
    pub owner_name: String,

    /// Ids of linked transactions, in import order.
    pub transaction_ids: Vec<u32>,
}

impl Store {
    /// Creates a new store with no linked transactions.
    pub fn new(id: u32, name: String, owner_name: String) -> Self {
        Store {
            id,
            name,
            owner_name,
            transaction_ids: Vec::new(),
        }
    }

    /// The dedup key for this store.
    pub fn key(&self) -> StoreKey {
        StoreKey::new(&self.name, &self.owner_name)
    }

    /// Links a transaction to this store.
    pub fn link(&mut self, transaction_id: u32) {
        self.transaction_ids.push(transaction_id);
    }
}
