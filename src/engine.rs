//! Core CNAB aggregation engine.
//!
//! Owns the process-lifetime aggregate state: every imported
//! transaction, every deduplicated store, and the two id counters.
//! Imports are atomic per call: the whole file is parsed before any
//! state is touched, so a rejected file imports nothing.
//!
//! The engine is an owned value with `&mut self` mutations; callers
//! that expose it concurrently (e.g. behind a network service) must
//! wrap it in their own exclusion boundary with at most one mutation
//! in flight.

use crate::error::Result;
use crate::money::Money;
use crate::parser::parse_cnab;
use crate::store::{Store, StoreKey};
use crate::transaction::TransactionRecord;
use chrono::{NaiveDate, NaiveTime};
use log::{debug, error, info};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};

/// A transaction after import: the decoded record plus its assigned
/// id and store link.
#[derive(Debug, Clone)]
pub struct StoredTransaction {
    /// Sequential transaction id (starts at 1).
    pub id: u32,

    /// Id of the owning store.
    pub store_id: u32,

    /// The decoded record, unchanged since decode.
    pub record: TransactionRecord,
}

/// Outcome of one import call.
///
/// Import failure is a normal, reportable outcome: parse errors are
/// converted into a failure summary here rather than propagated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Whether the batch was imported.
    pub success: bool,

    /// Transactions imported in this call (0 on failure).
    pub transactions_imported: usize,

    /// Distinct stores referenced in this call, not the total number
    /// of stores in the aggregate.
    pub stores_processed: usize,

    /// Failure description, present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ImportSummary {
    fn success(transactions_imported: usize, stores_processed: usize) -> Self {
        ImportSummary {
            success: true,
            transactions_imported,
            stores_processed,
            error_message: None,
        }
    }

    fn failure(message: String) -> Self {
        ImportSummary {
            success: false,
            transactions_imported: 0,
            stores_processed: 0,
            error_message: Some(message),
        }
    }
}

/// One transaction in a store balance view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// Human-readable type label.
    #[serde(rename = "type")]
    pub tx_type: &'static str,

    pub date: NaiveDate,

    pub time: NaiveTime,

    /// Absolute amount.
    pub value: Money,

    /// Amount with the income/expense sign applied.
    pub signed_value: Money,

    pub tax_id: String,

    pub card_number: String,
}

impl TransactionView {
    fn from_stored(tx: &StoredTransaction) -> Self {
        TransactionView {
            tx_type: tx.record.tx_type.label(),
            date: tx.record.date,
            time: tx.record.time,
            value: tx.record.value,
            signed_value: tx.record.signed_value(),
            tax_id: tx.record.tax_id.clone(),
            card_number: tx.record.card_number.clone(),
        }
    }
}

/// Balance view for one store: its transactions ordered by
/// `(date, time)` and the sum of their signed values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBalance {
    pub store_id: u32,

    pub store_name: String,

    pub owner_name: String,

    /// Transactions sorted by `(date, time)` ascending; ties keep
    /// import order.
    pub transactions: Vec<TransactionView>,

    /// Sum of signed values over all the store's transactions.
    pub balance: Money,
}

/// The CNAB aggregation engine.
///
/// # Output Ordering
///
/// [`CnabEngine::list_balances`] sorts stores by name (case-sensitive
/// ascending) and each store's transactions by `(date, time)` for
/// deterministic, reproducible output.
pub struct CnabEngine {
    /// All imported transactions, in import order.
    transactions: Vec<StoredTransaction>,

    /// All stores, in creation order.
    stores: Vec<Store>,

    /// Dedup lookup from normalized identity key to slot in `stores`.
    store_index: HashMap<StoreKey, usize>,

    next_transaction_id: u32,

    next_store_id: u32,
}

impl CnabEngine {
    /// Creates a new empty engine with both id counters at 1.
    pub fn new() -> Self {
        CnabEngine {
            transactions: Vec::new(),
            stores: Vec::new(),
            store_index: HashMap::new(),
            next_transaction_id: 1,
            next_store_id: 1,
        }
    }

    /// Imports a CNAB file from a reader.
    ///
    /// Parsing runs to completion before any state is mutated, so a
    /// file with any invalid line imports nothing. All failures,
    /// including I/O, come back as a failure summary rather than an
    /// error: callers always receive a response object.
    pub fn import<R: Read>(&mut self, reader: R) -> ImportSummary {
        info!("Starting CNAB file import");

        match parse_cnab(reader) {
            Ok(records) => self.import_records(records),
            Err(e) => {
                error!("Error importing CNAB file: {}", e);
                ImportSummary::failure(e.to_string())
            }
        }
    }

    /// Imports already-decoded records, linking each to its store.
    ///
    /// Store identity persists across calls: a record whose
    /// `(name, owner)` matches a store created by an earlier batch is
    /// linked to that store. `stores_processed` in the summary counts
    /// the distinct stores this batch touched.
    pub fn import_records(&mut self, records: Vec<TransactionRecord>) -> ImportSummary {
        let imported = records.len();
        let mut touched: HashSet<u32> = HashSet::new();

        for record in records {
            let key = StoreKey::new(&record.merchant_name, &record.merchant_owner);
            let slot = match self.store_index.get(&key) {
                Some(&slot) => slot,
                None => {
                    let store = Store::new(
                        self.next_store_id,
                        record.merchant_name.clone(),
                        record.merchant_owner.clone(),
                    );
                    debug!(
                        "Created new store: {} - {} ({})",
                        store.id, store.name, store.owner_name
                    );
                    self.next_store_id += 1;
                    self.stores.push(store);
                    let slot = self.stores.len() - 1;
                    self.store_index.insert(key, slot);
                    slot
                }
            };

            let store = &mut self.stores[slot];
            touched.insert(store.id);

            let tx_id = self.next_transaction_id;
            self.next_transaction_id += 1;
            store.link(tx_id);
            self.transactions.push(StoredTransaction {
                id: tx_id,
                store_id: store.id,
                record,
            });
        }

        info!(
            "Successfully imported {} transactions for {} stores",
            imported,
            touched.len()
        );

        ImportSummary::success(imported, touched.len())
    }

    /// Returns one balance view per store, sorted by store name.
    ///
    /// Each store's transactions are sorted by `(date, time)`
    /// ascending; the sort is stable, so equal timestamps keep import
    /// order. Balance is the sum of signed values.
    pub fn list_balances(&self) -> Vec<StoreBalance> {
        info!("Retrieving store balances for {} stores", self.stores.len());

        let mut balances: Vec<StoreBalance> = self
            .stores
            .iter()
            .filter(|store| !store.transaction_ids.is_empty())
            .map(|store| self.balance_for(store))
            .collect();

        balances.sort_by(|a, b| a.store_name.cmp(&b.store_name));
        balances
    }

    fn balance_for(&self, store: &Store) -> StoreBalance {
        let mut txs: Vec<&StoredTransaction> = self
            .transactions
            .iter()
            .filter(|tx| tx.store_id == store.id)
            .collect();
        txs.sort_by_key(|tx| (tx.record.date, tx.record.time));

        let balance = txs
            .iter()
            .fold(Money::ZERO, |acc, tx| acc + tx.record.signed_value());

        StoreBalance {
            store_id: store.id,
            store_name: store.name.clone(),
            owner_name: store.owner_name.clone(),
            transactions: txs.into_iter().map(TransactionView::from_stored).collect(),
            balance,
        }
    }

    /// Writes a per-store balance summary as CSV.
    ///
    /// One row per store in `list_balances` order: id, name, owner,
    /// transaction count, balance with two decimal places.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["store_id", "store", "owner", "transactions", "balance"])?;

        for entry in self.list_balances() {
            csv_writer.write_record([
                entry.store_id.to_string(),
                entry.store_name,
                entry.owner_name,
                entry.transactions.len().to_string(),
                entry.balance.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Clears all transactions and stores and restarts both id
    /// counters at 1.
    pub fn reset(&mut self) {
        info!("Clearing all in-memory data");

        self.transactions.clear();
        self.stores.clear();
        self.store_index.clear();
        self.next_transaction_id = 1;
        self.next_store_id = 1;
    }

    /// Returns a store by id (for testing).
    #[cfg(test)]
    pub fn get_store(&self, store_id: u32) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == store_id)
    }
}

impl Default for CnabEngine {
    fn default() -> Self {
        Self::new()
    }
}
