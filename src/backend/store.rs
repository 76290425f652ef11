//! Defines the transaction store trait and a store backed by a JSON file.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, transaction::RawTransaction};

/// Handles the creation, retrieval and deletion of transactions.
pub trait TransactionStore {
    /// Retrieve every transaction in the order they were created.
    fn list(&self) -> Result<Vec<RawTransaction>, Error>;

    /// Add a transaction to the store.
    ///
    /// Implementers should assign a new `id` and set `timestamp` to the
    /// creation time, and return the record as stored.
    fn create(&mut self, record: RawTransaction) -> Result<RawTransaction, Error>;

    /// Delete the transaction with `id`.
    ///
    /// Implementers should return [Error::DeleteMissingTransaction] if there
    /// is no such transaction.
    fn delete(&mut self, id: i64) -> Result<(), Error>;
}

/// Stores transactions as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the file at `path`. The file is created on the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, treating a missing file as empty.
    fn read(&self) -> Result<Vec<RawTransaction>, Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(error) => return Err(self.store_error(error)),
        };

        serde_json::from_str(&text).map_err(|error| self.store_error(error))
    }

    fn write(&self, records: &[RawTransaction]) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, text).map_err(|error| self.store_error(error))
    }

    fn store_error(&self, error: impl std::fmt::Display) -> Error {
        tracing::error!("could not access {}: {error}", self.path.display());
        Error::StoreError(self.path.display().to_string(), error.to_string())
    }
}

impl TransactionStore for JsonFileStore {
    /// Retrieve every transaction in the file.
    ///
    /// A file that cannot be read or parsed lists as empty so that the
    /// dashboard still loads.
    fn list(&self) -> Result<Vec<RawTransaction>, Error> {
        Ok(self.read().unwrap_or_else(|error| {
            tracing::warn!("listing no transactions: {error}");
            Vec::new()
        }))
    }

    /// Append `record` with the next free ID and the current UTC time.
    ///
    /// Unlike [JsonFileStore::list], this fails on an unparsable file rather
    /// than overwriting it.
    fn create(&mut self, mut record: RawTransaction) -> Result<RawTransaction, Error> {
        let mut records = self.read()?;

        let id = records
            .iter()
            .filter_map(RawTransaction::id)
            .max()
            .unwrap_or(0)
            + 1;
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|error| self.store_error(error))?;

        record.set("id", id);
        record.set("timestamp", timestamp);
        records.push(record.clone());

        self.write(&records)?;
        tracing::info!("created transaction {id}");

        Ok(record)
    }

    fn delete(&mut self, id: i64) -> Result<(), Error> {
        let mut records = self.read()?;
        let count = records.len();

        records.retain(|record| record.id() != Some(id));

        if records.len() == count {
            return Err(Error::DeleteMissingTransaction);
        }

        self.write(&records)?;
        tracing::info!("deleted transaction {id}");

        Ok(())
    }
}
