use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::{debug, warn};

use super::{ConfigSource, Record, Table};
use crate::error::{ErrorKind, IResult, failure_from_kind};

/// A [`ConfigSource`] holding every table in memory.
#[derive(Debug, Default, Clone)]
pub struct TableStore {
    tables: HashMap<Table, BTreeMap<i64, Record>>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: Table, id: i64, record: Record) -> Option<Record> {
        self.tables.entry(table).or_default().insert(id, record)
    }

    /// Ingests a table dumped as a JSON object keyed by stringified ids.
    ///
    /// Keys that are not integers (the dumps carry an `"all"` index list) are
    /// skipped, as are entries whose value is not an object. Returns the number
    /// of records inserted.
    pub fn insert_json_table(&mut self, table: Table, value: Value) -> IResult<usize> {
        let Value::Object(entries) = value else {
            return Err(failure_from_kind(ErrorKind::Configuration {
                table,
                id: 0,
                detail: "table root is not an object".to_owned(),
            }));
        };

        debug!("ingesting table {table} ({} entries)", entries.len());

        let mut inserted = 0;
        for (key, entry) in entries {
            let Ok(id) = key.parse::<i64>() else {
                debug!("skipping non-numeric key {key:?} in {table}");
                continue;
            };
            let Value::Object(record) = entry else {
                warn!("entry {id} in {table} is not an object");
                continue;
            };
            self.insert(table, id, record);
            inserted += 1;
        }

        Ok(inserted)
    }

    pub fn with_table(mut self, table: Table, value: Value) -> IResult<Self> {
        self.insert_json_table(table, value)?;
        Ok(self)
    }

    pub fn len(&self, table: Table) -> usize {
        self.tables.get(&table).map(BTreeMap::len).unwrap_or(0)
    }
}

impl ConfigSource for TableStore {
    fn record(&self, table: Table, id: i64) -> Option<&Record> {
        self.tables.get(&table)?.get(&id)
    }

    fn ids(&self, table: Table) -> Vec<i64> {
        self.tables
            .get(&table)
            .map(|records| records.keys().copied().collect())
            .unwrap_or_default()
    }
}
