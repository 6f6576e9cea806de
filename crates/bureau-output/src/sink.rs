//! Destination tables with replace semantics.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::error::Result;

/// A store that holds named tables and replaces them wholesale.
pub trait TableSink {
    /// Drop any existing table `name` and store `table` in its place.
    ///
    /// Returns the number of rows written.
    fn replace_table(&mut self, name: &str, table: &DataFrame) -> Result<usize>;
}

/// In-process sink. Useful for dry runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    tables: BTreeMap<String, DataFrame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, name: &str) -> Option<&DataFrame> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl TableSink for MemorySink {
    fn replace_table(&mut self, name: &str, table: &DataFrame) -> Result<usize> {
        self.tables.insert(name.to_string(), table.clone());
        Ok(table.height())
    }
}
