//! Discriminator partitioning.

use bureau_model::{PACKED_FIELD, RecordFamily};
use polars::prelude::{BooleanChunked, DataFrame};

use crate::error::{IngestError, Result};

/// Rows of a bureau file split by record family.
///
/// Each partition keeps the source row order and every input column. Row
/// positions restart at zero in each partition.
#[derive(Debug, Clone)]
pub struct ExtractedRecords {
    /// Rows whose packed value starts with `1`.
    pub clients: DataFrame,
    /// Rows whose packed value starts with `2`.
    pub debts: DataFrame,
    /// Rows matching neither discriminator (including empty packed values).
    pub dropped: usize,
}

impl ExtractedRecords {
    /// Rows of the given family.
    pub fn family(&self, family: RecordFamily) -> &DataFrame {
        match family {
            RecordFamily::Client => &self.clients,
            RecordFamily::Debt => &self.debts,
        }
    }

    /// Number of rows read from the input, including dropped ones.
    pub fn total_rows(&self) -> usize {
        self.clients.height() + self.debts.height() + self.dropped
    }
}

/// Split a raw table into client and debt rows by the first character of
/// the packed field.
///
/// Rows with any other first character, or no value at all, are dropped.
pub fn partition_records(df: &DataFrame) -> Result<ExtractedRecords> {
    let packed = df
        .column(PACKED_FIELD)
        .map_err(|_| IngestError::ColumnNotFound {
            column: PACKED_FIELD.to_string(),
        })?
        .str()?;

    let families: Vec<Option<RecordFamily>> = packed
        .into_iter()
        .map(|value| value.and_then(RecordFamily::classify))
        .collect();

    let mask_for = |family: RecordFamily| -> BooleanChunked {
        families
            .iter()
            .map(|row_family| Some(*row_family == Some(family)))
            .collect()
    };

    let clients = df.filter(&mask_for(RecordFamily::Client))?;
    let debts = df.filter(&mask_for(RecordFamily::Debt))?;
    let dropped = families.iter().filter(|family| family.is_none()).count();

    Ok(ExtractedRecords {
        clients,
        debts,
        dropped,
    })
}
