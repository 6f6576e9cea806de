//! Packed-field decoding for bureau records.
//!
//! - **client**: `|`-delimited client rows into the named client columns
//! - **debt**: fixed character offsets into debt columns plus `Cod_Cuenta`
//! - **slice**: character-position helpers shared by the decoders

mod client;
mod debt;
mod error;
mod slice;

use std::time::Instant;

use bureau_ingest::ExtractedRecords;
use bureau_model::PACKED_FIELD;
use polars::prelude::{DataFrame, StringChunked};
use tracing::{debug, warn};

pub use client::decode_client_records;
pub use debt::{DecodedDebts, decode_debt_records};
pub use error::{Result, TransformError};
pub use slice::{char_at, extract_span, slice_chars};

/// Decoded client and debt tables ready for loading.
#[derive(Debug, Clone)]
pub struct TransformedTables {
    pub clients: DataFrame,
    pub debts: DataFrame,
    /// Debt rows shorter than a full record.
    pub short_debt_rows: usize,
}

/// Decode both partitions of an extracted bureau file.
///
/// Fails on the first client row with the wrong number of sub-fields.
pub fn transform(records: &ExtractedRecords) -> Result<TransformedTables> {
    let start = Instant::now();

    let clients = decode_client_records(&records.clients)?;
    let DecodedDebts { table, short_rows } = decode_debt_records(&records.debts)?;

    if short_rows > 0 {
        warn!(
            short_rows,
            "debt rows shorter than a full record; fields were truncated"
        );
    }
    debug!(
        clients = clients.height(),
        client_columns = clients.width(),
        debts = table.height(),
        debt_columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "records decoded"
    );

    Ok(TransformedTables {
        clients,
        debts: table,
        short_debt_rows: short_rows,
    })
}

fn packed_values(df: &DataFrame) -> Result<&StringChunked> {
    let column = df
        .column(PACKED_FIELD)
        .map_err(|_| TransformError::ColumnNotFound {
            column: PACKED_FIELD.to_string(),
        })?;
    Ok(column.str()?)
}
