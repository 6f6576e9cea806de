//! Client record decoding.

use bureau_model::{CLIENT_COLUMNS, CLIENT_FIELD_COUNT, CLIENT_FIELD_DELIMITER};
use polars::prelude::{Column, DataFrame, IntoColumn, IntoSeries, StringChunkedBuilder};

use crate::error::{Result, TransformError};
use crate::packed_values;

/// Split each client row's packed field on `|` into the named client columns.
///
/// The result holds exactly the client columns, one row per input row, in
/// input order. The packed field and any other input columns are not carried.
///
/// # Errors
///
/// [`TransformError::ClientFieldCount`] for the first row that does not split
/// into exactly [`CLIENT_FIELD_COUNT`] parts. No partial table is returned.
pub fn decode_client_records(df: &DataFrame) -> Result<DataFrame> {
    let packed = packed_values(df)?;

    let mut builders: Vec<StringChunkedBuilder> = CLIENT_COLUMNS
        .iter()
        .map(|name| StringChunkedBuilder::new((*name).into(), df.height()))
        .collect();

    for (row, value) in packed.into_iter().enumerate() {
        let value = value.unwrap_or("");
        let parts: Vec<&str> = value.split(CLIENT_FIELD_DELIMITER).collect();
        if parts.len() != CLIENT_FIELD_COUNT {
            return Err(TransformError::ClientFieldCount {
                row,
                expected: CLIENT_FIELD_COUNT,
                found: parts.len(),
                value: value.to_string(),
            });
        }
        for (builder, part) in builders.iter_mut().zip(parts) {
            builder.append_value(part);
        }
    }

    let columns: Vec<Column> = builders
        .into_iter()
        .map(|builder| builder.finish().into_series().into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}
