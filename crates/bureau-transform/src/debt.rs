//! Debt record decoding.

use bureau_model::{DEBT_ACCOUNT, DEBT_LAYOUT, DEBT_RECORD_WIDTH, PACKED_FIELD};
use polars::prelude::{Column, DataFrame, IntoColumn, IntoSeries, StringChunkedBuilder};

use crate::error::Result;
use crate::packed_values;
use crate::slice::extract_span;

/// Decoded debt table plus the number of rows shorter than a full record.
#[derive(Debug, Clone)]
pub struct DecodedDebts {
    pub table: DataFrame,
    pub short_rows: usize,
}

/// Slice each debt row's packed field into the debt layout columns and
/// derive the account code.
///
/// Input columns other than the packed field are kept, in order, ahead of the
/// decoded columns. An input column sharing a decoded column's name is
/// replaced by the decoded values.
///
/// Rows shorter than [`DEBT_RECORD_WIDTH`] characters still decode: range
/// fields come back truncated or empty, single-position fields past the end
/// are null, and a null part makes the account code null.
pub fn decode_debt_records(df: &DataFrame) -> Result<DecodedDebts> {
    let packed = packed_values(df)?;
    let height = df.height();

    let mut fields: Vec<StringChunkedBuilder> = DEBT_LAYOUT
        .iter()
        .map(|field| StringChunkedBuilder::new(field.output_name.into(), height))
        .collect();
    let mut account = StringChunkedBuilder::new(DEBT_ACCOUNT.output_name.into(), height);
    let mut short_rows = 0;

    for value in packed.into_iter() {
        let Some(value) = value else {
            fields.iter_mut().for_each(|builder| builder.append_null());
            account.append_null();
            continue;
        };

        if value.chars().count() < DEBT_RECORD_WIDTH {
            short_rows += 1;
        }

        let decoded = DEBT_LAYOUT.map(|field| extract_span(value, field.span));
        for (builder, part) in fields.iter_mut().zip(decoded) {
            builder.append_option(part);
        }

        let code: Option<String> = DEBT_ACCOUNT
            .parts
            .iter()
            .map(|&index| decoded[index])
            .collect();
        account.append_option(code.as_deref());
    }

    let decoded_names: Vec<&str> = DEBT_LAYOUT
        .iter()
        .map(|field| field.output_name)
        .chain(std::iter::once(DEBT_ACCOUNT.output_name))
        .collect();

    let mut columns: Vec<Column> = df
        .get_columns()
        .iter()
        .filter(|column| {
            let name = column.name().as_str();
            name != PACKED_FIELD && !decoded_names.contains(&name)
        })
        .cloned()
        .collect();
    columns.extend(
        fields
            .into_iter()
            .chain(std::iter::once(account))
            .map(|builder| builder.finish().into_series().into_column()),
    );

    Ok(DecodedDebts {
        table: DataFrame::new(columns)?,
        short_rows,
    })
}
