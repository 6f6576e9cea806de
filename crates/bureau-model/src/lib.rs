//! Record definitions for credit-bureau flat files.
//!
//! A bureau file carries one packed text value per row. Its first character
//! selects a [`RecordFamily`]; the rest is decoded with the layouts in
//! [`layout`].

pub mod family;
pub mod layout;

pub use family::{DEBT_TABLE, RecordFamily};
pub use layout::{
    CLIENT_COLUMNS, CLIENT_FIELD_COUNT, CLIENT_FIELD_DELIMITER, DEBT_ACCOUNT, DEBT_LAYOUT,
    DEBT_RECORD_WIDTH, DebtField, DerivedField, FieldSpan, PACKED_FIELD, debt_output_columns,
};
