//! Bureau file ingestion.
//!
//! Reads a delimited bureau file into a Polars DataFrame (every column as
//! text) and partitions its rows into client and debt records by the first
//! character of the packed field.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use bureau_ingest::{ExtractOptions, extract_records};
//!
//! let records = extract_records(Path::new("server_inputs/file.ope"), ExtractOptions::default())?;
//! println!("{} clients, {} debts", records.clients.height(), records.debts.height());
//! ```

mod csv;
mod error;
mod extract;
mod partition;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{MAX_INPUT_FILE_SIZE, check_file_size, read_csv_table, validate_encoding};

// === Extraction ===
pub use extract::{ExtractOptions, extract_records};
pub use partition::{ExtractedRecords, partition_records};
