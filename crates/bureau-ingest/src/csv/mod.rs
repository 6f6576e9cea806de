//! CSV reading utilities.

mod reader;

pub use reader::{MAX_INPUT_FILE_SIZE, check_file_size, read_csv_table, validate_encoding};
