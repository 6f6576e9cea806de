//! CLI library components for the bureau ETL.

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use error::{EtlError, MalformedInput};
pub use types::{DatabaseTarget, EntitySummary, RunOptions, RunResult};
