//! Record families selected by the discriminator character.

use serde::Serialize;

/// Destination table for debt records. Replaced on every load.
pub const DEBT_TABLE: &str = "tabla_deudas";

/// The two record families carried by a bureau file.
///
/// The first character of the packed field selects the family. Rows whose
/// first character matches neither discriminator belong to no family and are
/// dropped during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RecordFamily {
    /// Client identification rows (discriminator `1`).
    Client,
    /// Debt detail rows (discriminator `2`).
    Debt,
}

impl RecordFamily {
    pub const ALL: [RecordFamily; 2] = [RecordFamily::Client, RecordFamily::Debt];

    /// Leading character that marks a row as belonging to this family.
    pub const fn discriminator(self) -> char {
        match self {
            RecordFamily::Client => '1',
            RecordFamily::Debt => '2',
        }
    }

    /// Classify a packed value by its first character.
    ///
    /// ```
    /// use bureau_model::RecordFamily;
    ///
    /// assert_eq!(RecordFamily::classify("1|A"), Some(RecordFamily::Client));
    /// assert_eq!(RecordFamily::classify("2000"), Some(RecordFamily::Debt));
    /// assert_eq!(RecordFamily::classify("3xyz"), None);
    /// assert_eq!(RecordFamily::classify(""), None);
    /// ```
    pub fn classify(packed: &str) -> Option<Self> {
        let first = packed.chars().next()?;
        Self::ALL
            .into_iter()
            .find(|family| family.discriminator() == first)
    }

    /// CSV file name written for this family.
    pub const fn output_file(self) -> &'static str {
        match self {
            RecordFamily::Client => "clientes.csv",
            RecordFamily::Debt => "deudas.csv",
        }
    }

    /// Database table loaded for this family, if any.
    ///
    /// Client rows are only written to CSV.
    pub const fn table_name(self) -> Option<&'static str> {
        match self {
            RecordFamily::Client => None,
            RecordFamily::Debt => Some(DEBT_TABLE),
        }
    }

    /// Human-readable label used in logs and summaries.
    pub const fn label(self) -> &'static str {
        match self {
            RecordFamily::Client => "clients",
            RecordFamily::Debt => "debts",
        }
    }
}

impl std::fmt::Display for RecordFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
