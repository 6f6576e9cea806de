//! Packed-field layouts for both record families.
//!
//! Client rows carry a `|`-delimited list of exactly [`CLIENT_FIELD_COUNT`]
//! values. Debt rows carry fixed character positions described by
//! [`DEBT_LAYOUT`]. Positions count characters, not bytes.

use serde::Serialize;

/// Input column holding the packed record string.
pub const PACKED_FIELD: &str = "Field_1";

/// Delimiter between client sub-fields.
pub const CLIENT_FIELD_DELIMITER: char = '|';

/// Column names assigned to the client sub-fields, in packed order.
pub const CLIENT_COLUMNS: [&str; 18] = [
    "SBSCodigoCliente",
    "SBSFechaReporte",
    "SBSRucCliente",
    "SBSTipoDocumento",
    "SBSNumeroDocumento",
    "SBSTipoPer",
    "SBSTipoEmpresa",
    "SBSNumeroEntidad",
    "SBSSalNor",
    "SBSSalCPP",
    "SBSSalDEF",
    "SBSSalDUD",
    "SBSSalAPER",
    "SBSAPEPAT",
    "SBSAPEMAT",
    "SBSAPECAS",
    "SBSNOMCLI",
    "SBSNOMCLI2",
];

/// Number of sub-fields every client row must split into.
pub const CLIENT_FIELD_COUNT: usize = CLIENT_COLUMNS.len();

/// Character span of one debt sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSpan {
    /// Half-open range `[start, end)`. Truncated when the value is short.
    Range { start: usize, end: usize },
    /// A single character. Absent when the value is short.
    Single { index: usize },
}

impl FieldSpan {
    /// First character position covered by the span.
    pub const fn start(self) -> usize {
        match self {
            FieldSpan::Range { start, .. } => start,
            FieldSpan::Single { index } => index,
        }
    }

    /// One past the last character position covered by the span.
    pub const fn end(self) -> usize {
        match self {
            FieldSpan::Range { end, .. } => end,
            FieldSpan::Single { index } => index + 1,
        }
    }

    pub const fn width(self) -> usize {
        self.end() - self.start()
    }
}

/// One decoded debt sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DebtField {
    /// Name the value is decoded under.
    pub source_name: &'static str,
    /// Name the column carries in the output table.
    pub output_name: &'static str,
    pub span: FieldSpan,
}

const fn range(
    source_name: &'static str,
    output_name: &'static str,
    start: usize,
    end: usize,
) -> DebtField {
    DebtField {
        source_name,
        output_name,
        span: FieldSpan::Range { start, end },
    }
}

const fn single(
    source_name: &'static str,
    output_name: &'static str,
    index: usize,
) -> DebtField {
    DebtField {
        source_name,
        output_name,
        span: FieldSpan::Single { index },
    }
}

/// Fixed-position layout of a debt record, in output order.
pub const DEBT_LAYOUT: [DebtField; 9] = [
    range("CodigoSBS", "Cod_SBS", 0, 10),
    range("CodigoEmpresa", "Cod_Emp", 10, 15),
    range("TipoCredito", "Tipo_Credit", 15, 17),
    range("Nivel2", "Nivel2", 17, 19),
    single("Moneda", "Moneda", 19),
    range("SubCodigoCuenta", "SubCodigoCuenta", 20, 31),
    range("Condicion", "Condicion", 31, 37),
    range("ValorSaldo", "Val_Saldo", 37, 41),
    single("ClasificacionDeuda", "Clasif_Deu", 41),
];

/// Characters needed for every debt span to be fully populated.
pub const DEBT_RECORD_WIDTH: usize = 42;

/// Derived account code column (`Nivel2 + Moneda + SubCodigoCuenta`).
pub const DEBT_ACCOUNT: DerivedField = DerivedField {
    source_name: "CodigoCuenta",
    output_name: "Cod_Cuenta",
    parts: [3, 4, 5],
};

/// A debt column built by concatenating other decoded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedField {
    pub source_name: &'static str,
    pub output_name: &'static str,
    /// Positions in [`DEBT_LAYOUT`] of the concatenated fields, in order.
    pub parts: [usize; 3],
}

impl DerivedField {
    /// Source names of the concatenated fields.
    pub fn part_names(&self) -> [&'static str; 3] {
        self.parts.map(|index| DEBT_LAYOUT[index].source_name)
    }
}

/// Output column names of a decoded debt table, decoded fields then derived.
pub fn debt_output_columns() -> Vec<&'static str> {
    DEBT_LAYOUT
        .iter()
        .map(|field| field.output_name)
        .chain(std::iter::once(DEBT_ACCOUNT.output_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_layout_is_contiguous() {
        let mut expected_start = 0;
        for field in DEBT_LAYOUT {
            assert_eq!(field.span.start(), expected_start, "{}", field.source_name);
            expected_start = field.span.end();
        }
        assert_eq!(expected_start, DEBT_RECORD_WIDTH);
    }

    #[test]
    fn derived_parts_resolve() {
        assert_eq!(
            DEBT_ACCOUNT.part_names(),
            ["Nivel2", "Moneda", "SubCodigoCuenta"]
        );
    }

    #[test]
    fn client_columns_are_unique() {
        let mut names = CLIENT_COLUMNS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CLIENT_FIELD_COUNT);
    }
}
