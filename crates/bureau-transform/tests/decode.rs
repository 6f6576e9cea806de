//! Tests for client and debt decoding.

use bureau_ingest::partition_records;
use bureau_model::{CLIENT_COLUMNS, debt_output_columns};
use bureau_transform::{
    TransformError, decode_client_records, decode_debt_records, transform,
};
use polars::prelude::{DataFrame, NamedFrom, Series};
use proptest::prelude::*;

const FULL_DEBT: &str = "2000000012ABCDE01NNX123456789AB123456EFGHZ";

fn packed(values: &[&str]) -> DataFrame {
    DataFrame::new(vec![Series::new("Field_1".into(), values.to_vec()).into()]).unwrap()
}

fn cell(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .get(row)
        .map(str::to_string)
}

#[test]
fn test_client_letters_decode_in_order() {
    let letters = "1|A|B|C|D|E|F|G|H|I|J|K|L|M|N|O|P|Q";
    let table = decode_client_records(&packed(&[letters])).unwrap();

    let names: Vec<&str> = table
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, CLIENT_COLUMNS.to_vec());
    assert_eq!(cell(&table, "SBSCodigoCliente", 0).as_deref(), Some("1"));
    assert_eq!(cell(&table, "SBSFechaReporte", 0).as_deref(), Some("A"));
    assert_eq!(cell(&table, "SBSNOMCLI2", 0).as_deref(), Some("Q"));
}

#[test]
fn test_client_wrong_part_counts_rejected() {
    let seventeen = format!("1{}", "|x".repeat(16));
    let nineteen = format!("1{}", "|x".repeat(18));

    for (packed_row, expected_found) in [(seventeen, 17), (nineteen, 19)] {
        let err = decode_client_records(&packed(&[&packed_row])).unwrap_err();
        match err {
            TransformError::ClientFieldCount {
                row, expected, found, ..
            } => {
                assert_eq!(row, 0);
                assert_eq!(expected, 18);
                assert_eq!(found, expected_found);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_debt_full_record_decodes() {
    let decoded = decode_debt_records(&packed(&[FULL_DEBT])).unwrap();
    let table = &decoded.table;

    let names: Vec<&str> = table
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, debt_output_columns());
    assert_eq!(decoded.short_rows, 0);

    let expect = [
        ("Cod_SBS", "2000000012"),
        ("Cod_Emp", "ABCDE"),
        ("Tipo_Credit", "01"),
        ("Nivel2", "NN"),
        ("Moneda", "X"),
        ("SubCodigoCuenta", "123456789AB"),
        ("Condicion", "123456"),
        ("Val_Saldo", "EFGH"),
        ("Clasif_Deu", "Z"),
        ("Cod_Cuenta", "NNX123456789AB"),
    ];
    for (column, value) in expect {
        assert_eq!(cell(table, column, 0).as_deref(), Some(value), "{column}");
    }
}

#[test]
fn test_debt_account_code_is_plain_concatenation() {
    let row = "2000000012000010100 0000000007000000   0 ";
    let row = format!("{row}{}", " ".repeat(42 - row.chars().count()));
    let decoded = decode_debt_records(&packed(&[&row])).unwrap();

    let nivel2 = cell(&decoded.table, "Nivel2", 0).unwrap();
    let moneda = cell(&decoded.table, "Moneda", 0).unwrap();
    let sub = cell(&decoded.table, "SubCodigoCuenta", 0).unwrap();
    assert_eq!(
        cell(&decoded.table, "Cod_Cuenta", 0),
        Some(format!("{nivel2}{moneda}{sub}"))
    );
    assert_eq!(moneda, " ");
}

#[test]
fn test_debt_short_record_truncates() {
    // 25 characters: SubCodigoCuenta is cut short, later ranges are empty and
    // the single-position fields past the end are null.
    let short = "2000000012ABCDE01NN";
    let short = format!("{short}X12345");
    let decoded = decode_debt_records(&packed(&[&short])).unwrap();
    let table = &decoded.table;

    assert_eq!(decoded.short_rows, 1);
    assert_eq!(cell(table, "Moneda", 0).as_deref(), Some("X"));
    assert_eq!(cell(table, "SubCodigoCuenta", 0).as_deref(), Some("12345"));
    assert_eq!(cell(table, "Condicion", 0).as_deref(), Some(""));
    assert_eq!(cell(table, "Clasif_Deu", 0), None);
    assert_eq!(cell(table, "Cod_Cuenta", 0).as_deref(), Some("NNX12345"));

    let shorter = decode_debt_records(&packed(&["2000000012ABCDE01NN"])).unwrap();
    assert_eq!(cell(&shorter.table, "Moneda", 0), None);
    assert_eq!(cell(&shorter.table, "Cod_Cuenta", 0), None);
}

#[test]
fn test_debt_keeps_other_input_columns_first() {
    let df = DataFrame::new(vec![
        Series::new("Field_1".into(), vec![FULL_DEBT]).into(),
        Series::new("Lote".into(), vec!["L1"]).into(),
    ])
    .unwrap();
    let decoded = decode_debt_records(&df).unwrap();

    let names: Vec<&str> = decoded
        .table
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names.first(), Some(&"Lote"));
    assert!(!names.contains(&"Field_1"));
    assert_eq!(names.len(), 11);
}

#[test]
fn test_transform_mixed_file() {
    let client = "1|A|B|C|D|E|F|G|H|I|J|K|L|M|N|O|P|Q";
    let raw = packed(&[client, FULL_DEBT, "9TRAILER", client, FULL_DEBT]);
    let records = partition_records(&raw).unwrap();

    let tables = transform(&records).unwrap();

    assert_eq!(tables.clients.shape(), (2, 18));
    assert_eq!(tables.debts.shape(), (2, 10));
    assert_eq!(tables.short_debt_rows, 0);
}

#[test]
fn test_transform_empty_partitions() {
    let records = partition_records(&packed(&[])).unwrap();
    let tables = transform(&records).unwrap();

    assert_eq!(tables.clients.shape(), (0, 18));
    assert_eq!(tables.debts.shape(), (0, 10));
}

fn field(width: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[0-9A-Z ]{{{width}}}")).unwrap()
}

proptest! {
    #[test]
    fn debt_offsets_round_trip(
        sbs in field(9),
        emp in field(5),
        tipo in field(2),
        nivel2 in field(2),
        moneda in field(1),
        sub in field(11),
        condicion in field(6),
        saldo in field(4),
        clasif in field(1),
    ) {
        let sbs = format!("2{sbs}");
        let record = [&sbs, &emp, &tipo, &nivel2, &moneda, &sub, &condicion, &saldo, &clasif]
            .iter()
            .map(|part| part.as_str())
            .collect::<String>();
        prop_assert_eq!(record.chars().count(), 42);

        let decoded = decode_debt_records(&packed(&[&record])).unwrap();
        let table = &decoded.table;

        prop_assert_eq!(cell(table, "Cod_SBS", 0), Some(sbs));
        prop_assert_eq!(cell(table, "Cod_Emp", 0), Some(emp));
        prop_assert_eq!(cell(table, "Tipo_Credit", 0), Some(tipo));
        prop_assert_eq!(cell(table, "Moneda", 0), Some(moneda.clone()));
        prop_assert_eq!(cell(table, "Condicion", 0), Some(condicion));
        prop_assert_eq!(cell(table, "Val_Saldo", 0), Some(saldo));
        prop_assert_eq!(cell(table, "Clasif_Deu", 0), Some(clasif));
        prop_assert_eq!(cell(table, "Cod_Cuenta", 0), Some(format!("{nivel2}{moneda}{sub}")));
        prop_assert_eq!(cell(table, "Nivel2", 0), Some(nivel2));
        prop_assert_eq!(cell(table, "SubCodigoCuenta", 0), Some(sub));
    }
}
