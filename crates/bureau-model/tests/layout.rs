//! Tests for the packed-field layouts.

use bureau_model::{
    CLIENT_COLUMNS, DEBT_ACCOUNT, DEBT_LAYOUT, DEBT_RECORD_WIDTH, FieldSpan, RecordFamily,
    debt_output_columns,
};

#[test]
fn debt_layout_snapshot() {
    insta::assert_json_snapshot!(DEBT_LAYOUT);
}

#[test]
fn debt_output_columns_end_with_account_code() {
    assert_eq!(
        debt_output_columns(),
        vec![
            "Cod_SBS",
            "Cod_Emp",
            "Tipo_Credit",
            "Nivel2",
            "Moneda",
            "SubCodigoCuenta",
            "Condicion",
            "Val_Saldo",
            "Clasif_Deu",
            "Cod_Cuenta",
        ]
    );
    assert_eq!(DEBT_ACCOUNT.output_name, "Cod_Cuenta");
}

#[test]
fn single_positions_cover_one_character() {
    let singles: Vec<_> = DEBT_LAYOUT
        .iter()
        .filter(|field| matches!(field.span, FieldSpan::Single { .. }))
        .map(|field| (field.source_name, field.span.start(), field.span.width()))
        .collect();
    assert_eq!(singles, vec![("Moneda", 19, 1), ("ClasificacionDeuda", 41, 1)]);
    assert_eq!(DEBT_LAYOUT.last().map(|f| f.span.end()), Some(DEBT_RECORD_WIDTH));
}

#[test]
fn client_layout_starts_with_code_and_ends_with_second_name() {
    assert_eq!(CLIENT_COLUMNS.first(), Some(&"SBSCodigoCliente"));
    assert_eq!(CLIENT_COLUMNS.get(1), Some(&"SBSFechaReporte"));
    assert_eq!(CLIENT_COLUMNS.last(), Some(&"SBSNOMCLI2"));
}

#[test]
fn families_serialize_by_name() {
    let json = serde_json::to_string(&RecordFamily::ALL).unwrap();
    assert_eq!(json, r#"["Client","Debt"]"#);
}
