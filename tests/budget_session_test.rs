use mk_orcamento::{
    build_table, export_xlsx, format_currency, parse_price, BudgetError, BudgetSession, Catalog,
    RowKind, Unit,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 模擬表單操作：選取、修改、取消選取後重新計算
#[test]
fn test_form_edits_recompute_table() {
    let catalog = Catalog::standard();
    let mut session = BudgetSession::new(&catalog);

    session.select("LIMPEZA");
    session.select("PONTO DE ENERGIA");
    session.set_quantity("LIMPEZA", 50);
    session.set_unit_price("LIMPEZA", "4,5");
    session.set_quantity("PONTO DE ENERGIA", 4);
    session.set_unit_price("PONTO DE ENERGIA", "120,00");

    let table = build_table(session.rows());
    assert_eq!(table.grand_total, dec!(705.00));
    assert_eq!(table.total_row().unwrap().line_total, "R$ 705,00");

    session.set_unit_price("PONTO DE ENERGIA", "cento e vinte");
    session.set_unit("LIMPEZA", Unit::Metre);
    let table = build_table(session.rows());
    assert_eq!(table.grand_total, dec!(225.00));
    assert_eq!(table.rows[0].unit, "m");
    assert_eq!(table.rows[1].unit_price, "R$ 0,00");

    session.deselect("LIMPEZA");
    let table = build_table(session.rows());
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].service, "PONTO DE ENERGIA");
    assert_eq!(table.rows[1].kind, RowKind::Total);
    assert_eq!(table.grand_total, Decimal::ZERO);

    session.deselect("PONTO DE ENERGIA");
    let table = build_table(session.rows());
    assert!(table.is_empty());
    assert!(matches!(export_xlsx(&table), Err(BudgetError::EmptyBudget)));
}

#[test]
fn test_grand_total_matches_arithmetic_sum() {
    let catalog = Catalog::standard();
    let mut session = BudgetSession::new(&catalog);
    let inputs = [
        ("DEMOLIÇÃO", 35, "18,00"),
        ("REBOCO", 120, "32,50"),
        ("PONTO DE ENERGIA", 6, "85"),
        ("PINTURA", 210, "22,9"),
        ("FORRO", 17, "1,005"),
    ];

    let mut expected = Decimal::ZERO;
    for (service, quantity, price) in inputs {
        session.select(service).quantity = quantity;
        session.set_unit_price(service, price);
        expected += Decimal::from(quantity) * parse_price(price);
    }

    let table = build_table(session.rows());
    assert_eq!(table.grand_total, expected);
    assert_eq!(expected, dec!(9866.17));
    assert_eq!(table.total_row().unwrap().line_total, format_currency(expected));
    assert_eq!(format_currency(expected), "R$ 9.866,17");
}
