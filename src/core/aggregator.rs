use crate::core::money::format_currency;
use crate::domain::model::{BudgetRow, BudgetTable, DisplayRow, RowKind};
use rust_decimal::Decimal;
use std::fmt;

pub const HEADERS: [&str; 5] = [
    "Serviço",
    "Unidade",
    "Quantidade",
    "Valor Unitário (R$)",
    "Valor Total (R$)",
];

pub const QUANTITY_COLUMN: usize = 2;

pub const TOTAL_LABEL: &str = "VALOR TOTAL";

/// 由目前的輸入列重建表格；總計由數值加總，最後才格式化
pub fn build_table(rows: &[BudgetRow]) -> BudgetTable {
    if rows.is_empty() {
        return BudgetTable {
            rows: Vec::new(),
            grand_total: Decimal::ZERO,
            saturated: false,
        };
    }

    let mut display_rows = Vec::with_capacity(rows.len() + 1);
    let mut grand_total = Decimal::ZERO;
    let mut saturated = false;

    for row in rows {
        let line_total = match row.checked_line_total() {
            Some(total) => total,
            None => {
                saturated = true;
                row.line_total()
            }
        };
        grand_total = match grand_total.checked_add(line_total) {
            Some(total) => total,
            None => {
                saturated = true;
                Decimal::MAX
            }
        };

        tracing::debug!(
            "{}: {} {} x {} = {}",
            row.service,
            row.quantity,
            row.unit,
            row.unit_price(),
            line_total
        );

        display_rows.push(DisplayRow {
            kind: RowKind::Item,
            service: row.service.clone(),
            unit: row.unit.label().to_string(),
            quantity: row.quantity.to_string(),
            unit_price: format_currency(row.unit_price()),
            line_total: format_currency(line_total),
        });
    }

    display_rows.push(DisplayRow {
        kind: RowKind::Total,
        service: TOTAL_LABEL.to_string(),
        unit: String::new(),
        quantity: String::new(),
        unit_price: String::new(),
        line_total: format_currency(grand_total),
    });

    if saturated {
        tracing::warn!(
            "⚠️ Grand total exceeds the representable range, capped at {}",
            grand_total
        );
    }

    BudgetTable {
        rows: display_rows,
        grand_total,
        saturated,
    }
}

impl BudgetTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn item_rows(&self) -> impl Iterator<Item = &DisplayRow> {
        self.rows.iter().filter(|row| !row.is_total())
    }

    pub fn total_row(&self) -> Option<&DisplayRow> {
        self.rows.last().filter(|row| row.is_total())
    }

    /// 每欄最長字元數 (含表頭)
    pub fn max_cell_lengths(&self) -> [usize; 5] {
        let mut lengths = HEADERS.map(|header| header.chars().count());
        for row in &self.rows {
            for (length, cell) in lengths.iter_mut().zip(row.cells()) {
                *length = (*length).max(cell.chars().count());
            }
        }
        lengths
    }
}

fn write_grid_line(
    f: &mut fmt::Formatter<'_>,
    cells: [&str; 5],
    widths: &[usize; 5],
) -> fmt::Result {
    let mut line = String::new();
    for (col, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if col > 0 {
            line.push_str(" | ");
        }
        let padding = width - cell.chars().count();
        if col == QUANTITY_COLUMN {
            let left = padding / 2;
            line.push_str(&" ".repeat(left));
            line.push_str(cell);
            line.push_str(&" ".repeat(padding - left));
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(padding));
        }
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for BudgetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.max_cell_lengths();

        write_grid_line(f, HEADERS, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &self.rows {
            write_grid_line(f, row.cells(), &widths)?;
        }
        Ok(())
    }
}
