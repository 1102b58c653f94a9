//! 將表格輸出為試算表 (xlsx) 以及 CSV / JSON。
//!
//! 匯出只產生記憶體中的緩衝區；存檔或下載由呼叫端負責。

use crate::core::aggregator::{HEADERS, QUANTITY_COLUMN};
use crate::domain::model::{BudgetTable, DisplayRow, ExportFormat};
use crate::utils::error::{BudgetError, Result};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use serde::Serialize;

pub const SHEET_NAME: &str = "Orçamento";
pub const FILE_STEM: &str = "orcamento_mk_construcoes";
pub const XLSX_FILE_NAME: &str = "orcamento_mk_construcoes.xlsx";
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const COLUMN_PADDING: usize = 5;
pub const CSV_DELIMITER: u8 = b';';

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

pub fn file_name(format: ExportFormat) -> String {
    format!("{}.{}", FILE_STEM, format.extension())
}

pub fn export(table: &BudgetTable, format: ExportFormat) -> Result<ExportArtifact> {
    let data = match format {
        ExportFormat::Xlsx => export_xlsx(table)?,
        ExportFormat::Csv => export_csv(table)?,
        ExportFormat::Json => export_json(table)?,
    };

    tracing::debug!("Rendered {} ({} bytes)", file_name(format), data.len());

    Ok(ExportArtifact {
        format,
        file_name: file_name(format),
        mime_type: format.mime_type(),
        data,
    })
}

/// 每欄寬度 = max(最長儲存格, 表頭) + 5，含總計列
pub fn column_widths(table: &BudgetTable) -> [usize; 5] {
    table
        .max_cell_lengths()
        .map(|length| length + COLUMN_PADDING)
}

fn ensure_not_empty(table: &BudgetTable) -> Result<()> {
    if table.is_empty() {
        return Err(BudgetError::EmptyBudget);
    }
    Ok(())
}

pub fn export_xlsx(table: &BudgetTable) -> Result<Vec<u8>> {
    ensure_not_empty(table)?;

    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::Top);
    // 只有數量欄置中
    let centered = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, width) in column_widths(table).iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width as f64)?;
        if usize::from(col) == QUANTITY_COLUMN {
            worksheet.set_column_format(col, &centered)?;
        }
    }

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in table.rows.iter().enumerate() {
        let sheet_row = (index + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            // 總計列的空白欄位不寫入
            if cell.is_empty() {
                continue;
            }
            let sheet_col = col as u16;
            if col == QUANTITY_COLUMN {
                match cell.parse::<u32>() {
                    Ok(quantity) => {
                        worksheet.write_number_with_format(
                            sheet_row,
                            sheet_col,
                            f64::from(quantity),
                            &centered,
                        )?;
                    }
                    Err(_) => {
                        worksheet.write_string_with_format(sheet_row, sheet_col, *cell, &centered)?;
                    }
                }
            } else {
                worksheet.write_string(sheet_row, sheet_col, *cell)?;
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    tracing::debug!(
        "Workbook '{}' built with {} rows",
        SHEET_NAME,
        table.rows.len()
    );
    Ok(buffer)
}

pub fn export_csv(table: &BudgetTable) -> Result<Vec<u8>> {
    ensure_not_empty(table)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for row in &table.rows {
        writer.write_record(row.cells())?;
    }

    writer
        .into_inner()
        .map_err(|e| BudgetError::IoError(e.into_error()))
}

#[derive(Serialize)]
struct JsonBudget<'a> {
    sheet: &'a str,
    headers: [&'a str; 5],
    rows: &'a [DisplayRow],
    grand_total: Decimal,
}

pub fn export_json(table: &BudgetTable) -> Result<Vec<u8>> {
    ensure_not_empty(table)?;

    let document = JsonBudget {
        sheet: SHEET_NAME,
        headers: HEADERS,
        rows: &table.rows,
        grand_total: table.grand_total,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}
