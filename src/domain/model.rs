use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::money;

/// 可選單位，順序即下拉選單順序；第一個是查找失敗時的後備單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "mm")]
    Millimetre,
    #[serde(rename = "cm")]
    Centimetre,
    #[serde(rename = "m")]
    Metre,
    #[serde(rename = "m²")]
    SquareMetre,
    #[serde(rename = "m³")]
    CubicMetre,
    #[serde(rename = "un")]
    Piece,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "pacote")]
    Package,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::Millimetre,
        Unit::Centimetre,
        Unit::Metre,
        Unit::SquareMetre,
        Unit::CubicMetre,
        Unit::Piece,
        Unit::Kilogram,
        Unit::Litre,
        Unit::Package,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Millimetre => "mm",
            Unit::Centimetre => "cm",
            Unit::Metre => "m",
            Unit::SquareMetre => "m²",
            Unit::CubicMetre => "m³",
            Unit::Piece => "un",
            Unit::Kilogram => "kg",
            Unit::Litre => "l",
            Unit::Package => "pacote",
        }
    }

    pub fn fallback() -> Unit {
        Unit::ALL[0]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.label() == s)
            .ok_or_else(|| format!("Unknown unit: {}", s))
    }
}

/// 目錄項目；預設單位保留原始標籤，不在 `Unit` 內時查找會退回後備單位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    pub name: String,
    #[serde(rename = "unit")]
    pub default_unit: String,
}

impl ServiceCatalogEntry {
    pub fn new(name: impl Into<String>, default_unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_unit: default_unit.into(),
        }
    }
}

pub const DEFAULT_PRICE_TEXT: &str = "0,00";

/// 單一已選服務的輸入列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub service: String,
    pub unit: Unit,
    pub quantity: u32,
    unit_price_raw: String,
    unit_price: Decimal,
}

impl BudgetRow {
    pub fn new(service: impl Into<String>, unit: Unit) -> Self {
        Self {
            service: service.into(),
            unit,
            quantity: 0,
            unit_price_raw: DEFAULT_PRICE_TEXT.to_string(),
            unit_price: Decimal::ZERO,
        }
    }

    pub fn unit_price_raw(&self) -> &str {
        &self.unit_price_raw
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// 原始文字與解析值一起更新，兩者不會分歧
    pub fn set_unit_price(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        self.unit_price = money::parse_price(&raw);
        self.unit_price_raw = raw;
    }

    /// 超出 `Decimal` 範圍時回傳 None
    pub fn checked_line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }

    /// 溢位時停在 `Decimal::MAX` 並記錄警告
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or_else(|| {
            tracing::warn!(
                "⚠️ Line total of '{}' overflows ({} x {}), capped",
                self.service,
                self.quantity,
                self.unit_price
            );
            Decimal::MAX
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Item,
    Total,
}

/// 表格中已格式化的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub service: String,
    pub unit: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

impl DisplayRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            self.service.as_str(),
            self.unit.as_str(),
            self.quantity.as_str(),
            self.unit_price.as_str(),
            self.line_total.as_str(),
        ]
    }

    pub fn is_total(&self) -> bool {
        self.kind == RowKind::Total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetTable {
    pub rows: Vec<DisplayRow>,
    pub grand_total: Decimal,
    /// 某列或總計超出範圍而被截在 `Decimal::MAX`
    pub saturated: bool,
}

/// 匯出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .iter()
            .copied()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unsupported format: {}", s))
    }
}
