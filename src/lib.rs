pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::BudgetConfig, CliConfig};
pub use crate::core::{
    aggregator::build_table,
    catalog::Catalog,
    engine::{BudgetEngine, BudgetReport},
    exporter::{export_xlsx, ExportArtifact, XLSX_FILE_NAME, XLSX_MIME_TYPE},
    money::{format_currency, parse_price},
    session::BudgetSession,
};
pub use crate::domain::model::{BudgetRow, BudgetTable, DisplayRow, ExportFormat, RowKind, Unit};
pub use crate::utils::error::{BudgetError, Result};
