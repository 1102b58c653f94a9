pub mod aggregator;
pub mod catalog;
pub mod engine;
pub mod exporter;
pub mod money;
pub mod session;

pub use crate::domain::model::{BudgetRow, BudgetTable, DisplayRow, ExportFormat, Unit};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
