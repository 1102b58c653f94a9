use crate::domain::model::{ExportFormat, Unit};
use crate::utils::error::{BudgetError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unit_label(field_name: &str, label: &str) -> Result<Unit> {
    label
        .parse::<Unit>()
        .map_err(|_| BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: label.to_string(),
            reason: format!(
                "Unsupported unit. Valid units: {}",
                Unit::ALL
                    .iter()
                    .map(Unit::label)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}

pub fn validate_formats(field_name: &str, formats: &[String]) -> Result<Vec<ExportFormat>> {
    if formats.is_empty() {
        return Err(BudgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    let mut parsed = Vec::with_capacity(formats.len());
    for format in formats {
        let value = format
            .parse::<ExportFormat>()
            .map_err(|_| BudgetError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    ExportFormat::ALL
                        .iter()
                        .map(ExportFormat::extension)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })?;
        // 重複的格式只輸出一次
        if !parsed.contains(&value) {
            parsed.push(value);
        }
    }
    Ok(parsed)
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(BudgetError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Service selected more than once".to_string(),
            });
        }
    }
    Ok(())
}
