use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Spreadsheet export failed: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Budget has no selected services")]
    EmptyBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Export,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BudgetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BudgetError::ConfigValidationError { .. }
            | BudgetError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BudgetError::XlsxError(_)
            | BudgetError::CsvError(_)
            | BudgetError::SerializationError(_) => ErrorCategory::Export,
            BudgetError::IoError(_) => ErrorCategory::Storage,
            BudgetError::EmptyBudget => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BudgetError::EmptyBudget => ErrorSeverity::Low,
            BudgetError::ConfigValidationError { .. }
            | BudgetError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            BudgetError::XlsxError(_)
            | BudgetError::CsvError(_)
            | BudgetError::SerializationError(_) => ErrorSeverity::High,
            BudgetError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BudgetError::ConfigValidationError { field, .. } => {
                format!("Check the '{}' section of the budget file", field)
            }
            BudgetError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            BudgetError::XlsxError(_) => {
                "Shorten unusually long service names and export again".to_string()
            }
            BudgetError::CsvError(_) | BudgetError::SerializationError(_) => {
                "Try exporting only the xlsx format".to_string()
            }
            BudgetError::IoError(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            BudgetError::EmptyBudget => {
                "Add at least one [[services]] entry to the budget file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid budget configuration: {}", self),
            ErrorCategory::Export => format!("Could not generate the spreadsheet: {}", self),
            ErrorCategory::Storage => format!("Could not save the spreadsheet: {}", self),
            ErrorCategory::Input => "Selecione serviços para montar o orçamento.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_budget_is_low_severity() {
        let err = BudgetError::EmptyBudget;
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("Selecione"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: BudgetError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().contains("denied"));
    }
}
