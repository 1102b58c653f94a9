use crate::core::catalog::Catalog;
use crate::core::session::BudgetSession;
use crate::core::ConfigProvider;
use crate::domain::model::{ExportFormat, ServiceCatalogEntry, DEFAULT_PRICE_TEXT};
use crate::utils::error::{BudgetError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub output: OutputConfig,
    #[serde(default)]
    pub catalog: Vec<ServiceCatalogEntry>,
    #[serde(default)]
    pub services: Vec<ServiceInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(skip)]
    resolved_formats: Vec<ExportFormat>,
}

/// 表單上一個已選服務的輸入值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    pub price: Option<String>,
}

fn default_formats() -> Vec<String> {
    vec![ExportFormat::Xlsx.extension().to_string()]
}

impl BudgetConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BudgetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: BudgetConfig =
            toml::from_str(&processed_content).map_err(|e| BudgetError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.output.resolved_formats =
            validation::validate_formats("output.formats", &config.output.formats)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BudgetError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("output.path", &self.output.path)?;

        for entry in &self.catalog {
            validation::validate_non_empty_string("catalog.name", &entry.name)?;
        }

        for service in &self.services {
            validation::validate_non_empty_string("services.name", &service.name)?;
            if let Some(unit) = &service.unit {
                validation::validate_unit_label(&format!("services.{}.unit", service.name), unit)?;
            }
        }

        validation::validate_unique_names(
            "services.name",
            self.services.iter().map(|s| s.name.as_str()),
        )?;

        Ok(())
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn set_output_path(&mut self, path: impl Into<String>) {
        self.output.path = path.into();
    }

    /// 標準目錄加上檔案中的額外服務
    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::standard();
        catalog.extend(self.catalog.iter().cloned());
        catalog
    }

    /// 列出服務用的目錄：預算檔可讀時併入其 `[[catalog]]`，
    /// 否則只有標準目錄
    pub fn catalog_from_file<P: AsRef<Path>>(path: P) -> Catalog {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(config) => config.catalog(),
            Err(e) => {
                if path.exists() {
                    tracing::warn!(
                        "⚠️ Ignoring extra services in '{}': {}",
                        path.display(),
                        e
                    );
                } else {
                    tracing::debug!(
                        "No budget file at '{}', standard catalog only",
                        path.display()
                    );
                }
                Catalog::standard()
            }
        }
    }

    /// 依檔案順序選取服務並填入輸入值
    pub fn build_session<'c>(&self, catalog: &'c Catalog) -> Result<BudgetSession<'c>> {
        let mut session = BudgetSession::new(catalog);

        for service in &self.services {
            let row = session.select(&service.name);
            if let Some(unit) = &service.unit {
                let field = format!("services.{}.unit", service.name);
                row.unit = validation::validate_unit_label(&field, unit)?;
            }
            row.quantity = service.quantity;
            row.set_unit_price(service.price.as_deref().unwrap_or(DEFAULT_PRICE_TEXT));
        }

        Ok(session)
    }
}

impl ConfigProvider for BudgetConfig {
    fn output_formats(&self) -> &[ExportFormat] {
        &self.output.resolved_formats
    }
}

impl Validate for BudgetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
