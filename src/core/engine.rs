use crate::core::aggregator::build_table;
use crate::core::exporter;
use crate::core::session::BudgetSession;
use crate::domain::model::BudgetTable;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;

/// 一次執行的結果：表格與寫出的檔案
#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub table: BudgetTable,
    pub written_files: Vec<String>,
}

pub struct BudgetEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BudgetEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// 沒有選取任何服務時不匯出，回傳 `Ok(None)`
    pub async fn run(&self, session: &BudgetSession<'_>) -> Result<Option<BudgetReport>> {
        tracing::info!("📋 Building budget table for {} services", session.len());
        let table = build_table(session.rows());

        if table.is_empty() {
            tracing::info!("ℹ️ Selecione serviços para montar o orçamento.");
            return Ok(None);
        }

        if let Some(total) = table.total_row() {
            tracing::info!("💰 Grand total: {}", total.line_total);
        }

        let mut written_files = Vec::new();
        for format in self.config.output_formats() {
            let artifact = exporter::export(&table, *format)?;
            tracing::debug!(
                "Writing {} ({}, {} bytes) to storage",
                artifact.file_name,
                artifact.mime_type,
                artifact.data.len()
            );
            self.storage
                .write_file(&artifact.file_name, &artifact.data)
                .await?;

            let location = self.storage.location(&artifact.file_name);
            tracing::info!("📁 Saved {}", location);
            written_files.push(location);
        }

        Ok(Some(BudgetReport {
            table,
            written_files,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::domain::model::ExportFormat;
    use crate::utils::error::BudgetError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail: bool,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail {
                return Err(BudgetError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("Cannot write {}", path),
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> String {
            format!("memory://{}", path)
        }
    }

    struct MockConfig {
        formats: Vec<ExportFormat>,
    }

    impl ConfigProvider for MockConfig {
        fn output_formats(&self) -> &[ExportFormat] {
            &self.formats
        }
    }

    fn config(formats: &[ExportFormat]) -> MockConfig {
        MockConfig {
            formats: formats.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_run_writes_every_format() {
        let catalog = Catalog::standard();
        let mut session = BudgetSession::new(&catalog);
        session.select("REBOCO").quantity = 2;
        session.set_unit_price("REBOCO", "10,00");

        let storage = MockStorage::new();
        let engine = BudgetEngine::new(
            storage.clone(),
            config(&[ExportFormat::Xlsx, ExportFormat::Csv]),
        );

        let report = engine.run(&session).await.unwrap().unwrap();

        assert_eq!(
            report.written_files,
            vec![
                "memory://orcamento_mk_construcoes.xlsx".to_string(),
                "memory://orcamento_mk_construcoes.csv".to_string(),
            ]
        );
        assert_eq!(report.table.total_row().unwrap().line_total, "R$ 20,00");

        let xlsx = storage.get_file("orcamento_mk_construcoes.xlsx").await.unwrap();
        assert_eq!(&xlsx[..2], b"PK");
        assert!(storage.get_file("orcamento_mk_construcoes.csv").await.is_some());
        assert!(storage.get_file("orcamento_mk_construcoes.json").await.is_none());
    }

    #[tokio::test]
    async fn test_run_with_empty_session_skips_export() {
        let catalog = Catalog::standard();
        let session = BudgetSession::new(&catalog);
        let storage = MockStorage::new();
        let engine = BudgetEngine::new(storage.clone(), config(&[ExportFormat::Xlsx]));

        assert!(engine.run(&session).await.unwrap().is_none());
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let catalog = Catalog::standard();
        let mut session = BudgetSession::new(&catalog);
        session.select("FORRO");

        let engine = BudgetEngine::new(MockStorage::failing(), config(&[ExportFormat::Xlsx]));
        let err = engine.run(&session).await.unwrap_err();

        assert!(matches!(err, BudgetError::IoError(_)));
    }
}
