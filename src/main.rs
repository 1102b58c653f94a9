use clap::Parser;
use mk_orcamento::core::money::format_decimal;
use mk_orcamento::utils::error::ErrorSeverity;
use mk_orcamento::utils::{logger, validation::Validate};
use mk_orcamento::{build_table, BudgetConfig, BudgetEngine, Catalog, CliConfig, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting mk-orcamento");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if args.list_services {
        print_catalog(&BudgetConfig::catalog_from_file(&args.config));
        return Ok(());
    }

    tracing::info!("📁 Loading budget from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match BudgetConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load budget file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(output_path) = &args.output_path {
        config.set_output_path(output_path.clone());
        tracing::info!("🔧 Output path overridden to: {}", output_path);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let catalog = config.catalog();
    let session = config.build_session(&catalog)?;

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No file will be written");
        let table = build_table(session.rows());
        if table.is_empty() {
            println!("Selecione serviços para montar o orçamento.");
        } else {
            println!("{}", table);
            println!("Total: {}", format_decimal(table.grand_total));
        }
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path());
    let engine = BudgetEngine::new(storage, config);

    match engine.run(&session).await {
        Ok(Some(report)) => {
            println!("{}", report.table);
            println!("✅ Budget exported successfully!");
            for path in &report.written_files {
                println!("📁 {}", path);
            }
        }
        Ok(None) => {
            println!("Selecione serviços para montar o orçamento.");
        }
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    println!("📋 Serviços disponíveis:");
    for name in catalog.service_names() {
        println!("  {:<28} {}", name, catalog.default_unit_for(name));
    }
}
