use clap::Parser;
use pinyin_annotate::config::setup_config::SetupConfig;
use pinyin_annotate::core::setup::SetupRunner;
use pinyin_annotate::utils::{logger, validation::Validate};
use pinyin_annotate::{
    AnnotateConfig, AnnotateEngine, AnnotatePipeline, Cli, Command, LocalStorage, SetupArgs,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting pinyin-annotate CLI");

    let monitor_enabled = cli.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match cli.command {
        Command::Annotate(config) => run_annotate(config, monitor_enabled).await,
        Command::Setup(args) => run_setup(args, monitor_enabled).await,
    }

    Ok(())
}

async fn run_annotate(config: AnnotateConfig, monitor_enabled: bool) {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new();
    let pipeline = AnnotatePipeline::new(storage, config);
    let engine = AnnotateEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Annotation completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Annotation completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Annotation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = exit_code_for(&e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn run_setup(args: SetupArgs, monitor_enabled: bool) {
    // 載入 TOML 計畫，沒有設定檔時採用原始安裝腳本的預設
    let mut config = match &args.config {
        Some(path) => match SetupConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load setup config '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => SetupConfig::default(),
    };

    // 命令列覆蓋設定檔
    if let Some(env_dir) = args.env_dir {
        tracing::info!("🔧 Environment dir overridden to: {}", env_dir);
        config.environment.dir = env_dir;
    }
    if !args.packages.is_empty() {
        tracing::info!("🔧 Packages overridden to: {}", args.packages.join(", "));
        config.packages = args.packages;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let plan = config.plan();

    if args.dry_run {
        println!("Dry run - {} steps planned:", plan.len());
        for (index, step) in plan.iter().enumerate() {
            println!("  [{}/{}] {}: {}", index + 1, plan.len(), step.name, step.command_line());
        }
        return;
    }

    let execution_id = format!("setup_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"));
    let mut runner = SetupRunner::new(execution_id).with_monitoring(monitor_enabled);
    for step in plan {
        runner.add_step(step);
    }

    match runner.execute_all().await {
        Ok(reports) => {
            let summary = SetupRunner::get_execution_summary(&reports);
            tracing::info!(
                "✅ Setup finished: {}",
                serde_json::to_string(&summary).unwrap_or_default()
            );
            println!("Setup complete!");
            println!(
                "📁 Virtual environment ready at: {}",
                config.environment.dir
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Setup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = exit_code_for(&e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

// 根據錯誤嚴重程度決定退出碼，Low 視為警告不會中止
fn exit_code_for(e: &pinyin_annotate::AnnotateError) -> i32 {
    match e.severity() {
        pinyin_annotate::utils::error::ErrorSeverity::Low => 0,
        pinyin_annotate::utils::error::ErrorSeverity::Medium => 2,
        pinyin_annotate::utils::error::ErrorSeverity::High => 1,
        pinyin_annotate::utils::error::ErrorSeverity::Critical => 3,
    }
}
