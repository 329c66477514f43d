use clap::Parser;
use disease_risk::app::shell;
use disease_risk::config::toml_config::TomlConfig;
use disease_risk::config::{Command, OutputFormat, PredictArgs};
use disease_risk::utils::error::{ErrorCategory, ErrorSeverity};
use disease_risk::utils::logger;
use disease_risk::{
    CliConfig, LocalStorage, ModelConfig, ModelRegistry, Outcome, PredictError, RawFields,
    RiskDispatcher,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 設定檔要先讀，logging 區段會影響日誌初始化
    let file_config = match cli.load_file_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(exit_code(&e));
        }
    };

    let json_logs = cli.json_logs || file_config.as_ref().is_some_and(|c| c.json_logs());
    let level = file_config.as_ref().and_then(|c| c.log_level());
    if json_logs {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("Starting disease-risk CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli, file_config).await {
        report_error(&e);
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: &CliConfig, file_config: Option<TomlConfig>) -> disease_risk::Result<()> {
    match &cli.command {
        Command::Conditions => {
            print!("{}", shell::render_conditions());
        }
        Command::Check => {
            let config = cli.model_config(file_config)?;
            let dispatcher = start(&config).await?;
            for condition in dispatcher.registry().conditions() {
                println!("✅ {} model ready", condition);
            }
            println!("📁 Model directory: {}", config.model_dir);
        }
        Command::Predict(args) => {
            let dispatcher = start(&cli.model_config(file_config)?).await?;
            let outcome = predict_once(&dispatcher, args)?;
            print_outcome(&outcome, args.format)?;
        }
        Command::Interactive { condition, format } => {
            let dispatcher = start(&cli.model_config(file_config)?).await?;
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            let outcome = shell::run_interactive(&dispatcher, *condition, &mut input, &mut output)?;
            print_outcome(&outcome, *format)?;
        }
    }

    Ok(())
}

/// 啟動時一次載入全部模型；之後 Registry 不再變動
async fn start(config: &ModelConfig) -> disease_risk::Result<RiskDispatcher> {
    let storage = LocalStorage::new(config.model_dir.clone());
    let registry = ModelRegistry::load(&storage, config).await?;
    Ok(RiskDispatcher::new(Arc::new(registry)))
}

fn predict_once(dispatcher: &RiskDispatcher, args: &PredictArgs) -> disease_risk::Result<Outcome> {
    let base = match &args.input {
        Some(path) => {
            tracing::debug!("Reading field values from: {}", path);
            shell::read_input_file(path)?
        }
        None => RawFields::new(),
    };
    let fields = shell::merge_fields(base, args.fields.iter().cloned());

    dispatcher.predict(args.condition, &fields)
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) -> disease_risk::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", shell::render_text(outcome)),
        OutputFormat::Json => println!("{}", shell::render_json(outcome)?),
    }
    Ok(())
}

fn report_error(e: &PredictError) {
    if e.category() == ErrorCategory::Internal {
        tracing::error!("🐛 Defect detected: {} (please report this)", e);
    } else {
        tracing::error!(
            "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
    }
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &PredictError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,   // 輸入錯誤，重新輸入即可
        ErrorSeverity::High => 1,     // 程式缺陷
        ErrorSeverity::Critical => 3, // 模型或設定無法載入
    }
}
