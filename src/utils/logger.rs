use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let filter = default_filter(verbose, level);

    // try_init：測試或重複呼叫時不會 panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    let filter = default_filter(verbose, level);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .try_init();
}

// 優先順序：RUST_LOG > --verbose > 設定檔 logging.level > 預設
fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("disease_risk=debug,info")
        } else if let Some(level) = level {
            EnvFilter::new(format!("disease_risk={}", level))
        } else {
            EnvFilter::new("disease_risk=info")
        }
    })
}
