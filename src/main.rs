use clap::Parser;
use course_table::adapters::console::ConsoleSink;
use course_table::utils::{logger, validation::Validate};
use course_table::{run, CliConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting course-table CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let input = config
        .interactive
        .then(|| BufReader::new(tokio::io::stdin()));
    let sink = ConsoleSink::new(std::io::stdout());

    let error = match run(&config, &config.title, sink, input).await {
        Ok(report) => {
            for path in &report.written {
                tracing::info!("📁 Output saved to: {}", path);
                println!("📁 Output saved to: {}", path);
            }
            match report.load_error {
                None => {
                    println!("✅ Course table rendered successfully!");
                    return Ok(());
                }
                Some(e) => e,
            }
        }
        Err(e) => e,
    };

    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());

    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());

    std::process::exit(error.severity().exit_code());
}
