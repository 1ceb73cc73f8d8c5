use anyhow::Context;
use clap::Parser;
use course_table::adapters::console::ConsoleSink;
use course_table::core::ConfigProvider;
use course_table::utils::{logger, validation::Validate};
use course_table::{run, TomlConfig};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "toml-render")]
#[command(about = "Render a course table with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "course-table.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines instead of compact text
    #[arg(long)]
    json_logs: bool,

    /// Override the search term from config
    #[arg(long)]
    search: Option<String>,

    /// Override the year filter from config
    #[arg(long)]
    year: Option<String>,

    /// Dry run - show what would be fetched and written without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 應用命令列覆蓋設定
    if let Some(search) = args.search {
        tracing::info!("🔧 Search overridden to: {:?}", search);
        config.view.search = Some(search);
    }
    if let Some(year) = args.year {
        tracing::info!("🔧 Year filter overridden to: {}", year);
        config.view.year = Some(year);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, args.dry_run);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        return Ok(());
    }

    let title = config.title().to_string();
    let sink = ConsoleSink::new(std::io::stdout());
    let report = run(&config, &title, sink, None::<BufReader<tokio::io::Stdin>>)
        .await
        .context("Writing output failed")?;

    for path in &report.written {
        println!("📁 Output saved to: {}", path);
    }

    if let Some(e) = report.load_error {
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    println!("✅ Course table rendered successfully!");
    Ok(())
}

fn display_config_summary(config: &TomlConfig, dry_run: bool) {
    println!("📋 Configuration Summary:");
    println!("  Page: {}", config.page.name);
    if let Some(description) = &config.page.description {
        println!("  Description: {}", description);
    }
    println!("  Source: {}", config.source_url());
    match config.request_timeout() {
        Some(timeout) => println!("  Timeout: {:?}", timeout),
        None => println!("  Timeout: none (waits until the source responds)"),
    }
    if let Some(headers) = &config.source.headers {
        println!("  Headers: {} custom headers", headers.len());
    }

    let criteria = config.initial_criteria();
    println!("  Search: {:?}", criteria.search);
    println!("  Year: {}", criteria.year.token());

    println!("  Output: {}", config.output_path());
    for format in config.output_formats() {
        println!("    {} -> {}", format, config.output_filename(format));
    }

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
