use clap::Parser;
use play_review_export::cli::args::Args;
use play_review_export::commands::{completion_message, handle_export};
use play_review_export::config::Config;
use play_review_export::infrastructure::logging::{setup_logging, LoggingConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;

    config.update_from_args(&args);
    config.validate()?;

    setup_logging(LoggingConfig::for_debug(config.debug))?;

    // 抓取或写入失败时直接返回错误，不打印完成提示
    let summary = handle_export(&config).await?;
    println!("{}", completion_message(&summary.path));

    Ok(())
}
