use std::io;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
    pub include_file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            include_file_location: false,
        }
    }
}

impl LoggingConfig {
    /// 根据 debug 开关生成配置
    pub fn for_debug(debug: bool) -> Self {
        if debug {
            Self {
                level: Level::DEBUG,
                format: LogFormat::Pretty,
                include_file_location: true,
            }
        } else {
            Self::default()
        }
    }

    /// 构建过滤器，RUST_LOG 中的指令优先生效
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        let filter = EnvFilter::from_default_env()
            .add_directive(format!("play_review_export={}", self.level).parse()?);
        Ok(filter)
    }
}

/// 日志格式
#[derive(Debug, Clone)]
pub enum LogFormat {
    /// 人类可读的格式
    Pretty,
    /// 紧凑格式
    Compact,
}

/// 设置日志系统
///
/// 日志统一写到标准错误，标准输出只保留完成提示。
pub fn setup_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = config.env_filter()?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .with_file(config.include_file_location)
        .with_line_number(config.include_file_location);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
