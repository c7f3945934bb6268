use clap::Parser;
use std::path::PathBuf;

use crate::models::Sort;

#[derive(Parser, Debug)]
#[command(
    name = "play-review-export",
    version,
    about = "抓取 Google Play 应用评论并导出为 CSV",
    long_about = "play-review-export 抓取指定应用的 Google Play 评论，只保留 userName、score、content 三列并写入 CSV 文件。不带任何参数运行时导出 com.duolingo 最新的 4000 条英文（美国区）评论到 duolingo_reviews.csv。"
)]
pub struct Args {
    /// 应用 ID（默认: com.duolingo）
    #[arg(long, value_name = "APP_ID")]
    pub app_id: Option<String>,

    /// 评论语言（默认: en）
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// 国家/地区（默认: us）
    #[arg(long, value_name = "COUNTRY")]
    pub country: Option<String>,

    /// 排序方式: newest, most-relevant, rating（默认: newest）
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<Sort>,

    /// 最多抓取的评论数（默认: 4000）
    #[arg(short, long, value_name = "N")]
    pub count: Option<usize>,

    /// 只抓取指定星级的评论（1-5）
    #[arg(long, value_name = "STARS", value_parser = clap::value_parser!(u8).range(1..=5))]
    pub score: Option<u8>,

    /// 输出文件路径（默认: duolingo_reviews.csv）
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}
