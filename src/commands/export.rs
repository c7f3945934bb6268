use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::play::{FetchRequest, GooglePlaySource, ReviewSource};
use crate::export::write_csv_file;
use crate::infrastructure::error::Result;
use crate::infrastructure::network::build_client;
use crate::models::ExportRow;

/// 导出结果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub requested: usize,
    pub written: usize,
}

/// 评论导出器：抓取、投影、写入
pub struct ReviewExporter {
    source: Arc<dyn ReviewSource>,
}

impl ReviewExporter {
    pub fn new(source: Arc<dyn ReviewSource>) -> Self {
        Self { source }
    }

    /// 执行一次导出
    ///
    /// 先完整抓取再打开输出文件，抓取失败时不会触碰已有文件。
    pub async fn export(&self, request: &FetchRequest, output: &Path) -> Result<ExportSummary> {
        let start_time = Instant::now();

        info!(
            source = self.source.name(),
            app_id = %request.app_id,
            lang = %request.lang,
            country = %request.country,
            sort = %request.sort,
            count = request.count,
            "fetching reviews"
        );

        let records = self.source.fetch(request).await?;

        if records.len() < request.count {
            warn!(
                requested = request.count,
                received = records.len(),
                "upstream returned fewer reviews than requested"
            );
        }

        let rows: Vec<ExportRow> = records.into_iter().map(ExportRow::from).collect();
        write_csv_file(output, &rows)?;

        info!(
            path = %output.display(),
            rows = rows.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "reviews exported"
        );

        Ok(ExportSummary {
            path: output.to_path_buf(),
            requested: request.count,
            written: rows.len(),
        })
    }
}

/// 按配置导出 Google Play 评论
pub async fn handle_export(config: &Config) -> anyhow::Result<ExportSummary> {
    let network = config.network_config();
    let client = build_client(&network)?;
    let source = Arc::new(
        GooglePlaySource::new(client, config.base_url.as_str())
            .with_retry(network.max_retries, network.retry_delay),
    );
    let exporter = ReviewExporter::new(source);

    let summary = exporter
        .export(&config.fetch_request(), &config.output)
        .await
        .map_err(|e| {
            debug!(upstream = e.is_upstream(), error = %e, "export failed");
            e
        })?;
    Ok(summary)
}

/// 写入成功后的提示
pub fn completion_message(path: &Path) -> String {
    format!("Scraping complete! Data saved to {}", path.display())
}
