use async_trait::async_trait;

use crate::config::{DEFAULT_APP_ID, DEFAULT_COUNT, DEFAULT_COUNTRY, DEFAULT_LANG};
use crate::infrastructure::Result;
use crate::models::{ReviewRecord, Sort};

/// 一次评论抓取的参数
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub app_id: String,
    pub lang: String,
    pub country: String,
    pub sort: Sort,
    pub count: usize,
    /// 仅抓取指定星级（1-5），None 表示全部
    pub filter_score: Option<u8>,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            lang: DEFAULT_LANG.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            sort: Sort::Newest,
            count: DEFAULT_COUNT,
            filter_score: None,
        }
    }
}

/// 评论数据源接口
///
/// 返回的评论数量可以少于 `count`，顺序即上游顺序。
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// 数据源名称
    fn name(&self) -> &str;

    /// 抓取最多 `request.count` 条评论
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<ReviewRecord>>;
}
