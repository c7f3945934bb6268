use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::payload::{
    build_form_body, parse_reviews_response, ReviewPage, GATEWAY_ERROR_MARKER,
    MAX_COUNT_EACH_FETCH,
};
use super::source::{FetchRequest, ReviewSource};
use crate::infrastructure::error::{ExportError, Result};
use crate::infrastructure::network::NetworkConfig;
use crate::models::ReviewRecord;

/// Play 商店默认地址
pub const DEFAULT_BASE_URL: &str = "https://play.google.com";

/// Google Play 评论数据源
pub struct GooglePlaySource {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl GooglePlaySource {
    /// 创建新的数据源
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let network = NetworkConfig::default();
        Self {
            client,
            base_url,
            max_retries: network.max_retries,
            retry_delay: network.retry_delay,
        }
    }

    /// 设置限流重试策略，第 n 次重试前等待 `retry_delay * n`
    pub fn with_retry(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    fn endpoint(&self, lang: &str, country: &str) -> String {
        format!(
            "{}/_/PlayStoreUi/data/batchexecute?hl={}&gl={}",
            self.base_url,
            urlencoding::encode(lang),
            urlencoding::encode(country)
        )
    }

    /// 抓取单页评论
    async fn fetch_page(
        &self,
        request: &FetchRequest,
        page_size: usize,
        token: Option<&str>,
    ) -> Result<ReviewPage> {
        let url = self.endpoint(&request.lang, &request.country);
        let body = build_form_body(
            &request.app_id,
            request.sort,
            page_size,
            request.filter_score,
            token,
        );

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .body(body)
            .send()
            .await
            .map_err(|e| ExportError::network(
                format!("Failed to send request to Google Play: {}", e),
                Some(url.clone()),
            ))?;

        let status = response.status();
        let text = response.text().await
            .map_err(|e| ExportError::network(
                format!("Failed to read Google Play response: {}", e),
                Some(url.clone()),
            ))?;

        if text.contains(GATEWAY_ERROR_MARKER) {
            return Err(ExportError::RateLimited {
                message: format!("Google Play rejected the request for {}", request.app_id),
            });
        }

        if !status.is_success() {
            let message: String = text.chars().take(200).collect();
            return Err(ExportError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        parse_reviews_response(&text)
    }

    /// 抓取单页评论，被限流时按递增间隔重试
    async fn fetch_page_with_retry(
        &self,
        request: &FetchRequest,
        page_size: usize,
        token: Option<&str>,
    ) -> Result<ReviewPage> {
        let mut attempt = 0u32;

        loop {
            match self.fetch_page(request, page_size, token).await {
                Err(ExportError::RateLimited { message }) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.retry_delay * attempt;
                    warn!(
                        app_id = %request.app_id,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "{}, retrying",
                        message
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl ReviewSource for GooglePlaySource {
    fn name(&self) -> &str {
        "google-play"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<ReviewRecord>> {
        let mut reviews: Vec<ReviewRecord> = Vec::with_capacity(request.count.min(1024));
        let mut token: Option<String> = None;
        let mut page_index = 0usize;

        while reviews.len() < request.count {
            let page_size = (request.count - reviews.len()).min(MAX_COUNT_EACH_FETCH);
            let page = self
                .fetch_page_with_retry(request, page_size, token.as_deref())
                .await?;
            page_index += 1;

            debug!(
                app_id = %request.app_id,
                page = page_index,
                requested = page_size,
                received = page.reviews.len(),
                has_next = page.next_token.is_some(),
                "fetched review page"
            );

            if page.reviews.is_empty() {
                break;
            }
            reviews.extend(page.reviews);

            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        if reviews.len() > request.count {
            warn!(
                received = reviews.len(),
                requested = request.count,
                "upstream returned more reviews than requested, truncating"
            );
            reviews.truncate(request.count);
        }

        Ok(reviews)
    }
}
