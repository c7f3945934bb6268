use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use crate::infrastructure::error::ExportError;

/// 网络客户端配置
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            user_agent: format!("play-review-export/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

impl NetworkConfig {
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// 按配置构建 HTTP 客户端
pub fn build_client(config: &NetworkConfig) -> Result<Client, ExportError> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| ExportError::network(
            format!("Failed to create HTTP client: {}", e),
            None
        ))
}
