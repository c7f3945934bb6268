use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::args::Args;
use crate::core::play::{FetchRequest, DEFAULT_BASE_URL};
use crate::infrastructure::error::ExportError;
use crate::infrastructure::network::NetworkConfig;
use crate::models::Sort;

pub const DEFAULT_APP_ID: &str = "com.duolingo";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_COUNT: usize = 4000;
pub const DEFAULT_OUTPUT: &str = "duolingo_reviews.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_PREFIX: &str = "PLAY_REVIEW_EXPORT_";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app_id: String,
    pub lang: String,
    pub country: String,
    pub sort: Sort,
    pub count: usize,
    pub filter_score: Option<u8>,
    pub output: PathBuf,
    pub base_url: String,
    pub timeout_secs: u64,
    pub debug: bool,
}

/// TOML 配置文件结构，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    app_id: Option<String>,
    lang: Option<String>,
    country: Option<String>,
    sort: Option<Sort>,
    count: Option<usize>,
    score: Option<u8>,
    output: Option<PathBuf>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    debug: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            lang: DEFAULT_LANG.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            sort: Sort::Newest,
            count: DEFAULT_COUNT,
            filter_score: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 < 配置文件 < 环境变量
    pub fn load(config_file: Option<&Path>) -> Result<Self, ExportError> {
        let mut config = Config::default();

        if let Some(path) = config_file {
            config.load_from_file(path)?;
        }

        // 加载 .env 文件
        #[cfg(not(test))]
        config.load_from_env_file();
        // 加载环境变量（覆盖配置文件）
        config.load_from_env()?;

        Ok(config)
    }

    pub fn load_from_env_file(&mut self) {
        // 尝试从用户主目录加载
        if let Ok(home) = env::var("HOME") {
            let user_env_path = PathBuf::from(format!("{}/.play-review-export/.env", home));
            if user_env_path.exists() {
                dotenvy::from_path(user_env_path).ok();
            }
        }

        // 尝试从当前目录加载
        dotenvy::dotenv().ok();
    }

    pub fn load_from_env(&mut self) -> Result<(), ExportError> {
        self.apply_env(|key| env::var(key).ok())
    }

    /// 按给定的查找函数应用 `PLAY_REVIEW_EXPORT_*` 变量
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(format!("{}{}", ENV_PREFIX, name).as_str());

        if let Some(app_id) = var("APP_ID") {
            self.app_id = app_id;
        }
        if let Some(lang) = var("LANG") {
            self.lang = lang;
        }
        if let Some(country) = var("COUNTRY") {
            self.country = country;
        }
        if let Some(sort) = var("SORT") {
            self.sort = sort.parse().map_err(ExportError::config)?;
        }
        if let Some(count) = var("COUNT") {
            self.count = count.trim().parse().map_err(|_| {
                ExportError::config(format!("Invalid {}COUNT: {}", ENV_PREFIX, count))
            })?;
        }
        if let Some(output) = var("OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(url) = var("BASE_URL") {
            self.base_url = url;
        }
        if let Some(secs) = var("TIMEOUT_SECS") {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                ExportError::config(format!("Invalid {}TIMEOUT_SECS: {}", ENV_PREFIX, secs))
            })?;
        }
        if let Some(debug) = var("DEBUG") {
            self.debug = matches!(debug.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<(), ExportError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExportError::file_system(path.display().to_string(), e.to_string()))?;
        self.apply_toml(&content)
    }

    fn apply_toml(&mut self, content: &str) -> Result<(), ExportError> {
        let file: FileConfig = toml::from_str(content)
            .map_err(|e| ExportError::config(format!("Invalid config file: {}", e)))?;

        if let Some(app_id) = file.app_id {
            self.app_id = app_id;
        }
        if let Some(lang) = file.lang {
            self.lang = lang;
        }
        if let Some(country) = file.country {
            self.country = country;
        }
        if let Some(sort) = file.sort {
            self.sort = sort;
        }
        if let Some(count) = file.count {
            self.count = count;
        }
        if file.score.is_some() {
            self.filter_score = file.score;
        }
        if let Some(output) = file.output {
            self.output = output;
        }
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        Ok(())
    }

    pub fn update_from_args(&mut self, args: &Args) {
        // 命令行参数优先级最高
        if let Some(app_id) = &args.app_id {
            self.app_id = app_id.clone();
        }
        if let Some(lang) = &args.lang {
            self.lang = lang.clone();
        }
        if let Some(country) = &args.country {
            self.country = country.clone();
        }
        if let Some(sort) = args.sort {
            self.sort = sort;
        }
        if let Some(count) = args.count {
            self.count = count;
        }
        if args.score.is_some() {
            self.filter_score = args.score;
        }
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        if args.debug {
            self.debug = true;
        }
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if self.app_id.trim().is_empty() {
            return Err(ExportError::config("App id must not be empty"));
        }
        if self.lang.trim().is_empty() {
            return Err(ExportError::config("Language must not be empty"));
        }
        if self.country.trim().is_empty() {
            return Err(ExportError::config("Country must not be empty"));
        }
        if let Some(score) = self.filter_score {
            if !(1..=5).contains(&score) {
                return Err(ExportError::config(format!(
                    "Score filter must be between 1 and 5, got {}",
                    score
                )));
            }
        }
        if self.output.as_os_str().is_empty() {
            return Err(ExportError::config("Output path must not be empty"));
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ExportError::config(format!("Invalid base URL: {}", self.base_url)));
        }
        if self.timeout_secs == 0 {
            return Err(ExportError::config("Timeout must be at least 1 second"));
        }
        Ok(())
    }

    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            app_id: self.app_id.clone(),
            lang: self.lang.clone(),
            country: self.country.clone(),
            sort: self.sort,
            count: self.count,
            filter_score: self.filter_score,
        }
    }

    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig::default().with_timeout_secs(self.timeout_secs)
    }
}
