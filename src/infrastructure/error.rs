use thiserror::Error;

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("配置错误: {message}")]
    Configuration { message: String },

    #[error("网络错误: {message}")]
    Network { message: String, url: Option<String> },

    #[error("上游服务错误: HTTP {status} - {message}")]
    Upstream { status: u16, message: String },

    #[error("上游服务限流: {message}")]
    RateLimited { message: String },

    #[error("解析错误: {message}")]
    Parse { message: String },

    #[error("文件系统错误: {path} - {message}")]
    FileSystem { path: String, message: String },
}

impl ExportError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        ExportError::Configuration {
            message: message.into(),
        }
    }

    /// 创建网络错误
    pub fn network(message: impl Into<String>, url: Option<String>) -> Self {
        ExportError::Network {
            message: message.into(),
            url,
        }
    }

    /// 创建解析错误
    pub fn parse(message: impl Into<String>) -> Self {
        ExportError::Parse {
            message: message.into(),
        }
    }

    /// 创建文件系统错误
    pub fn file_system(path: impl Into<String>, message: impl Into<String>) -> Self {
        ExportError::FileSystem {
            path: path.into(),
            message: message.into(),
        }
    }

    /// 是否由上游服务引起
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ExportError::Network { .. }
                | ExportError::Upstream { .. }
                | ExportError::RateLimited { .. }
                | ExportError::Parse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
