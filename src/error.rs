use thiserror::Error;

use crate::annotation::ParseError;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// LLM 服务错误
    #[error("{0}")]
    Llm(#[from] LlmError),
    /// 标注结果解析错误
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// LLM 调用错误
///
/// 覆盖从缺少密钥到响应格式异常的所有外部调用失败，不做自动重试。
#[derive(Debug, Error)]
pub enum LlmError {
    /// 未配置 API Key
    #[error("未设置 {provider} API Key。请设置后重启服务。")]
    MissingApiKey { provider: String },

    /// 构建请求体失败
    #[error("构建 {provider} 请求失败: {message}")]
    RequestBuild { provider: String, message: String },

    /// 网络或超时错误
    #[error("调用 {provider} API 失败: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// 非 2xx 响应
    #[error("调用 {provider} API 失败: HTTP {status} - {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    /// 响应中缺少 choices
    #[error("{provider} API 返回格式异常: {body}")]
    MalformedEnvelope { provider: String, body: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 环境变量解析失败
    #[error("环境变量 {var} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    InvalidEnv {
        var: String,
        value: String,
        expected_type: &'static str,
    },
}

// ========== 便捷构造函数 ==========

impl LlmError {
    pub fn transport(provider: impl Into<String>, source: reqwest::Error) -> Self {
        LlmError::Transport {
            provider: provider.into(),
            source,
        }
    }

    pub fn missing_key(provider: impl Into<String>) -> Self {
        LlmError::MissingApiKey {
            provider: provider.into(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
