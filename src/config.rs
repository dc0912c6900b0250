//! 程序配置
//!
//! 加载顺序：内置默认值 → TOML 配置文件（可选） → 环境变量。
//! 配置在启动时加载一次，之后只读。

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "GUWEN_CONFIG";
/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "guwen.toml";

/// 程序配置
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

/// HTTP 服务配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5004,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// LLM 调用配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 翻译和问答默认使用的模型别名
    pub default_model: String,
    /// 自动标注使用的模型别名
    pub annotate_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub providers: Providers,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            default_model: "xunzi-qwen2".to_string(),
            annotate_model: "xunzi-qwen2".to_string(),
            temperature: 0.75,
            max_tokens: 2000,
            top_p: 0.9,
            providers: Providers::default(),
        }
    }
}

/// 各服务商的端点配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Providers {
    pub deepseek: ProviderConfig,
    pub modelscope: ProviderConfig,
    pub xunzi_cloud: ProviderConfig,
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            deepseek: ProviderConfig {
                api_url: "https://api.deepseek.com/v1/chat/completions".to_string(),
                api_key: String::new(),
                model: "deepseek-chat".to_string(),
            },
            modelscope: ProviderConfig {
                api_url: "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions"
                    .to_string(),
                api_key: String::new(),
                model: "qwen2.5-7b-instruct".to_string(),
            },
            xunzi_cloud: ProviderConfig {
                api_url: "https://ms-ens-035a4e62-37b6.api-inference.modelscope.cn/v1/chat/completions"
                    .to_string(),
                api_key: String::new(),
                model: "Xunzillm4cc/Xunzi-Qwen2-1.5B".to_string(),
            },
        }
    }
}

impl Providers {
    /// 配置文件中只写了部分字段的服务商，其余字段取内置默认值
    fn fill_defaults(&mut self) {
        let defaults = Self::default();
        self.deepseek.fill_from(defaults.deepseek);
        self.modelscope.fill_from(defaults.modelscope);
        self.xunzi_cloud.fill_from(defaults.xunzi_cloud);
    }
}

/// 单个服务商的端点
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// chat/completions 完整地址
    pub api_url: String,
    pub api_key: String,
    /// 实际调用的模型名
    pub model: String,
}

impl ProviderConfig {
    fn fill_from(&mut self, defaults: ProviderConfig) {
        if self.api_url.is_empty() {
            self.api_url = defaults.api_url;
        }
        if self.model.is_empty() {
            self.model = defaults.model;
        }
    }
}

impl Config {
    /// 从默认位置加载配置
    ///
    /// 配置文件路径取自 `GUWEN_CONFIG`，未设置时使用 `guwen.toml`；文件不存在时只使用默认值。
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file_or_default(Path::new(&path))?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// 读取 TOML 配置文件，文件不存在时返回默认配置
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.llm.providers.fill_defaults();
        Ok(config)
    }

    /// 用环境变量覆盖配置
    ///
    /// `lookup` 便于测试时注入变量表。
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("DEEPSEEK_API_KEY") {
            self.llm.providers.deepseek.api_key = key;
        }
        if let Some(key) = lookup("MODELSCOPE_API_KEY") {
            self.llm.providers.modelscope.api_key = key.clone();
            self.llm.providers.xunzi_cloud.api_key = key;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = parse_env("SERVER_PORT", port, "u16")?;
        }
        if let Some(timeout) = lookup("LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_env("LLM_TIMEOUT_SECS", timeout, "u64")?;
        }
        if let Some(model) = lookup("LLM_DEFAULT_MODEL") {
            self.llm.default_model = model;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(
    var: &str,
    value: String,
    expected_type: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value,
        expected_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:5004");
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.llm.default_model, "xunzi-qwen2");
        assert_eq!(config.llm.max_tokens, 2000);
        assert!(config.llm.providers.deepseek.api_key.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let content = r#"
[server]
port = 8080

[llm]
timeout_secs = 30

[llm.providers.deepseek]
api_key = "sk-test"
"#;
        let config = Config::from_toml_str(content, "test.toml").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.llm.providers.deepseek.api_key, "sk-test");
        assert_eq!(config.llm.providers.deepseek.model, "deepseek-chat");
        assert_eq!(config.llm.providers.modelscope.model, "qwen2.5-7b-instruct");
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml_str("[server\nport = ", "bad.toml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = Config::from_file_or_default(Path::new("/nonexistent/guwen.toml")).unwrap();
        assert_eq!(config.server.port, 5004);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("MODELSCOPE_API_KEY", "ms-key"),
            ("SERVER_PORT", "9000"),
            ("LLM_DEFAULT_MODEL", "deepseek-chat"),
        ]);
        let mut config = Config::default();
        config
            .apply_env(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.llm.providers.modelscope.api_key, "ms-key");
        assert_eq!(config.llm.providers.xunzi_cloud.api_key, "ms-key");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.default_model, "deepseek-chat");
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = Config::default();
        let result = config.apply_env(|name| (name == "SERVER_PORT").then(|| "abc".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }
}
