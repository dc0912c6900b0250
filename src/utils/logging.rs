/// 日志工具模块
///
/// 提供日志初始化和输出格式化的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 默认级别为 info，可通过 `RUST_LOG` 覆盖。重复调用不会报错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录服务启动信息
///
/// # 参数
/// - `config`: 已加载的配置
pub fn log_startup(config: &Config) {
    let providers = &config.llm.providers;

    info!("{}", "=".repeat(60));
    info!("古文解析服务启动中...");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("默认模型: {}", config.llm.default_model);
    info!("标注模型: {}", config.llm.annotate_model);
    info!("请求超时: {} 秒", config.llm.timeout_secs);

    if providers.modelscope.api_key.is_empty() {
        warn!("警告: 未设置 MODELSCOPE_API_KEY 环境变量!");
        warn!("请设置环境变量后重启服务:");
        warn!("  export MODELSCOPE_API_KEY=your_api_key_here");
    } else {
        info!("ModelScope API Key: {}", mask_key(&providers.modelscope.api_key));
    }
    if providers.deepseek.api_key.is_empty() {
        warn!("未设置 DEEPSEEK_API_KEY，DeepSeek 模型不可用");
    } else {
        info!("DeepSeek API Key: {}", mask_key(&providers.deepseek.api_key));
    }

    info!("服务地址: http://{}", config.server.bind_addr());
    info!("{}", "=".repeat(60));
}

/// 遮盖 API Key，只保留前 8 位和后 4 位
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
